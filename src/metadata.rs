use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::StatsError;
use crate::html::{element_text, nested_text, select_text};
use crate::transform::BoxscoreTable;

/// Game-level facts read from the page header. Text fields missing from
/// the page are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetadata {
    pub game_exid: Option<String>,
    pub date: String,
    pub time: String,
    pub league: String,
    pub season: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
    pub main_referee: String,
    pub aux_referee: String,
    pub home_team_exid: Option<String>,
    pub away_team_exid: Option<String>,
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("metadata selector")
}

static LEGACY_DATE: Lazy<Selector> = Lazy::new(|| sel("span#fechaLabel"));
static LEGACY_TIME: Lazy<Selector> = Lazy::new(|| sel("span#horaLabel"));
static LEGACY_LEAGUE: Lazy<Selector> = Lazy::new(|| sel("span#paginaTitulo_ligaLabel"));
static LEGACY_SEASON: Lazy<Selector> = Lazy::new(|| sel("span#paginaTitulo_temporadaLabel"));
static LEGACY_HOME: Lazy<Selector> = Lazy::new(|| sel("a#equipoLocalHyperLink"));
static LEGACY_AWAY: Lazy<Selector> = Lazy::new(|| sel("a#equipoVisitanteHyperLink"));
static LEGACY_HOME_SCORE: Lazy<Selector> = Lazy::new(|| sel("span#resultadoLocalLabel"));
static LEGACY_AWAY_SCORE: Lazy<Selector> = Lazy::new(|| sel("span#resultadoVisitanteLabel"));
static LEGACY_MAIN_REF: Lazy<Selector> = Lazy::new(|| sel("span#arbitroPrincipalLabel"));
static LEGACY_AUX_REF: Lazy<Selector> = Lazy::new(|| sel("span#arbitroAuxiliarLabel"));

static LIVE_DATE: Lazy<Selector> = Lazy::new(|| sel("div.fecha"));
static LIVE_LEAGUE: Lazy<Selector> = Lazy::new(|| sel("span.liga"));
static LIVE_SEASON: Lazy<Selector> = Lazy::new(|| sel("span.temporada"));
static LIVE_HOME: Lazy<Selector> =
    Lazy::new(|| sel("span#_ctl0_MainContentPlaceHolderMaster_equipoLocalNombre"));
static LIVE_AWAY: Lazy<Selector> =
    Lazy::new(|| sel("span#_ctl0_MainContentPlaceHolderMaster_equipoVisitanteNombre"));
static LIVE_HOME_SCORE: Lazy<Selector> =
    Lazy::new(|| sel("div.columna.equipo.local span.resultado"));
static LIVE_AWAY_SCORE: Lazy<Selector> =
    Lazy::new(|| sel("div.columna.equipo.visitante span.resultado"));
static LIVE_REFEREES: Lazy<Selector> = Lazy::new(|| sel("div.arbitros span.txt.referee"));

static SCRIPT: Lazy<Selector> = Lazy::new(|| sel("script"));
static GAME_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"idPartido:\s*"(\d+)""#).expect("game id regex"));

pub fn legacy_metadata(doc: &Html) -> GameMetadata {
    GameMetadata {
        game_exid: game_exid(doc),
        date: select_text(doc, &LEGACY_DATE),
        time: select_text(doc, &LEGACY_TIME),
        league: select_text(doc, &LEGACY_LEAGUE),
        season: select_text(doc, &LEGACY_SEASON),
        home_team: select_text(doc, &LEGACY_HOME),
        away_team: select_text(doc, &LEGACY_AWAY),
        home_score: select_text(doc, &LEGACY_HOME_SCORE),
        away_score: select_text(doc, &LEGACY_AWAY_SCORE),
        main_referee: select_text(doc, &LEGACY_MAIN_REF),
        aux_referee: select_text(doc, &LEGACY_AUX_REF),
        home_team_exid: None,
        away_team_exid: None,
    }
}

pub fn live_metadata(doc: &Html) -> GameMetadata {
    // "Fecha 12/10/2024 - 18:30"
    let stamp = nested(doc, &LIVE_DATE);
    let tokens: Vec<&str> = stamp.split_whitespace().collect();
    let (date, time) = match tokens.as_slice() {
        [_, date, .., time] => (date.to_string(), time.to_string()),
        _ => (String::new(), String::new()),
    };

    let mut referees = doc
        .select(&LIVE_REFEREES)
        .map(element_text)
        .filter(|name| !name.is_empty());

    GameMetadata {
        game_exid: game_exid(doc),
        date,
        time,
        league: nested(doc, &LIVE_LEAGUE),
        season: nested(doc, &LIVE_SEASON),
        home_team: nested(doc, &LIVE_HOME),
        away_team: nested(doc, &LIVE_AWAY),
        home_score: nested(doc, &LIVE_HOME_SCORE),
        away_score: nested(doc, &LIVE_AWAY_SCORE),
        main_referee: referees.next().unwrap_or_default(),
        aux_referee: referees.next().unwrap_or_default(),
        home_team_exid: None,
        away_team_exid: None,
    }
}

fn nested(doc: &Html, selector: &Selector) -> String {
    nested_text(doc, selector).unwrap_or_default()
}

pub fn game_exid(doc: &Html) -> Option<String> {
    doc.select(&SCRIPT).find_map(|script| {
        let body: String = script.text().collect();
        GAME_ID_RE
            .captures(&body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

impl GameMetadata {
    /// Team ids come from the tables' player links, not from the header.
    pub fn attach_team_exids(&mut self, home: &BoxscoreTable, away: &BoxscoreTable) {
        self.home_team_exid = home.team_exid().map(str::to_string);
        self.away_team_exid = away.team_exid().map(str::to_string);
    }

    /// `dd/mm/YYYY` + `HH:MM`, when both are present and valid.
    pub fn game_at(&self) -> Option<NaiveDateTime> {
        if self.date.is_empty() || self.time.is_empty() {
            return None;
        }
        NaiveDateTime::parse_from_str(&format!("{} {}", self.date, self.time), "%d/%m/%Y %H:%M")
            .ok()
    }

    pub fn home_points(&self) -> Result<Option<u32>, StatsError> {
        parse_score("home_score", &self.home_score)
    }

    pub fn away_points(&self) -> Result<Option<u32>, StatsError> {
        parse_score("away_score", &self.away_score)
    }
}

fn parse_score(column: &str, text: &str) -> Result<Option<u32>, StatsError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| StatsError::field(column, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE_HEADER: &str = r#"
        <div class="fecha"><span></span><span>Fecha 12/10/2024 - 18:30</span></div>
        <span class="liga"><span></span></span>
        <span class="liga"><b><i></i></b><b>LIGA EBA</b></span>
        <span class="temporada">2024/2025</span>
        <span id="_ctl0_MainContentPlaceHolderMaster_equipoLocalNombre"><span>CB HERO</span></span>
        <span id="_ctl0_MainContentPlaceHolderMaster_equipoVisitanteNombre">CLUB VISITANTE</span>
        <div class="columna equipo local"><span class="resultado">75</span></div>
        <div class="columna equipo visitante"><span class="resultado"> 68 </span></div>
        <div class="arbitros">Arbitros
            <span class="txt referee">GOMEZ, A.</span> |
            <span class="txt referee">RUIZ, B.</span></div>
        <script>var cfg = { idPartido: "2291245", lang: "es" };</script>
    "#;

    #[test]
    fn live_header_fields() {
        let doc = Html::parse_document(LIVE_HEADER);
        let meta = live_metadata(&doc);
        assert_eq!(meta.date, "12/10/2024");
        assert_eq!(meta.time, "18:30");
        assert_eq!(meta.league, "LIGA EBA");
        assert_eq!(meta.season, "2024/2025");
        assert_eq!(meta.home_team, "CB HERO");
        assert_eq!(meta.away_team, "CLUB VISITANTE");
        assert_eq!(meta.home_points().unwrap(), Some(75));
        assert_eq!(meta.away_points().unwrap(), Some(68));
        assert_eq!(meta.main_referee, "GOMEZ, A.");
        assert_eq!(meta.aux_referee, "RUIZ, B.");
        assert_eq!(meta.game_exid.as_deref(), Some("2291245"));
        let at = meta.game_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), "2024-10-12 18:30");
    }

    #[test]
    fn live_header_tolerates_missing_fields() {
        let doc = Html::parse_document("<div class=\"fecha\"></div>");
        let meta = live_metadata(&doc);
        assert_eq!(meta, GameMetadata::default());
        assert_eq!(meta.game_at(), None);
        assert_eq!(meta.home_points().unwrap(), None);
    }

    #[test]
    fn legacy_header_fields() {
        let doc = Html::parse_document(
            r#"<span id="fechaLabel">05/03/2011</span><span id="horaLabel">20:00</span>
               <span id="paginaTitulo_ligaLabel">LIGA ADECCO ORO</span>
               <span id="paginaTitulo_temporadaLabel">2010/2011</span>
               <a id="equipoLocalHyperLink">  CB   UNO </a><span id="resultadoLocalLabel">81</span>
               <a id="equipoVisitanteHyperLink">CB DOS</a><span id="resultadoVisitanteLabel">x</span>
               <span id="arbitroPrincipalLabel">PEREZ, C.</span>"#,
        );
        let meta = legacy_metadata(&doc);
        assert_eq!(meta.home_team, "CB UNO");
        assert_eq!(meta.league, "LIGA ADECCO ORO");
        assert_eq!(meta.main_referee, "PEREZ, C.");
        assert_eq!(meta.aux_referee, "");
        assert_eq!(meta.home_points().unwrap(), Some(81));
        assert!(matches!(
            meta.away_points(),
            Err(StatsError::FieldFormat { .. })
        ));
        assert!(meta.game_at().is_some());
        assert_eq!(meta.game_exid, None);
    }
}
