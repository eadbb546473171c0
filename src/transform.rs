// Raw header/cell strings -> typed stat lines.
//
// The two layouts label the same statistics differently: the legacy grid
// uses short Spanish headers and packs pairs/triples into one cell, the live
// layout names each cell by class and splits most compound values.

use chrono::Duration;

use crate::entities::{StatLine, TOTAL_ROW};
use crate::error::StatsError;
use crate::rows::{RawRow, RawTable};

const PLAYER: &[&str] = &["Jugador", "nombre jugador"];
const NUMBER: &[&str] = &["N", "dorsal"];
const STARTER: &[&str] = &["I", "inicial"];
const MINUTES: &[&str] = &["Min", "minutos"];
const POINTS: &[&str] = &["Ptos", "puntos"];
const ASSISTS: &[&str] = &["As", "asistencias"];
const TURNOVERS: &[&str] = &["B.P", "perdidas"];
const STEALS: &[&str] = &["B.R", "recuperaciones"];
const DUNKS: &[&str] = &["Mat", "mates"];
const RANKING: &[&str] = &["Val", "valoracion"];
const POINT_BALANCE: &[&str] = &["+/-", "balance"];
const TWO_POINT: &[&str] = &["2 pt", "tiros dos"];
const THREE_POINT: &[&str] = &["3 pt", "tiros tres"];
const FIELD_GOAL: &[&str] = &["T.Camp", "tiros campo"];
const FREE_THROW: &[&str] = &["T.L", "tiros libres"];

const FOULS_PAIR: &[&str] = &["Faltas C R"];
const FOULS_SPLIT: [&str; 2] = ["faltas cometidas", "faltas recibidas"];
const BLOCKS_PAIR: &[&str] = &["Tapones Fa Co", "Tapones F C"];
const BLOCKS_SPLIT: [&str; 2] = ["tapones favor", "tapones contra"];
const REBOUNDS_SPLIT: [&str; 3] = ["rebotes defensivos", "rebotes ofensivos", "rebotes total"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReboundOrder {
    DefensiveOffensiveTotal,
    OffensiveDefensiveTotal,
}

/// Packed rebound headers seen across seasons. The letters differ per
/// season and so does the order; both are kept explicitly.
pub const REBOUND_HEADERS: [(&str, ReboundOrder); 3] = [
    ("Rebotes D O T", ReboundOrder::DefensiveOffensiveTotal),
    ("Rebotes Def Of To", ReboundOrder::DefensiveOffensiveTotal),
    ("Rebotes O D T", ReboundOrder::OffensiveDefensiveTotal),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairSource {
    Packed(String),
    Split { made: String, received: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReboundSource {
    Packed { label: String, order: ReboundOrder },
    Split {
        defensive: String,
        offensive: String,
        total: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub player: String,
    pub number: Option<String>,
    pub starter: Option<String>,
    pub minutes: String,
    pub points: String,
    pub assists: String,
    pub turnovers: String,
    pub steals: String,
    pub dunks: String,
    pub ranking: String,
    pub point_balance: String,
    pub two_point: String,
    pub three_point: String,
    pub field_goal: String,
    pub free_throw: String,
    pub rebounds: ReboundSource,
    pub fouls: PairSource,
    pub blocks: PairSource,
}

impl ColumnPlan {
    pub fn resolve(columns: &[String]) -> Result<Self, StatsError> {
        let require = |family: &'static str, candidates: &[&str]| {
            find_label(columns, candidates).ok_or_else(|| unknown(family, columns))
        };
        Ok(Self {
            player: require("player", PLAYER)?,
            number: find_label(columns, NUMBER),
            starter: find_label(columns, STARTER),
            minutes: require("minutes", MINUTES)?,
            points: require("points", POINTS)?,
            assists: require("assists", ASSISTS)?,
            turnovers: require("turnovers", TURNOVERS)?,
            steals: require("steals", STEALS)?,
            dunks: require("dunks", DUNKS)?,
            ranking: require("ranking", RANKING)?,
            point_balance: require("point_balance", POINT_BALANCE)?,
            two_point: require("2_point", TWO_POINT)?,
            three_point: require("3_point", THREE_POINT)?,
            field_goal: require("field_goal", FIELD_GOAL)?,
            free_throw: require("free_throw", FREE_THROW)?,
            rebounds: resolve_rebounds(columns)?,
            fouls: resolve_pair(columns, "fouls", FOULS_PAIR, FOULS_SPLIT)?,
            blocks: resolve_pair(columns, "blocks", BLOCKS_PAIR, BLOCKS_SPLIT)?,
        })
    }
}

fn find_label(columns: &[String], candidates: &[&str]) -> Option<String> {
    columns
        .iter()
        .find(|c| candidates.contains(&c.as_str()))
        .cloned()
}

fn unknown(family: &'static str, columns: &[String]) -> StatsError {
    StatsError::UnknownColumn {
        family,
        headers: columns.to_vec(),
    }
}

fn resolve_rebounds(columns: &[String]) -> Result<ReboundSource, StatsError> {
    for (label, order) in REBOUND_HEADERS {
        if columns.iter().any(|c| c == label) {
            return Ok(ReboundSource::Packed {
                label: label.to_string(),
                order,
            });
        }
    }
    let [defensive, offensive, total] = REBOUNDS_SPLIT;
    match (
        find_label(columns, &[defensive]),
        find_label(columns, &[offensive]),
        find_label(columns, &[total]),
    ) {
        (Some(defensive), Some(offensive), Some(total)) => Ok(ReboundSource::Split {
            defensive,
            offensive,
            total,
        }),
        _ => Err(unknown("rebounds", columns)),
    }
}

fn resolve_pair(
    columns: &[String],
    family: &'static str,
    packed: &[&str],
    [made, received]: [&str; 2],
) -> Result<PairSource, StatsError> {
    if let Some(label) = find_label(columns, packed) {
        return Ok(PairSource::Packed(label));
    }
    match (find_label(columns, &[made]), find_label(columns, &[received])) {
        (Some(made), Some(received)) => Ok(PairSource::Split { made, received }),
        _ => Err(unknown(family, columns)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRow {
    pub player: String,
    pub player_exid: Option<String>,
    pub team_exid: Option<String>,
    pub stats: StatLine,
}

/// Player rows followed by exactly one row named `TOTAL_ROW`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxscoreTable {
    pub rows: Vec<TransformedRow>,
}

impl BoxscoreTable {
    pub fn players(&self) -> &[TransformedRow] {
        match self.rows.split_last() {
            Some((_, players)) => players,
            None => &[],
        }
    }

    pub fn total(&self) -> Option<&TransformedRow> {
        self.rows.last()
    }

    /// External team id carried by the first row's player link.
    pub fn team_exid(&self) -> Option<&str> {
        self.rows
            .first()
            .and_then(|row| row.team_exid.as_deref())
            .filter(|v| !v.is_empty())
    }
}

/// Types every row of `raw`. The last row is the aggregate row: its point
/// balance cell is not trusted and is rebuilt from the player rows.
pub fn transform_table(raw: &RawTable) -> Result<BoxscoreTable, StatsError> {
    let Some(last) = raw.rows.len().checked_sub(1) else {
        return Err(StatsError::TableNotFound {
            selector: "tr".to_string(),
        });
    };
    let plan = ColumnPlan::resolve(&raw.columns)?;

    let mut rows = Vec::with_capacity(raw.rows.len());
    for (idx, row) in raw.rows.iter().enumerate() {
        rows.push(transform_row(row, &plan, idx == last)?);
    }

    let balance: f64 = rows[..last].iter().map(|r| r.stats.point_balance).sum();
    if let Some(total) = rows.last_mut() {
        total.stats.point_balance = balance;
        total.player = TOTAL_ROW.to_string();
        total.player_exid = None;
    }
    Ok(BoxscoreTable { rows })
}

fn transform_row(row: &RawRow, plan: &ColumnPlan, is_total: bool) -> Result<TransformedRow, StatsError> {
    let cell = |label: &str| row.get(label).unwrap_or_default();
    let num = |label: &str| parse_number(label, cell(label));

    let mut stats = StatLine {
        games: 1,
        number: match &plan.number {
            Some(label) => parse_jersey(label, cell(label))?,
            None => None,
        },
        starter: plan.starter.as_deref().map(|l| parse_starter(cell(l))).unwrap_or(0),
        minutes: parse_minutes(&plan.minutes, cell(&plan.minutes))?,
        points_made: num(&plan.points)?,
        assists: num(&plan.assists)?,
        turnovers: num(&plan.turnovers)?,
        steals: num(&plan.steals)?,
        dunks: num(&plan.dunks)?,
        ranking: num(&plan.ranking)?,
        point_balance: if is_total { 0.0 } else { num(&plan.point_balance)? },
        ..StatLine::default()
    };

    (stats.two_point_made, stats.two_point_attempted) =
        parse_shots(&plan.two_point, cell(&plan.two_point))?;
    (stats.three_point_made, stats.three_point_attempted) =
        parse_shots(&plan.three_point, cell(&plan.three_point))?;
    (stats.field_goal_made, stats.field_goal_attempted) =
        parse_shots(&plan.field_goal, cell(&plan.field_goal))?;
    (stats.free_throw_made, stats.free_throw_attempted) =
        parse_shots(&plan.free_throw, cell(&plan.free_throw))?;

    (stats.defensive_rebounds, stats.offensive_rebounds, stats.total_rebounds) =
        match &plan.rebounds {
            ReboundSource::Packed { label, order } => parse_rebounds(label, cell(label), *order)?,
            ReboundSource::Split {
                defensive,
                offensive,
                total,
            } => (num(defensive)?, num(offensive)?, num(total)?),
        };
    (stats.fouls_made, stats.fouls_received) = read_pair(&plan.fouls, &cell)?;
    (stats.blocks_made, stats.blocks_received) = read_pair(&plan.blocks, &cell)?;

    let link = row.link.as_ref();
    Ok(TransformedRow {
        player: cell(&plan.player).to_string(),
        player_exid: link.map(|l| l.player_exid.clone()).filter(|v| !v.is_empty()),
        team_exid: link.map(|l| l.team_exid.clone()).filter(|v| !v.is_empty()),
        stats,
    })
}

fn read_pair<'a>(
    source: &PairSource,
    cell: &impl Fn(&str) -> &'a str,
) -> Result<(f64, f64), StatsError> {
    match source {
        PairSource::Packed(label) => parse_pair(label, cell(label)),
        PairSource::Split { made, received } => Ok((
            parse_number(made, cell(made))?,
            parse_number(received, cell(received))?,
        )),
    }
}

/// Plain count; a decimal comma is accepted.
pub fn parse_number(column: &str, text: &str) -> Result<f64, StatsError> {
    let trimmed = text.trim();
    let value = trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| StatsError::field(column, text))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::field(column, text))
    }
}

/// `"<made>/<attempted>[ <pct>%]"`; the percentage is dropped.
pub fn parse_shots(column: &str, text: &str) -> Result<(f64, f64), StatsError> {
    let ratio = text
        .split_whitespace()
        .next()
        .ok_or_else(|| StatsError::field(column, text))?;
    let (made, attempted) = ratio
        .split_once('/')
        .ok_or_else(|| StatsError::field(column, text))?;
    Ok((parse_number(column, made)?, parse_number(column, attempted)?))
}

/// `"MM:SS"` -> `"00:MM:SS"`.
pub fn canonical_duration(text: &str) -> String {
    format!("00:{}", text.trim())
}

pub fn parse_minutes(column: &str, text: &str) -> Result<Duration, StatsError> {
    let canonical = canonical_duration(text);
    let parts: Vec<&str> = canonical.split(':').collect();
    let [h, m, s] = parts.as_slice() else {
        return Err(StatsError::field(column, text));
    };
    let field = |part: &str| {
        part.parse::<i64>()
            .ok()
            .filter(|v| *v >= 0)
            .ok_or_else(|| StatsError::field(column, text))
    };
    let (h, m, s) = (field(*h)?, field(*m)?, field(*s)?);
    if s >= 60 {
        return Err(StatsError::field(column, text));
    }
    h.checked_mul(3600)
        .and_then(|secs| m.checked_mul(60).and_then(|mins| secs.checked_add(mins)))
        .and_then(|secs| secs.checked_add(s))
        .and_then(Duration::try_seconds)
        .ok_or_else(|| StatsError::field(column, text))
}

/// `"<a> <b>"`, used for fouls and blocks (made, received).
pub fn parse_pair(column: &str, text: &str) -> Result<(f64, f64), StatsError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [a, b] = parts.as_slice() else {
        return Err(StatsError::field(column, text));
    };
    Ok((parse_number(column, a)?, parse_number(column, b)?))
}

/// `"<a> <b> <c>"` -> (defensive, offensive, total) according to `order`.
pub fn parse_rebounds(
    column: &str,
    text: &str,
    order: ReboundOrder,
) -> Result<(f64, f64, f64), StatsError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(StatsError::field(column, text));
    };
    let (a, b, c) = (
        parse_number(column, a)?,
        parse_number(column, b)?,
        parse_number(column, c)?,
    );
    Ok(match order {
        ReboundOrder::DefensiveOffensiveTotal => (a, b, c),
        ReboundOrder::OffensiveDefensiveTotal => (b, a, c),
    })
}

pub fn parse_starter(text: &str) -> u32 {
    u32::from(text.trim() == "*")
}

pub fn parse_jersey(column: &str, text: &str) -> Result<Option<u32>, StatsError> {
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
    use std::collections::HashMap;

    use super::*;
    use crate::rows::PlayerLink;

    const LEGACY_HEADERS: [&str; 18] = [
        "N", "I", "Jugador", "Min", "Ptos", "2 pt", "3 pt", "T.Camp", "T.L", "Rebotes D O T",
        "As", "B.R", "B.P", "Tapones Fa Co", "Mat", "Faltas C R", "Val", "+/-",
    ];

    fn legacy_row(values: [&str; 18]) -> RawRow {
        RawRow {
            cells: LEGACY_HEADERS
                .iter()
                .zip(values)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            link: None,
        }
    }

    fn legacy_table() -> RawTable {
        RawTable {
            columns: LEGACY_HEADERS.iter().map(|s| s.to_string()).collect(),
            rows: vec![
                legacy_row([
                    "4", "*", "GARCIA, J.", "26:15", "16", "5/8 62%", "1/4 25%", "6/12 50%",
                    "3/4 75%", "3 2 5", "4", "2", "3", "1 0", "1", "2 4", "18", "+7",
                ]),
                legacy_row([
                    "", "", "LOPEZ, M.", "13:45", "4", "2/5 40%", "0/0 0%", "2/5 40%", "0/0 0%",
                    "1 0 1", "1", "0", "1", "0 1", "0", "3 1", "2", "-3",
                ]),
                legacy_row([
                    "", "", "Equipo", "200:00", "20", "7/13", "1/4", "8/17", "3/4", "4 2 6", "5",
                    "2", "4", "1 1", "1", "5 5", "20", "",
                ]),
            ],
        }
    }

    #[test]
    fn concrete_cells() {
        assert_eq!(parse_shots("field_goal", "6/12 50%").unwrap(), (6.0, 12.0));
        assert_eq!(
            parse_minutes("minutes", "26:15").unwrap(),
            Duration::minutes(26) + Duration::seconds(15)
        );
        assert_eq!(canonical_duration("26:15"), "00:26:15");
        assert_eq!(
            parse_rebounds("rebounds", "3 2 5", ReboundOrder::DefensiveOffensiveTotal).unwrap(),
            (3.0, 2.0, 5.0)
        );
    }

    #[test]
    fn offensive_first_rebound_header_swaps_fields() {
        assert_eq!(
            parse_rebounds("rebounds", "2 3 5", ReboundOrder::OffensiveDefensiveTotal).unwrap(),
            (3.0, 2.0, 5.0)
        );
        let cols: Vec<String> = ["Rebotes O D T", "x"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            resolve_rebounds(&cols).unwrap(),
            ReboundSource::Packed {
                label: "Rebotes O D T".to_string(),
                order: ReboundOrder::OffensiveDefensiveTotal,
            }
        );
        let cols: Vec<String> = vec!["Rebotes Def Of To".to_string()];
        assert!(matches!(
            resolve_rebounds(&cols).unwrap(),
            ReboundSource::Packed {
                order: ReboundOrder::DefensiveOffensiveTotal,
                ..
            }
        ));
    }

    #[test]
    fn unknown_rebound_header_is_an_error() {
        let cols: Vec<String> = vec!["Rebotes X Y Z".to_string()];
        assert!(matches!(
            resolve_rebounds(&cols),
            Err(StatsError::UnknownColumn { family: "rebounds", .. })
        ));
    }

    #[test]
    fn shot_percentage_is_recomputable() {
        for (text, pct) in [("6/12 50%", 50.0), ("1/3 33%", 33.0), ("7/9 77%", 77.0)] {
            let (made, att) = parse_shots("t", text).unwrap();
            assert!((made / att * 100.0 - pct).abs() < 1.0, "{text}");
        }
    }

    #[test]
    fn malformed_cells_name_column_and_text() {
        let err = parse_shots("T.Camp", "6-12").unwrap_err();
        assert!(matches!(
            err,
            StatsError::FieldFormat { ref column, ref text } if column == "T.Camp" && text == "6-12"
        ));
        assert!(parse_minutes("Min", "26").is_err());
        assert!(parse_minutes("Min", "aa:bb").is_err());
        assert!(parse_pair("Faltas C R", "2").is_err());
        assert!(parse_number("Ptos", "").is_err());
        assert!(parse_jersey("N", "x").is_err());
    }

    #[test]
    fn oversized_minutes_are_a_format_error() {
        let err = parse_minutes("minutos", "999999999999999:00").unwrap_err();
        assert!(matches!(
            err,
            StatsError::FieldFormat { ref column, ref text }
                if column == "minutos" && text == "999999999999999:00"
        ));
        assert!(parse_minutes("minutos", &format!("{}:00", i64::MAX)).is_err());
        assert_eq!(
            parse_minutes("minutos", "200:00").unwrap(),
            Duration::minutes(200)
        );
    }

    #[test]
    fn small_parsers() {
        assert_eq!(parse_number("Val", "12,5").unwrap(), 12.5);
        assert_eq!(parse_number("+/-", "+7").unwrap(), 7.0);
        assert_eq!(parse_starter(" * "), 1);
        assert_eq!(parse_starter(""), 0);
        assert_eq!(parse_jersey("N", " 23 ").unwrap(), Some(23));
        assert_eq!(parse_jersey("N", "").unwrap(), None);
        assert_eq!(parse_pair("Tapones", "1 0").unwrap(), (1.0, 0.0));
    }

    #[test]
    fn legacy_table_transforms_with_total_row() {
        let table = transform_table(&legacy_table()).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.players().len(), 2);

        let first = &table.rows[0].stats;
        assert_eq!(first.number, Some(4));
        assert_eq!(first.starter, 1);
        assert_eq!(first.field_goal_made, 6.0);
        assert_eq!(first.field_goal_attempted, 12.0);
        assert_eq!(first.defensive_rebounds, 3.0);
        assert_eq!(first.offensive_rebounds, 2.0);
        assert_eq!(first.total_rebounds, 5.0);
        assert_eq!(first.fouls_made, 2.0);
        assert_eq!(first.fouls_received, 4.0);
        assert_eq!(first.blocks_made, 1.0);
        assert_eq!(first.games, 1);

        let total = table.total().unwrap();
        assert_eq!(total.player, TOTAL_ROW);
        assert_eq!(total.stats.point_balance, 4.0);
        assert_eq!(total.stats.games, 1);
        assert_eq!(total.stats.number, None);
        assert_eq!(total.stats.minutes, Duration::minutes(200));
    }

    #[test]
    fn missing_required_family_is_unknown_column() {
        let mut raw = legacy_table();
        raw.columns.retain(|c| c != "T.L");
        assert!(matches!(
            transform_table(&raw),
            Err(StatsError::UnknownColumn { family: "free_throw", .. })
        ));
    }

    #[test]
    fn bad_cell_is_field_format() {
        let mut raw = legacy_table();
        raw.rows[1].cells.insert("As".to_string(), "uno".to_string());
        assert!(matches!(
            transform_table(&raw),
            Err(StatsError::FieldFormat { ref column, .. }) if column == "As"
        ));
    }

    #[test]
    fn empty_table_is_not_found() {
        assert!(matches!(
            transform_table(&RawTable::default()),
            Err(StatsError::TableNotFound { .. })
        ));
    }

    #[test]
    fn links_become_exids() {
        let mut raw = legacy_table();
        raw.rows[0].link = Some(PlayerLink {
            player_exid: "2001".to_string(),
            team_exid: "901".to_string(),
        });
        raw.rows[1].link = Some(PlayerLink::default());
        let table = transform_table(&raw).unwrap();
        assert_eq!(table.rows[0].player_exid.as_deref(), Some("2001"));
        assert_eq!(table.rows[1].player_exid, None);
        assert_eq!(table.team_exid(), Some("901"));
    }
}
