// Table location for the two site layouts the federation has published
// box scores with. Strategy selection happens once per document in
// `locate_tables`; everything downstream works on a `&dyn SiteLayout`.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::config::ParserConfig;
use crate::error::StatsError;
use crate::html::child_elements;
use crate::metadata::{self, GameMetadata};
use crate::rows::{LabelSource, RowOptions};

const LEGACY_HOME_ROWS: &str = "table#jugadoresLocalDataGrid tr";
const LEGACY_AWAY_ROWS: &str = "table#jugadoresVisitanteDataGrid tr";
const LIVE_TABLE_BODIES: &str = "table tbody";
const PLAYED_QUARTERS: &str = "span.cuarto.play";

static LEGACY_HOME_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LEGACY_HOME_ROWS).expect("legacy home selector"));
static LEGACY_AWAY_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LEGACY_AWAY_ROWS).expect("legacy away selector"));
static LIVE_TBODY_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LIVE_TABLE_BODIES).expect("tbody selector"));
static PLAYED_QUARTER_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(PLAYED_QUARTERS).expect("quarter selector"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Server-rendered ASP.NET pages with fixed data-grid ids.
    Legacy,
    /// "baloncestoenvivo" pages, tables identified by cell classes.
    Livescore,
}

impl Layout {
    pub fn strategy(self) -> &'static dyn SiteLayout {
        match self {
            Layout::Legacy => &LegacyLayout,
            Layout::Livescore => &LivescoreLayout,
        }
    }
}

/// Rows (`tr` elements) of the home and away statistics tables, headers included.
#[derive(Debug, Clone)]
pub struct TablePair<'a> {
    pub home: Vec<ElementRef<'a>>,
    pub away: Vec<ElementRef<'a>>,
}

pub trait SiteLayout: Sync {
    fn layout(&self) -> Layout;

    fn table_selector(&self) -> &'static str;

    fn locate_tables<'a>(&self, doc: &'a Html) -> Result<TablePair<'a>, StatsError>;

    fn row_options(&self, config: &ParserConfig) -> RowOptions;

    /// `Err(UnfinishedGame)` when the page belongs to a game still in progress.
    fn check_finished(&self, doc: &Html, config: &ParserConfig) -> Result<(), StatsError>;

    fn extract_metadata(&self, doc: &Html) -> GameMetadata;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyLayout;

#[derive(Debug, Clone, Copy, Default)]
pub struct LivescoreLayout;

impl SiteLayout for LegacyLayout {
    fn layout(&self) -> Layout {
        Layout::Legacy
    }

    fn table_selector(&self) -> &'static str {
        LEGACY_HOME_ROWS
    }

    fn locate_tables<'a>(&self, doc: &'a Html) -> Result<TablePair<'a>, StatsError> {
        let home: Vec<_> = doc.select(&LEGACY_HOME_SEL).collect();
        let away: Vec<_> = doc.select(&LEGACY_AWAY_SEL).collect();
        // A grid with a lone header row is how the site renders "no data".
        if home.len() <= 1 || away.len() <= 1 {
            return Err(StatsError::TableNotFound {
                selector: format!("{LEGACY_HOME_ROWS}, {LEGACY_AWAY_ROWS}"),
            });
        }
        Ok(TablePair { home, away })
    }

    fn row_options(&self, config: &ParserConfig) -> RowOptions {
        RowOptions {
            initial_row: config.header_rows,
            element_count: Some(config.legacy_column_count),
            labels: LabelSource::HeaderRow,
        }
    }

    fn check_finished(&self, _doc: &Html, _config: &ParserConfig) -> Result<(), StatsError> {
        Ok(())
    }

    fn extract_metadata(&self, doc: &Html) -> GameMetadata {
        metadata::legacy_metadata(doc)
    }
}

impl SiteLayout for LivescoreLayout {
    fn layout(&self) -> Layout {
        Layout::Livescore
    }

    fn table_selector(&self) -> &'static str {
        LIVE_TABLE_BODIES
    }

    fn locate_tables<'a>(&self, doc: &'a Html) -> Result<TablePair<'a>, StatsError> {
        let bodies: Vec<_> = doc.select(&LIVE_TBODY_SEL).collect();
        // Earlier bodies on the page belong to score-by-quarter and layout tables.
        let [.., home, away] = bodies.as_slice() else {
            return Err(StatsError::TableNotFound {
                selector: LIVE_TABLE_BODIES.to_string(),
            });
        };
        let home = child_elements(*home, "tr");
        let away = child_elements(*away, "tr");
        if home.len() <= 1 || away.len() <= 1 {
            return Err(StatsError::TableNotFound {
                selector: LIVE_TABLE_BODIES.to_string(),
            });
        }
        Ok(TablePair { home, away })
    }

    fn row_options(&self, config: &ParserConfig) -> RowOptions {
        RowOptions {
            initial_row: config.header_rows,
            element_count: None,
            labels: LabelSource::CellClass,
        }
    }

    fn check_finished(&self, doc: &Html, config: &ParserConfig) -> Result<(), StatsError> {
        let played = played_quarters(doc);
        if played < config.min_played_quarters {
            return Err(StatsError::UnfinishedGame {
                played,
                required: config.min_played_quarters,
            });
        }
        Ok(())
    }

    fn extract_metadata(&self, doc: &Html) -> GameMetadata {
        metadata::live_metadata(doc)
    }
}

pub fn played_quarters(doc: &Html) -> usize {
    doc.select(&PLAYED_QUARTER_SEL).count()
}

/// Both strategies in order; the error names every selector that was tried.
pub fn locate_tables(doc: &Html) -> Result<(Layout, TablePair<'_>), StatsError> {
    if let Ok(pair) = LegacyLayout.locate_tables(doc) {
        return Ok((Layout::Legacy, pair));
    }
    match LivescoreLayout.locate_tables(doc) {
        Ok(pair) => Ok((Layout::Livescore, pair)),
        Err(_) => Err(StatsError::TableNotFound {
            selector: format!("{LEGACY_HOME_ROWS}, {LEGACY_AWAY_ROWS}, {LIVE_TABLE_BODIES}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize, cls: &str) -> String {
        (0..n)
            .map(|i| format!(r#"<tr><td class="{cls}">{i}</td></tr>"#))
            .collect()
    }

    #[test]
    fn legacy_grids_win_when_populated() {
        let html = format!(
            r#"<table id="jugadoresLocalDataGrid">{}</table>
               <table id="jugadoresVisitanteDataGrid">{}</table>"#,
            rows(3, "a"),
            rows(4, "b")
        );
        let doc = Html::parse_document(&html);
        let (layout, pair) = locate_tables(&doc).unwrap();
        assert_eq!(layout, Layout::Legacy);
        assert_eq!(pair.home.len(), 3);
        assert_eq!(pair.away.len(), 4);
    }

    #[test]
    fn header_only_legacy_grid_falls_back_to_last_two_bodies() {
        let html = format!(
            r#"<table id="jugadoresLocalDataGrid"><tr><td>N</td></tr></table>
               <table id="jugadoresVisitanteDataGrid"><tr><td>N</td></tr></table>
               <table><tbody>{}</tbody></table>
               <table><tbody>{}</tbody></table>
               <table><tbody>{}</tbody></table>"#,
            rows(5, "x"),
            rows(3, "home"),
            rows(4, "away")
        );
        let doc = Html::parse_document(&html);
        let (layout, pair) = locate_tables(&doc).unwrap();
        assert_eq!(layout, Layout::Livescore);
        assert_eq!(pair.home.len(), 3);
        assert_eq!(pair.away.len(), 4);
    }

    #[test]
    fn missing_tables_name_the_selectors() {
        let doc = Html::parse_document("<html><body><p>Sin datos</p></body></html>");
        let err = locate_tables(&doc).unwrap_err();
        match err {
            StatsError::TableNotFound { selector } => {
                assert!(selector.contains("jugadoresLocalDataGrid"));
                assert!(selector.contains("table tbody"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trivial_live_bodies_are_not_tables() {
        let html = format!(
            "<table><tbody>{}</tbody></table><table><tbody>{}</tbody></table>",
            rows(3, "a"),
            rows(1, "b")
        );
        let doc = Html::parse_document(&html);
        assert!(LivescoreLayout.locate_tables(&doc).is_err());
    }

    #[test]
    fn unfinished_when_fewer_than_four_quarters_played() {
        let config = ParserConfig::defaults();
        let partial = Html::parse_document(
            r#"<span class="cuarto play">1</span><span class="cuarto play">2</span>
               <span class="cuarto">3</span><span class="cuarto">4</span>"#,
        );
        assert_eq!(played_quarters(&partial), 2);
        assert!(matches!(
            LivescoreLayout.check_finished(&partial, &config),
            Err(StatsError::UnfinishedGame { played: 2, required: 4 })
        ));

        let full = Html::parse_document(
            &r#"<span class="cuarto play">q</span>"#.repeat(4),
        );
        assert!(LivescoreLayout.check_finished(&full, &config).is_ok());
        assert!(LegacyLayout.check_finished(&partial, &config).is_ok());
    }

    #[test]
    fn strategy_dispatch_round_trips_layout() {
        assert_eq!(Layout::Legacy.strategy().layout(), Layout::Legacy);
        assert_eq!(Layout::Livescore.strategy().layout(), Layout::Livescore);
        let config = ParserConfig::defaults();
        assert_eq!(
            Layout::Legacy.strategy().row_options(&config).element_count,
            Some(18)
        );
        assert_eq!(
            Layout::Livescore.strategy().row_options(&config).labels,
            LabelSource::CellClass
        );
    }
}
