use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::html::{element_children, element_text, normalize_ws, query_param};

pub const PLAYER_CELL_CLASS: &str = "nombre jugador";

static ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("anchor selector"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    HeaderRow,
    CellClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOptions {
    pub initial_row: usize,
    /// Rows with a different cell count are dropped. With `HeaderRow` labels
    /// and no explicit count, the header width is used.
    pub element_count: Option<usize>,
    pub labels: LabelSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerLink {
    pub player_exid: String,
    pub team_exid: String,
}

#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub cells: HashMap<String, String>,
    pub link: Option<PlayerLink>,
}

impl RawRow {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells.get(label).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn extract_rows(rows: &[ElementRef<'_>], options: &RowOptions) -> RawTable {
    match options.labels {
        LabelSource::HeaderRow => extract_positional(rows, options),
        LabelSource::CellClass => extract_classed(rows, options),
    }
}

fn extract_positional(rows: &[ElementRef<'_>], options: &RowOptions) -> RawTable {
    let Some(header) = rows.first() else {
        return RawTable::default();
    };
    let columns: Vec<String> = element_children(*header)
        .into_iter()
        .map(element_text)
        .collect();
    let expected = options.element_count.unwrap_or(columns.len());

    let mut table = RawTable {
        columns,
        rows: Vec::new(),
    };
    for (idx, row) in rows.iter().enumerate().skip(options.initial_row) {
        let cells = element_children(*row);
        if cells.len() != expected || cells.len() != table.columns.len() {
            debug!(row = idx, cells = cells.len(), expected, "dropping stray row");
            continue;
        }
        let cells = table
            .columns
            .iter()
            .cloned()
            .zip(cells.into_iter().map(element_text))
            .collect();
        table.rows.push(RawRow { cells, link: None });
    }
    table
}

fn extract_classed(rows: &[ElementRef<'_>], options: &RowOptions) -> RawTable {
    let mut table = RawTable::default();
    for (idx, row) in rows.iter().enumerate().skip(options.initial_row) {
        let cells = element_children(*row);
        if cells.is_empty() || options.element_count.is_some_and(|n| n != cells.len()) {
            debug!(row = idx, cells = cells.len(), "dropping stray row");
            continue;
        }
        let mut raw = RawRow::default();
        for cell in cells {
            let label = normalize_ws(cell.value().attr("class").unwrap_or_default());
            if label.is_empty() {
                continue;
            }
            if label == PLAYER_CELL_CLASS {
                raw.link = player_link(cell);
            }
            if !table.columns.contains(&label) {
                table.columns.push(label.clone());
            }
            raw.cells.insert(label, element_text(cell));
        }
        table.rows.push(raw);
    }
    table
}

fn player_link(cell: ElementRef<'_>) -> Option<PlayerLink> {
    let anchor = cell.select(&ANCHOR_SEL).next()?;
    let href = anchor.value().attr("href").unwrap_or_default();
    Some(PlayerLink {
        player_exid: query_param(href, "c").unwrap_or_default(),
        team_exid: query_param(href, "i").unwrap_or_default(),
    })
}
