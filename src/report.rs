// Record view of aggregated rows: the only shape the spreadsheet writer
// depends on.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::aggregate::{PlayerSeasonRow, TeamSeasonRow};
use crate::entities::League;
use crate::metrics::Efficiency;
use crate::schema::{Column, PLAYER_COLUMNS, TEAM_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "Total")]
    Total,
    #[serde(rename = "Media")]
    Average,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Total => "Total",
            Mode::Average => "Media",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Text(text) => Value::String(text),
            CellValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::Missing => Value::Null,
        }
    }
}

/// Minutes as `MMM:SS`, the way the federation sheets print playing time.
pub fn format_minutes(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:03}:{:02}", secs / 60, secs % 60)
}

fn per_game(column: Column, value: f64, games: u32) -> f64 {
    if column.is_averageable() && games > 0 {
        value / f64::from(games)
    } else {
        value
    }
}

fn averaged_efficiency(efficiency: Efficiency, games: u32) -> Efficiency {
    Efficiency {
        total_possessions: per_game(Column::TotalPossessions, efficiency.total_possessions, games),
        oer: per_game(Column::Oer, efficiency.oer, games),
        oer_40_min: per_game(Column::Oer40Min, efficiency.oer_40_min, games),
    }
}

fn number(v: Option<f64>) -> CellValue {
    v.map(CellValue::Number).unwrap_or(CellValue::Missing)
}

fn record<F>(columns: &[Column], value: F) -> Map<String, Value>
where
    F: Fn(Column) -> CellValue,
{
    columns
        .iter()
        .map(|c| (c.name().to_string(), Value::from(value(*c))))
        .collect()
}

impl TeamSeasonRow {
    pub fn value(&self, column: Column) -> CellValue {
        match column {
            Column::Team => CellValue::Text(self.team.clone()),
            Column::Mode => CellValue::Text(self.mode.label().to_string()),
            Column::Minutes => CellValue::Text(format_minutes(self.stats.minutes)),
            Column::Der => CellValue::Number(self.der),
            Column::PointsReceived => CellValue::Number(self.points_received),
            Column::Oer => CellValue::Number(self.efficiency.oer),
            Column::Oer40Min => CellValue::Number(self.efficiency.oer_40_min),
            Column::TotalPossessions => CellValue::Number(self.efficiency.total_possessions),
            Column::Number | Column::Player => CellValue::Missing,
            other => number(self.shooting.get(other).or_else(|| self.stats.value(other))),
        }
    }

    pub fn to_record(&self) -> Map<String, Value> {
        record(TEAM_COLUMNS, |c| self.value(c))
    }

    /// Per-game view. Ratios stay as computed on the totals.
    pub fn averaged(&self) -> TeamSeasonRow {
        let games = self.stats.games;
        TeamSeasonRow {
            mode: Mode::Average,
            points_received: per_game(Column::PointsReceived, self.points_received, games),
            stats: self.stats.per_game(),
            efficiency: averaged_efficiency(self.efficiency, games),
            ..self.clone()
        }
    }
}

impl PlayerSeasonRow {
    pub fn value(&self, column: Column) -> CellValue {
        match column {
            Column::Player => CellValue::Text(self.player.name.clone()),
            Column::Mode => CellValue::Text(self.mode.label().to_string()),
            Column::Minutes => CellValue::Text(format_minutes(self.stats.minutes)),
            Column::Oer => CellValue::Number(self.efficiency.oer),
            Column::Oer40Min => CellValue::Number(self.efficiency.oer_40_min),
            Column::TotalPossessions => CellValue::Number(self.efficiency.total_possessions),
            Column::Team | Column::Der | Column::PointsReceived => CellValue::Missing,
            other if other.volume_base().is_some() => number(self.volumes.get(other)),
            other => number(self.shooting.get(other).or_else(|| self.stats.value(other))),
        }
    }

    pub fn to_record(&self) -> Map<String, Value> {
        record(PLAYER_COLUMNS, |c| self.value(c))
    }

    pub fn averaged(&self) -> PlayerSeasonRow {
        PlayerSeasonRow {
            mode: Mode::Average,
            stats: self.stats.per_game(),
            efficiency: averaged_efficiency(self.efficiency, self.stats.games),
            ..self.clone()
        }
    }
}

impl League {
    /// `aggregated_games` divided per game; `None` before aggregation.
    pub fn averaged_games(&self) -> Option<Vec<TeamSeasonRow>> {
        self.aggregated_games
            .as_ref()
            .map(|rows| rows.iter().map(TeamSeasonRow::averaged).collect())
    }

    pub fn team_records(&self) -> Vec<Map<String, Value>> {
        self.aggregated_games
            .iter()
            .flatten()
            .map(TeamSeasonRow::to_record)
            .collect()
    }
}
