use std::env;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_HEADER_ROWS: usize = 2;
const DEFAULT_LEGACY_COLUMNS: usize = 18;
const DEFAULT_MIN_QUARTERS: usize = 4;
const DEFAULT_PARALLELISM: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    // Rows skipped at the top of every statistics table.
    pub header_rows: usize,
    // Cell count of a genuine player row on the legacy layout.
    pub legacy_column_count: usize,
    pub min_played_quarters: usize,
    pub parallelism: usize,
}

impl ParserConfig {
    pub fn defaults() -> Self {
        Self {
            header_rows: DEFAULT_HEADER_ROWS,
            legacy_column_count: DEFAULT_LEGACY_COLUMNS,
            min_played_quarters: DEFAULT_MIN_QUARTERS,
            parallelism: DEFAULT_PARALLELISM,
        }
    }

    pub fn from_env() -> Self {
        Self {
            header_rows: env_usize("BOXSCORE_HEADER_ROWS", DEFAULT_HEADER_ROWS),
            legacy_column_count: env_usize("BOXSCORE_LEGACY_COLUMNS", DEFAULT_LEGACY_COLUMNS),
            min_played_quarters: env_usize("BOXSCORE_MIN_QUARTERS", DEFAULT_MIN_QUARTERS),
            parallelism: env_usize("PARSE_PARALLELISM", DEFAULT_PARALLELISM),
        }
        .clamped()
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw).context("parse parser config json")?;
        Ok(cfg.clamped())
    }

    fn clamped(self) -> Self {
        Self {
            header_rows: self.header_rows.clamp(0, 5),
            legacy_column_count: self.legacy_column_count.clamp(1, 64),
            min_played_quarters: self.min_played_quarters.clamp(1, 8),
            parallelism: self.parallelism.clamp(1, 32),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .unwrap_or(default)
}
