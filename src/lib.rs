//! Box-score extraction and season aggregation for federation basketball
//! result pages.
//!
//! `assemble::parse_boxscores` turns a batch of HTML pages into a `League`;
//! `aggregate::compute_league_aggregates` adds per-team and per-player
//! season rows with OER/DER, shooting percentages and usage volumes.

pub mod aggregate;
pub mod assemble;
pub mod config;
pub mod entities;
pub mod error;
pub mod html;
pub mod ids;
pub mod layout;
pub mod metadata;
pub mod metrics;
pub mod reader;
pub mod report;
pub mod rows;
pub mod schema;
pub mod transform;

pub use aggregate::{aggregate_boxscores, compute_league_aggregates, sum_boxscores};
pub use assemble::{parse_boxscores, parse_game};
pub use config::ParserConfig;
pub use entities::{Boxscore, Game, League, Player, Referee, StatLine, Team};
pub use error::StatsError;
pub use ids::{StableId, stable_id};
