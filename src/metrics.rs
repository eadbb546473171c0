use std::collections::BTreeMap;

use crate::entities::StatLine;
use crate::schema::{Column, VOLUME_COLUMNS};

/// Returned as `oer_40_min` when the row has no recorded minutes.
pub const NO_MINUTES_SENTINEL: f64 = -1.0;

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// `field_goal_attempted + free_throw_attempted / 2 + turnovers`, plus
/// assists for player rows. The aggregate row leaves assists out so passes
/// inside one possession are not counted twice.
pub fn total_possessions(stats: &StatLine, is_total: bool) -> f64 {
    let base = stats.field_goal_attempted + stats.free_throw_attempted / 2.0 + stats.turnovers;
    if is_total { base } else { base + stats.assists }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiency {
    pub total_possessions: f64,
    pub oer: f64,
    pub oer_40_min: f64,
}

pub fn efficiency(stats: &StatLine, is_total: bool) -> Efficiency {
    let total_possessions = total_possessions(stats, is_total);
    let oer = ratio(stats.points_made, total_possessions);
    let minutes = stats.minutes_decimal();
    let oer_40_min = if minutes > 0.0 {
        40.0 * oer / minutes
    } else {
        NO_MINUTES_SENTINEL
    };
    Efficiency {
        total_possessions,
        oer,
        oer_40_min,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShootingPercentages {
    pub two_point: f64,
    pub three_point: f64,
    pub field_goal: f64,
    pub free_throw: f64,
}

impl ShootingPercentages {
    pub fn get(&self, column: Column) -> Option<f64> {
        match column {
            Column::TwoPointPercentage => Some(self.two_point),
            Column::ThreePointPercentage => Some(self.three_point),
            Column::FieldGoalPercentage => Some(self.field_goal),
            Column::FreeThrowPercentage => Some(self.free_throw),
            _ => None,
        }
    }
}

/// `made / attempted * 100`; nothing attempted gives `0`.
pub fn percentage(made: f64, attempted: f64) -> f64 {
    ratio(made, attempted) * 100.0
}

pub fn shooting_percentages(stats: &StatLine) -> ShootingPercentages {
    ShootingPercentages {
        two_point: percentage(stats.two_point_made, stats.two_point_attempted),
        three_point: percentage(stats.three_point_made, stats.three_point_attempted),
        field_goal: percentage(stats.field_goal_made, stats.field_goal_attempted),
        free_throw: percentage(stats.free_throw_made, stats.free_throw_attempted),
    }
}

/// A player's share (%) of the team total, keyed by the volume column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Volumes(BTreeMap<Column, f64>);

impl Volumes {
    pub fn get(&self, column: Column) -> Option<f64> {
        self.0.get(&column).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Column, f64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }
}

/// Possessions are passed in because player and team rows estimate them
/// differently.
pub fn volumes(
    player: &StatLine,
    player_possessions: f64,
    team: &StatLine,
    team_possessions: f64,
) -> Volumes {
    let mut out = BTreeMap::new();
    for (base, volume) in VOLUME_COLUMNS {
        let (own, total) = if base == Column::TotalPossessions {
            (player_possessions, team_possessions)
        } else {
            (
                player.value(base).unwrap_or(0.0),
                team.value(base).unwrap_or(0.0),
            )
        };
        out.insert(volume, ratio(own, total) * 100.0);
    }
    Volumes(out)
}
