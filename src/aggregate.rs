use tracing::debug;

use crate::entities::{Boxscore, League, Player, PlayerLine, StatLine, Team};
use crate::error::StatsError;
use crate::ids::StableId;
use crate::metrics::{
    Efficiency, ShootingPercentages, Volumes, efficiency, shooting_percentages, volumes,
};
use crate::report::Mode;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeasonRow {
    pub player: Player,
    pub mode: Mode,
    pub stats: StatLine,
    pub efficiency: Efficiency,
    pub shooting: ShootingPercentages,
    pub volumes: Volumes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeasonRow {
    pub team_id: StableId,
    pub team: String,
    pub mode: Mode,
    /// OER of the opponents' summed boxscores against this team.
    pub der: f64,
    pub points_received: f64,
    /// Aggregate row of the team; the jersey number is always `None`.
    pub stats: StatLine,
    pub efficiency: Efficiency,
    pub shooting: ShootingPercentages,
}

/// Outer join of two boxscores on player identity. Rows keep first-seen
/// order; a player missing on one side contributes zeros from it.
pub fn sum_boxscores(a: &Boxscore, b: &Boxscore) -> Boxscore {
    let mut players: Vec<PlayerLine> = a.players.clone();
    for line in &b.players {
        match players.iter_mut().find(|p| p.player.id == line.player.id) {
            Some(existing) => existing.stats = existing.stats.combine(&line.stats),
            None => players.push(line.clone()),
        }
    }
    let score = match (a.score, b.score) {
        (Some(x), Some(y)) => Some(x + y),
        (x, y) => x.or(y),
    };
    Boxscore {
        team: a.team.clone(),
        score,
        players,
        total: a.total.combine(&b.total),
    }
}

pub fn aggregate_boxscores<'a, I>(boxscores: I) -> Result<Boxscore, StatsError>
where
    I: IntoIterator<Item = &'a Boxscore>,
{
    let mut iter = boxscores.into_iter();
    let first = iter.next().ok_or(StatsError::EmptyAggregation)?;
    Ok(iter.fold(first.clone(), |acc, next| sum_boxscores(&acc, next)))
}

pub fn player_rows(aggregated: &Boxscore) -> Vec<PlayerSeasonRow> {
    let team_possessions = efficiency(&aggregated.total, true).total_possessions;
    aggregated
        .players
        .iter()
        .map(|line| {
            let eff = efficiency(&line.stats, false);
            PlayerSeasonRow {
                player: line.player.clone(),
                mode: Mode::Total,
                stats: line.stats.clone(),
                efficiency: eff,
                shooting: shooting_percentages(&line.stats),
                volumes: volumes(
                    &line.stats,
                    eff.total_possessions,
                    &aggregated.total,
                    team_possessions,
                ),
            }
        })
        .collect()
}

/// Season totals of every team that played at least one game: player rows
/// go to `Team::season_stats`, one team row per team to `aggregated_games`.
/// The input league is left untouched.
pub fn compute_league_aggregates(league: &League) -> Result<League, StatsError> {
    let mut teams = Vec::with_capacity(league.teams.len());
    let mut team_rows = Vec::with_capacity(league.teams.len());

    for team in &league.teams {
        let own = league.team_boxscores(team);
        if own.is_empty() {
            debug!(team = %team.name, "team without games left out of aggregation");
            teams.push(team.clone());
            continue;
        }
        let games = own.len();
        let aggregated = aggregate_boxscores(own)?;
        let rivals = aggregate_boxscores(league.rival_boxscores(team))?;

        let mut stats = aggregated.total.clone();
        stats.number = None;
        let der = efficiency(&rivals.total, true).oer;
        team_rows.push(TeamSeasonRow {
            team_id: team.id.clone(),
            team: team.name.clone(),
            mode: Mode::Total,
            der,
            points_received: rivals.total.points_made,
            efficiency: efficiency(&stats, true),
            shooting: shooting_percentages(&stats),
            stats,
        });

        teams.push(Team {
            season_stats: Some(player_rows(&aggregated)),
            ..team.clone()
        });
        debug!(team = %team.name, games, der, "aggregated team");
    }

    Ok(League {
        id: league.id.clone(),
        name: league.name.clone(),
        season: league.season.clone(),
        teams,
        games: league.games.clone(),
        aggregated_games: Some(team_rows),
    })
}
