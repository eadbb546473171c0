use rayon::prelude::*;
use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::ParserConfig;
use crate::entities::{Boxscore, Game, League, Player, PlayerLine, Referee, Team};
use crate::error::StatsError;
use crate::ids::{entity_id, normalize_name, stable_id};
use crate::layout::locate_tables;
use crate::metadata::GameMetadata;
use crate::rows::extract_rows;
use crate::transform::{BoxscoreTable, transform_table};

/// Parses one box-score page into a `Game`.
///
/// Unfinished games come back as `StatsError::UnfinishedGame` so callers
/// can skip them; any other error means the page has a shape we do not read.
pub fn parse_game(html: &str, config: &ParserConfig) -> Result<Game, StatsError> {
    let doc = Html::parse_document(html);
    let (layout, tables) = locate_tables(&doc)?;
    let strategy = layout.strategy();
    strategy.check_finished(&doc, config)?;

    let options = strategy.row_options(config);
    let home_raw = extract_rows(&tables.home, &options);
    let away_raw = extract_rows(&tables.away, &options);
    if home_raw.is_empty() || away_raw.is_empty() {
        return Err(StatsError::TableNotFound {
            selector: strategy.table_selector().to_string(),
        });
    }
    let home = transform_table(&home_raw)?;
    let away = transform_table(&away_raw)?;

    let mut metadata = strategy.extract_metadata(&doc);
    metadata.attach_team_exids(&home, &away);
    build_game(&metadata, &home, &away)
}

pub fn build_game(
    metadata: &GameMetadata,
    home: &BoxscoreTable,
    away: &BoxscoreTable,
) -> Result<Game, StatsError> {
    let home_team = team(&metadata.home_team, metadata.home_team_exid.as_deref());
    let away_team = team(&metadata.away_team, metadata.away_team_exid.as_deref());

    let id = match &metadata.game_exid {
        Some(exid) => stable_id("game", &["exid", exid.as_str()]),
        None => stable_id(
            "game",
            &[
                metadata.league.as_str(),
                metadata.date.as_str(),
                metadata.home_team.as_str(),
                metadata.away_team.as_str(),
            ],
        ),
    };

    Ok(Game {
        id,
        exid: metadata.game_exid.clone(),
        game_at: metadata.game_at(),
        date: metadata.date.clone(),
        time: metadata.time.clone(),
        league: metadata.league.clone(),
        season: metadata.season.clone(),
        home: boxscore(home_team, metadata.home_points()?, home),
        away: boxscore(away_team, metadata.away_points()?, away),
        main_referee: referee(&metadata.main_referee),
        aux_referee: referee(&metadata.aux_referee),
    })
}

fn team(name: &str, exid: Option<&str>) -> Team {
    Team {
        id: entity_id("team", exid, name),
        name: name.to_string(),
        exid: exid.map(str::to_string),
        season_stats: None,
    }
}

fn referee(name: &str) -> Referee {
    Referee {
        id: stable_id("referee", &[normalize_name(name)]),
        name: name.to_string(),
    }
}

fn boxscore(team: Team, score: Option<u32>, table: &BoxscoreTable) -> Boxscore {
    let players = table
        .players()
        .iter()
        .map(|row| PlayerLine {
            player: Player {
                id: entity_id("player", row.player_exid.as_deref(), &row.player),
                name: row.player.clone(),
                exid: row.player_exid.clone(),
            },
            stats: row.stats.clone(),
        })
        .collect();
    Boxscore {
        team,
        score,
        players,
        total: table.total().map(|t| t.stats.clone()).unwrap_or_default(),
    }
}

enum Outcome {
    Parsed(Box<Game>),
    Skipped,
    Failed(StatsError),
}

/// Parses a batch of documents into one league.
///
/// Documents are read and parsed in parallel; unreadable pages, pages
/// without tables and unfinished games are skipped. Any other parse error
/// aborts the batch. Fails with `NoGamesFound` when nothing usable remains.
pub fn parse_boxscores<D, F>(
    documents: &[D],
    reader: F,
    config: &ParserConfig,
) -> Result<League, StatsError>
where
    D: Sync,
    F: Fn(&D) -> anyhow::Result<String> + Sync,
{
    let outcomes: Vec<Outcome> = with_parse_pool(config.parallelism, || {
        documents
            .par_iter()
            .enumerate()
            .map(|(idx, document)| {
                let html = match reader(document) {
                    Ok(html) => html,
                    Err(err) => {
                        warn!(document = idx, error = %err, "skipping unreadable document");
                        return Outcome::Skipped;
                    }
                };
                match parse_game(&html, config) {
                    Ok(game) => Outcome::Parsed(Box::new(game)),
                    Err(err @ StatsError::UnfinishedGame { .. }) => {
                        debug!(document = idx, error = %err, "skipping unfinished game");
                        Outcome::Skipped
                    }
                    Err(err) if err.is_skippable() => {
                        warn!(document = idx, error = %err, "skipping document");
                        Outcome::Skipped
                    }
                    Err(err) => Outcome::Failed(err),
                }
            })
            .collect()
    });

    let mut games = Vec::new();
    let mut skipped = 0usize;
    for outcome in outcomes {
        match outcome {
            Outcome::Parsed(game) => games.push(*game),
            Outcome::Skipped => skipped += 1,
            Outcome::Failed(err) => return Err(err),
        }
    }
    info!(
        documents = documents.len(),
        parsed = games.len(),
        skipped,
        "parsed boxscore batch"
    );
    league_from_games(games).ok_or(StatsError::NoGamesFound {
        documents: documents.len(),
    })
}

/// League of the first game, teams in order of first appearance.
pub fn league_from_games(games: Vec<Game>) -> Option<League> {
    let first = games.first()?;
    let name = first.league.clone();
    let season = first.season.clone();

    let mut teams: Vec<Team> = Vec::new();
    for game in &games {
        for team in [&game.home.team, &game.away.team] {
            if !teams.contains(team) {
                teams.push(team.clone());
            }
        }
    }
    Some(League {
        id: stable_id("league", &[name.as_str(), season.as_str()]),
        name,
        season,
        teams,
        games,
        aggregated_games: None,
    })
}

fn with_parse_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}
