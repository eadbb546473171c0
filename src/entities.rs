use std::hash::{Hash, Hasher};

use chrono::{Duration, NaiveDateTime};

use crate::aggregate::{PlayerSeasonRow, TeamSeasonRow};
use crate::ids::StableId;
use crate::schema::{Column, SCHEMA};

pub const TOTAL_ROW: &str = "Total";

/// Typed statistics of one box-score row. Counting stats are `f64` so that
/// sums and per-game averages share one representation.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub number: Option<u32>,
    pub starter: u32,
    pub games: u32,
    pub minutes: Duration,
    pub points_made: f64,
    pub assists: f64,
    pub steals: f64,
    pub turnovers: f64,
    pub two_point_made: f64,
    pub two_point_attempted: f64,
    pub three_point_made: f64,
    pub three_point_attempted: f64,
    pub field_goal_made: f64,
    pub field_goal_attempted: f64,
    pub free_throw_made: f64,
    pub free_throw_attempted: f64,
    pub offensive_rebounds: f64,
    pub defensive_rebounds: f64,
    pub total_rebounds: f64,
    pub fouls_made: f64,
    pub fouls_received: f64,
    pub blocks_made: f64,
    pub blocks_received: f64,
    pub dunks: f64,
    pub ranking: f64,
    pub point_balance: f64,
}

impl Default for StatLine {
    fn default() -> Self {
        Self {
            number: None,
            starter: 0,
            games: 0,
            minutes: Duration::zero(),
            points_made: 0.0,
            assists: 0.0,
            steals: 0.0,
            turnovers: 0.0,
            two_point_made: 0.0,
            two_point_attempted: 0.0,
            three_point_made: 0.0,
            three_point_attempted: 0.0,
            field_goal_made: 0.0,
            field_goal_attempted: 0.0,
            free_throw_made: 0.0,
            free_throw_attempted: 0.0,
            offensive_rebounds: 0.0,
            defensive_rebounds: 0.0,
            total_rebounds: 0.0,
            fouls_made: 0.0,
            fouls_received: 0.0,
            blocks_made: 0.0,
            blocks_received: 0.0,
            dunks: 0.0,
            ranking: 0.0,
            point_balance: 0.0,
        }
    }
}

// Column of every `f64` field; summing and averaging walk this table.
macro_rules! stat_fields {
    ($($column:ident => $field:ident),* $(,)?) => {
        impl StatLine {
            fn field(&self, column: Column) -> Option<f64> {
                match column {
                    $(Column::$column => Some(self.$field),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, column: Column) -> Option<&mut f64> {
                match column {
                    $(Column::$column => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

stat_fields! {
    PointsMade => points_made,
    Assists => assists,
    Steals => steals,
    Turnovers => turnovers,
    TwoPointMade => two_point_made,
    TwoPointAttempted => two_point_attempted,
    ThreePointMade => three_point_made,
    ThreePointAttempted => three_point_attempted,
    FieldGoalMade => field_goal_made,
    FieldGoalAttempted => field_goal_attempted,
    FreeThrowMade => free_throw_made,
    FreeThrowAttempted => free_throw_attempted,
    OffensiveRebounds => offensive_rebounds,
    DefensiveRebounds => defensive_rebounds,
    TotalRebounds => total_rebounds,
    FoulsMade => fouls_made,
    FoulsReceived => fouls_received,
    BlocksMade => blocks_made,
    BlocksReceived => blocks_received,
    Dunks => dunks,
    Ranking => ranking,
    PointBalance => point_balance,
}

impl StatLine {
    /// Sum of two lines. The jersey number is carried, not summed: the
    /// second operand wins when it has one.
    pub fn combine(&self, other: &StatLine) -> StatLine {
        let mut out = StatLine {
            number: other.number.or(self.number),
            starter: self.starter + other.starter,
            games: self.games + other.games,
            minutes: self.minutes + other.minutes,
            ..self.clone()
        };
        for spec in &SCHEMA {
            if let (Some(sum), Some(add)) = (out.field_mut(spec.column), other.field(spec.column)) {
                *sum += add;
            }
        }
        out
    }

    /// Averageable columns divided by `games`; everything else is kept.
    pub fn per_game(&self) -> StatLine {
        if self.games == 0 {
            return self.clone();
        }
        let games = f64::from(self.games);
        let mut out = self.clone();
        for spec in SCHEMA.iter().filter(|spec| spec.averageable) {
            if spec.column == Column::Minutes {
                out.minutes = Duration::milliseconds(
                    (self.minutes.num_milliseconds() as f64 / games).round() as i64,
                );
            } else if let Some(value) = out.field_mut(spec.column) {
                *value /= games;
            }
        }
        out
    }

    pub fn minutes_decimal(&self) -> f64 {
        self.minutes.num_milliseconds() as f64 / 60_000.0
    }

    /// Numeric value of a box-score column. Derived columns (ratios,
    /// volumes, possessions) are not stored here and yield `None`.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Number => self.number.map(f64::from),
            Column::Starter => Some(f64::from(self.starter)),
            Column::Games => Some(f64::from(self.games)),
            Column::Minutes => Some(self.minutes_decimal()),
            other => self.field(other),
        }
    }
}

macro_rules! id_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: StableId,
    pub name: String,
    pub exid: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: StableId,
    pub name: String,
    pub exid: Option<String>,
    pub season_stats: Option<Vec<PlayerSeasonRow>>,
}

#[derive(Debug, Clone)]
pub struct Referee {
    pub id: StableId,
    pub name: String,
}

id_identity!(Player);
id_identity!(Team);
id_identity!(Referee);

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLine {
    pub player: Player,
    pub stats: StatLine,
}

#[derive(Debug, Clone)]
pub struct Boxscore {
    pub team: Team,
    /// Official score from the page header, independent of `total.points_made`.
    pub score: Option<u32>,
    pub players: Vec<PlayerLine>,
    pub total: StatLine,
}

impl Boxscore {
    pub fn player(&self, id: &StableId) -> Option<&PlayerLine> {
        self.players.iter().find(|line| &line.player.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    pub id: StableId,
    pub exid: Option<String>,
    pub game_at: Option<NaiveDateTime>,
    pub date: String,
    pub time: String,
    pub league: String,
    pub season: String,
    pub home: Boxscore,
    pub away: Boxscore,
    pub main_referee: Referee,
    pub aux_referee: Referee,
}

impl Game {
    pub fn involves(&self, team: &Team) -> bool {
        self.home.team == *team || self.away.team == *team
    }

    /// (own boxscore, rival boxscore) for a team that played this game.
    pub fn sides(&self, team: &Team) -> Option<(&Boxscore, &Boxscore)> {
        if self.home.team == *team {
            Some((&self.home, &self.away))
        } else if self.away.team == *team {
            Some((&self.away, &self.home))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct League {
    pub id: StableId,
    pub name: String,
    pub season: String,
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
    pub aggregated_games: Option<Vec<TeamSeasonRow>>,
}

impl League {
    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn games_of<'a>(&'a self, team: &'a Team) -> impl Iterator<Item = &'a Game> + 'a {
        self.games.iter().filter(move |g| g.involves(team))
    }

    pub fn team_boxscores(&self, team: &Team) -> Vec<&Boxscore> {
        self.games
            .iter()
            .filter_map(|g| g.sides(team))
            .map(|(own, _)| own)
            .collect()
    }

    /// Boxscores produced by the opponents of `team` while facing it.
    pub fn rival_boxscores(&self, team: &Team) -> Vec<&Boxscore> {
        self.games
            .iter()
            .filter_map(|g| g.sides(team))
            .map(|(_, rival)| rival)
            .collect()
    }
}
