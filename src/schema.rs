//! Canonical column table shared by the transformer, the aggregator and the
//! record export. Every column appears once, in `Column` declaration order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Team,
    Mode,
    Player,
    Number,
    Oer,
    Oer40Min,
    Der,
    Games,
    Starter,
    PointsMade,
    PointsReceived,
    TotalPossessions,
    Minutes,
    Assists,
    Steals,
    Turnovers,
    TwoPointPercentage,
    TwoPointMade,
    TwoPointAttempted,
    ThreePointPercentage,
    ThreePointMade,
    ThreePointAttempted,
    FieldGoalPercentage,
    FieldGoalMade,
    FieldGoalAttempted,
    FreeThrowPercentage,
    FreeThrowMade,
    FreeThrowAttempted,
    OffensiveRebounds,
    DefensiveRebounds,
    TotalRebounds,
    FoulsMade,
    FoulsReceived,
    BlocksMade,
    BlocksReceived,
    Dunks,
    Ranking,
    PointBalance,
    PointsMadeVolume,
    TotalPossessionsVolume,
    TwoPointMadeVolume,
    TwoPointAttemptedVolume,
    ThreePointMadeVolume,
    ThreePointAttemptedVolume,
    FieldGoalMadeVolume,
    FieldGoalAttemptedVolume,
    FreeThrowMadeVolume,
    FreeThrowAttemptedVolume,
    DefensiveReboundsVolume,
    OffensiveReboundsVolume,
    TotalReboundsVolume,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub column: Column,
    pub name: &'static str,
    /// Divided by `games` when a season row is averaged.
    pub averageable: bool,
    pub label_en: &'static str,
    pub label_es: &'static str,
}

const fn spec(
    column: Column,
    name: &'static str,
    averageable: bool,
    label_en: &'static str,
    label_es: &'static str,
) -> ColumnSpec {
    ColumnSpec {
        column,
        name,
        averageable,
        label_en,
        label_es,
    }
}

pub static SCHEMA: [ColumnSpec; 51] = [
    spec(Column::Team, "team", false, "Team", "Equipo"),
    spec(Column::Mode, "mode", false, "Mode", "Modo"),
    spec(Column::Player, "player", false, "Player", "Jugador"),
    spec(Column::Number, "number", false, "Number", "Dorsal"),
    spec(Column::Oer, "oer", false, "OER", "OER"),
    spec(Column::Oer40Min, "oer_40_min", false, "OER per 40 min", "OER por 40 min"),
    spec(Column::Der, "der", false, "DER", "DER"),
    spec(Column::Games, "games", false, "Games", "Partidos"),
    spec(Column::Starter, "starter", false, "Starts", "Titular"),
    spec(Column::PointsMade, "points_made", true, "Points", "Puntos favor"),
    spec(Column::PointsReceived, "points_received", true, "Points against", "Puntos contra"),
    spec(Column::TotalPossessions, "total_possessions", true, "Possessions", "Posesiones totales"),
    spec(Column::Minutes, "minutes", true, "Minutes", "Minutos"),
    spec(Column::Assists, "assists", true, "Assists", "Asistencias"),
    spec(Column::Steals, "steals", true, "Steals", "Recuperaciones"),
    spec(Column::Turnovers, "turnovers", true, "Turnovers", "Pérdidas"),
    spec(Column::TwoPointPercentage, "2_point_percentage", false, "2PT %", "% 2 puntos"),
    spec(Column::TwoPointMade, "2_point_made", true, "2PT made", "2 puntos metidos"),
    spec(Column::TwoPointAttempted, "2_point_attempted", true, "2PT attempted", "2 puntos intentados"),
    spec(Column::ThreePointPercentage, "3_point_percentage", false, "3PT %", "% 3 puntos"),
    spec(Column::ThreePointMade, "3_point_made", true, "3PT made", "3 puntos metidos"),
    spec(Column::ThreePointAttempted, "3_point_attempted", true, "3PT attempted", "3 puntos intentados"),
    spec(Column::FieldGoalPercentage, "field_goal_percentage", false, "FG %", "% tiros campo"),
    spec(Column::FieldGoalMade, "field_goal_made", true, "FG made", "Tiros campo metidos"),
    spec(Column::FieldGoalAttempted, "field_goal_attempted", true, "FG attempted", "Tiros campo intentados"),
    spec(Column::FreeThrowPercentage, "free_throw_percentage", false, "FT %", "% tiros libres"),
    spec(Column::FreeThrowMade, "free_throw_made", true, "FT made", "Tiros libres metidos"),
    spec(Column::FreeThrowAttempted, "free_throw_attempted", true, "FT attempted", "Tiros libres intentados"),
    spec(Column::OffensiveRebounds, "offensive_rebounds", true, "Offensive rebounds", "Rebotes ofensivos"),
    spec(Column::DefensiveRebounds, "defensive_rebounds", true, "Defensive rebounds", "Rebotes defensivos"),
    spec(Column::TotalRebounds, "total_rebounds", true, "Rebounds", "Rebotes totales"),
    spec(Column::FoulsMade, "fouls_made", true, "Fouls made", "Faltas cometidas"),
    spec(Column::FoulsReceived, "fouls_received", true, "Fouls received", "Faltas recibidas"),
    spec(Column::BlocksMade, "blocks_made", true, "Blocks made", "Tapones favor"),
    spec(Column::BlocksReceived, "blocks_received", true, "Blocks received", "Tapones contra"),
    spec(Column::Dunks, "dunks", true, "Dunks", "Mates"),
    spec(Column::Ranking, "ranking", true, "Ranking", "Valoración"),
    spec(Column::PointBalance, "point_balance", true, "+/-", "Balance"),
    spec(Column::PointsMadeVolume, "points_made_volume", false, "Points vol.", "Vol. puntos"),
    spec(Column::TotalPossessionsVolume, "total_possessions_volume", false, "Possessions vol.", "Vol. posesiones"),
    spec(Column::TwoPointMadeVolume, "2_point_made_volume", false, "2PT made vol.", "Vol. 2 puntos metidos"),
    spec(Column::TwoPointAttemptedVolume, "2_point_attempted_volume", false, "2PT attempted vol.", "Vol. 2 puntos intentados"),
    spec(Column::ThreePointMadeVolume, "3_point_made_volume", false, "3PT made vol.", "Vol. 3 puntos metidos"),
    spec(Column::ThreePointAttemptedVolume, "3_point_attempted_volume", false, "3PT attempted vol.", "Vol. 3 puntos intentados"),
    spec(Column::FieldGoalMadeVolume, "field_goal_made_volume", false, "FG made vol.", "Vol. tiros campo metidos"),
    spec(Column::FieldGoalAttemptedVolume, "field_goal_attempted_volume", false, "FG attempted vol.", "Vol. tiros campo intentados"),
    spec(Column::FreeThrowMadeVolume, "free_throw_made_volume", false, "FT made vol.", "Vol. tiros libres metidos"),
    spec(Column::FreeThrowAttemptedVolume, "free_throw_attempted_volume", false, "FT attempted vol.", "Vol. tiros libres intentados"),
    spec(Column::DefensiveReboundsVolume, "defensive_rebounds_volume", false, "Def. rebounds vol.", "Vol. rebotes defensivos"),
    spec(Column::OffensiveReboundsVolume, "offensive_rebounds_volume", false, "Off. rebounds vol.", "Vol. rebotes ofensivos"),
    spec(Column::TotalReboundsVolume, "total_rebounds_volume", false, "Rebounds vol.", "Vol. rebotes totales"),
];

/// (counting column, its share-of-team column).
pub const VOLUME_COLUMNS: [(Column, Column); 13] = [
    (Column::PointsMade, Column::PointsMadeVolume),
    (Column::TotalPossessions, Column::TotalPossessionsVolume),
    (Column::TwoPointMade, Column::TwoPointMadeVolume),
    (Column::TwoPointAttempted, Column::TwoPointAttemptedVolume),
    (Column::ThreePointMade, Column::ThreePointMadeVolume),
    (Column::ThreePointAttempted, Column::ThreePointAttemptedVolume),
    (Column::FieldGoalMade, Column::FieldGoalMadeVolume),
    (Column::FieldGoalAttempted, Column::FieldGoalAttemptedVolume),
    (Column::FreeThrowMade, Column::FreeThrowMadeVolume),
    (Column::FreeThrowAttempted, Column::FreeThrowAttemptedVolume),
    (Column::DefensiveRebounds, Column::DefensiveReboundsVolume),
    (Column::OffensiveRebounds, Column::OffensiveReboundsVolume),
    (Column::TotalRebounds, Column::TotalReboundsVolume),
];

/// Column order of `League::aggregated_games` records.
pub const TEAM_COLUMNS: &[Column] = &[
    Column::Team,
    Column::Oer,
    Column::Der,
    Column::Games,
    Column::PointsMade,
    Column::PointsReceived,
    Column::TotalPossessions,
    Column::Minutes,
    Column::Assists,
    Column::Steals,
    Column::Turnovers,
    Column::TwoPointPercentage,
    Column::TwoPointMade,
    Column::TwoPointAttempted,
    Column::ThreePointPercentage,
    Column::ThreePointMade,
    Column::ThreePointAttempted,
    Column::FieldGoalPercentage,
    Column::FieldGoalMade,
    Column::FieldGoalAttempted,
    Column::FreeThrowPercentage,
    Column::FreeThrowMade,
    Column::FreeThrowAttempted,
    Column::OffensiveRebounds,
    Column::DefensiveRebounds,
    Column::TotalRebounds,
    Column::FoulsMade,
    Column::FoulsReceived,
    Column::BlocksMade,
    Column::BlocksReceived,
    Column::Dunks,
    Column::Ranking,
    Column::Mode,
    Column::PointBalance,
];

pub const PLAYER_COLUMNS: &[Column] = &[
    Column::Player,
    Column::Number,
    Column::Oer,
    Column::Oer40Min,
    Column::Games,
    Column::Starter,
    Column::PointsMade,
    Column::PointsMadeVolume,
    Column::TotalPossessions,
    Column::TotalPossessionsVolume,
    Column::Minutes,
    Column::Assists,
    Column::Steals,
    Column::Turnovers,
    Column::TwoPointPercentage,
    Column::TwoPointMade,
    Column::TwoPointMadeVolume,
    Column::TwoPointAttempted,
    Column::TwoPointAttemptedVolume,
    Column::ThreePointPercentage,
    Column::ThreePointMade,
    Column::ThreePointMadeVolume,
    Column::ThreePointAttempted,
    Column::ThreePointAttemptedVolume,
    Column::FieldGoalPercentage,
    Column::FieldGoalMade,
    Column::FieldGoalMadeVolume,
    Column::FieldGoalAttempted,
    Column::FieldGoalAttemptedVolume,
    Column::FreeThrowPercentage,
    Column::FreeThrowMade,
    Column::FreeThrowMadeVolume,
    Column::FreeThrowAttempted,
    Column::FreeThrowAttemptedVolume,
    Column::OffensiveRebounds,
    Column::OffensiveReboundsVolume,
    Column::DefensiveRebounds,
    Column::DefensiveReboundsVolume,
    Column::TotalRebounds,
    Column::TotalReboundsVolume,
    Column::FoulsMade,
    Column::FoulsReceived,
    Column::BlocksMade,
    Column::BlocksReceived,
    Column::Dunks,
    Column::Ranking,
    Column::PointBalance,
];

impl Column {
    pub fn spec(self) -> &'static ColumnSpec {
        &SCHEMA[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn is_averageable(self) -> bool {
        self.spec().averageable
    }

    pub fn volume_base(self) -> Option<Column> {
        VOLUME_COLUMNS
            .iter()
            .find(|(_, vol)| *vol == self)
            .map(|(base, _)| *base)
    }

    pub fn label(self, spanish: bool) -> &'static str {
        let spec = self.spec();
        if spanish { spec.label_es } else { spec.label_en }
    }
}
