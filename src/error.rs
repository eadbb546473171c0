#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("unable to locate boxscore tables (tried `{selector}`)")]
    TableNotFound { selector: String },

    #[error("unfinished game: {played} of {required} quarters played")]
    UnfinishedGame { played: usize, required: usize },

    #[error("no known {family} column among headers {headers:?}")]
    UnknownColumn {
        family: &'static str,
        headers: Vec<String>,
    },

    #[error("cannot read `{text}` in column `{column}`")]
    FieldFormat { column: String, text: String },

    #[error("cannot aggregate an empty list of boxscores")]
    EmptyAggregation,

    #[error("no games found in {documents} documents")]
    NoGamesFound { documents: usize },
}

impl StatsError {
    /// Errors that mean "this document has no usable game" rather than
    /// "this document has a shape we do not understand".
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            StatsError::TableNotFound { .. } | StatsError::UnfinishedGame { .. }
        )
    }

    pub(crate) fn field(column: &str, text: &str) -> Self {
        StatsError::FieldFormat {
            column: column.to_string(),
            text: text.to_string(),
        }
    }
}
