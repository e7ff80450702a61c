use thiserror::Error;

#[derive(Error, Debug)]
pub enum LotteryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown strategy mode code {code}")]
    UnknownStrategyMode { code: i64 },

    #[error("No draw algorithm registered for mode {mode}")]
    MissingAlgorithm { mode: String },

    #[error("Draw algorithm for mode {mode} registered twice")]
    DuplicateAlgorithm { mode: String },

    #[error("Invalid rate {rate} for award '{award_id}': must be within [0, 1]")]
    InvalidRate { award_id: String, rate: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type LotteryResult<T> = Result<T, LotteryError>;
