use crate::models::{FilmId, UserId};

/// Application-level errors
///
/// The recommendation pipeline itself never fails for lack of data. These
/// variants cover the calling layer: id validation, collaborator failures and
/// configuration.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Film not found: {0}")]
    FilmNotFound(FilmId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Like store error: {0}")]
    LikeStore(String),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
