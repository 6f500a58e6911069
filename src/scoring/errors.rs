use thiserror::Error;

use crate::shared::AppError;

/// Errors produced by the scoring engine
#[derive(Error, Debug, PartialEq)]
pub enum ScoringError {
    #[error("No registration records for this unit")]
    UnknownUnit,

    #[error("Store error: {0}")]
    Store(String),
}

impl From<AppError> for ScoringError {
    fn from(err: AppError) -> Self {
        ScoringError::Store(err.to_string())
    }
}
