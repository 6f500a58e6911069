use thiserror::Error;

use crate::shared::AppError;

/// Errors produced by the registration validation pipeline. Every
/// check runs before any record is written, so a rejected request
/// leaves the store untouched.
#[derive(Error, Debug, PartialEq)]
pub enum RegistrationError {
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    #[error("Phone number must be at least 10 digits")]
    InvalidPhone,

    #[error("Team name is required for team games")]
    MissingTeamName,

    #[error("Team needs at least {required} members, got {provided}")]
    InsufficientTeamSize { required: usize, provided: usize },

    #[error("Maximum 3 game registrations per phone number")]
    RegistrationLimitExceeded,

    #[error("Already registered for {0} with this phone number")]
    AlreadyRegisteredForGame(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<AppError> for RegistrationError {
    fn from(err: AppError) -> Self {
        RegistrationError::Store(err.to_string())
    }
}
