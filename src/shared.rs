use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::admin::token::TokenConfig;
use crate::catalog::GameCatalog;
use crate::registration::repository::RegistrationRepository;
use crate::registration::RegistrationError;
use crate::scoring::ScoringError;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub registration_repository: Arc<dyn RegistrationRepository>,
    pub catalog: Arc<GameCatalog>,
    pub token_config: TokenConfig,
}

impl AppState {
    pub fn new(
        registration_repository: Arc<dyn RegistrationRepository>,
        catalog: Arc<GameCatalog>,
        token_config: TokenConfig,
    ) -> Self {
        Self {
            registration_repository,
            catalog,
            token_config,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A fan-out batch where some member writes failed. Carries the
    /// retry set so the caller never mistakes it for a full success.
    #[error("Partial write failure for {} record(s)", failed_ids.len())]
    PartialWrite { failed_ids: Vec<String> },

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::JwtError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Database error: {}", msg) }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::PartialWrite { failed_ids } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Some records were not updated",
                    "failed_ids": failed_ids,
                }),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::UnknownGame(_)
            | RegistrationError::InvalidPhone
            | RegistrationError::MissingTeamName
            | RegistrationError::InsufficientTeamSize { .. } => {
                AppError::Validation(err.to_string())
            }
            RegistrationError::RegistrationLimitExceeded
            | RegistrationError::AlreadyRegisteredForGame(_) => AppError::Conflict(err.to_string()),
            RegistrationError::Store(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::UnknownUnit => AppError::NotFound(err.to_string()),
            ScoringError::Store(msg) => AppError::DatabaseError(msg),
        }
    }
}
