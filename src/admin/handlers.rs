use axum::{extract::State, Json};
use tracing::{info, instrument, warn};

use super::types::{AdminLoginRequest, AdminLoginResponse};
use crate::shared::{AppError, AppState};

/// The event desk credential pair. A single shared login for the one
/// admin station at the venue; deliberately not a real auth system.
fn admin_credentials() -> (String, String) {
    (
        std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "pongal2026".to_string()),
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "pongal@123".to_string()),
    )
}

/// HTTP handler for the admin login
///
/// POST /admin/login
/// Returns a bearer token for the admin routes
#[instrument(name = "admin_login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let (username, password) = admin_credentials();

    if request.username != username || request.password != password {
        warn!("Rejected admin login attempt");
        return Err(AppError::Unauthorized(
            "Invalid admin credentials".to_string(),
        ));
    }

    let token = state.token_config.create_token(request.username)?;
    info!("Admin login succeeded");

    Ok(Json(AdminLoginResponse { token }))
}
