use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{info, instrument, warn};

use crate::shared::{AppError, AppState};

/// Admin authentication middleware - validates Authorization Bearer header and adds AdminClaims to request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), admin::admin_auth))
/// Handlers can then extract Extension(claims): Extension<AdminClaims>.
#[instrument(skip(state, req, next))]
pub async fn admin_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    info!(
        "Admin authentication middleware triggered for request {}",
        req.uri()
    );

    // Extract token from Authorization Bearer header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    // Validate token, log error if it fails
    let claims = match state.token_config.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Admin authentication failed: {}", e);
            return Err(AppError::Unauthorized("Invalid admin token".to_string()));
        }
    };

    info!(
        username = %claims.username,
        "Authentication successful, adding claims to request"
    );

    // Add claims to request extensions for handlers to use
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
