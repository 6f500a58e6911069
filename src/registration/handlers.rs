use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::RegistrationService,
    types::{
        RegistrationRequest, RegistrationResponse, UnitDeleteRequest, UnitUpdateRequest, UnitView,
    },
};
use crate::scoring::CommitOutcome;
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> RegistrationService {
    RegistrationService::new(
        Arc::clone(&state.registration_repository),
        Arc::clone(&state.catalog),
    )
}

/// HTTP handler for a signup, individual or team
///
/// POST /registrations
/// Returns the ids of the created records
#[instrument(name = "register", skip(state, request), fields(game = %request.game))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> Result<Json<RegistrationResponse>, AppError> {
    info!(game = %request.game, "Processing registration");

    let created = service(&state).register(request).await?;

    let response = RegistrationResponse {
        ids: created.iter().map(|r| r.id.clone()).collect(),
        game: created
            .first()
            .map(|r| r.game.clone())
            .unwrap_or_default(),
    };

    info!(record_count = response.ids.len(), "Registration stored");
    Ok(Json(response))
}

/// HTTP handler for the grouped registrations listing
///
/// GET /registrations
/// Returns participant units, newest registration first
#[instrument(name = "list_registrations", skip(state))]
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<UnitView>>, AppError> {
    let units = service(&state).list_units().await?;

    info!(unit_count = units.len(), "Registrations listed");
    Ok(Json(units.iter().map(UnitView::from).collect()))
}

/// HTTP handler for the admin edit of one unit
///
/// PUT /registrations
#[instrument(name = "update_registration", skip(state, request))]
pub async fn update_registration(
    State(state): State<AppState>,
    Json(request): Json<UnitUpdateRequest>,
) -> Result<Json<CommitOutcome>, AppError> {
    info!(
        member_count = request.member_ids.len(),
        "Updating registration unit"
    );

    let outcome = service(&state).update_unit(request).await?;
    Ok(Json(outcome.ensure_complete()?))
}

/// HTTP handler for the admin delete of one unit
///
/// DELETE /registrations
#[instrument(name = "delete_registration", skip(state, request))]
pub async fn delete_registration(
    State(state): State<AppState>,
    Json(request): Json<UnitDeleteRequest>,
) -> Result<Json<CommitOutcome>, AppError> {
    info!(
        member_count = request.member_ids.len(),
        "Deleting registration unit"
    );

    let outcome = service(&state).delete_unit(&request.member_ids).await;
    Ok(Json(outcome.ensure_complete()?))
}
