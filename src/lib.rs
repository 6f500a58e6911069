// Library crate for the festival registration server
// This file exposes the public API for integration tests

pub mod admin;
pub mod catalog;
pub mod registration;
pub mod scoring;
pub mod shared;
pub mod winners;

// Re-export commonly used types for easier access in tests
pub use catalog::{GameCatalog, GameDefinition, ParticipationMode};
pub use registration::{ParticipantUnit, Prize, RegistrationRecord, RegistrationRepository};
pub use scoring::CommitOutcome;
pub use shared::{AppError, AppState};

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the full application router. Mutating registration, score,
/// and prize routes sit behind the admin bearer guard; signup and the
/// public views do not.
pub fn app_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/registrations",
            get(registration::list_registrations)
                .put(registration::update_registration)
                .delete(registration::delete_registration),
        )
        .route("/scores", post(scoring::commit_score))
        .route("/scores/all", post(scoring::commit_all_scores))
        .route("/prizes", put(scoring::set_prize))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin::admin_auth,
        ));

    Router::new()
        .route("/games", get(catalog::list_games))
        .route("/registrations", post(registration::register))
        .route("/leaderboard", get(scoring::leaderboard))
        .route("/winners", get(winners::winners))
        .route("/admin/login", post(admin::login))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
