use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    errors::ScoringError,
    outcome::CommitOutcome,
    service::{self, ScoringService},
    types::{BatchScoreRequest, LeaderboardEntry, PrizeRequest, ScoreCommitRequest},
};
use crate::registration::grouping;
use crate::shared::{AppError, AppState};

/// HTTP handler for committing score and prize to one unit
///
/// POST /scores
/// Returns the per-member write outcome
#[instrument(name = "commit_score", skip(state, request))]
pub async fn commit_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreCommitRequest>,
) -> Result<Json<CommitOutcome>, AppError> {
    let score = service::sanitize_score(&request.score);
    info!(
        member_count = request.member_ids.len(),
        score,
        prize = %request.prize,
        "Committing unit score"
    );

    let service = ScoringService::new(Arc::clone(&state.registration_repository));
    let outcome = service
        .commit_score(&request.member_ids, score, request.prize)
        .await?;
    Ok(Json(outcome.ensure_complete()?))
}

/// HTTP handler for committing every staged score in one pass
///
/// POST /scores/all
#[instrument(name = "commit_all_scores", skip(state, request))]
pub async fn commit_all_scores(
    State(state): State<AppState>,
    Json(request): Json<BatchScoreRequest>,
) -> Result<Json<CommitOutcome>, AppError> {
    info!(unit_count = request.units.len(), "Committing score batch");

    let batch: Vec<(Vec<String>, i64, crate::registration::models::Prize)> = request
        .units
        .iter()
        .map(|u| {
            (
                u.member_ids.clone(),
                service::sanitize_score(&u.score),
                u.prize,
            )
        })
        .collect();

    let service = ScoringService::new(Arc::clone(&state.registration_repository));
    let outcome = service.commit_all_scores(&batch).await?;
    Ok(Json(outcome.ensure_complete()?))
}

/// HTTP handler for the prize-only fan-out
///
/// PUT /prizes
#[instrument(name = "set_prize", skip(state, request))]
pub async fn set_prize(
    State(state): State<AppState>,
    Json(request): Json<PrizeRequest>,
) -> Result<Json<CommitOutcome>, AppError> {
    info!(
        member_count = request.member_ids.len(),
        prize = %request.prize,
        "Setting unit prize"
    );

    let service = ScoringService::new(Arc::clone(&state.registration_repository));
    let outcome = service.set_prize(&request.member_ids, request.prize).await?;
    Ok(Json(outcome.ensure_complete()?))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// When present, only the first n scored units are returned
    pub top: Option<usize>,
}

/// HTTP handler for the ranked leaderboard
///
/// GET /leaderboard
/// GET /leaderboard?top=3
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let records = state
        .registration_repository
        .get_all()
        .await
        .map_err(ScoringError::from)?;
    let units = grouping::group(&records);

    let ranked = match query.top {
        Some(n) => service::top_performers(&units, n),
        None => service::rank(&units),
    };

    info!(unit_count = ranked.len(), "Leaderboard computed");

    let entries = ranked
        .iter()
        .map(|u| LeaderboardEntry {
            display_name: u.display_name().to_string(),
            game: u.game().to_string(),
            is_team: u.is_team(),
            score: u.score(),
            prize: u.prize(),
        })
        .collect();

    Ok(Json(entries))
}
