use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::report::{self, GameWinners};
use crate::shared::{AppError, AppState};

/// HTTP handler for the public winners report
///
/// GET /winners
/// Returns one entry per catalog game, in catalog order
#[instrument(name = "winners", skip(state))]
pub async fn winners(State(state): State<AppState>) -> Result<Json<Vec<GameWinners>>, AppError> {
    let records = state.registration_repository.get_all().await?;
    let report = report::build_report(&records, &state.catalog);

    info!(
        winner_count = report.iter().map(|g| g.winners.len()).sum::<usize>(),
        "Winners report built"
    );
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::models::{NewRecord, Prize};
    use crate::registration::repository::{
        InMemoryRegistrationRepository, RegistrationRepository,
    };
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_winners_handler_lists_all_games() {
        let repo = Arc::new(InMemoryRegistrationRepository::new());
        let created = repo
            .create(&NewRecord {
                name: "Asha".to_string(),
                designation: None,
                phone: "9990000001".to_string(),
                game: "Basket Ball".to_string(),
                team_name: None,
            })
            .await
            .unwrap();
        repo.update_score_prize(&created.id, 9, Prize::First)
            .await
            .unwrap();

        let state = AppStateBuilder::new()
            .with_registration_repository(repo)
            .build();
        let app = Router::new()
            .route("/winners", axum::routing::get(winners))
            .with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/winners")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let report = report.as_array().unwrap();

        assert_eq!(report.len(), 6);
        assert_eq!(report[0]["game"], "Basket Ball");
        assert_eq!(report[0]["winners"][0]["name"], "Asha");
        assert_eq!(report[0]["winners"][0]["prize"], "FIRST");
        // Games without winners still appear
        assert_eq!(report[1]["winners"].as_array().unwrap().len(), 0);
    }
}
