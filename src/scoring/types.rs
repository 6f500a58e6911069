use serde::{Deserialize, Serialize};

use crate::registration::models::Prize;

/// Request payload for committing score and prize to one unit. Score
/// arrives as the raw text the score desk typed; the engine sanitizes
/// it before the write.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreCommitRequest {
    pub member_ids: Vec<String>,
    pub score: String,
    #[serde(default)]
    pub prize: Prize,
}

/// Request payload for the prize-only fan-out
#[derive(Debug, Clone, Deserialize)]
pub struct PrizeRequest {
    pub member_ids: Vec<String>,
    pub prize: Prize,
}

/// Request payload for committing every staged score in one pass
#[derive(Debug, Clone, Deserialize)]
pub struct BatchScoreRequest {
    pub units: Vec<ScoreCommitRequest>,
}

/// One row of the ranked leaderboard
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub display_name: String,
    pub game: String,
    pub is_team: bool,
    pub score: i64,
    pub prize: Prize,
}
