pub mod handlers;
pub mod service;
pub mod types;

mod errors;
mod outcome;

pub use errors::ScoringError;
pub use handlers::{commit_all_scores, commit_score, leaderboard, set_prize};
pub use outcome::{CommitOutcome, MemberWrite};
pub use service::{rank, sanitize_score, top_performers, ScoringService};
