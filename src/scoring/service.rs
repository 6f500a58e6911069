use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::errors::ScoringError;
use super::outcome::CommitOutcome;
use crate::registration::grouping::ParticipantUnit;
use crate::registration::models::Prize;
use crate::registration::repository::RegistrationRepository;

/// Normalizes raw score-desk input to a stored score. Only unsigned
/// digit strings count; anything else, including empty input, is 0.
pub fn sanitize_score(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    trimmed.parse().unwrap_or(0)
}

/// Orders units by descending score, ties broken by ascending display
/// name. The tie-break makes the order total, so repeated calls over
/// the same units agree.
pub fn rank(units: &[ParticipantUnit]) -> Vec<ParticipantUnit> {
    let mut ranked = units.to_vec();
    ranked.sort_by(|a, b| {
        b.score()
            .cmp(&a.score())
            .then_with(|| a.display_name().cmp(b.display_name()))
    });
    ranked
}

/// The first `n` ranked units that have scored at all
pub fn top_performers(units: &[ParticipantUnit], n: usize) -> Vec<ParticipantUnit> {
    rank(units)
        .into_iter()
        .filter(|u| u.score() > 0)
        .take(n)
        .collect()
}

/// Service for fan-out score and prize writes
pub struct ScoringService {
    repository: Arc<dyn RegistrationRepository>,
}

impl ScoringService {
    pub fn new(repository: Arc<dyn RegistrationRepository>) -> Self {
        Self { repository }
    }

    /// Writes score and prize to every member record of one unit.
    /// Writes are dispatched concurrently and all settled before the
    /// outcome is built; a failed member leaves the others in place
    /// with no rollback, so the unit may be mixed until a retry of the
    /// failed ids lands.
    #[instrument(skip(self), fields(member_count = member_ids.len()))]
    pub async fn commit_score(
        &self,
        member_ids: &[String],
        score: i64,
        prize: Prize,
    ) -> Result<CommitOutcome, ScoringError> {
        if member_ids.is_empty() {
            return Err(ScoringError::UnknownUnit);
        }
        debug!(score, ?prize, "Committing score to unit members");
        let writes = member_ids.iter().map(|id| async move {
            let result = self.repository.update_score_prize(id, score, prize).await;
            (id.clone(), result)
        });

        let outcome = CommitOutcome::from_results(futures::future::join_all(writes).await);
        if !outcome.is_complete() {
            warn!(failed = ?outcome.failed_ids(), "Score commit partially failed");
        }
        Ok(outcome)
    }

    /// Prize-only fan-out, leaving scores untouched
    #[instrument(skip(self), fields(member_count = member_ids.len()))]
    pub async fn set_prize(
        &self,
        member_ids: &[String],
        prize: Prize,
    ) -> Result<CommitOutcome, ScoringError> {
        if member_ids.is_empty() {
            return Err(ScoringError::UnknownUnit);
        }
        debug!(?prize, "Setting prize on unit members");
        let writes = member_ids.iter().map(|id| async move {
            let result = self.repository.update_prize(id, prize).await;
            (id.clone(), result)
        });

        let outcome = CommitOutcome::from_results(futures::future::join_all(writes).await);
        if !outcome.is_complete() {
            warn!(failed = ?outcome.failed_ids(), "Prize write partially failed");
        }
        Ok(outcome)
    }

    /// Commits a whole staged batch, one unit after another, and
    /// aggregates every member result into a single outcome
    #[instrument(skip(self, batch), fields(unit_count = batch.len()))]
    pub async fn commit_all_scores(
        &self,
        batch: &[(Vec<String>, i64, Prize)],
    ) -> Result<CommitOutcome, ScoringError> {
        let mut outcome = CommitOutcome::default();
        for (member_ids, score, prize) in batch {
            outcome.absorb(self.commit_score(member_ids, *score, *prize).await?);
        }
        Ok(outcome)
    }
}
