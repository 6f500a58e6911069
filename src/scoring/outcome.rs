use serde::Serialize;

/// Result of one member-record write within a fan-out batch
#[derive(Debug, Clone, Serialize)]
pub struct MemberWrite {
    pub id: String,
    /// None on success, store error message on failure
    pub error: Option<String>,
}

/// Settled results of a fan-out write across a participant unit's
/// member records. Writes are dispatched concurrently and all awaited;
/// a batch with any failed member must never be reported as a full
/// success, and there is no rollback - the failed ids are the retry
/// set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommitOutcome {
    pub writes: Vec<MemberWrite>,
}

impl CommitOutcome {
    pub fn from_results(results: Vec<(String, Result<(), crate::shared::AppError>)>) -> Self {
        let writes = results
            .into_iter()
            .map(|(id, result)| MemberWrite {
                id,
                error: result.err().map(|e| e.to_string()),
            })
            .collect();
        Self { writes }
    }

    pub fn is_complete(&self) -> bool {
        self.writes.iter().all(|w| w.error.is_none())
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|w| w.error.is_some())
            .map(|w| w.id.as_str())
            .collect()
    }

    /// Merges another batch into this one, keeping all member results
    pub fn absorb(&mut self, other: CommitOutcome) {
        self.writes.extend(other.writes);
    }

    /// Converts a partial batch into the error handlers return, so an
    /// incomplete fan-out can never pass for a full success
    pub fn ensure_complete(self) -> Result<Self, crate::shared::AppError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(crate::shared::AppError::PartialWrite {
                failed_ids: self.failed_ids().iter().map(|s| s.to_string()).collect(),
            })
        }
    }
}
