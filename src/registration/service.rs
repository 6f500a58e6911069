use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    errors::RegistrationError,
    grouping::{self, ParticipantUnit},
    models::{NewRecord, RecordUpdate, RegistrationRecord},
    repository::RegistrationRepository,
    types::{RegistrationRequest, UnitUpdateRequest},
};
use crate::catalog::GameCatalog;
use crate::scoring::CommitOutcome;

/// A phone number may back at most this many registrations, counted
/// across all games
pub const MAX_REGISTRATIONS_PER_PHONE: usize = 3;

const MIN_PHONE_DIGITS: usize = 10;

/// Service for signup validation and admin registration maintenance
pub struct RegistrationService {
    repository: Arc<dyn RegistrationRepository>,
    catalog: Arc<GameCatalog>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn RegistrationRepository>, catalog: Arc<GameCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Validates a signup and writes its records. All checks run
    /// before any write; a rejection leaves the store untouched.
    ///
    /// The limit and duplicate checks read current store state and the
    /// writes follow without a lock, so two simultaneous submissions
    /// for the same phone can both pass. Accepted gap: the event desk
    /// resolves those by hand.
    #[instrument(skip(self, request), fields(game = %request.game, phone = %request.phone))]
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        let game = self
            .catalog
            .find(&request.game)
            .ok_or_else(|| RegistrationError::UnknownGame(request.game.clone()))?;

        let phone = request.phone.trim();
        if phone.len() < MIN_PHONE_DIGITS {
            return Err(RegistrationError::InvalidPhone);
        }

        let mut team_name = None;
        let mut members: Vec<String> = Vec::new();
        if game.is_team() {
            let name = request
                .team_name
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(RegistrationError::MissingTeamName)?;
            team_name = Some(name.to_string());

            // Blank member slots are discarded before the size check
            members = request
                .team_members
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
            members.truncate(game.max_members);

            if members.len() < game.min_members {
                return Err(RegistrationError::InsufficientTeamSize {
                    required: game.min_members,
                    provided: members.len(),
                });
            }
        }

        let existing = self.repository.count_by_phone(phone).await?;
        if existing >= MAX_REGISTRATIONS_PER_PHONE {
            warn!(existing, "Registration limit reached for phone");
            return Err(RegistrationError::RegistrationLimitExceeded);
        }

        if self
            .repository
            .exists_for_phone_and_game(phone, game.title)
            .await?
        {
            return Err(RegistrationError::AlreadyRegisteredForGame(
                game.title.to_string(),
            ));
        }

        let new_records: Vec<NewRecord> = if game.is_team() {
            members
                .into_iter()
                .map(|member| NewRecord {
                    name: member,
                    designation: None,
                    phone: phone.to_string(),
                    game: game.title.to_string(),
                    team_name: team_name.clone(),
                })
                .collect()
        } else {
            vec![NewRecord {
                name: request.name.trim().to_string(),
                designation: request.designation.clone(),
                phone: phone.to_string(),
                game: game.title.to_string(),
                team_name: None,
            }]
        };

        let mut created = Vec::with_capacity(new_records.len());
        for record in &new_records {
            created.push(self.repository.create(record).await?);
        }

        info!(
            record_count = created.len(),
            team = team_name.is_some(),
            "Registration accepted"
        );
        Ok(created)
    }

    /// All registrations collapsed into participant units, newest
    /// first
    #[instrument(skip(self))]
    pub async fn list_units(&self) -> Result<Vec<ParticipantUnit>, RegistrationError> {
        let records = self.repository.get_all().await?;
        debug!(record_count = records.len(), "Grouping registrations");
        Ok(grouping::group(&records))
    }

    /// Admin edit of one unit, fanned out over its member records.
    /// Team member names are replaced positionally; a missing or blank
    /// entry keeps the stored name.
    #[instrument(skip(self, request), fields(member_count = request.member_ids.len()))]
    pub async fn update_unit(
        &self,
        request: UnitUpdateRequest,
    ) -> Result<CommitOutcome, RegistrationError> {
        let records = self.repository.get_all().await?;

        let is_team = request
            .team_name
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);

        let mut writes = Vec::with_capacity(request.member_ids.len());
        for (index, id) in request.member_ids.iter().enumerate() {
            let existing = records.iter().find(|r| &r.id == id);
            let name = if is_team {
                request
                    .member_names
                    .get(index)
                    .map(|n| n.trim())
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .or_else(|| existing.map(|r| r.name.clone()))
                    .unwrap_or_else(|| request.name.clone())
            } else {
                request.name.clone()
            };

            let update = RecordUpdate {
                name,
                designation: request.designation.clone(),
                phone: request.phone.clone(),
                game: request.game.clone(),
                team_name: request.team_name.clone(),
            };
            writes.push(async move {
                let result = self.repository.update_fields(id, &update).await;
                (id.clone(), result)
            });
        }

        let outcome = CommitOutcome::from_results(futures::future::join_all(writes).await);
        if !outcome.is_complete() {
            warn!(failed = ?outcome.failed_ids(), "Unit edit partially failed");
        }
        Ok(outcome)
    }

    /// Admin delete of one unit, removing every member record. Partial
    /// failure leaves the surviving records in place for a retry.
    #[instrument(skip(self), fields(member_count = member_ids.len()))]
    pub async fn delete_unit(&self, member_ids: &[String]) -> CommitOutcome {
        let deletes = member_ids.iter().map(|id| async move {
            let result = self.repository.delete(id).await;
            (id.clone(), result)
        });

        let outcome = CommitOutcome::from_results(futures::future::join_all(deletes).await);
        if !outcome.is_complete() {
            warn!(failed = ?outcome.failed_ids(), "Unit delete partially failed");
        }
        outcome
    }
}
