use serde::Serialize;
use std::collections::HashMap;

use super::models::{Prize, RegistrationRecord};

/// Composite identity of a team within one game. Individual records
/// never enter the map, so a key always carries a real team name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamKey {
    pub team_name: String,
    pub game: String,
    pub phone: String,
}

impl TeamKey {
    fn of(record: &RegistrationRecord) -> Option<Self> {
        let team_name = record.team_name.as_deref()?.trim();
        if team_name.is_empty() {
            return None;
        }
        Some(Self {
            team_name: team_name.to_string(),
            game: record.game.clone(),
            phone: record.phone.clone(),
        })
    }
}

/// One row of the admin and scoring views: either a lone registrant
/// or a whole team collapsed into a single unit.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParticipantUnit {
    Individual(RegistrationRecord),
    Team {
        team_name: String,
        game: String,
        phone: String,
        members: Vec<RegistrationRecord>,
    },
}

impl ParticipantUnit {
    /// Name shown in rankings: member name or team name
    pub fn display_name(&self) -> &str {
        match self {
            ParticipantUnit::Individual(record) => &record.name,
            ParticipantUnit::Team { team_name, .. } => team_name,
        }
    }

    pub fn game(&self) -> &str {
        match self {
            ParticipantUnit::Individual(record) => &record.game,
            ParticipantUnit::Team { game, .. } => game,
        }
    }

    /// The unit's effective score is its first member's. Fan-out
    /// writes keep all members equal, so any member would do.
    pub fn score(&self) -> i64 {
        match self {
            ParticipantUnit::Individual(record) => record.score,
            ParticipantUnit::Team { members, .. } => {
                members.first().map(|m| m.score).unwrap_or(0)
            }
        }
    }

    pub fn prize(&self) -> Prize {
        match self {
            ParticipantUnit::Individual(record) => record.prize,
            ParticipantUnit::Team { members, .. } => {
                members.first().map(|m| m.prize).unwrap_or_default()
            }
        }
    }

    /// Record ids of every member, the target set for fan-out writes
    pub fn member_ids(&self) -> Vec<String> {
        match self {
            ParticipantUnit::Individual(record) => vec![record.id.clone()],
            ParticipantUnit::Team { members, .. } => {
                members.iter().map(|m| m.id.clone()).collect()
            }
        }
    }

    pub fn member_count(&self) -> usize {
        match self {
            ParticipantUnit::Individual(_) => 1,
            ParticipantUnit::Team { members, .. } => members.len(),
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, ParticipantUnit::Team { .. })
    }
}

/// Collapses per-person records into participant units. Single pass;
/// output order is the first-encounter order of the input, so a
/// newest-first record list yields a newest-first unit list. Pure and
/// idempotent over the same input.
pub fn group(records: &[RegistrationRecord]) -> Vec<ParticipantUnit> {
    let mut units: Vec<ParticipantUnit> = Vec::new();
    let mut team_index: HashMap<TeamKey, usize> = HashMap::new();

    for record in records {
        match TeamKey::of(record) {
            Some(key) => {
                if let Some(&at) = team_index.get(&key) {
                    if let ParticipantUnit::Team { members, .. } = &mut units[at] {
                        members.push(record.clone());
                    }
                } else {
                    team_index.insert(key.clone(), units.len());
                    units.push(ParticipantUnit::Team {
                        team_name: key.team_name,
                        game: key.game,
                        phone: key.phone,
                        members: vec![record.clone()],
                    });
                }
            }
            None => units.push(ParticipantUnit::Individual(record.clone())),
        }
    }

    units
}
