use serde::{Deserialize, Serialize};

use super::grouping::ParticipantUnit;
use crate::registration::models::Prize;

/// Request payload for a signup, individual or team. Team games carry
/// a team name and the member name list; individual games carry an
/// optional designation instead.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    pub phone: String,
    pub game: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_members: Vec<String>,
}

/// Request payload for the admin edit of one participant unit. Member
/// ids come from the grouped listing; `member_names` replaces member
/// record names positionally, keeping the existing name where the
/// list is short or blank.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitUpdateRequest {
    pub member_ids: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    pub phone: String,
    pub game: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub member_names: Vec<String>,
}

/// Request payload for the admin delete of one participant unit
#[derive(Debug, Clone, Deserialize)]
pub struct UnitDeleteRequest {
    pub member_ids: Vec<String>,
}

/// Response after a successful signup
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub ids: Vec<String>,
    pub game: String,
}

/// One row of the grouped registrations listing
#[derive(Debug, Serialize)]
pub struct UnitView {
    pub display_name: String,
    pub game: String,
    pub phone: String,
    pub is_team: bool,
    pub score: i64,
    pub prize: Prize,
    pub members: Vec<MemberView>,
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub id: String,
    pub name: String,
    pub designation: Option<String>,
}

impl From<&ParticipantUnit> for UnitView {
    fn from(unit: &ParticipantUnit) -> Self {
        let members = match unit {
            ParticipantUnit::Individual(record) => vec![MemberView {
                id: record.id.clone(),
                name: record.name.clone(),
                designation: record.designation.clone(),
            }],
            ParticipantUnit::Team { members, .. } => members
                .iter()
                .map(|m| MemberView {
                    id: m.id.clone(),
                    name: m.name.clone(),
                    designation: m.designation.clone(),
                })
                .collect(),
        };

        let phone = match unit {
            ParticipantUnit::Individual(record) => record.phone.clone(),
            ParticipantUnit::Team { phone, .. } => phone.clone(),
        };

        UnitView {
            display_name: unit.display_name().to_string(),
            game: unit.game().to_string(),
            phone,
            is_team: unit.is_team(),
            score: unit.score(),
            prize: unit.prize(),
            members,
        }
    }
}
