use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Prize tier assigned to a participant unit for one game
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Prize {
    #[default]
    None,
    First,
    Second,
    Third,
}

impl Prize {
    /// Ordering used by the winners report: First sorts before Second
    /// before Third. None never appears in a report.
    pub fn rank(&self) -> u8 {
        match self {
            Prize::First => 1,
            Prize::Second => 2,
            Prize::Third => 3,
            Prize::None => 4,
        }
    }

    pub fn is_awarded(&self) -> bool {
        *self != Prize::None
    }
}

/// One persisted registration document. Team signups produce one
/// record per member, all sharing the team name, phone and game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Store-assigned opaque id
    pub id: String,
    pub name: String,
    /// Present for individual games only
    pub designation: Option<String>,
    /// Per-person identity key across games
    pub phone: String,
    /// References a GameDefinition title
    pub game: String,
    /// Non-empty iff this record belongs to a team registration
    pub team_name: Option<String>,
    pub score: i64,
    pub prize: Prize,
    /// Store-assigned write timestamp; reads come back newest first
    pub created_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// A record is a team member when it carries a non-blank team name
    pub fn is_team_member(&self) -> bool {
        self.team_name
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Fields supplied when creating a record; the store assigns id,
/// timestamp, and the zero score / no prize defaults.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub designation: Option<String>,
    pub phone: String,
    pub game: String,
    pub team_name: Option<String>,
}

/// Field replacement applied by the admin edit flow to every record
/// of a participant unit. Score and prize are not touched here; those
/// go through the scoring fan-out.
#[derive(Debug, Clone)]
pub struct RecordUpdate {
    pub name: String,
    pub designation: Option<String>,
    pub phone: String,
    pub game: String,
    pub team_name: Option<String>,
}
