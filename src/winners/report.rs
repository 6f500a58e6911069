use serde::Serialize;

use crate::catalog::{GameCatalog, ParticipationMode};
use crate::registration::grouping::{self, ParticipantUnit};
use crate::registration::models::{Prize, RegistrationRecord};

/// One prize-holding unit in the winners report
#[derive(Debug, Clone, Serialize)]
pub struct WinnerEntry {
    pub name: String,
    /// Present for team units
    pub team_name: Option<String>,
    pub prize: Prize,
    pub score: i64,
    pub mode: ParticipationMode,
}

/// Winners of one game. Games without any awarded prize still appear,
/// with an empty winner list.
#[derive(Debug, Clone, Serialize)]
pub struct GameWinners {
    pub game: String,
    pub winners: Vec<WinnerEntry>,
}

/// Builds the public winners report: units holding a prize, bucketed
/// per game, one bucket per catalog game in catalog order. Winners
/// within a game sort by prize rank (First ahead of Third), ties by
/// descending score.
pub fn build_report(records: &[RegistrationRecord], catalog: &GameCatalog) -> Vec<GameWinners> {
    let units = grouping::group(records);

    catalog
        .iter()
        .map(|game| {
            let mut winners: Vec<WinnerEntry> = units
                .iter()
                .filter(|u| u.game() == game.title && u.prize().is_awarded())
                .map(|u| entry(u, game.mode))
                .collect();
            winners.sort_by(|a, b| {
                a.prize
                    .rank()
                    .cmp(&b.prize.rank())
                    .then_with(|| b.score.cmp(&a.score))
            });

            GameWinners {
                game: game.title.to_string(),
                winners,
            }
        })
        .collect()
}

fn entry(unit: &ParticipantUnit, mode: ParticipationMode) -> WinnerEntry {
    WinnerEntry {
        name: unit.display_name().to_string(),
        team_name: match unit {
            ParticipantUnit::Team { team_name, .. } => Some(team_name.clone()),
            ParticipantUnit::Individual(_) => None,
        },
        prize: unit.prize(),
        score: unit.score(),
        mode,
    }
}
