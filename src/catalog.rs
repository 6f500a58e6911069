use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::instrument;

use crate::shared::AppState;

/// Whether a game is played solo or in teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipationMode {
    Individual,
    Team,
}

/// Static catalog entry for one festival game
#[derive(Debug, Clone, Serialize)]
pub struct GameDefinition {
    pub title: &'static str,
    pub mode: ParticipationMode,
    pub min_members: usize,
    pub max_members: usize,
    pub description: &'static str,
    pub rules: &'static [&'static str],
    pub prize_summary: &'static str,
}

impl GameDefinition {
    pub fn is_team(&self) -> bool {
        self.mode == ParticipationMode::Team
    }
}

/// The fixed set of games offered at the event. Built once at startup
/// and never mutated; the winners report iterates it in declaration
/// order so every game appears in the results view.
#[derive(Debug)]
pub struct GameCatalog {
    games: Vec<GameDefinition>,
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GameCatalog {
    pub fn new() -> Self {
        Self {
            games: vec![
                GameDefinition {
                    title: "Basket Ball",
                    mode: ParticipationMode::Individual,
                    min_members: 1,
                    max_members: 1,
                    description: "Score points by shooting basketball into the hoop",
                    rules: &[
                        "Each player gets 5 chances to shoot the ball into the basket",
                        "Every successful shot = 1 point",
                        "Players must shoot from behind the designated line",
                        "Top 3 players with highest scores win prizes",
                        "In case of tie, sudden death round will be conducted",
                    ],
                    prize_summary: "1st, 2nd place winners",
                },
                GameDefinition {
                    title: "Kolam Design",
                    mode: ParticipationMode::Team,
                    min_members: 2,
                    max_members: 4,
                    description: "Create beautiful traditional Rangoli designs in teams",
                    rules: &[
                        "Team event (2-4 members per team)",
                        "Design area will be provided (4x4 feet)",
                        "Only traditional materials allowed (rice flour, colored powder)",
                        "Time limit: 60 minutes",
                        "Judging criteria: Creativity, symmetry, traditional elements, neatness",
                        "Teams must clean their area after completion",
                    ],
                    prize_summary: "1st, 2nd place winning teams",
                },
                GameDefinition {
                    title: "Tug of War",
                    mode: ParticipationMode::Team,
                    min_members: 4,
                    max_members: 6,
                    description: "Test your team's strength in this classic battle",
                    rules: &[
                        "Team event (4-6 members per team)",
                        "Maximum 6 participants per team",
                        "Best of 3 rounds",
                        "Winning team must pull the center marker to their side",
                        "Proper footwear required (no sandals or flip-flops)",
                        "Team captain must be designated before match",
                    ],
                    prize_summary: "1st, 2nd place winning teams",
                },
                GameDefinition {
                    title: "Musical Chair",
                    mode: ParticipationMode::Individual,
                    min_members: 1,
                    max_members: 1,
                    description: "Be the last one sitting when the music stops",
                    rules: &[
                        "Individual participation",
                        "Chairs will be arranged in a circle",
                        "Participants must walk around chairs when music plays",
                        "When music stops, find a chair immediately",
                        "One chair removed each round",
                        "Last person sitting wins",
                        "No pushing or physical contact allowed",
                    ],
                    prize_summary: "1st, 2nd place winners",
                },
                GameDefinition {
                    title: "Pot Breaking",
                    mode: ParticipationMode::Individual,
                    min_members: 1,
                    max_members: 1,
                    description: "Break the pot blindfolded to win prizes",
                    rules: &[
                        "Individual participation",
                        "Participants will be blindfolded and spun 3 times",
                        "Must break the hanging pot with a stick",
                        "Each participant gets 3 attempts",
                        "Time limit: 2 minutes per attempt",
                        "Pot filled with treats and gifts",
                        "Winner gets contents of the pot",
                    ],
                    prize_summary: "1st, 2nd place winners",
                },
                GameDefinition {
                    title: "Treasure Hunt",
                    mode: ParticipationMode::Team,
                    min_members: 2,
                    max_members: 4,
                    description: "Solve clues and find hidden treasures in teams",
                    rules: &[
                        "Team event (2-4 members per team)",
                        "Teams will receive first clue at starting point",
                        "Solve clues to find next location",
                        "Time limit: 90 minutes",
                        "First team to find final treasure wins",
                        "No use of mobile phones allowed",
                        "All clues must be found in sequence",
                    ],
                    prize_summary: "1st, 2nd place winning teams",
                },
            ],
        }
    }

    /// Looks up a game by its exact title
    pub fn find(&self, title: &str) -> Option<&GameDefinition> {
        self.games.iter().find(|g| g.title == title)
    }

    /// All games in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &GameDefinition> {
        self.games.iter()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// HTTP handler for the game catalog
///
/// GET /games
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Json<Vec<GameDefinition>> {
    Json(state.catalog.iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_all_six_games() {
        let catalog = GameCatalog::new();
        assert_eq!(catalog.len(), 6);

        let titles: Vec<&str> = catalog.iter().map(|g| g.title).collect();
        assert_eq!(
            titles,
            vec![
                "Basket Ball",
                "Kolam Design",
                "Tug of War",
                "Musical Chair",
                "Pot Breaking",
                "Treasure Hunt"
            ]
        );
    }

    #[test]
    fn test_find_known_game() {
        let catalog = GameCatalog::new();
        let game = catalog.find("Tug of War").unwrap();
        assert_eq!(game.mode, ParticipationMode::Team);
        assert_eq!(game.min_members, 4);
        assert_eq!(game.max_members, 6);
    }

    #[test]
    fn test_find_unknown_game() {
        let catalog = GameCatalog::new();
        assert!(catalog.find("Cricket").is_none());
        // Titles are matched exactly, not case-insensitively
        assert!(catalog.find("basket ball").is_none());
    }

    #[test]
    fn test_individual_games_have_unit_bounds() {
        let catalog = GameCatalog::new();
        for game in catalog.iter() {
            if !game.is_team() {
                assert_eq!(game.min_members, 1, "{}", game.title);
                assert_eq!(game.max_members, 1, "{}", game.title);
            } else {
                assert!(game.min_members > 1, "{}", game.title);
                assert!(game.min_members <= game.max_members, "{}", game.title);
            }
        }
    }
}
