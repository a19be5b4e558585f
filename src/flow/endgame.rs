//! Win conditions.
//!
//! - Nobody alive: draw
//! - No living witch: Villagers win
//! - Living witches at least match living non-witches: Witches win
//!
//! The villager check runs first, so both can never fire together.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::players::PlayerStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Villagers,
    Witches,
    Draw,
}

/// Final outcome. Produced once per game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndGameResult {
    pub faction: Faction,
    /// Every member of the winning faction, eliminated or not, in seat order.
    pub winners: Vec<PlayerId>,
    pub reason: String,
}

/// Decide the winner, if there is one yet.
#[must_use]
pub fn evaluate(players: &PlayerStore) -> Option<EndGameResult> {
    let alive = players.alive_ids();
    let witches = players.living_witches().len();
    let others = alive.len() - witches;

    if alive.is_empty() {
        return Some(EndGameResult {
            faction: Faction::Draw,
            winners: Vec::new(),
            reason: "No one survived".to_string(),
        });
    }
    if witches == 0 {
        return Some(EndGameResult {
            faction: Faction::Villagers,
            winners: players.iter().filter(|r| !r.is_witch()).map(|r| r.id()).collect(),
            reason: "All witches eliminated".to_string(),
        });
    }
    if witches >= others {
        return Some(EndGameResult {
            faction: Faction::Witches,
            winners: players.iter().filter(|r| r.is_witch()).map(|r| r.id()).collect(),
            reason: "Witches reached parity".to_string(),
        });
    }
    None
}
