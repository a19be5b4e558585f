//! Shared game context.
//!
//! ## GameState
//!
//! Everything the rules mutate, in one place:
//! - Rules configuration
//! - Player store (records, hands, Tryal cards, statuses)
//! - The one seeded RNG
//! - Pending events for the presentation sink
//! - Play log
//! - Spent cards waiting to go back to the draw source
//! - The end-game result, once decided
//!
//! Game systems are free functions and small services that borrow the
//! state mutably, so there is no ambient global state.

use im::Vector;

use super::config::RulesConfig;
use super::player::PlayerId;
use super::rng::GameRng;
use crate::cards::Card;
use crate::events::{EventQueue, GameEvent};
use crate::flow::endgame::{self, EndGameResult};
use crate::players::{PlayerStore, Seat};

/// Complete mutable state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: RulesConfig,
    pub players: PlayerStore,
    pub rng: GameRng,
    pub events: EventQueue,

    /// Formatted play-log lines, oldest first.
    pub play_log: Vector<String>,

    /// Cards spent since the last flush to the draw source.
    pub discards: Vec<Card>,

    result: Option<EndGameResult>,
}

impl GameState {
    /// Create state for the given seats.
    ///
    /// Tryal cards are not dealt here; see the session's setup.
    #[must_use]
    pub fn new(seats: Vec<Seat>, config: RulesConfig, seed: u64) -> Self {
        let players = PlayerStore::new(seats, &config);
        Self {
            config,
            players,
            rng: GameRng::new(seed),
            events: EventQueue::new(),
            play_log: Vector::new(),
            discards: Vec::new(),
            result: None,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn discard(&mut self, card: Card) {
        self.discards.push(card);
    }

    /// Record a line in the play log.
    pub fn log_play(&mut self, line: String) {
        self.play_log.push_back(line);
    }

    /// The decided result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&EndGameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Check the win conditions.
    ///
    /// The first decided result is kept and announced once; later calls
    /// return it unchanged.
    pub fn evaluate_end_game(&mut self) -> Option<EndGameResult> {
        if let Some(result) = &self.result {
            return Some(result.clone());
        }
        let result = endgame::evaluate(&self.players)?;
        tracing::info!(faction = ?result.faction, reason = %result.reason, "game over");
        self.events.push(GameEvent::GameEnded(result.clone()));
        self.result = Some(result.clone());
        Some(result)
    }

    /// Display name for log lines.
    #[must_use]
    pub fn name_of(&self, id: PlayerId) -> String {
        self.players.name_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let seats = vec![Seat::bot("A"), Seat::bot("B"), Seat::bot("C")];
        let state = GameState::new(seats, RulesConfig::default(), 42);

        assert_eq!(state.players.len(), 3);
        assert_eq!(state.rng.seed(), 42);
        assert!(state.play_log.is_empty());
        assert!(!state.is_over());
    }

    #[test]
    fn test_name_of_unknown_player() {
        let seats = vec![Seat::bot("A"), Seat::bot("B")];
        let state = GameState::new(seats, RulesConfig::default(), 1);
        assert_eq!(state.name_of(PlayerId::new(1)), "B");
        assert_eq!(state.name_of(PlayerId::new(5)), "Player 5");
    }
}
