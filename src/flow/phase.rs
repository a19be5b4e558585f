//! Game phases and the transitions between them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::events::GameEvent;

/// Phase of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Dawn,
    Day,
    Conspiracy,
    Night,
    /// Terminal. Entered through [`PhaseMachine::enter_end_game`] only.
    EndGame,
}

impl GamePhase {
    /// Phases reachable from `self` through an ordinary transition.
    #[must_use]
    pub fn successors(self) -> &'static [GamePhase] {
        match self {
            GamePhase::Setup => &[GamePhase::Dawn],
            GamePhase::Dawn => &[GamePhase::Day],
            GamePhase::Day => &[GamePhase::Night, GamePhase::Conspiracy],
            GamePhase::Conspiracy => &[GamePhase::Day],
            GamePhase::Night => &[GamePhase::Dawn],
            GamePhase::EndGame => &[],
        }
    }

    #[must_use]
    pub fn can_advance_to(self, next: GamePhase) -> bool {
        self.successors().contains(&next)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Setup => "Setup",
            GamePhase::Dawn => "Dawn",
            GamePhase::Day => "Day",
            GamePhase::Conspiracy => "Conspiracy",
            GamePhase::Night => "Night",
            GamePhase::EndGame => "End Game",
        };
        f.write_str(name)
    }
}

/// Tracks the current phase and rejects illegal transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseMachine {
    current: GamePhase,
    setup_done: bool,
}

impl PhaseMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> GamePhase {
        self.current
    }

    #[must_use]
    pub fn is(&self, phase: GamePhase) -> bool {
        self.current == phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.current == GamePhase::EndGame
    }

    /// Setup runs once per game.
    #[must_use]
    pub fn setup_done(&self) -> bool {
        self.setup_done
    }

    /// Move to `next`. An illegal transition is a warned no-op.
    pub fn advance(&mut self, state: &mut GameState, next: GamePhase) -> bool {
        if !self.current.can_advance_to(next) {
            tracing::warn!(from = %self.current, to = %next, "illegal phase transition ignored");
            return false;
        }
        if self.current == GamePhase::Setup {
            self.setup_done = true;
        }
        self.change(state, next);
        true
    }

    /// Enter the terminal phase from anywhere. Repeated calls do nothing.
    pub fn enter_end_game(&mut self, state: &mut GameState) -> bool {
        if self.is_over() {
            return false;
        }
        self.change(state, GamePhase::EndGame);
        true
    }

    fn change(&mut self, state: &mut GameState, next: GamePhase) {
        let from = std::mem::replace(&mut self.current, next);
        tracing::info!(%from, to = %next, "phase changed");
        state.emit(GameEvent::PhaseChanged { from, to: next });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;
    use crate::players::Seat;

    fn state() -> GameState {
        GameState::new(vec![Seat::bot("A"), Seat::bot("B")], RulesConfig::instant(), 1)
    }

    #[test]
    fn test_full_cycle() {
        let mut state = state();
        let mut phases = PhaseMachine::new();

        for next in [
            GamePhase::Dawn,
            GamePhase::Day,
            GamePhase::Conspiracy,
            GamePhase::Day,
            GamePhase::Night,
            GamePhase::Dawn,
        ] {
            assert!(phases.advance(&mut state, next), "{next}");
        }
        assert!(phases.setup_done());
        assert_eq!(state.events.len(), 6);
    }

    #[test]
    fn test_illegal_transition_is_noop() {
        let mut state = state();
        let mut phases = PhaseMachine::new();

        assert!(!phases.advance(&mut state, GamePhase::Night));
        assert!(!phases.advance(&mut state, GamePhase::EndGame));
        assert_eq!(phases.current(), GamePhase::Setup);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_end_game_is_terminal() {
        let mut state = state();
        let mut phases = PhaseMachine::new();
        phases.advance(&mut state, GamePhase::Dawn);

        assert!(phases.enter_end_game(&mut state));
        assert!(!phases.enter_end_game(&mut state));
        assert!(!phases.advance(&mut state, GamePhase::Day));
        assert!(phases.is_over());
    }
}
