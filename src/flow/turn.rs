//! Day-phase turn rotation and the per-turn action lock.
//!
//! A turn allows exactly one kind of action: draw, or play one or more
//! cards. Whichever comes first locks out the other until the turn ends.
//!
//! Rotation follows seat order over living players. The cursor is the
//! last player to act, not an index into the living list, so a player
//! dropping out mid-round never shifts whose turn is next.

use crate::core::{GameState, PlayError, PlayerId};
use crate::events::GameEvent;
use crate::players::PlayerStore;

/// What the active player has committed to this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnAction {
    #[default]
    None,
    DrawTwo,
    PlayCards,
}

#[derive(Clone, Debug, Default)]
pub struct TurnManager {
    active: Option<PlayerId>,
    action: TurnAction,
    last: Option<PlayerId>,
    turns_taken: u32,
}

impl TurnManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Player whose turn is in progress.
    #[must_use]
    pub fn active(&self) -> Option<PlayerId> {
        self.active
    }

    #[must_use]
    pub fn action(&self) -> TurnAction {
        self.action
    }

    /// Player who most recently started a turn.
    #[must_use]
    pub fn last(&self) -> Option<PlayerId> {
        self.last
    }

    #[must_use]
    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Next living player after the last one to act, wrapping around.
    #[must_use]
    pub fn next_player(&self, players: &PlayerStore) -> Option<PlayerId> {
        let alive = players.alive_ids();
        let Some(last) = self.last else {
            return alive.first().copied();
        };
        alive
            .iter()
            .copied()
            .find(|&p| p > last)
            .or_else(|| alive.first().copied())
    }

    /// Start `player`'s turn.
    pub fn begin_turn(&mut self, state: &mut GameState, player: PlayerId) {
        if let Some(active) = self.active {
            tracing::warn!(%active, %player, "turn started while another was active");
        }
        self.active = Some(player);
        self.action = TurnAction::None;
        self.last = Some(player);
        self.turns_taken += 1;
        tracing::info!(%player, turn = self.turns_taken, "turn started");
        state.emit(GameEvent::TurnStarted { player });
    }

    /// Pass over `player`, who is in the stocks.
    pub fn skip_turn(&mut self, state: &mut GameState, player: PlayerId) {
        self.last = Some(player);
        tracing::info!(%player, "turn skipped");
        state.emit(GameEvent::TurnSkipped { player });
    }

    /// Is `player` the one acting right now?
    pub fn check_actor(&self, player: PlayerId) -> Result<(), PlayError> {
        match self.active {
            None => Err(PlayError::NoActiveTurn),
            Some(active) if active != player => Err(PlayError::NotYourTurn(player)),
            Some(_) => Ok(()),
        }
    }

    /// Can `player` play a card right now?
    pub fn check_play(&self, player: PlayerId) -> Result<(), PlayError> {
        self.check_actor(player)?;
        match self.action {
            TurnAction::DrawTwo => Err(PlayError::DrawAlreadyChosen),
            TurnAction::None | TurnAction::PlayCards => Ok(()),
        }
    }

    /// Lock the turn to playing cards.
    pub fn mark_play(&mut self) {
        self.action = TurnAction::PlayCards;
    }

    /// Lock the turn to drawing. Fails if any action was already chosen.
    pub fn try_begin_draw(&mut self, player: PlayerId) -> Result<(), PlayError> {
        self.check_actor(player)?;
        match self.action {
            TurnAction::None => {
                self.action = TurnAction::DrawTwo;
                Ok(())
            }
            TurnAction::DrawTwo => Err(PlayError::DrawAlreadyChosen),
            TurnAction::PlayCards => Err(PlayError::PlayAlreadyChosen),
        }
    }

    /// End the active turn. Returns the player whose turn ended.
    pub fn end_turn(&mut self, state: &mut GameState) -> Option<PlayerId> {
        let player = self.active.take()?;
        self.action = TurnAction::None;
        tracing::info!(%player, "turn ended");
        state.emit(GameEvent::TurnEnded { player });
        Some(player)
    }
}
