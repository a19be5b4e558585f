//! Error types.
//!
//! - [`ConfigError`]: fatal, raised while building a session
//! - [`TargetError`]: a card's targets broke a targeting rule
//! - [`PlayError`]: an attempted play or turn action was rejected
//!
//! Rejected plays leave the game state untouched; the caller may retry.

use super::PlayerId;
use crate::cards::CardId;

/// Session construction failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("No draw source was supplied")]
    MissingDrawSource,

    #[error("No presentation sink was supplied")]
    MissingPresentationSink,

    #[error("A game needs between 2 and 255 players, got {0}")]
    PlayerCount(usize),

    #[error("Witch ratio must be in (0, 1], got {0}")]
    WitchRatio(f64),

    #[error("Each player needs at least one Tryal card")]
    NoTryalCards,

    #[error("Tryal deck too small: {needed} special cards but only {available} slots")]
    TryalDeckTooSmall { needed: usize, available: usize },
}

/// Targeting rule violations, one per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("Target required.")]
    MissingPrimary,

    #[error("You cannot target yourself.")]
    SelfTarget,

    #[error("Second target required.")]
    MissingSecondary,

    #[error("You cannot select yourself as recipient.")]
    SelfRecipient,

    #[error("Recipient must be different from the victim.")]
    RecipientIsPrimary,

    #[error("{0} is not seated at this table.")]
    UnknownPlayer(PlayerId),

    #[error("{0} has already been eliminated.")]
    Eliminated(PlayerId),
}

/// Rejected plays and turn actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("It is not {0}'s turn.")]
    NotYourTurn(PlayerId),

    #[error("No turn is in progress.")]
    NoActiveTurn,

    #[error("That action is not allowed during the current phase.")]
    WrongPhase,

    #[error("You already chose to draw this turn.")]
    DrawAlreadyChosen,

    #[error("You already played a card this turn.")]
    PlayAlreadyChosen,

    #[error("Card {0} is not in your hand.")]
    CardNotInHand(CardId),

    #[error("{0} cannot be played.")]
    NotPlayable(String),

    #[error("The game is over.")]
    GameOver,

    #[error(transparent)]
    Target(#[from] TargetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_messages_are_distinct() {
        let errors = [
            TargetError::MissingPrimary,
            TargetError::SelfTarget,
            TargetError::MissingSecondary,
            TargetError::SelfRecipient,
            TargetError::RecipientIsPrimary,
            TargetError::UnknownPlayer(PlayerId::new(9)),
            TargetError::Eliminated(PlayerId::new(1)),
        ];
        let mut messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_target_error_converts_transparently() {
        let err: PlayError = TargetError::SelfTarget.into();
        assert_eq!(err.to_string(), "You cannot target yourself.");
    }
}
