//! Draw sources.
//!
//! The rules never touch deck bookkeeping directly. They ask a
//! [`DrawSource`] for cards and hand spent cards back to it. Randomness
//! comes from the caller's [`GameRng`] so the whole game stays on one
//! seeded stream.

mod shuffled;

pub use shuffled::ShuffledDeck;

use crate::cards::Card;
use crate::core::GameRng;

/// Predicate marking cards a draw should pass over.
pub type Reject<'a> = &'a dyn Fn(&Card) -> bool;

/// Supplies cards to the rules.
pub trait DrawSource {
    /// Draw one card.
    ///
    /// An empty draw pile is refilled from the discards first. Cards
    /// matching `reject` are passed over; once every card has been passed
    /// over once the next card is dealt anyway. `None` only when no card
    /// exists at all.
    fn draw(&mut self, rng: &mut GameRng, reject: Option<Reject<'_>>) -> Option<Card>;

    /// Put a spent card on the discard pile.
    fn discard(&mut self, card: Card);

    /// Shuffle the draw pile. Called once during setup.
    fn shuffle(&mut self, _rng: &mut GameRng) {}

    /// Pull a specific card out of the draw pile.
    fn take_named(&mut self, _name: &str) -> Option<Card> {
        None
    }

    /// Put the Night card back after a night sequence.
    fn return_night_card(&mut self, card: Card, _rng: &mut GameRng) {
        self.discard(card);
    }

    /// Cards left in the draw pile.
    fn remaining(&self) -> usize;
}
