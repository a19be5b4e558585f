use super::{DrawSource, Reject};
use crate::cards::Card;
use crate::core::GameRng;

/// Draw pile plus discard pile.
///
/// The top of the draw pile is the end of the vector.
#[derive(Clone, Debug, Default)]
pub struct ShuffledDeck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl ShuffledDeck {
    /// Shuffle `cards` into a fresh draw pile.
    #[must_use]
    pub fn new(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards,
            discard_pile: Vec::new(),
        }
    }

    /// Use `cards` as the draw pile as given, last element on top.
    #[must_use]
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self {
            draw_pile: cards,
            discard_pile: Vec::new(),
        }
    }

    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards in the draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    fn reshuffle_discard(&mut self, rng: &mut GameRng) {
        if self.discard_pile.is_empty() {
            return;
        }
        tracing::debug!(cards = self.discard_pile.len(), "reshuffling discard pile");
        self.draw_pile.append(&mut self.discard_pile);
        rng.shuffle(&mut self.draw_pile);
    }
}

impl DrawSource for ShuffledDeck {
    fn draw(&mut self, rng: &mut GameRng, reject: Option<Reject<'_>>) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.reshuffle_discard(rng);
        }
        let Some(reject) = reject else {
            return self.draw_pile.pop();
        };

        // Each rejected card goes to the bottom; after a full pass, deal whatever is on top.
        for _ in 0..self.draw_pile.len() {
            let card = self.draw_pile.pop()?;
            if !reject(&card) {
                return Some(card);
            }
            self.draw_pile.insert(0, card);
        }
        let card = self.draw_pile.pop()?;
        tracing::warn!(card = %card, "every card rejected, dealing restricted card");
        Some(card)
    }

    fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw_pile);
    }

    fn take_named(&mut self, name: &str) -> Option<Card> {
        let pos = self.draw_pile.iter().position(|c| c.is_named(name))?;
        Some(self.draw_pile.remove(pos))
    }

    /// Shuffle the discards back in and bury the Night card in the lower half.
    fn return_night_card(&mut self, card: Card, rng: &mut GameRng) {
        self.reshuffle_discard(rng);
        rng.shuffle(&mut self.draw_pile);
        let lower_half = self.draw_pile.len() / 2;
        let at = rng.next_int(0, lower_half as i32 + 1) as usize;
        self.draw_pile.insert(at, card);
    }

    fn remaining(&self) -> usize {
        self.draw_pile.len()
    }
}
