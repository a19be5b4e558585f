//! Tryal cards: hidden identity cards.

use serde::{Deserialize, Serialize};

use super::CardId;

/// Identity printed on a Tryal card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TryalKind {
    Witch,
    NotAWitch,
    Constable,
}

/// A hidden identity card.
///
/// `revealed` only ever goes from false to true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryalCard {
    pub id: CardId,
    pub kind: TryalKind,
    revealed: bool,
}

impl TryalCard {
    /// Create a face-down Tryal card.
    #[must_use]
    pub const fn new(id: CardId, kind: TryalKind) -> Self {
        Self {
            id,
            kind,
            revealed: false,
        }
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Turn the card face up. Returns `false` if it already was.
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    #[must_use]
    pub const fn is_witch(&self) -> bool {
        matches!(self.kind, TryalKind::Witch)
    }
}

/// Build the identity deck for a table: one Constable, `witches` Witch cards,
/// and NotAWitch cards for every other slot.
///
/// Ids start at `first_id`. Returns an empty deck if the special cards do
/// not fit.
#[must_use]
pub fn build_tryal_deck(total: usize, witches: usize, first_id: u32) -> Vec<TryalCard> {
    if witches + 1 > total {
        return Vec::new();
    }
    (0..total)
        .map(|i| {
            let kind = if i == 0 {
                TryalKind::Constable
            } else if i <= witches {
                TryalKind::Witch
            } else {
                TryalKind::NotAWitch
            };
            TryalCard::new(CardId::new(first_id + i as u32), kind)
        })
        .collect()
}
