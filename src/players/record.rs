//! Per-player record.
//!
//! Derived fields (`current_limit`, `has_asylum`, `black_cat`, and the
//! sticky `is_witch`) are written only by the [`PlayerStore`](super::PlayerStore).
//! Everything here is read access.

use smallvec::SmallVec;

use crate::cards::{ActionOp, Card, CardId, TownHall, TryalCard};
use crate::core::PlayerId;

/// Seat description supplied when a game is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    pub name: String,
    pub is_human: bool,
    pub is_local: bool,
}

impl Seat {
    /// An automated player.
    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: false,
            is_local: false,
        }
    }

    /// A human controlled from this device.
    pub fn local_human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
            is_local: true,
        }
    }

    /// A human controlled from elsewhere.
    pub fn remote_human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_human: true,
            is_local: false,
        }
    }
}

/// Mutable state of one player.
///
/// Persists after elimination as a revealed, inert record.
#[derive(Clone, Debug)]
pub struct PlayerRecord {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) is_human: bool,
    pub(crate) is_local: bool,
    pub(crate) is_witch: bool,
    pub(crate) hand: Vec<Card>,
    pub(crate) tryals: SmallVec<[TryalCard; 5]>,
    pub(crate) statuses: Vec<Card>,
    pub(crate) base_limit: i32,
    pub(crate) current_limit: i32,
    pub(crate) current_count: i32,
    pub(crate) skip_turn: bool,
    pub(crate) has_asylum: bool,
    pub(crate) matched: Option<PlayerId>,
    pub(crate) black_cat: Option<CardId>,
    pub(crate) town_hall: Option<TownHall>,
    pub(crate) town_hall_charges: u8,
    pub(crate) elimination_reported: bool,
}

impl PlayerRecord {
    pub(crate) fn new(id: PlayerId, seat: Seat, base_limit: i32) -> Self {
        let town_hall_charges = TownHall::from_display_name(&seat.name).map_or(0, TownHall::charges);
        Self {
            id,
            name: seat.name,
            is_human: seat.is_human,
            is_local: seat.is_local,
            is_witch: false,
            hand: Vec::new(),
            tryals: SmallVec::new(),
            statuses: Vec::new(),
            base_limit,
            current_limit: base_limit,
            current_count: 0,
            skip_turn: false,
            has_asylum: false,
            matched: None,
            black_cat: None,
            town_hall: None,
            town_hall_charges,
            elimination_reported: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.is_human
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.is_local
    }

    /// Human player driven from this device.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.is_human && self.is_local
    }

    /// Faction flag. Once set it stays set.
    #[must_use]
    pub fn is_witch(&self) -> bool {
        self.is_witch
    }

    /// Eliminated means every Tryal card is face up.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.tryals.iter().all(TryalCard::is_revealed)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_eliminated()
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn tryals(&self) -> &[TryalCard] {
        &self.tryals
    }

    #[must_use]
    pub fn statuses(&self) -> &[Card] {
        &self.statuses
    }

    #[must_use]
    pub fn has_status(&self, op: ActionOp) -> bool {
        self.statuses.iter().any(|c| c.op() == Some(op))
    }

    /// Indices of face-down Tryal cards.
    #[must_use]
    pub fn unrevealed_indices(&self) -> SmallVec<[usize; 5]> {
        self.tryals
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_revealed())
            .map(|(i, _)| i)
            .collect()
    }

    #[must_use]
    pub fn holds_constable(&self) -> bool {
        self.tryals.iter().any(|t| t.kind == crate::cards::TryalKind::Constable)
    }

    #[must_use]
    pub fn base_limit(&self) -> i32 {
        self.base_limit
    }

    #[must_use]
    pub fn current_limit(&self) -> i32 {
        self.current_limit
    }

    #[must_use]
    pub fn current_count(&self) -> i32 {
        self.current_count
    }

    #[must_use]
    pub fn skip_turn(&self) -> bool {
        self.skip_turn
    }

    /// Night immunity from Asylum.
    #[must_use]
    pub fn has_asylum(&self) -> bool {
        self.has_asylum
    }

    #[must_use]
    pub fn matched(&self) -> Option<PlayerId> {
        self.matched
    }

    #[must_use]
    pub fn black_cat(&self) -> Option<CardId> {
        self.black_cat
    }

    #[must_use]
    pub fn holds_black_cat(&self) -> bool {
        self.black_cat.is_some()
    }

    #[must_use]
    pub fn town_hall(&self) -> Option<TownHall> {
        self.town_hall
    }

    #[must_use]
    pub fn town_hall_charges(&self) -> u8 {
        self.town_hall_charges
    }

    #[must_use]
    pub fn elimination_reported(&self) -> bool {
        self.elimination_reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::TryalKind;

    #[test]
    fn test_new_record() {
        let record = PlayerRecord::new(PlayerId::new(0), Seat::bot("Samuel Parris"), 7);
        assert_eq!(record.name(), "Samuel Parris");
        assert_eq!(record.town_hall_charges(), 2);
        assert_eq!(record.current_limit(), 7);
        assert!(!record.is_controlled());
        assert!(!record.is_witch());
    }

    #[test]
    fn test_controlled_needs_local_human() {
        let local = PlayerRecord::new(PlayerId::new(0), Seat::local_human("A"), 7);
        let remote = PlayerRecord::new(PlayerId::new(1), Seat::remote_human("B"), 7);
        assert!(local.is_controlled());
        assert!(!remote.is_controlled());
    }

    #[test]
    fn test_eliminated_tracks_reveals() {
        let mut record = PlayerRecord::new(PlayerId::new(0), Seat::bot("A"), 7);
        record.tryals.push(TryalCard::new(CardId::new(1), TryalKind::NotAWitch));
        record.tryals.push(TryalCard::new(CardId::new(2), TryalKind::NotAWitch));
        assert!(record.is_alive());

        record.tryals[0].reveal();
        assert!(record.is_alive());
        assert_eq!(record.unrevealed_indices().as_slice(), &[1]);

        record.tryals[1].reveal();
        assert!(record.is_eliminated());
    }
}
