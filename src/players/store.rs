//! Player state store.
//!
//! The store owns every [`PlayerRecord`] and is the only code that mutates
//! them. It keeps these invariants:
//!
//! - A player is eliminated iff all of their Tryal cards are revealed
//! - `is_witch` is sticky: set once any held Tryal card is a Witch
//! - The accusation counter never drops below zero
//! - A Matchmaker bond is symmetric and is always cleared on both sides
//! - The Black Cat flag mirrors the status list, with no duplicate adds
//!
//! Derived flags are written by [`PlayerStore::recompute_from_status`] only.
//! Transfers between invalid or identical players are warned no-ops.
//!
//! Reveals report what happened through [`RevealOutcome`]; notifying the
//! rest of the game about eliminations is the caller's job (see
//! [`crate::night::elimination`]).

use smallvec::SmallVec;

use super::record::{PlayerRecord, Seat};
use crate::cards::{ActionOp, Card, CardId, TownHall, TryalCard, TryalKind, BLACK_CAT};
use crate::core::{GameRng, PlayerId, PlayerMap, RulesConfig};

/// Result of revealing a Tryal card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Index out of range, card already face up, or unknown player.
    Ignored,
    Revealed {
        index: usize,
        kind: TryalKind,
        /// A Witch card flipped every remaining card.
        forced_full_reveal: bool,
        /// The player is now eliminated and has not been reported yet.
        eliminated: bool,
    },
}

impl RevealOutcome {
    #[must_use]
    pub fn eliminated(&self) -> bool {
        matches!(self, RevealOutcome::Revealed { eliminated: true, .. })
    }
}

/// All player records for one game, indexed by seat.
#[derive(Clone, Debug)]
pub struct PlayerStore {
    players: PlayerMap<PlayerRecord>,
}

impl PlayerStore {
    /// Create records for every seat.
    ///
    /// The steadfast character starts with one extra accusation of headroom.
    pub fn new(seats: Vec<Seat>, config: &RulesConfig) -> Self {
        let records = seats
            .into_iter()
            .enumerate()
            .map(|(i, seat)| {
                let mut base = config.base_accusation_limit;
                if seat.name == config.steadfast_name {
                    base += 1;
                }
                PlayerRecord::new(PlayerId::new(i as u8), seat, base)
            })
            .collect();
        Self {
            players: PlayerMap::from_vec(records),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(id)
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get_checked(id)
    }

    /// Records in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().map(|(_, r)| r)
    }

    /// Seat ids in rotation order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        self.players.player_ids()
    }

    #[must_use]
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(PlayerRecord::is_alive)
    }

    /// Living players in seat order.
    #[must_use]
    pub fn alive_ids(&self) -> Vec<PlayerId> {
        self.iter().filter(|r| r.is_alive()).map(|r| r.id).collect()
    }

    /// Living witches in seat order.
    #[must_use]
    pub fn living_witches(&self) -> Vec<PlayerId> {
        self.iter()
            .filter(|r| r.is_alive() && r.is_witch)
            .map(|r| r.id)
            .collect()
    }

    /// First living player holding the Constable card.
    #[must_use]
    pub fn living_constable(&self) -> Option<PlayerId> {
        self.iter()
            .find(|r| r.is_alive() && r.holds_constable())
            .map(|r| r.id)
    }

    /// Display name, or the seat label for an unknown id.
    #[must_use]
    pub fn name_of(&self, id: PlayerId) -> String {
        self.get(id).map_or_else(|| id.to_string(), |r| r.name.clone())
    }

    fn record_mut(&mut self, id: PlayerId, operation: &str) -> Option<&mut PlayerRecord> {
        let record = self.players.get_checked_mut(id);
        if record.is_none() {
            tracing::warn!(player = %id, operation, "unknown player, ignoring");
        }
        record
    }

    // ===== Setup =====

    /// Shuffle and deal the identity deck, `per_player` cards each.
    ///
    /// Cards left over after dealing are dropped with a warning.
    pub fn deal_tryals(&mut self, mut deck: Vec<TryalCard>, per_player: usize, rng: &mut GameRng) {
        rng.shuffle(&mut deck);
        self.deal_tryals_in_order(deck, per_player);
    }

    /// Deal the identity deck as given: the first `per_player` cards to seat 0, and so on.
    pub fn deal_tryals_in_order(&mut self, deck: Vec<TryalCard>, per_player: usize) {
        let mut cards = deck.into_iter();
        for (_, record) in self.players.iter_mut() {
            record.tryals.clear();
            record.tryals.extend(cards.by_ref().take(per_player));
        }
        let leftover = cards.count();
        if leftover > 0 {
            tracing::warn!(leftover, "tryal cards left undealt");
        }
        for id in self.players.player_ids().collect::<Vec<_>>() {
            self.refresh_faction(id);
        }
    }

    /// Give each player one character card from a shuffled town-hall deck.
    pub fn deal_town_hall(&mut self, rng: &mut GameRng) {
        let mut deck = TownHall::ALL.to_vec();
        rng.shuffle(&mut deck);
        let mut cards = deck.into_iter();
        for (id, record) in self.players.iter_mut() {
            match cards.next() {
                Some(card) => record.town_hall = Some(card),
                None => {
                    tracing::warn!(player = %id, "town-hall deck exhausted");
                    break;
                }
            }
        }
    }

    /// Re-derive the sticky witch flag from held Tryal cards.
    pub fn refresh_faction(&mut self, id: PlayerId) {
        if let Some(record) = self.players.get_checked_mut(id) {
            if !record.is_witch && record.tryals.iter().any(TryalCard::is_witch) {
                record.is_witch = true;
            }
        }
    }

    // ===== Tryal cards =====

    /// Reveal one Tryal card.
    ///
    /// Out-of-range or already revealed cards are ignored. A Witch card
    /// forces every remaining card face up. The returned outcome says
    /// whether the player became eliminated so the caller can report it.
    pub fn reveal_tryal(&mut self, id: PlayerId, index: usize) -> RevealOutcome {
        let Some(record) = self.players.get_checked_mut(id) else {
            return RevealOutcome::Ignored;
        };
        let Some(card) = record.tryals.get_mut(index) else {
            return RevealOutcome::Ignored;
        };
        if !card.reveal() {
            return RevealOutcome::Ignored;
        }
        let kind = card.kind;

        let forced_full_reveal = kind == TryalKind::Witch && record.tryals.iter().any(|t| !t.is_revealed());
        if kind == TryalKind::Witch {
            for tryal in record.tryals.iter_mut() {
                tryal.reveal();
            }
        }
        if !record.is_witch && record.tryals.iter().any(TryalCard::is_witch) {
            record.is_witch = true;
        }

        let eliminated = record.is_eliminated() && !record.elimination_reported;
        tracing::info!(player = %id, index, ?kind, forced_full_reveal, eliminated, "tryal revealed");
        RevealOutcome::Revealed {
            index,
            kind,
            forced_full_reveal,
            eliminated,
        }
    }

    /// Flip every face-down Tryal card. Returns how many were flipped.
    pub fn reveal_all(&mut self, id: PlayerId) -> usize {
        let Some(record) = self.players.get_checked_mut(id) else {
            return 0;
        };
        let flipped = record.tryals.iter_mut().map(TryalCard::reveal).filter(|flipped| *flipped).count();
        if !record.is_witch && record.tryals.iter().any(TryalCard::is_witch) {
            record.is_witch = true;
        }
        flipped
    }

    /// Uniformly random face-down card index.
    pub fn random_unrevealed_index(&self, id: PlayerId, rng: &mut GameRng) -> Option<usize> {
        let record = self.get(id)?;
        let indices = record.unrevealed_indices();
        rng.index(indices.len()).map(|i| indices[i])
    }

    /// Mark an elimination as reported. Returns `false` if it already was.
    pub fn mark_elimination_reported(&mut self, id: PlayerId) -> bool {
        match self.players.get_checked_mut(id) {
            Some(record) if !record.elimination_reported => {
                record.elimination_reported = true;
                true
            }
            _ => false,
        }
    }

    /// Move one face-down Tryal card to another player.
    ///
    /// Moving the last face-down card eliminates `from`; callers go through
    /// [`crate::night::transfer_tryal`] so that is reported.
    /// An eliminated receiver is refused.
    pub(crate) fn transfer_tryal(&mut self, from: PlayerId, index: usize, to: PlayerId) -> bool {
        let Some((source, dest)) = self.players.pair_mut(from, to) else {
            tracing::warn!(%from, %to, "tryal transfer needs two distinct known players");
            return false;
        };
        if dest.is_eliminated() {
            tracing::warn!(%from, %to, "cannot give a tryal card to an eliminated player");
            return false;
        }
        match source.tryals.get(index) {
            Some(card) if !card.is_revealed() => {}
            _ => {
                tracing::warn!(%from, index, "no face-down tryal card at index");
                return false;
            }
        }
        let card = source.tryals.remove(index);
        dest.tryals.push(card);
        self.refresh_faction(to);
        true
    }

    /// Exchange two face-down Tryal cards between players.
    ///
    /// Each card takes the other's position. Both cards are checked before
    /// anything moves, so a failed exchange changes nothing.
    pub fn exchange_tryals(&mut self, a: PlayerId, a_index: usize, b: PlayerId, b_index: usize) -> bool {
        let Some((first, second)) = self.players.pair_mut(a, b) else {
            tracing::warn!(%a, %b, "tryal exchange needs two distinct known players");
            return false;
        };
        let valid = |tryals: &SmallVec<[TryalCard; 5]>, i: usize| tryals.get(i).is_some_and(|t| !t.is_revealed());
        if !valid(&first.tryals, a_index) || !valid(&second.tryals, b_index) {
            tracing::warn!(%a, a_index, %b, b_index, "tryal exchange needs face-down cards");
            return false;
        }
        std::mem::swap(&mut first.tryals[a_index], &mut second.tryals[b_index]);
        self.refresh_faction(a);
        self.refresh_faction(b);
        true
    }

    // ===== Accusations =====

    /// Add accusations. Reaching the limit reveals a random face-down card
    /// and resets the counter.
    ///
    /// Non-positive amounts do nothing.
    pub fn apply_accusation(&mut self, id: PlayerId, amount: i32, rng: &mut GameRng) -> RevealOutcome {
        if amount <= 0 {
            return RevealOutcome::Ignored;
        }
        let Some(record) = self.record_mut(id, "apply_accusation") else {
            return RevealOutcome::Ignored;
        };
        record.current_count += amount;
        tracing::debug!(
            player = %id,
            amount,
            count = record.current_count,
            limit = record.current_limit,
            "accusation applied"
        );
        if record.current_count < record.current_limit {
            return RevealOutcome::Ignored;
        }

        record.current_count = 0;
        match self.random_unrevealed_index(id, rng) {
            Some(index) => self.reveal_tryal(id, index),
            None => RevealOutcome::Ignored,
        }
    }

    /// Remove accusations, floored at zero. Never reveals.
    pub fn apply_alibi(&mut self, id: PlayerId, amount: i32) {
        if amount <= 0 {
            return;
        }
        if let Some(record) = self.record_mut(id, "apply_alibi") {
            record.current_count = (record.current_count - amount).max(0);
        }
    }

    // ===== Turn flags =====

    pub fn set_skip_turn(&mut self, id: PlayerId) {
        if let Some(record) = self.record_mut(id, "set_skip_turn") {
            record.skip_turn = true;
        }
    }

    /// Consume the skip flag. Returns whether it was set.
    pub fn take_skip_turn(&mut self, id: PlayerId) -> bool {
        self.players
            .get_checked_mut(id)
            .is_some_and(|r| std::mem::take(&mut r.skip_turn))
    }

    // ===== Hands =====

    /// Put a card in a hand. Gives the card back if the player is unknown.
    pub fn add_to_hand(&mut self, id: PlayerId, card: Card) -> Result<(), Card> {
        match self.record_mut(id, "add_to_hand") {
            Some(record) => {
                record.hand.push(card);
                Ok(())
            }
            None => Err(card),
        }
    }

    pub fn remove_from_hand(&mut self, id: PlayerId, card: CardId) -> Option<Card> {
        let record = self.players.get_checked_mut(id)?;
        let pos = record.hand.iter().position(|c| c.id == card)?;
        Some(record.hand.remove(pos))
    }

    /// Take a player's whole hand.
    pub fn clear_hand(&mut self, id: PlayerId) -> Vec<Card> {
        self.record_mut(id, "clear_hand")
            .map(|r| std::mem::take(&mut r.hand))
            .unwrap_or_default()
    }

    /// Move one player's hand onto another's.
    pub fn transfer_hand(&mut self, from: PlayerId, to: PlayerId) -> bool {
        let Some((source, dest)) = self.players.pair_mut(from, to) else {
            tracing::warn!(%from, %to, "hand transfer needs two distinct known players");
            return false;
        };
        let cards = std::mem::take(&mut source.hand);
        dest.hand.extend(cards);
        true
    }

    // ===== Statuses =====

    /// Attach a status card and recompute derived flags.
    ///
    /// A card already attached is not added twice.
    pub fn add_status(&mut self, id: PlayerId, card: Card) -> Result<(), Card> {
        let Some(record) = self.record_mut(id, "add_status") else {
            return Err(card);
        };
        if record.statuses.iter().any(|c| c.id == card.id) {
            tracing::warn!(player = %id, card = %card, "status already attached");
            return Ok(());
        }
        record.statuses.push(card);
        self.recompute_from_status(id);
        Ok(())
    }

    /// Move every status card from one player to another.
    pub fn transfer_statuses(&mut self, from: PlayerId, to: PlayerId) -> bool {
        let Some((source, dest)) = self.players.pair_mut(from, to) else {
            tracing::warn!(%from, %to, "status transfer needs two distinct known players");
            return false;
        };
        let cards = std::mem::take(&mut source.statuses);
        for card in cards {
            if !dest.statuses.iter().any(|c| c.id == card.id) {
                dest.statuses.push(card);
            }
        }
        self.recompute_from_status(from);
        self.recompute_from_status(to);
        true
    }

    /// Give the Black Cat to a player.
    pub fn assign_black_cat(&mut self, id: PlayerId, card: Card) -> Result<(), Card> {
        if let Some(holder) = self.black_cat_holder() {
            if holder != id {
                tracing::warn!(%holder, player = %id, "black cat already held elsewhere");
            }
        }
        self.add_status(id, card)
    }

    /// Detach the Black Cat, if held.
    pub fn remove_black_cat(&mut self, id: PlayerId) -> Option<Card> {
        let record = self.players.get_checked_mut(id)?;
        let pos = record.statuses.iter().position(|c| c.is_named(BLACK_CAT))?;
        let card = record.statuses.remove(pos);
        self.recompute_from_status(id);
        Some(card)
    }

    /// Current Black Cat holder, living or not.
    #[must_use]
    pub fn black_cat_holder(&self) -> Option<PlayerId> {
        self.iter().find(|r| r.black_cat.is_some()).map(|r| r.id)
    }

    /// Re-derive limit, asylum, Black Cat and bond from status cards.
    ///
    /// Order: reset to base, Piety doubles, Curse subtracts one (floor 1),
    /// Asylum grants night immunity, a missing Matchmaker clears the bond.
    /// Idempotent.
    pub fn recompute_from_status(&mut self, id: PlayerId) {
        let Some(record) = self.players.get_checked_mut(id) else {
            return;
        };

        let mut limit = record.base_limit;
        if record.has_status(ActionOp::Piety) {
            limit *= 2;
        }
        if record.has_status(ActionOp::Curse) {
            limit = (limit - 1).max(1);
        }
        record.current_limit = limit;
        record.has_asylum = record.has_status(ActionOp::Asylum);
        record.black_cat = record.statuses.iter().find(|c| c.is_named(BLACK_CAT)).map(|c| c.id);

        if record.matched.is_some() && !record.has_status(ActionOp::Matchmaker) {
            self.clear_match(id);
        }
    }

    // ===== Matchmaker bonds =====

    /// Bond two players, breaking any bonds they had.
    pub fn set_match(&mut self, a: PlayerId, b: PlayerId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            tracing::warn!(%a, %b, "matchmaker bond needs two distinct known players");
            return false;
        }
        self.clear_match(a);
        self.clear_match(b);
        self.players[a].matched = Some(b);
        self.players[b].matched = Some(a);
        tracing::info!(%a, %b, "players matched");
        true
    }

    /// Break a player's bond on both sides. Returns the former partner.
    pub fn clear_match(&mut self, id: PlayerId) -> Option<PlayerId> {
        let partner = self.players.get_checked_mut(id)?.matched.take()?;
        if let Some(other) = self.players.get_checked_mut(partner) {
            if other.matched == Some(id) {
                other.matched = None;
            }
        }
        Some(partner)
    }

    /// Bond the two Matchmaker holders when there are exactly two.
    pub fn try_form_matchmaker_link(&mut self) -> Option<(PlayerId, PlayerId)> {
        let holders: SmallVec<[PlayerId; 2]> = self
            .iter()
            .filter(|r| r.has_status(ActionOp::Matchmaker))
            .map(|r| r.id)
            .collect();
        let [a, b] = holders.as_slice() else {
            return None;
        };
        let (a, b) = (*a, *b);
        if self.players[a].matched == Some(b) {
            return Some((a, b));
        }
        self.set_match(a, b).then_some((a, b))
    }

    /// The partner of `id` if both sides hold Matchmaker and point at each other.
    #[must_use]
    pub fn confirmed_partner(&self, id: PlayerId) -> Option<PlayerId> {
        let record = self.get(id)?;
        let partner_id = record.matched?;
        let partner = self.get(partner_id)?;
        let mutual = partner.matched == Some(id)
            && record.has_status(ActionOp::Matchmaker)
            && partner.has_status(ActionOp::Matchmaker);
        mutual.then_some(partner_id)
    }

    /// Does every bond point back at its owner?
    #[must_use]
    pub fn bonds_are_symmetric(&self) -> bool {
        self.iter().all(|r| match r.matched {
            Some(partner) => self.get(partner).is_some_and(|p| p.matched == Some(r.id)),
            None => true,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cards::{CardCatalog, TryalCard};

    /// Store with one NotAWitch-only hand per seat, except seat `witch`.
    pub(crate) fn store_with(names: &[&str], witch: Option<usize>, cards_each: usize) -> PlayerStore {
        let seats = names.iter().map(|n| Seat::bot(*n)).collect();
        let mut store = PlayerStore::new(seats, &RulesConfig::default());
        let mut next = 500;
        for (i, id) in store.ids().collect::<Vec<_>>().into_iter().enumerate() {
            for slot in 0..cards_each {
                let kind = if Some(i) == witch && slot == 0 {
                    TryalKind::Witch
                } else {
                    TryalKind::NotAWitch
                };
                store.players[id].tryals.push(TryalCard::new(CardId::new(next), kind));
                next += 1;
            }
            store.refresh_faction(id);
        }
        store
    }

    fn status(name: &str, id: u32) -> Card {
        CardCatalog::salem().make(name, CardId::new(id)).unwrap()
    }

    const A: PlayerId = PlayerId(0);
    const B: PlayerId = PlayerId(1);
    const C: PlayerId = PlayerId(2);

    #[test]
    fn test_steadfast_name_raises_base_limit() {
        let seats = vec![Seat::bot("George Burroughs"), Seat::bot("Anne Putnam")];
        let store = PlayerStore::new(seats, &RulesConfig::default());
        assert_eq!(store.get(A).unwrap().base_limit(), 8);
        assert_eq!(store.get(B).unwrap().base_limit(), 7);
    }

    #[test]
    fn test_reveal_ignores_bad_index_and_repeats() {
        let mut store = store_with(&["A", "B"], None, 3);
        assert_eq!(store.reveal_tryal(A, 9), RevealOutcome::Ignored);
        assert!(matches!(store.reveal_tryal(A, 0), RevealOutcome::Revealed { .. }));
        assert_eq!(store.reveal_tryal(A, 0), RevealOutcome::Ignored);
        assert_eq!(store.reveal_tryal(PlayerId::new(7), 0), RevealOutcome::Ignored);
    }

    #[test]
    fn test_witch_reveal_forces_full_elimination() {
        let mut store = store_with(&["A", "B"], Some(0), 3);
        let outcome = store.reveal_tryal(A, 0);
        assert_eq!(
            outcome,
            RevealOutcome::Revealed {
                index: 0,
                kind: TryalKind::Witch,
                forced_full_reveal: true,
                eliminated: true,
            }
        );
        assert!(store.get(A).unwrap().is_eliminated());
    }

    #[test]
    fn test_last_reveal_eliminates() {
        let mut store = store_with(&["A", "B"], None, 2);
        assert!(!store.reveal_tryal(B, 0).eliminated());
        assert!(store.reveal_tryal(B, 1).eliminated());
        store.mark_elimination_reported(B);
        assert!(!store.mark_elimination_reported(B));
    }

    #[test]
    fn test_witch_flag_is_sticky() {
        let mut store = store_with(&["A", "B"], Some(0), 2);
        assert!(store.get(A).unwrap().is_witch());
        assert!(store.exchange_tryals(A, 0, B, 0));
        assert!(store.get(A).unwrap().is_witch());
        assert!(store.get(B).unwrap().is_witch());
    }

    #[test]
    fn test_accusation_reaches_limit() {
        let mut store = store_with(&["A", "B"], None, 5);
        let mut rng = GameRng::new(3);
        store.players[A].current_count = 6;

        let outcome = store.apply_accusation(A, 1, &mut rng);
        assert!(matches!(outcome, RevealOutcome::Revealed { .. }));
        assert_eq!(store.get(A).unwrap().current_count(), 0);
        assert_eq!(store.get(A).unwrap().unrevealed_indices().len(), 4);
    }

    #[test]
    fn test_zero_accusation_is_noop() {
        let mut store = store_with(&["A", "B"], None, 5);
        let mut rng = GameRng::new(3);
        store.players[A].current_count = 9;
        let rng_before = rng.state();

        assert_eq!(store.apply_accusation(A, 0, &mut rng), RevealOutcome::Ignored);
        assert_eq!(store.get(A).unwrap().current_count(), 9);
        assert_eq!(rng.state(), rng_before);
    }

    #[test]
    fn test_alibi_floors_at_zero() {
        let mut store = store_with(&["A", "B"], None, 5);
        let mut rng = GameRng::new(3);
        store.apply_accusation(A, 2, &mut rng);
        store.apply_alibi(A, 3);
        assert_eq!(store.get(A).unwrap().current_count(), 0);
    }

    #[test]
    fn test_recompute_order() {
        let mut store = store_with(&["A", "B"], None, 5);
        store.add_status(A, status("Piety", 1)).unwrap();
        assert_eq!(store.get(A).unwrap().current_limit(), 14);

        store.add_status(A, status("Curse", 2)).unwrap();
        assert_eq!(store.get(A).unwrap().current_limit(), 13);

        store.add_status(A, status("Asylum", 3)).unwrap();
        assert!(store.get(A).unwrap().has_asylum());

        let before = store.get(A).unwrap().current_limit();
        store.recompute_from_status(A);
        store.recompute_from_status(A);
        assert_eq!(store.get(A).unwrap().current_limit(), before);
    }

    #[test]
    fn test_curse_floors_limit_at_one() {
        let seats = vec![Seat::bot("A"), Seat::bot("B")];
        let config = RulesConfig::default().with_base_accusation_limit(1);
        let mut store = PlayerStore::new(seats, &config);
        store.add_status(A, status("Curse", 1)).unwrap();
        assert_eq!(store.get(A).unwrap().current_limit(), 1);
    }

    #[test]
    fn test_duplicate_status_not_added() {
        let mut store = store_with(&["A", "B"], None, 1);
        let cat = status(BLACK_CAT, 9);
        store.assign_black_cat(A, cat.clone()).unwrap();
        store.assign_black_cat(A, cat).unwrap();
        assert_eq!(store.get(A).unwrap().statuses().len(), 1);
        assert_eq!(store.black_cat_holder(), Some(A));
    }

    #[test]
    fn test_black_cat_follows_status_transfer() {
        let mut store = store_with(&["A", "B", "C"], None, 1);
        store.assign_black_cat(A, status(BLACK_CAT, 9)).unwrap();
        store.add_status(A, status("Piety", 10)).unwrap();

        assert!(store.transfer_statuses(A, C));
        assert_eq!(store.black_cat_holder(), Some(C));
        assert!(!store.get(A).unwrap().holds_black_cat());
        assert_eq!(store.get(A).unwrap().current_limit(), 7);
        assert_eq!(store.get(C).unwrap().current_limit(), 14);
    }

    #[test]
    fn test_transfer_to_self_is_noop() {
        let mut store = store_with(&["A", "B"], None, 1);
        store.add_to_hand(A, status("Accusation", 1)).unwrap();
        assert!(!store.transfer_hand(A, A));
        assert!(!store.transfer_hand(A, PlayerId::new(8)));
        assert_eq!(store.get(A).unwrap().hand().len(), 1);
    }

    #[test]
    fn test_matchmaker_link_and_break() {
        let mut store = store_with(&["A", "B", "C"], None, 1);
        store.add_status(A, status("Matchmaker", 1)).unwrap();
        assert_eq!(store.try_form_matchmaker_link(), None);

        store.add_status(C, status("Matchmaker", 2)).unwrap();
        assert_eq!(store.try_form_matchmaker_link(), Some((A, C)));
        assert_eq!(store.confirmed_partner(A), Some(C));
        assert!(store.bonds_are_symmetric());

        // Losing the status breaks the bond on both sides.
        assert!(store.transfer_statuses(C, B));
        assert_eq!(store.get(A).unwrap().matched(), None);
        assert_eq!(store.get(C).unwrap().matched(), None);
        assert!(store.bonds_are_symmetric());
    }

    #[test]
    fn test_exchange_rejects_revealed_card() {
        let mut store = store_with(&["A", "B"], None, 2);
        store.reveal_tryal(B, 1);
        let before_a = store.get(A).unwrap().tryals().to_vec();
        let before_b = store.get(B).unwrap().tryals().to_vec();

        assert!(!store.exchange_tryals(A, 0, B, 1));
        assert_eq!(store.get(A).unwrap().tryals(), before_a.as_slice());
        assert_eq!(store.get(B).unwrap().tryals(), before_b.as_slice());
    }

    #[test]
    fn test_skip_turn_consumed_once() {
        let mut store = store_with(&["A", "B"], None, 1);
        store.set_skip_turn(B);
        assert!(store.take_skip_turn(B));
        assert!(!store.take_skip_turn(B));
    }

    #[test]
    fn test_deal_tryals() {
        let seats = vec![Seat::bot("A"), Seat::bot("B"), Seat::bot("C")];
        let mut store = PlayerStore::new(seats, &RulesConfig::default());
        let mut rng = GameRng::new(11);
        store.deal_tryals(crate::cards::build_tryal_deck(15, 1, 0), 5, &mut rng);

        assert!(store.iter().all(|r| r.tryals().len() == 5));
        assert_eq!(store.living_witches().len(), 1);
        assert!(store.living_constable().is_some());
    }
}
