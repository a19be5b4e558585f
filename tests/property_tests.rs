//! Property tests for the player store and elimination invariants.

use proptest::prelude::*;

use salem_engine::cards::{CardCatalog, CardId, TryalCard, TryalKind};
use salem_engine::core::{GameState, PlayerId, RulesConfig};
use salem_engine::night::{accuse, eliminate, reveal_tryal, swap_random_tryals, transfer_tryal, EliminationCause};
use salem_engine::players::Seat;

const PLAYERS: usize = 5;
const CARDS_EACH: usize = 3;

/// Five players with three Tryal cards each. Seat 1 holds the only Witch card.
fn state(seed: u64) -> GameState {
    let seats = (0..PLAYERS).map(|i| Seat::bot(format!("P{i}"))).collect();
    let mut state = GameState::new(seats, RulesConfig::instant(), seed);
    let deck = (0..PLAYERS * CARDS_EACH)
        .map(|i| {
            let kind = match i {
                0 => TryalKind::Constable,
                4 => TryalKind::Witch,
                _ => TryalKind::NotAWitch,
            };
            TryalCard::new(CardId::new(i as u32), kind)
        })
        .collect();
    state.players.deal_tryals_in_order(deck, CARDS_EACH);
    state
}

fn player() -> impl Strategy<Value = PlayerId> {
    (0..PLAYERS as u8).prop_map(PlayerId::new)
}

#[derive(Clone, Debug)]
enum TryalOp {
    Accuse(PlayerId, i32),
    Reveal(PlayerId, usize),
    Swap,
    Give(PlayerId, usize, PlayerId),
    Kill(PlayerId),
}

fn tryal_op() -> impl Strategy<Value = TryalOp> {
    prop_oneof![
        (player(), 0..9i32).prop_map(|(p, n)| TryalOp::Accuse(p, n)),
        (player(), 0..CARDS_EACH + 1).prop_map(|(p, i)| TryalOp::Reveal(p, i)),
        Just(TryalOp::Swap),
        (player(), 0..CARDS_EACH + 1, player()).prop_map(|(a, i, b)| TryalOp::Give(a, i, b)),
        player().prop_map(TryalOp::Kill),
    ]
}

#[derive(Clone, Debug)]
enum BondOp {
    Attach(PlayerId),
    Match(PlayerId, PlayerId),
    Clear(PlayerId),
    MoveStatuses(PlayerId, PlayerId),
    Kill(PlayerId),
}

fn bond_op() -> impl Strategy<Value = BondOp> {
    prop_oneof![
        player().prop_map(BondOp::Attach),
        (player(), player()).prop_map(|(a, b)| BondOp::Match(a, b)),
        player().prop_map(BondOp::Clear),
        (player(), player()).prop_map(|(a, b)| BondOp::MoveStatuses(a, b)),
        player().prop_map(BondOp::Kill),
    ]
}

proptest! {
    /// Adding zero accusations never changes anything.
    #[test]
    fn prop_zero_accusation_is_noop(seed in any::<u64>(), target in player(), start in 0..7i32) {
        let mut state = state(seed);
        state.players.apply_accusation(target, start, &mut state.rng);
        let before = state.players.get(target).unwrap().clone();
        let rng_before = state.rng.state();

        state.players.apply_accusation(target, 0, &mut state.rng);

        let after = state.players.get(target).unwrap();
        prop_assert_eq!(after.current_count(), before.current_count());
        prop_assert_eq!(after.tryals(), before.tryals());
        prop_assert_eq!(state.rng.state(), rng_before);
    }

    /// An alibi undoes an accusation that stayed under the limit.
    #[test]
    fn prop_alibi_undoes_accusation(seed in any::<u64>(), target in player(), start in 0..7i32, extra in 0..7i32) {
        prop_assume!(start + extra < 7);
        let mut state = state(seed);
        state.players.apply_accusation(target, start, &mut state.rng);

        state.players.apply_accusation(target, extra, &mut state.rng);
        state.players.apply_alibi(target, extra);
        prop_assert_eq!(state.players.get(target).unwrap().current_count(), start);

        state.players.apply_alibi(target, start + 3);
        prop_assert_eq!(state.players.get(target).unwrap().current_count(), 0);
    }

    /// Eliminated exactly when every Tryal card is face up, and every
    /// elimination is reported once.
    #[test]
    fn prop_eliminated_iff_all_revealed(seed in any::<u64>(), ops in prop::collection::vec(tryal_op(), 1..40)) {
        let mut state = state(seed);
        for op in ops {
            match op {
                TryalOp::Accuse(p, n) => { accuse(&mut state, p, n); }
                TryalOp::Reveal(p, i) => { reveal_tryal(&mut state, p, i); }
                TryalOp::Swap => { swap_random_tryals(&mut state); }
                TryalOp::Give(from, i, to) => { transfer_tryal(&mut state, from, i, to); }
                TryalOp::Kill(p) => { eliminate(&mut state, p, EliminationCause::NightKill); }
            }
            for record in state.players.iter() {
                let all_revealed = record.tryals().iter().all(|t| t.is_revealed());
                prop_assert_eq!(record.is_eliminated(), all_revealed);
                prop_assert_eq!(record.elimination_reported(), all_revealed);
            }
            let held: usize = state.players.iter().map(|r| r.tryals().len()).sum();
            prop_assert_eq!(held, PLAYERS * CARDS_EACH);
            prop_assert!(state.players.get(PlayerId::new(1)).unwrap().is_witch());
        }
    }

    /// Matchmaker bonds always point both ways.
    #[test]
    fn prop_bonds_stay_symmetric(seed in any::<u64>(), ops in prop::collection::vec(bond_op(), 1..40)) {
        let mut state = state(seed);
        let catalog = CardCatalog::salem();
        let mut next_card = 1000;
        for op in ops {
            match op {
                BondOp::Attach(p) => {
                    let card = catalog.make("Matchmaker", CardId::new(next_card)).unwrap();
                    next_card += 1;
                    state.players.add_status(p, card).unwrap();
                    state.players.try_form_matchmaker_link();
                }
                BondOp::Match(a, b) => { state.players.set_match(a, b); }
                BondOp::Clear(p) => { state.players.clear_match(p); }
                BondOp::MoveStatuses(a, b) => { state.players.transfer_statuses(a, b); }
                BondOp::Kill(p) => { eliminate(&mut state, p, EliminationCause::NightKill); }
            }
            prop_assert!(state.players.bonds_are_symmetric());
        }
    }
}
