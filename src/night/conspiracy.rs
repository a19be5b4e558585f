//! The conspiracy ritual.
//!
//! The Black Cat holder reveals one of their own Tryal cards, then two
//! random living players each give up one random face-down Tryal card to
//! the other.

use smallvec::SmallVec;

use super::elimination::reveal_tryal;
use crate::core::{GameState, PlayerId};
use crate::events::GameEvent;

/// Result of the swap step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped { first: PlayerId, second: PlayerId },
    /// Fewer than two eligible players, or no card to move. Nothing changed.
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConspiracyReport {
    /// Holder and the index they revealed.
    pub revealed: Option<(PlayerId, usize)>,
    pub swap: SwapOutcome,
}

/// The living Black Cat holder and their face-down card indices.
#[must_use]
pub fn reveal_options(state: &GameState) -> Option<(PlayerId, SmallVec<[usize; 5]>)> {
    let holder = state.players.black_cat_holder()?;
    let record = state.players.get(holder)?;
    if !record.is_alive() {
        return None;
    }
    Some((holder, record.unrevealed_indices()))
}

/// Run the full ritual.
///
/// `holder_choice` is the index picked by a human holder; a missing or
/// invalid pick falls back to a random face-down card.
pub fn run_conspiracy(state: &mut GameState, holder_choice: Option<usize>) -> ConspiracyReport {
    let revealed = match reveal_options(state) {
        Some((holder, options)) => {
            let index = match holder_choice {
                Some(i) if options.contains(&i) => Some(i),
                other => {
                    if other.is_some() {
                        tracing::warn!(%holder, ?other, "invalid conspiracy pick, choosing at random");
                    }
                    state.rng.choose(&options).copied()
                }
            };
            index.map(|i| {
                reveal_tryal(state, holder, i);
                (holder, i)
            })
        }
        None => {
            tracing::warn!("no living black cat holder, skipping conspiracy reveal");
            None
        }
    };

    let swap = if state.is_over() {
        SwapOutcome::Aborted
    } else {
        swap_random_tryals(state)
    };
    ConspiracyReport { revealed, swap }
}

/// Exchange one random face-down card between two random living players.
pub fn swap_random_tryals(state: &mut GameState) -> SwapOutcome {
    let candidates: Vec<PlayerId> = state
        .players
        .iter()
        .filter(|r| r.is_alive() && !r.unrevealed_indices().is_empty())
        .map(|r| r.id())
        .collect();
    if candidates.len() < 2 {
        tracing::warn!(eligible = candidates.len(), "conspiracy swap aborted");
        return SwapOutcome::Aborted;
    }

    // Two distinct players: draw the second from the remaining n - 1 slots.
    let n = candidates.len();
    let (Some(a), Some(b)) = (state.rng.index(n), state.rng.index(n - 1)) else {
        return SwapOutcome::Aborted;
    };
    let b = if b >= a { b + 1 } else { b };
    let (first, second) = (candidates[a], candidates[b]);

    let first_index = state.players.random_unrevealed_index(first, &mut state.rng);
    let second_index = state.players.random_unrevealed_index(second, &mut state.rng);
    let (Some(first_index), Some(second_index)) = (first_index, second_index) else {
        tracing::warn!(%first, %second, "conspiracy swap aborted, no card to move");
        return SwapOutcome::Aborted;
    };

    if !state.players.exchange_tryals(first, first_index, second, second_index) {
        return SwapOutcome::Aborted;
    }
    tracing::info!(%first, %second, "tryal cards swapped");
    state.emit(GameEvent::TryalsSwapped { first, second });
    SwapOutcome::Swapped { first, second }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{build_tryal_deck, CardCatalog, CardId, BLACK_CAT};
    use crate::core::RulesConfig;
    use crate::night::elimination::{eliminate, EliminationCause};
    use crate::players::Seat;

    const A: PlayerId = PlayerId(0);
    const B: PlayerId = PlayerId(1);
    const C: PlayerId = PlayerId(2);

    fn state(players: usize) -> GameState {
        let seats = (0..players).map(|i| Seat::bot(format!("P{i}"))).collect();
        let mut state = GameState::new(seats, RulesConfig::default(), 21);
        state
            .players
            .deal_tryals_in_order(build_tryal_deck(players * 3, 1, 0), 3);
        state
    }

    fn tryal_ids(state: &GameState, id: PlayerId) -> Vec<CardId> {
        state.players.get(id).unwrap().tryals().iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_swap_exchanges_one_card_each() {
        let mut state = state(2);
        let before_a = tryal_ids(&state, A);
        let before_b = tryal_ids(&state, B);

        let outcome = swap_random_tryals(&mut state);
        assert!(matches!(outcome, SwapOutcome::Swapped { .. }));

        let after_a = tryal_ids(&state, A);
        let after_b = tryal_ids(&state, B);
        let moved_out_of_a = before_a.iter().filter(|id| !after_a.contains(id)).count();
        let moved_out_of_b = before_b.iter().filter(|id| !after_b.contains(id)).count();
        assert_eq!(moved_out_of_a, 1);
        assert_eq!(moved_out_of_b, 1);
        assert_eq!(after_a.len(), 3);
        assert_eq!(after_b.len(), 3);
    }

    #[test]
    fn test_swap_with_one_eligible_player_changes_nothing() {
        let mut state = state(3);
        eliminate(&mut state, B, EliminationCause::NightKill);
        eliminate(&mut state, C, EliminationCause::NightKill);
        let before: Vec<_> = [A, B, C].iter().map(|&p| tryal_ids(&state, p)).collect();

        assert_eq!(swap_random_tryals(&mut state), SwapOutcome::Aborted);
        let after: Vec<_> = [A, B, C].iter().map(|&p| tryal_ids(&state, p)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_holder_reveals_chosen_card() {
        let mut state = state(3);
        let cat = CardCatalog::salem().make(BLACK_CAT, CardId::new(90)).unwrap();
        state.players.assign_black_cat(C, cat).unwrap();

        let report = run_conspiracy(&mut state, Some(2));
        assert_eq!(report.revealed, Some((C, 2)));
    }

    #[test]
    fn test_without_holder_only_swaps() {
        let mut state = state(3);
        let report = run_conspiracy(&mut state, None);
        assert_eq!(report.revealed, None);
        assert!(matches!(report.swap, SwapOutcome::Swapped { .. }));
    }
}
