//! Central elimination entry point and reveal-driven wrappers.
//!
//! Every path that can flip a Tryal card goes through here so that
//! eliminations are announced once, Matchmaker cascades run, and the win
//! conditions are re-checked.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::TryalKind;
use crate::core::{GameState, PlayerId};
use crate::events::GameEvent;
use crate::players::RevealOutcome;

/// Why a player was eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    NightKill,
    WitchRevealed,
    AllTryalsRevealed,
    MatchmakerCascade,
}

/// Eliminate a player.
///
/// Flips every remaining Tryal card, announces the elimination, takes a
/// bonded Matchmaker partner down too, and re-checks the win conditions.
/// Returns `false` if the player was already eliminated or is unknown.
pub fn eliminate(state: &mut GameState, id: PlayerId, cause: EliminationCause) -> bool {
    if !state.players.contains(id) {
        tracing::warn!(player = %id, "cannot eliminate unknown player");
        return false;
    }
    if !state.players.mark_elimination_reported(id) {
        tracing::debug!(player = %id, ?cause, "already eliminated");
        return false;
    }

    let hidden = face_down(state, id);
    state.players.reveal_all(id);
    emit_flips(state, id, &hidden);

    tracing::info!(player = %id, ?cause, "player eliminated");
    state.emit(GameEvent::Eliminated { player: id, cause });

    if let Some(partner) = state.players.confirmed_partner(id) {
        if state.players.is_alive(partner) {
            // Break the bond first so the partner's elimination cannot cascade back.
            state.players.clear_match(id);
            tracing::info!(player = %id, %partner, "matchmaker cascade");
            eliminate(state, partner, EliminationCause::MatchmakerCascade);
        }
    }

    state.evaluate_end_game();
    true
}

/// Reveal one Tryal card and handle any resulting elimination.
pub fn reveal_tryal(state: &mut GameState, id: PlayerId, index: usize) -> RevealOutcome {
    let before = face_down(state, id);
    let outcome = state.players.reveal_tryal(id, index);
    settle_reveal(state, id, &before, outcome);
    outcome
}

/// Apply accusations and handle any forced reveal.
pub fn accuse(state: &mut GameState, id: PlayerId, amount: i32) -> RevealOutcome {
    let before = face_down(state, id);
    let outcome = state.players.apply_accusation(id, amount, &mut state.rng);
    settle_reveal(state, id, &before, outcome);
    outcome
}

/// Move one face-down Tryal card from `from` to `to`.
///
/// If that was the last face-down card `from` holds, `from` is eliminated
/// through [`eliminate`]. Returns `false` and changes nothing when the move
/// is refused.
pub fn transfer_tryal(state: &mut GameState, from: PlayerId, index: usize, to: PlayerId) -> bool {
    if !state.players.transfer_tryal(from, index, to) {
        return false;
    }
    if !state.players.is_alive(from) {
        eliminate(state, from, EliminationCause::AllTryalsRevealed);
    }
    true
}

fn settle_reveal(state: &mut GameState, id: PlayerId, before: &[usize], outcome: RevealOutcome) {
    let RevealOutcome::Revealed { kind, eliminated, .. } = outcome else {
        return;
    };
    emit_flips(state, id, before);
    if eliminated {
        let cause = if kind == TryalKind::Witch {
            EliminationCause::WitchRevealed
        } else {
            EliminationCause::AllTryalsRevealed
        };
        eliminate(state, id, cause);
    }
}

fn face_down(state: &GameState, id: PlayerId) -> SmallVec<[usize; 5]> {
    state
        .players
        .get(id)
        .map(|r| r.unrevealed_indices())
        .unwrap_or_default()
}

/// Announce every card in `before` that is now face up.
fn emit_flips(state: &mut GameState, id: PlayerId, before: &[usize]) {
    let Some(record) = state.players.get(id) else {
        return;
    };
    let flipped: SmallVec<[(usize, TryalKind); 5]> = before
        .iter()
        .filter_map(|&i| record.tryals().get(i).filter(|t| t.is_revealed()).map(|t| (i, t.kind)))
        .collect();
    for (index, kind) in flipped {
        state.emit(GameEvent::TryalRevealed { player: id, index, kind });
    }
}
