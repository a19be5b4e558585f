//! Night vote resolution.
//!
//! 1. Gather eligible victims: alive, no Asylum, and not a witch unless
//!    witches may target witches.
//! 2. Every living witch votes: the planned vote if it is still legal,
//!    otherwise a uniformly random legal victim.
//! 3. Tally. Ties at the top are broken by a uniform draw over the tied set.
//! 4. The constable's protected player survives; anyone else is killed.

use rustc_hash::FxHashMap;

use super::elimination::{eliminate, EliminationCause};
use super::plan::NightPlan;
use crate::core::{GameRng, GameState, PlayerId};
use crate::events::GameEvent;

/// How a night ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NightOutcome {
    /// No living witch to vote.
    NoWitches,
    /// No witch had anyone to vote for.
    NoVotes,
    /// The chosen victim was protected.
    Protected(PlayerId),
    Killed(PlayerId),
}

/// Outcome plus the tally it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NightReport {
    pub outcome: NightOutcome,
    /// Votes per candidate, seat order, zero counts omitted.
    pub tally: Vec<(PlayerId, u32)>,
}

/// Players the witches may vote for, in seat order.
#[must_use]
pub fn eligible_targets(state: &GameState) -> Vec<PlayerId> {
    let witches_allowed = state.config.witches_can_target_witches;
    state
        .players
        .iter()
        .filter(|r| r.is_alive() && !r.has_asylum())
        .filter(|r| witches_allowed || !r.is_witch())
        .map(|r| r.id())
        .collect()
}

/// Legal victims for one witch: the eligible set minus the witch.
#[must_use]
pub fn targets_for(state: &GameState, witch: PlayerId) -> Vec<PlayerId> {
    eligible_targets(state)
        .into_iter()
        .filter(|&p| p != witch)
        .collect()
}

/// Players the constable may protect.
#[must_use]
pub fn protect_options(state: &GameState, constable: PlayerId) -> Vec<PlayerId> {
    let self_allowed = state.config.constable_can_self_protect;
    state
        .players
        .alive_ids()
        .into_iter()
        .filter(|&p| self_allowed || p != constable)
        .collect()
}

/// Uniform pick among the tied leaders.
pub fn break_tie(rng: &mut GameRng, tied: &[PlayerId]) -> Option<PlayerId> {
    match tied {
        [] => None,
        [only] => Some(*only),
        _ => rng.index(tied.len()).map(|i| tied[i]),
    }
}

/// Resolve a night and apply the kill.
pub fn resolve_night(state: &mut GameState, plan: &NightPlan) -> NightReport {
    let witches = state.players.living_witches();
    if witches.is_empty() {
        tracing::info!("night passes, no living witches");
        return NightReport {
            outcome: NightOutcome::NoWitches,
            tally: Vec::new(),
        };
    }

    let eligible = eligible_targets(state);
    let mut counts: FxHashMap<PlayerId, u32> = FxHashMap::default();
    for witch in witches {
        let legal: Vec<PlayerId> = eligible.iter().copied().filter(|&p| p != witch).collect();
        let vote = match plan.vote_of(witch) {
            Some(victim) if legal.contains(&victim) => Some(victim),
            planned => {
                if planned.is_some() {
                    tracing::warn!(%witch, ?planned, "planned vote no longer legal, choosing at random");
                }
                state.rng.choose(&legal).copied()
            }
        };
        if let Some(victim) = vote {
            *counts.entry(victim).or_insert(0) += 1;
        }
    }

    let tally: Vec<(PlayerId, u32)> = eligible
        .iter()
        .filter_map(|p| counts.get(p).map(|&n| (*p, n)))
        .collect();
    tracing::debug!(?tally, "night votes tallied");
    state.emit(GameEvent::VotesTallied { tally: tally.clone() });

    let top = tally.iter().map(|&(_, n)| n).max().unwrap_or(0);
    let tied: Vec<PlayerId> = tally.iter().filter(|&&(_, n)| n == top).map(|&(p, _)| p).collect();
    if tied.len() > 1 {
        tracing::debug!(?tied, "breaking night tie");
    }
    let Some(victim) = break_tie(&mut state.rng, &tied) else {
        tracing::info!("night passes, nobody to vote for");
        return NightReport {
            outcome: NightOutcome::NoVotes,
            tally,
        };
    };

    let outcome = if plan.protected == Some(victim) {
        tracing::info!(%victim, "victim was protected");
        NightOutcome::Protected(victim)
    } else {
        eliminate(state, victim, EliminationCause::NightKill);
        NightOutcome::Killed(victim)
    };
    NightReport { outcome, tally }
}
