//! Night vote resolution: protection and tie-break fairness.

use salem_engine::cards::{CardCatalog, CardId, TryalCard, TryalKind};
use salem_engine::core::{GameRng, GameState, PlayerId, RulesConfig};
use salem_engine::night::{break_tie, eligible_targets, resolve_night, NightOutcome, NightPlan};
use salem_engine::players::Seat;

const TRIALS: u64 = 12_000;

/// Seat 0 is the constable, seats 1 and 2 are witches, the rest are villagers.
fn village(players: usize, seed: u64) -> GameState {
    let seats = (0..players).map(|i| Seat::bot(format!("P{i}"))).collect();
    let mut state = GameState::new(seats, RulesConfig::instant(), seed);
    let deck = (0..players)
        .map(|i| {
            let kind = match i {
                0 => TryalKind::Constable,
                1 | 2 => TryalKind::Witch,
                _ => TryalKind::NotAWitch,
            };
            TryalCard::new(CardId::new(i as u32), kind)
        })
        .collect();
    state.players.deal_tryals_in_order(deck, 1);
    state
}

fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

/// Within five percent of the expected share.
fn assert_roughly_uniform(counts: &[u64], trials: u64) {
    let expected = trials as f64 / counts.len() as f64;
    for (i, &n) in counts.iter().enumerate() {
        let deviation = (n as f64 - expected).abs() / expected;
        assert!(deviation < 0.05, "bucket {i}: {n} vs expected {expected:.0}");
    }
}

#[test]
fn test_break_tie_is_uniform() {
    let tied = [p(3), p(5), p(6)];
    let mut counts = [0u64; 3];
    for seed in 0..TRIALS {
        let mut rng = GameRng::new(seed);
        let winner = break_tie(&mut rng, &tied).unwrap();
        let slot = tied.iter().position(|&t| t == winner).unwrap();
        counts[slot] += 1;
    }
    assert_roughly_uniform(&counts, TRIALS);
}

#[test]
fn test_break_tie_single_candidate_draws_nothing() {
    let mut rng = GameRng::new(8);
    let mut untouched = GameRng::new(8);
    assert_eq!(break_tie(&mut rng, &[p(2)]), Some(p(2)));
    assert_eq!(break_tie(&mut rng, &[]), None);
    assert_eq!(rng.next_int(0, 1000), untouched.next_int(0, 1000));
}

#[test]
fn test_split_vote_victim_is_uniform_over_tied_set() {
    let mut counts = [0u64; 2];
    for seed in 0..TRIALS {
        let mut state = village(5, seed);
        let plan = NightPlan::new().with_vote(p(1), p(3)).with_vote(p(2), p(4));
        let report = resolve_night(&mut state, &plan);
        assert_eq!(report.tally, vec![(p(3), 1), (p(4), 1)]);
        match report.outcome {
            NightOutcome::Killed(victim) if victim == p(3) => counts[0] += 1,
            NightOutcome::Killed(victim) if victim == p(4) => counts[1] += 1,
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_roughly_uniform(&counts, TRIALS);
}

#[test]
fn test_majority_wins_without_randomness() {
    let mut state = village(6, 1);
    let plan = NightPlan::new().with_vote(p(1), p(4)).with_vote(p(2), p(4));
    let report = resolve_night(&mut state, &plan);
    assert_eq!(report.outcome, NightOutcome::Killed(p(4)));
}

#[test]
fn test_protected_victim_survives() {
    let mut state = village(5, 3);
    let plan = NightPlan::new()
        .with_protected(p(3))
        .with_vote(p(1), p(3))
        .with_vote(p(2), p(3));
    let report = resolve_night(&mut state, &plan);
    assert_eq!(report.outcome, NightOutcome::Protected(p(3)));
    assert!(state.players.is_alive(p(3)));
}

#[test]
fn test_asylum_and_witches_are_not_eligible() {
    let mut state = village(5, 3);
    let asylum = CardCatalog::salem().make("Asylum", CardId::new(50)).unwrap();
    state.players.add_status(p(3), asylum).unwrap();
    assert_eq!(eligible_targets(&state), vec![p(0), p(4)]);

    // A vote for an ineligible player is replaced by a random legal one.
    let plan = NightPlan::new().with_vote(p(1), p(3)).with_vote(p(2), p(3));
    let report = resolve_night(&mut state, &plan);
    match report.outcome {
        NightOutcome::Killed(victim) => assert!(victim == p(0) || victim == p(4)),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(state.players.is_alive(p(3)));
}

#[test]
fn test_witches_may_target_witches_when_configured() {
    let seats = (0..4).map(|i| Seat::bot(format!("P{i}"))).collect();
    let config = RulesConfig::instant().with_witches_targeting_witches(true);
    let mut state = GameState::new(seats, config, 4);
    let deck = [TryalKind::Constable, TryalKind::Witch, TryalKind::Witch, TryalKind::NotAWitch]
        .into_iter()
        .enumerate()
        .map(|(i, kind)| TryalCard::new(CardId::new(i as u32), kind))
        .collect();
    state.players.deal_tryals_in_order(deck, 1);

    assert_eq!(eligible_targets(&state), vec![p(0), p(1), p(2), p(3)]);
    let plan = NightPlan::new().with_vote(p(1), p(2)).with_vote(p(2), p(1));
    let report = resolve_night(&mut state, &plan);
    assert!(matches!(report.outcome, NightOutcome::Killed(v) if v == p(1) || v == p(2)));
}
