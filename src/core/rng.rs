//! Deterministic random number generation shared by every game system.
//!
//! ## Guarantees
//!
//! - **Deterministic**: Same seed and call sequence produce identical results
//! - **Single source**: One instance lives on the game state; shuffles, AI
//!   picks, vote tie-breaks and conspiracy pairing all draw from it
//! - **Serializable**: O(1) state capture and restore for replays
//!
//! ## Usage
//!
//! ```
//! use salem_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.next_int(0, 6);
//! assert!((0..6).contains(&roll));
//!
//! // Same seed, same sequence
//! let mut replay = GameRng::new(42);
//! assert_eq!(replay.next_int(0, 6), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded game RNG.
///
/// Uses ChaCha8 for speed while keeping a portable, reproducible stream.
/// The seed is recorded so a run can be replayed from logs.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Start a stream from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        tracing::info!(seed, "rng reseeded");
        self.inner = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// Uniform integer in `[min_inclusive, max_exclusive)`.
    ///
    /// An empty range returns `min_inclusive` without consuming randomness.
    pub fn next_int(&mut self, min_inclusive: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min_inclusive {
            return min_inclusive;
        }
        self.inner.gen_range(min_inclusive..max_exclusive)
    }

    /// Uniform index into a collection of `len` items, `None` when empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.inner.gen_range(0..len))
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Uniform pick, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        self.index(slice.len()).map(|i| &slice[i])
    }

    /// Checkpoint the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream from a checkpoint.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for replay checkpoints.
///
/// Two numbers, however long the game has run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// Position in the ChaCha8 keystream.
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_game() {
        let mut table = GameRng::new(1692);
        let mut replay = GameRng::new(1692);

        let mut deck: Vec<u32> = (0..15).collect();
        let mut replay_deck = deck.clone();
        table.shuffle(&mut deck);
        replay.shuffle(&mut replay_deck);

        assert_eq!(deck, replay_deck);
        assert_eq!(table.next_int(0, 5), replay.next_int(0, 5));
        assert_eq!(table.state(), replay.state());
    }

    #[test]
    fn test_seeds_diverge() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);
        let rolls_a: Vec<_> = (0..10).map(|_| a.next_int(0, 1000)).collect();
        let rolls_b: Vec<_> = (0..10).map(|_| b.next_int(0, 1000)).collect();
        assert_ne!(rolls_a, rolls_b);
    }

    #[test]
    fn test_next_int_stays_in_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            assert!((-3..4).contains(&rng.next_int(-3, 4)));
        }
    }

    #[test]
    fn test_empty_range_consumes_nothing() {
        let mut rng = GameRng::new(7);
        let before = rng.state();
        assert_eq!(rng.next_int(5, 5), 5);
        assert_eq!(rng.next_int(5, 2), 5);
        assert_eq!(rng.index(0), None);
        assert_eq!(rng.choose::<u8>(&[]), None);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_choose_picks_a_member() {
        let mut rng = GameRng::new(3);
        let suspects = ["Abigail", "Tituba", "Giles"];
        for _ in 0..50 {
            assert!(suspects.contains(rng.choose(&suspects).unwrap()));
        }
        assert_eq!(rng.index(1), Some(0));
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut rng = GameRng::new(1);
        rng.next_int(0, 100);
        rng.reseed(99);

        let mut fresh = GameRng::new(99);
        assert_eq!(rng.seed(), 99);
        for _ in 0..10 {
            assert_eq!(rng.next_int(0, 1000), fresh.next_int(0, 1000));
        }
    }

    #[test]
    fn test_checkpoint_resumes_mid_game() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.next_int(0, 1000);
        }

        let json = serde_json::to_string(&rng.state()).unwrap();
        let expected: Vec<_> = (0..10).map(|_| rng.next_int(0, 1000)).collect();

        let checkpoint: GameRngState = serde_json::from_str(&json).unwrap();
        let mut restored = GameRng::from_state(&checkpoint);
        let actual: Vec<_> = (0..10).map(|_| restored.next_int(0, 1000)).collect();
        assert_eq!(expected, actual);
    }
}
