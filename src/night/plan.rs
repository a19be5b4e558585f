use rustc_hash::FxHashMap;

use crate::core::PlayerId;

/// Decisions collected during one night.
///
/// Built when the night starts, consumed by [`resolve_night`](super::resolve_night).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NightPlan {
    /// Player the constable protects, if any.
    pub protected: Option<PlayerId>,
    votes: FxHashMap<PlayerId, PlayerId>,
}

impl NightPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_protected(mut self, player: PlayerId) -> Self {
        self.protected = Some(player);
        self
    }

    #[must_use]
    pub fn with_vote(mut self, witch: PlayerId, victim: PlayerId) -> Self {
        self.record_vote(witch, victim);
        self
    }

    /// Record or replace a witch's vote.
    pub fn record_vote(&mut self, witch: PlayerId, victim: PlayerId) {
        self.votes.insert(witch, victim);
    }

    #[must_use]
    pub fn vote_of(&self, witch: PlayerId) -> Option<PlayerId> {
        self.votes.get(&witch).copied()
    }

    #[must_use]
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}
