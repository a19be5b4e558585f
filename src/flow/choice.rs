//! Human decision points.
//!
//! When the rules need a decision from a human-controlled player they build
//! a [`ChoiceRequest`] and ask the session's [`ChoiceProvider`]. The
//! provider may answer at once, defer, or decline. A deferred request is
//! surfaced to the driver as a step and answered later through
//! `GameSession::submit_choice`. Declines and invalid answers fall back to
//! a uniformly random legal option.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlayerId};

/// Which decision is being asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// The constable picks someone to protect tonight.
    Protect,
    /// A witch picks tonight's victim.
    NightVote,
    /// The Black Cat holder picks one of their face-down Tryal cards.
    ConspiracyReveal,
}

/// Legal answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceOptions {
    Players(Vec<PlayerId>),
    TryalIndices(Vec<usize>),
}

impl ChoiceOptions {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ChoiceOptions::Players(p) => p.len(),
            ChoiceOptions::TryalIndices(i) => i.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, choice: Choice) -> bool {
        match (self, choice) {
            (ChoiceOptions::Players(p), Choice::Player(id)) => p.contains(&id),
            (ChoiceOptions::TryalIndices(i), Choice::TryalIndex(idx)) => i.contains(&idx),
            _ => false,
        }
    }

    /// Uniformly random option.
    pub fn random(&self, rng: &mut GameRng) -> Option<Choice> {
        match self {
            ChoiceOptions::Players(p) => rng.choose(p).copied().map(Choice::Player),
            ChoiceOptions::TryalIndices(i) => rng.choose(i).copied().map(Choice::TryalIndex),
        }
    }
}

/// An answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Player(PlayerId),
    TryalIndex(usize),
}

impl Choice {
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Choice::Player(p) => Some(p),
            Choice::TryalIndex(_) => None,
        }
    }

    #[must_use]
    pub fn tryal_index(self) -> Option<usize> {
        match self {
            Choice::TryalIndex(i) => Some(i),
            Choice::Player(_) => None,
        }
    }
}

/// A decision the rules are waiting on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRequest {
    pub kind: ChoiceKind,
    pub chooser: PlayerId,
    pub options: ChoiceOptions,
    pub prompt: String,
}

impl ChoiceRequest {
    /// Keep `choice` if it is legal, otherwise pick at random.
    pub fn settle(&self, choice: Option<Choice>, rng: &mut GameRng) -> Option<Choice> {
        match choice {
            Some(c) if self.options.contains(c) => Some(c),
            other => {
                if other.is_some() {
                    tracing::warn!(kind = ?self.kind, chooser = %self.chooser, ?other, "illegal choice, picking at random");
                } else {
                    tracing::warn!(kind = ?self.kind, chooser = %self.chooser, "no choice made, picking at random");
                }
                self.options.random(rng)
            }
        }
    }
}

/// Provider's reply to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoicePoll {
    /// Answered now. `None` declines.
    Ready(Option<Choice>),
    /// The answer will come through `GameSession::submit_choice`.
    Pending,
}

/// Source of human decisions.
pub trait ChoiceProvider {
    fn request(&mut self, request: &ChoiceRequest) -> ChoicePoll;
}

/// Defers every request to the driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeferredChoices;

impl ChoiceProvider for DeferredChoices {
    fn request(&mut self, _request: &ChoiceRequest) -> ChoicePoll {
        ChoicePoll::Pending
    }
}

impl<F> ChoiceProvider for F
where
    F: FnMut(&ChoiceRequest) -> Option<Choice>,
{
    fn request(&mut self, request: &ChoiceRequest) -> ChoicePoll {
        ChoicePoll::Ready(self(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote_request() -> ChoiceRequest {
        ChoiceRequest {
            kind: ChoiceKind::NightVote,
            chooser: PlayerId::new(0),
            options: ChoiceOptions::Players(vec![PlayerId::new(1), PlayerId::new(2)]),
            prompt: "Choose a victim".to_string(),
        }
    }

    #[test]
    fn test_settle_keeps_legal_choice() {
        let mut rng = GameRng::new(4);
        let request = vote_request();
        let choice = Some(Choice::Player(PlayerId::new(2)));
        assert_eq!(request.settle(choice, &mut rng), choice);
    }

    #[test]
    fn test_settle_replaces_illegal_choice() {
        let mut rng = GameRng::new(4);
        let request = vote_request();

        for bad in [None, Some(Choice::Player(PlayerId::new(0))), Some(Choice::TryalIndex(1))] {
            let settled = request.settle(bad, &mut rng).unwrap();
            assert!(request.options.contains(settled));
        }
    }

    #[test]
    fn test_closure_provider() {
        let mut provider = |req: &ChoiceRequest| match &req.options {
            ChoiceOptions::Players(p) => p.last().copied().map(Choice::Player),
            ChoiceOptions::TryalIndices(_) => None,
        };
        assert_eq!(
            provider.request(&vote_request()),
            ChoicePoll::Ready(Some(Choice::Player(PlayerId::new(2))))
        );
        assert_eq!(DeferredChoices.request(&vote_request()), ChoicePoll::Pending);
    }
}
