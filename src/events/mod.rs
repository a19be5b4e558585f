//! Game events and presentation.
//!
//! Game systems push [`GameEvent`]s onto the [`EventQueue`] held by the game
//! state. The session drains the queue into the host's
//! [`PresentationSink`] at the end of every call, in emission order.
//! Sinks only observe; nothing they do feeds back into the rules.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, TryalKind};
use crate::core::PlayerId;
use crate::flow::{EndGameResult, GamePhase};
use crate::night::EliminationCause;

/// Something observable that happened in the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    TurnStarted {
        player: PlayerId,
    },
    /// The player was in the stocks and lost this turn.
    TurnSkipped {
        player: PlayerId,
    },
    TurnEnded {
        player: PlayerId,
    },
    CardDrawn {
        player: PlayerId,
        card: CardId,
    },
    /// A resolved play, with the formatted log line.
    CardPlayed {
        source: PlayerId,
        card: String,
        target: Option<PlayerId>,
        secondary: Option<PlayerId>,
        log: String,
    },
    BlackCatAssigned {
        player: PlayerId,
    },
    TryalRevealed {
        player: PlayerId,
        index: usize,
        kind: TryalKind,
    },
    TryalsSwapped {
        first: PlayerId,
        second: PlayerId,
    },
    StatusChanged {
        player: PlayerId,
    },
    Matched {
        first: PlayerId,
        second: PlayerId,
    },
    Protected {
        constable: PlayerId,
        player: PlayerId,
    },
    /// Night tally, candidates in seat order.
    VotesTallied {
        tally: Vec<(PlayerId, u32)>,
    },
    Eliminated {
        player: PlayerId,
        cause: EliminationCause,
    },
    GameEnded(EndGameResult),
}

/// FIFO of events awaiting delivery.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Events not yet delivered, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.pending.iter()
    }

    /// Deliver every pending event to `sink`, oldest first.
    pub fn drain_into(&mut self, sink: &mut dyn PresentationSink) {
        while let Some(event) = self.pending.pop_front() {
            sink.on_event(&event);
        }
    }

    /// Take every pending event.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }
}

/// Receives notifications for rendering, audio, logging and the like.
pub trait PresentationSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Sink that records events behind a shared handle.
///
/// Keep a clone of the sink to read what the session delivered.
///
/// ```
/// use salem_engine::core::PlayerId;
/// use salem_engine::events::{GameEvent, PresentationSink, RecordingSink};
///
/// let sink = RecordingSink::new();
/// let mut delivered = sink.clone();
/// delivered.on_event(&GameEvent::TurnStarted { player: PlayerId::new(0) });
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl PresentationSink for RecordingSink {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
