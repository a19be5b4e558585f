//! # salem-engine
//!
//! Rules engine for a hidden-role card game of Witches and Villagers.
//!
//! Every player holds face-down Tryal cards that say who they are. Cards
//! played during the day pile accusations on suspects until Tryal cards
//! flip; at night the witches vote someone out while the constable tries
//! to save them. A player whose Tryal cards are all face up is out.
//!
//! ## Design Principles
//!
//! 1. **One seeded RNG**: every random decision draws from the
//!    `GameRng` in `GameState`, so a seed replays a whole game.
//!
//! 2. **Derived state has one writer**: elimination is computed from
//!    Tryal cards, and limits and immunities from status cards, only
//!    inside `PlayerStore`.
//!
//! 3. **No hidden control flow**: game systems are functions over
//!    `&mut GameState`; notifications are queued events; waits for
//!    humans or timers are explicit `Step`s returned to the host.
//!
//! ## Modules
//!
//! - `core`: player ids, RNG, configuration, errors, shared state
//! - `cards`: card definitions, the catalog, Tryal and town-hall cards
//! - `players`: player records and the store that mutates them
//! - `deck`: the `DrawSource` seam and a reference deck
//! - `events`: game events and the presentation sink
//! - `effects`: target validation and card effect dispatch
//! - `night`: eliminations, night votes, the conspiracy ritual
//! - `flow`: phases, turns, human choices, the game session

pub mod cards;
pub mod core;
pub mod deck;
pub mod effects;
pub mod events;
pub mod flow;
pub mod night;
pub mod players;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameRng, GameRngState, GameState, PlayError, PlayerId, PlayerMap, RulesConfig, TargetError,
};

pub use crate::cards::{
    build_tryal_deck, ActionOp, Card, CardCatalog, CardColor, CardDef, CardId, TownHall, TryalCard, TryalKind,
};

pub use crate::players::{PlayerRecord, PlayerStore, RevealOutcome, Seat};

pub use crate::deck::{DrawSource, ShuffledDeck};

pub use crate::events::{EventQueue, GameEvent, NullSink, PresentationSink, RecordingSink};

pub use crate::effects::{DrawOutcome, EffectResolver, FollowUp, PlayOutcome, PlayRequest};

pub use crate::night::{
    eliminate, resolve_night, run_conspiracy, swap_random_tryals, ConspiracyReport, EliminationCause, NightOutcome,
    NightPlan, NightReport, SwapOutcome,
};

pub use crate::flow::{
    Choice, ChoiceKind, ChoiceOptions, ChoicePoll, ChoiceProvider, ChoiceRequest, DeferredChoices, EndGameResult,
    Faction, GamePhase, GameSession, SessionBuilder, Step, TurnAction, TurnManager,
};
