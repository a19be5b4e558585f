//! Phase and turn flow.
//!
//! ## Components
//!
//! - `phase`: `GamePhase` and the `PhaseMachine` that guards transitions
//! - `turn`: `TurnManager`, seat rotation over living players and the
//!   draw-or-play lock
//! - `choice`: human decision requests and the `ChoiceProvider` seam
//! - `endgame`: win-condition evaluation
//! - `session`: `GameSession`, which runs all of the above as a
//!   suspended-step state machine

pub mod choice;
pub mod endgame;
pub mod phase;
pub mod session;
pub mod turn;

pub use choice::{Choice, ChoiceKind, ChoiceOptions, ChoicePoll, ChoiceProvider, ChoiceRequest, DeferredChoices};
pub use endgame::{EndGameResult, Faction};
pub use phase::{GamePhase, PhaseMachine};
pub use session::{GameSession, SessionBuilder, Step};
pub use turn::{TurnAction, TurnManager};
