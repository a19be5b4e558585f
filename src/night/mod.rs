//! Night and elimination engine.
//!
//! ## Components
//!
//! - `elimination`: the single elimination entry point, Matchmaker cascades,
//!   and reveal/accusation wrappers that route through it
//! - `plan`: decisions collected while a night is in progress
//! - `resolver`: vote gathering, tally, tie-break, protection
//! - `conspiracy`: the Black Cat reveal and the Tryal swap

pub mod conspiracy;
pub mod elimination;
pub mod plan;
pub mod resolver;

pub use conspiracy::{reveal_options, run_conspiracy, swap_random_tryals, ConspiracyReport, SwapOutcome};
pub use elimination::{accuse, eliminate, reveal_tryal, transfer_tryal, EliminationCause};
pub use plan::NightPlan;
pub use resolver::{
    break_tie, eligible_targets, protect_options, resolve_night, targets_for, NightOutcome, NightReport,
};
