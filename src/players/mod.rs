//! Player state: per-player records and the store that mutates them.

pub mod record;
pub mod store;

pub use record::{PlayerRecord, Seat};
pub use store::{PlayerStore, RevealOutcome};
