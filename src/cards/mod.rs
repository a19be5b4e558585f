//! Card system: action/status cards, Tryal identity cards, town-hall characters.
//!
//! ## Key Types
//!
//! - `CardDef`: Static card data (name, color, operation, targets)
//! - `Card`: One physical copy of a definition
//! - `ActionOp`: Closed set of card operations
//! - `TryalCard`: Hidden identity card with a one-way reveal
//! - `CardCatalog`: Definition lookup and deck composition
//! - `TownHall`: Character card dealt at setup

pub mod catalog;
pub mod definition;
pub mod town_hall;
pub mod tryal;

pub use catalog::CardCatalog;
pub use definition::{ActionOp, Card, CardColor, CardDef, CardId, BLACK_CAT, CONSPIRACY, NIGHT};
pub use town_hall::TownHall;
pub use tryal::{build_tryal_deck, TryalCard, TryalKind};
