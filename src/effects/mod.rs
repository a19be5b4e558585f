//! Card effect system.
//!
//! - `targeting`: target validation and legal-target listing
//! - `resolver`: `EffectResolver`, one handler per card operation, plus draw routing
//! - `log`: play-log line formatting
//!
//! Every play is validated before anything mutates. A rejected play leaves
//! the card in hand and the state untouched.

mod log;
mod resolver;
mod targeting;

pub use log::{format_play_log, NO_RECIPIENT, NO_TARGET};
pub use resolver::{DrawOutcome, EffectResolver, FollowUp, PlayOutcome, PlayRequest};
pub use targeting::{valid_primaries, valid_secondaries, validate_targets};
