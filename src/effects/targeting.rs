//! Target validation for card plays.
//!
//! Rules, checked in order and each reported with its own error:
//!
//! - A card that needs a victim must name one
//! - The victim is not the player unless the operation allows it
//! - A card that needs a recipient must name one
//! - The recipient is neither the player nor the victim
//! - Every named player is seated and still alive

use crate::cards::CardDef;
use crate::core::{PlayerId, TargetError};
use crate::players::PlayerStore;

/// Check a play's targets. Never mutates anything.
pub fn validate_targets(
    players: &PlayerStore,
    source: PlayerId,
    def: &CardDef,
    primary: Option<PlayerId>,
    secondary: Option<PlayerId>,
) -> Result<(), TargetError> {
    if !def.needs_primary_target {
        return Ok(());
    }
    let allows_self = def.op.is_some_and(|op| op.allows_self_target());

    let primary = primary.ok_or(TargetError::MissingPrimary)?;
    check_seated(players, primary)?;
    if primary == source && !allows_self {
        return Err(TargetError::SelfTarget);
    }

    if def.needs_secondary_target {
        let secondary = secondary.ok_or(TargetError::MissingSecondary)?;
        check_seated(players, secondary)?;
        if secondary == source {
            return Err(TargetError::SelfRecipient);
        }
        if secondary == primary {
            return Err(TargetError::RecipientIsPrimary);
        }
    }
    Ok(())
}

fn check_seated(players: &PlayerStore, id: PlayerId) -> Result<(), TargetError> {
    match players.get(id) {
        None => Err(TargetError::UnknownPlayer(id)),
        Some(record) if record.is_eliminated() => Err(TargetError::Eliminated(id)),
        Some(_) => Ok(()),
    }
}

/// Every legal victim for `source` playing `def`, seat order.
#[must_use]
pub fn valid_primaries(players: &PlayerStore, source: PlayerId, def: &CardDef) -> Vec<PlayerId> {
    let allows_self = def.op.is_some_and(|op| op.allows_self_target());
    players
        .alive_ids()
        .into_iter()
        .filter(|&p| allows_self || p != source)
        .collect()
}

/// Every legal recipient once `primary` is chosen, seat order.
#[must_use]
pub fn valid_secondaries(players: &PlayerStore, source: PlayerId, primary: PlayerId) -> Vec<PlayerId> {
    players
        .alive_ids()
        .into_iter()
        .filter(|&p| p != source && p != primary)
        .collect()
}
