//! Card definitions and physical cards.
//!
//! `CardDef` holds the immutable properties of a card type: its name,
//! color category, the operation it performs and which targets it needs.
//! A `Card` is one physical copy of a definition, identified by a
//! `CardId` that is unique within a game.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Name of the card that starts the night sequence when drawn.
pub const NIGHT: &str = "Night";

/// Name of the status card that marks the conspiracy holder.
pub const BLACK_CAT: &str = "Black Cat";

/// Name of the card that runs the conspiracy ritual.
pub const CONSPIRACY: &str = "Conspiracy";

/// Identifier for one physical card in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Color category. Decides where a card goes once it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    /// Played and discarded.
    Green,
    /// Persistent status attached to a player.
    Blue,
    /// Accusation pressure, discarded after use.
    Red,
    /// Special event cards.
    Black,
}

impl CardColor {
    /// Is a resolved card of this color sent to the discard pile?
    #[must_use]
    pub const fn discards_on_play(self) -> bool {
        matches!(self, CardColor::Green | CardColor::Red)
    }
}

/// The closed set of card operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOp {
    Accusation,
    Stocks,
    Evidence,
    Witness,
    Alibi,
    BlackCat,
    Conspiracy,
    Arson,
    Curse,
    Robbery,
    Scapegoat,
    Asylum,
    Matchmaker,
    Piety,
}

impl ActionOp {
    /// Every operation, in declaration order.
    pub const ALL: [ActionOp; 14] = [
        ActionOp::Accusation,
        ActionOp::Stocks,
        ActionOp::Evidence,
        ActionOp::Witness,
        ActionOp::Alibi,
        ActionOp::BlackCat,
        ActionOp::Conspiracy,
        ActionOp::Arson,
        ActionOp::Curse,
        ActionOp::Robbery,
        ActionOp::Scapegoat,
        ActionOp::Asylum,
        ActionOp::Matchmaker,
        ActionOp::Piety,
    ];

    /// May this operation target the player who plays it?
    ///
    /// No operation allows it in the standard rules.
    #[must_use]
    pub const fn allows_self_target(self) -> bool {
        match self {
            ActionOp::Accusation
            | ActionOp::Stocks
            | ActionOp::Evidence
            | ActionOp::Witness
            | ActionOp::Alibi
            | ActionOp::BlackCat
            | ActionOp::Conspiracy
            | ActionOp::Arson
            | ActionOp::Curse
            | ActionOp::Robbery
            | ActionOp::Scapegoat
            | ActionOp::Asylum
            | ActionOp::Matchmaker
            | ActionOp::Piety => false,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use salem_engine::cards::{ActionOp, CardColor, CardDef};
///
/// let robbery = CardDef::action("Robbery", CardColor::Green, ActionOp::Robbery)
///     .with_secondary_target();
///
/// assert!(robbery.needs_primary_target);
/// assert!(robbery.needs_secondary_target);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDef {
    /// Display name, also used for name-keyed rules ("Night", "Black Cat").
    pub name: String,

    /// Color category.
    pub color: CardColor,

    /// Operation performed when played. `None` for cards that are never played.
    pub op: Option<ActionOp>,

    /// Does playing this card need a victim?
    pub needs_primary_target: bool,

    /// Does playing this card need a second player (recipient)?
    pub needs_secondary_target: bool,

    /// Play-log template with `{source}`, `{card}`, `{target}` and `{recipient}` slots.
    pub log_template: String,

    /// Rules text shown to players.
    pub rules_text: String,
}

impl CardDef {
    /// Default play-log template.
    pub const DEFAULT_LOG_TEMPLATE: &'static str = "{source} played {card} on {target}.";

    /// Define a playable card that needs a single target.
    pub fn action(name: impl Into<String>, color: CardColor, op: ActionOp) -> Self {
        Self {
            name: name.into(),
            color,
            op: Some(op),
            needs_primary_target: true,
            needs_secondary_target: false,
            log_template: Self::DEFAULT_LOG_TEMPLATE.to_string(),
            rules_text: String::new(),
        }
    }

    /// Define a card with no play operation (e.g. "Night").
    pub fn event(name: impl Into<String>, color: CardColor) -> Self {
        Self {
            name: name.into(),
            color,
            op: None,
            needs_primary_target: false,
            needs_secondary_target: false,
            log_template: Self::DEFAULT_LOG_TEMPLATE.to_string(),
            rules_text: String::new(),
        }
    }

    /// Play without any target.
    #[must_use]
    pub fn untargeted(mut self) -> Self {
        self.needs_primary_target = false;
        self
    }

    /// Require a second player as recipient.
    #[must_use]
    pub fn with_secondary_target(mut self) -> Self {
        self.needs_secondary_target = true;
        self
    }

    /// Override the play-log template.
    #[must_use]
    pub fn with_log_template(mut self, template: impl Into<String>) -> Self {
        self.log_template = template.into();
        self
    }

    /// Set rules text.
    #[must_use]
    pub fn with_rules_text(mut self, text: impl Into<String>) -> Self {
        self.rules_text = text.into();
        self
    }

    /// Can this card be played from a hand?
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.op.is_some()
    }
}

/// One physical card.
///
/// Cheap to clone; definitions are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub def: Arc<CardDef>,
}

impl Card {
    /// Create a physical card from a shared definition.
    #[must_use]
    pub fn new(id: CardId, def: Arc<CardDef>) -> Self {
        Self { id, def }
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Operation, if playable.
    #[must_use]
    pub fn op(&self) -> Option<ActionOp> {
        self.def.op
    }

    /// Does this card carry the given name?
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.def.name == name
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.def.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_disposal() {
        assert!(CardColor::Green.discards_on_play());
        assert!(CardColor::Red.discards_on_play());
        assert!(!CardColor::Blue.discards_on_play());
        assert!(!CardColor::Black.discards_on_play());
    }

    #[test]
    fn test_no_op_allows_self_target() {
        assert!(ActionOp::ALL.iter().all(|op| !op.allows_self_target()));
    }

    #[test]
    fn test_event_card_not_playable() {
        let night = CardDef::event(NIGHT, CardColor::Black);
        assert!(!night.is_playable());
        assert!(!night.needs_primary_target);
    }

    #[test]
    fn test_card_naming() {
        let def = Arc::new(CardDef::action("Accusation", CardColor::Red, ActionOp::Accusation));
        let card = Card::new(CardId::new(4), def);
        assert!(card.is_named("Accusation"));
        assert_eq!(card.op(), Some(ActionOp::Accusation));
        assert_eq!(card.to_string(), "Accusation");
    }
}
