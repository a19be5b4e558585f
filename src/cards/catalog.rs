//! Card catalog: definition lookup and deck composition.
//!
//! The `CardCatalog` stores every card definition for a game, keyed by
//! name, together with how many copies of each go into the play deck.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{ActionOp, Card, CardColor, CardDef, CardId, BLACK_CAT, CONSPIRACY, NIGHT};

/// Registry of card definitions and their copy counts.
///
/// ## Example
///
/// ```
/// use salem_engine::cards::{ActionOp, CardCatalog, CardColor, CardDef};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardDef::action("Accusation", CardColor::Red, ActionOp::Accusation), 3);
///
/// let deck = catalog.build_deck(0);
/// assert_eq!(deck.len(), 3);
/// assert_eq!(catalog.get("Accusation").unwrap().op, Some(ActionOp::Accusation));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, Arc<CardDef>>,
    composition: Vec<(String, usize)>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard Salem card set.
    #[must_use]
    pub fn salem() -> Self {
        let mut catalog = Self::new();

        catalog.register(
            CardDef::action("Accusation", CardColor::Red, ActionOp::Accusation)
                .with_rules_text("Place 1 accusation on another player."),
            35,
        );
        catalog.register(
            CardDef::action("Evidence", CardColor::Red, ActionOp::Evidence)
                .with_rules_text("Place 3 accusations on another player."),
            5,
        );
        catalog.register(
            CardDef::action("Witness", CardColor::Red, ActionOp::Witness)
                .with_rules_text("Place 7 accusations on another player."),
            1,
        );
        catalog.register(
            CardDef::action("Alibi", CardColor::Green, ActionOp::Alibi)
                .with_rules_text("Remove up to 3 accusations from another player."),
            3,
        );
        catalog.register(
            CardDef::action("Stocks", CardColor::Green, ActionOp::Stocks)
                .with_rules_text("Another player skips their next turn."),
            4,
        );
        catalog.register(
            CardDef::action("Arson", CardColor::Green, ActionOp::Arson)
                .with_rules_text("Another player discards their entire hand."),
            1,
        );
        catalog.register(
            CardDef::action("Robbery", CardColor::Green, ActionOp::Robbery)
                .with_secondary_target()
                .with_log_template("{source} played {card} on {target}, giving their hand to {recipient}.")
                .with_rules_text("Take a player's hand and give it to another player."),
            1,
        );
        catalog.register(
            CardDef::action("Scapegoat", CardColor::Green, ActionOp::Scapegoat)
                .with_secondary_target()
                .with_log_template("{source} played {card} on {target}, moving their cards to {recipient}.")
                .with_rules_text("Move every status card from one player to another."),
            2,
        );
        catalog.register(
            CardDef::action("Curse", CardColor::Blue, ActionOp::Curse)
                .with_rules_text("Discard the target's Black Cat. Lowers their accusation limit by 1."),
            1,
        );
        catalog.register(
            CardDef::action("Asylum", CardColor::Blue, ActionOp::Asylum)
                .with_rules_text("The target cannot be killed at night."),
            1,
        );
        catalog.register(
            CardDef::action("Piety", CardColor::Blue, ActionOp::Piety)
                .with_rules_text("Doubles the target's accusation limit."),
            2,
        );
        catalog.register(
            CardDef::action("Matchmaker", CardColor::Blue, ActionOp::Matchmaker)
                .with_rules_text("When two players hold Matchmaker, if either dies both die."),
            2,
        );
        catalog.register(
            CardDef::action(CONSPIRACY, CardColor::Black, ActionOp::Conspiracy)
                .untargeted()
                .with_log_template("{source} played {card}.")
                .with_rules_text("The Black Cat holder reveals a Tryal card, then two players swap one."),
            1,
        );
        catalog.register(
            CardDef::event(NIGHT, CardColor::Black)
                .with_rules_text("Witches choose a victim. The Constable may protect one player."),
            1,
        );
        catalog.register(
            CardDef::action(BLACK_CAT, CardColor::Blue, ActionOp::BlackCat)
                .untargeted()
                .with_rules_text("Assigned at the first dawn. The holder starts every Conspiracy."),
            1,
        );

        catalog
    }

    /// Register a definition with `copies` in the deck.
    ///
    /// Panics if a card with the same name already exists.
    pub fn register(&mut self, def: CardDef, copies: usize) {
        if self.cards.contains_key(&def.name) {
            panic!("Card named {:?} already registered", def.name);
        }
        self.composition.push((def.name.clone(), copies));
        self.cards.insert(def.name.clone(), Arc::new(def));
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<CardDef>> {
        self.cards.get(name)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total cards in a built deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.composition.iter().map(|(_, n)| n).sum()
    }

    /// Make a single physical card by name.
    #[must_use]
    pub fn make(&self, name: &str, id: CardId) -> Option<Card> {
        self.get(name).map(|def| Card::new(id, Arc::clone(def)))
    }

    /// Build every physical card in registration order, ids counting from `first_id`.
    #[must_use]
    pub fn build_deck(&self, first_id: u32) -> Vec<Card> {
        let mut next = first_id;
        let mut deck = Vec::with_capacity(self.deck_size());
        for (name, copies) in &self.composition {
            let Some(def) = self.cards.get(name) else {
                continue;
            };
            for _ in 0..*copies {
                deck.push(Card::new(CardId::new(next), Arc::clone(def)));
                next += 1;
            }
        }
        deck
    }
}
