//! Card effect resolution.
//!
//! [`EffectResolver::execute`] validates a play, takes the card out of the
//! player's hand and dispatches on its [`ActionOp`]. Green and Red cards are
//! discarded afterwards. Blue cards stay in play as the recipient's status.
//! Conspiracy discards itself and asks the caller to run the ritual.
//!
//! Drawn cards go through [`EffectResolver::on_card_drawn`], which keeps the
//! Night and Black Cat cards out of hands.

use crate::cards::{ActionOp, Card, CardId, BLACK_CAT, NIGHT};
use crate::core::{GameState, PlayError, PlayerId, TargetError};
use crate::events::GameEvent;
use crate::night::accuse;

use super::log::format_play_log;
use super::targeting::validate_targets;

/// Accusations placed by Evidence on the light-evidence character.
const LIGHT_EVIDENCE: i32 = 1;

/// A request to play one card from hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayRequest {
    pub source: PlayerId,
    pub card: CardId,
    pub primary: Option<PlayerId>,
    pub secondary: Option<PlayerId>,
}

impl PlayRequest {
    #[must_use]
    pub fn new(source: PlayerId, card: CardId) -> Self {
        Self {
            source,
            card,
            primary: None,
            secondary: None,
        }
    }

    #[must_use]
    pub fn on(mut self, target: PlayerId) -> Self {
        self.primary = Some(target);
        self
    }

    #[must_use]
    pub fn giving_to(mut self, recipient: PlayerId) -> Self {
        self.secondary = Some(recipient);
        self
    }
}

/// Work the caller must do after a play resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    /// Enter the Conspiracy phase and run the ritual.
    Conspiracy,
}

/// A resolved play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub op: ActionOp,
    pub log: String,
    pub follow_up: Option<FollowUp>,
}

/// Where a drawn card ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    ToHand,
    /// The Night card. The caller owns it until the night is over.
    Night(Card),
    BlackCatAssigned,
    /// No one could take the card; it was discarded.
    Discarded,
}

/// Applies card plays and draws to the game state.
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectResolver;

impl EffectResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve a play.
    ///
    /// On error nothing has changed and the card is still in hand.
    pub fn execute(&self, state: &mut GameState, request: &PlayRequest) -> Result<PlayOutcome, PlayError> {
        let source = request.source;
        let record = state
            .players
            .get(source)
            .ok_or(PlayError::Target(TargetError::UnknownPlayer(source)))?;
        let card = record
            .hand()
            .iter()
            .find(|c| c.id == request.card)
            .ok_or(PlayError::CardNotInHand(request.card))?;
        let op = card.op().ok_or_else(|| PlayError::NotPlayable(card.name().to_string()))?;
        validate_targets(&state.players, source, &card.def, request.primary, request.secondary)?;

        let def = card.def.clone();
        let (primary, secondary) = if def.needs_primary_target {
            (request.primary, request.secondary.filter(|_| def.needs_secondary_target))
        } else {
            (None, None)
        };
        let Some(card) = state.players.remove_from_hand(source, request.card) else {
            return Err(PlayError::CardNotInHand(request.card));
        };

        tracing::debug!(%source, card = %card, ?primary, ?secondary, "resolving play");
        let follow_up = self.dispatch(state, op, source, card, primary, secondary);

        let source_name = state.name_of(source);
        let target_name = primary.map(|p| state.name_of(p));
        let recipient_name = secondary.map(|p| state.name_of(p));
        let log = format_play_log(
            &def.log_template,
            &source_name,
            &def.name,
            target_name.as_deref(),
            recipient_name.as_deref(),
        );
        tracing::info!("{log}");
        state.log_play(log.clone());
        state.emit(GameEvent::CardPlayed {
            source,
            card: def.name.clone(),
            target: primary,
            secondary,
            log: log.clone(),
        });

        Ok(PlayOutcome { op, log, follow_up })
    }

    /// Route a card to exactly one handler. The card is either attached to
    /// a player or discarded.
    fn dispatch(
        &self,
        state: &mut GameState,
        op: ActionOp,
        source: PlayerId,
        card: Card,
        primary: Option<PlayerId>,
        secondary: Option<PlayerId>,
    ) -> Option<FollowUp> {
        let mut follow_up = None;
        let leftover = match (op, primary) {
            (ActionOp::Accusation, Some(target)) => {
                accuse(state, target, 1);
                Some(card)
            }
            (ActionOp::Evidence, Some(target)) => {
                let amount = if self.is_named(state, target, &state.config.light_evidence_name) {
                    LIGHT_EVIDENCE
                } else {
                    3
                };
                accuse(state, target, amount);
                Some(card)
            }
            (ActionOp::Witness, Some(target)) => {
                accuse(state, target, 7);
                Some(card)
            }
            (ActionOp::Alibi, _) => {
                state.players.apply_alibi(source, 3);
                Some(card)
            }
            (ActionOp::Stocks, Some(target)) => {
                state.players.set_skip_turn(target);
                Some(card)
            }
            (ActionOp::Arson, Some(target)) => {
                if self.is_hand_immune(state, target) {
                    tracing::info!(%target, "hand is immune to arson");
                } else {
                    for burned in state.players.clear_hand(target) {
                        state.discard(burned);
                    }
                }
                Some(card)
            }
            (ActionOp::Robbery, Some(target)) => {
                if self.is_hand_immune(state, target) {
                    tracing::info!(%target, "hand is immune to robbery");
                } else if let Some(recipient) = secondary {
                    state.players.transfer_hand(target, recipient);
                }
                Some(card)
            }
            (ActionOp::Scapegoat, Some(target)) => {
                if let Some(recipient) = secondary {
                    if state.players.transfer_statuses(target, recipient) {
                        state.emit(GameEvent::StatusChanged { player: target });
                        state.emit(GameEvent::StatusChanged { player: recipient });
                        self.link_matchmakers(state);
                    }
                }
                Some(card)
            }
            (ActionOp::Curse, Some(target)) => {
                if let Some(cat) = state.players.remove_black_cat(target) {
                    tracing::info!(%target, "black cat discarded by curse");
                    state.discard(cat);
                }
                self.attach(state, target, card)
            }
            (ActionOp::Asylum | ActionOp::Piety, Some(target)) => self.attach(state, target, card),
            (ActionOp::Matchmaker, Some(target)) => {
                let leftover = self.attach(state, target, card);
                self.link_matchmakers(state);
                leftover
            }
            (ActionOp::Conspiracy, _) => {
                follow_up = Some(FollowUp::Conspiracy);
                Some(card)
            }
            (ActionOp::BlackCat, _) => {
                tracing::warn!(%source, "black cat is assigned, not played; attaching to its holder");
                self.attach(state, source, card)
            }
            (op, None) => {
                tracing::warn!(?op, %source, "targeted card resolved without a target");
                Some(card)
            }
        };

        if let Some(card) = leftover {
            state.discard(card);
        }
        follow_up
    }

    /// Attach a Blue card as a status. Returns it if it could not be attached.
    fn attach(&self, state: &mut GameState, target: PlayerId, card: Card) -> Option<Card> {
        match state.players.add_status(target, card) {
            Ok(()) => {
                state.emit(GameEvent::StatusChanged { player: target });
                None
            }
            Err(card) => Some(card),
        }
    }

    fn link_matchmakers(&self, state: &mut GameState) {
        if let Some((first, second)) = state.players.try_form_matchmaker_link() {
            state.emit(GameEvent::Matched { first, second });
        }
    }

    fn is_named(&self, state: &GameState, id: PlayerId, name: &str) -> bool {
        state.players.get(id).is_some_and(|r| r.name() == name)
    }

    fn is_hand_immune(&self, state: &GameState, id: PlayerId) -> bool {
        self.is_named(state, id, &state.config.hand_immune_name)
    }

    /// Route a freshly drawn card.
    ///
    /// Night is handed back to the caller, Black Cat becomes the drawer's
    /// status, everything else goes to the drawer's hand.
    pub fn on_card_drawn(&self, state: &mut GameState, drawer: PlayerId, card: Card) -> DrawOutcome {
        if card.is_named(NIGHT) {
            tracing::info!(%drawer, "night card drawn");
            return DrawOutcome::Night(card);
        }
        if !state.players.is_alive(drawer) {
            tracing::warn!(%drawer, card = %card, "drawn card has no living recipient, discarding");
            state.discard(card);
            return DrawOutcome::Discarded;
        }
        if card.is_named(BLACK_CAT) {
            return match state.players.assign_black_cat(drawer, card) {
                Ok(()) => {
                    state.emit(GameEvent::BlackCatAssigned { player: drawer });
                    DrawOutcome::BlackCatAssigned
                }
                Err(card) => {
                    state.discard(card);
                    DrawOutcome::Discarded
                }
            };
        }

        let id = card.id;
        match state.players.add_to_hand(drawer, card) {
            Ok(()) => {
                state.emit(GameEvent::CardDrawn { player: drawer, card: id });
                DrawOutcome::ToHand
            }
            Err(card) => {
                state.discard(card);
                DrawOutcome::Discarded
            }
        }
    }
}
