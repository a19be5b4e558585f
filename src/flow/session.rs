//! Game session: the suspended-step driver.
//!
//! A [`GameSession`] owns the game state, the phase machine, the turn
//! manager and the external collaborators. The host drives it in a loop:
//!
//! ```text
//! loop {
//!     match session.advance() {
//!         Step::Delay { duration } => wait(duration),
//!         Step::AwaitingAction { player, timeout } => {
//!             // human input arrives through draw_cards / play_card / end_turn,
//!             // or expire_turn once `timeout` has passed
//!         }
//!         Step::AwaitingChoice(request) => { /* later: submit_choice(..) */ }
//!         Step::Finished(result) => break,
//!     }
//! }
//! ```
//!
//! Every public call drains queued events into the presentation sink
//! before returning and hands spent cards back to the draw source.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::choice::{Choice, ChoiceKind, ChoiceOptions, ChoicePoll, ChoiceProvider, ChoiceRequest};
use super::endgame::EndGameResult;
use super::phase::{GamePhase, PhaseMachine};
use super::turn::TurnManager;
use crate::cards::{build_tryal_deck, Card, CardCatalog, BLACK_CAT};
use crate::core::{ConfigError, GameState, PlayError, PlayerId, RulesConfig};
use crate::deck::{DrawSource, Reject, ShuffledDeck};
use crate::effects::{
    valid_primaries, valid_secondaries, DrawOutcome, EffectResolver, FollowUp, PlayOutcome, PlayRequest,
};
use crate::events::{GameEvent, PresentationSink};
use crate::night::{
    protect_options, resolve_night, reveal_options, run_conspiracy, targets_for, NightPlan, NightReport,
};
use crate::players::Seat;

/// What the driver should do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Wait, then call `advance` again.
    Delay { duration: Duration },
    /// A human player's turn is open.
    AwaitingAction { player: PlayerId, timeout: Duration },
    /// A human decision is outstanding; answer with `submit_choice`.
    AwaitingChoice(ChoiceRequest),
    Finished(EndGameResult),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Setup,
    Dawn,
    NextTurn,
    HumanTurn(PlayerId),
    BotTurn(PlayerId),
    Protect,
    Votes,
    ResolveNight,
    Conspiracy,
    Finished,
}

/// One night in progress.
#[derive(Debug, Default)]
struct NightRun {
    card: Option<Card>,
    plan: NightPlan,
    voters: VecDeque<PlayerId>,
}

// ============================================================================
// Builder
// ============================================================================

/// Wires seats, rules and collaborators into a [`GameSession`].
#[derive(Default)]
pub struct SessionBuilder {
    seats: Vec<Seat>,
    config: RulesConfig,
    seed: Option<u64>,
    deck: Option<Box<dyn DrawSource>>,
    sink: Option<Box<dyn PresentationSink>>,
    choices: Option<Box<dyn ChoiceProvider>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, seat: Seat) -> Self {
        self.seats.push(seat);
        self
    }

    pub fn seats(mut self, seats: impl IntoIterator<Item = Seat>) -> Self {
        self.seats.extend(seats);
        self
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the seed. Without one the clock is used.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn draw_source(mut self, deck: impl DrawSource + 'static) -> Self {
        self.deck = Some(Box::new(deck));
        self
    }

    /// Use the standard Salem deck. It is shuffled during setup.
    pub fn standard_deck(self) -> Self {
        let cards = CardCatalog::salem().build_deck(0);
        self.draw_source(ShuffledDeck::stacked(cards))
    }

    pub fn presentation(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn choices(mut self, provider: impl ChoiceProvider + 'static) -> Self {
        self.choices = Some(Box::new(provider));
        self
    }

    /// Build the session. Nothing is dealt until the first `advance`.
    pub fn build(self) -> Result<GameSession, ConfigError> {
        let deck = self.deck.ok_or(ConfigError::MissingDrawSource)?;
        let sink = self.sink.ok_or(ConfigError::MissingPresentationSink)?;
        self.config.validate(self.seats.len())?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default();
                tracing::warn!(seed, "no seed supplied, seeding from the clock; replays need this seed");
                seed
            }
        };
        tracing::info!(seed, players = self.seats.len(), "session created");

        Ok(GameSession {
            state: GameState::new(self.seats, self.config, seed),
            phases: PhaseMachine::new(),
            turns: TurnManager::new(),
            resolver: EffectResolver::new(),
            deck,
            sink,
            choices: self.choices,
            stage: Stage::Setup,
            night: None,
            pending: None,
            delay_served: false,
            black_cat_dealt: false,
        })
    }
}

// ============================================================================
// Session
// ============================================================================

/// A game in progress.
pub struct GameSession {
    state: GameState,
    phases: PhaseMachine,
    turns: TurnManager,
    resolver: EffectResolver,
    deck: Box<dyn DrawSource>,
    sink: Box<dyn PresentationSink>,
    choices: Option<Box<dyn ChoiceProvider>>,
    stage: Stage,
    night: Option<NightRun>,
    pending: Option<ChoiceRequest>,
    delay_served: bool,
    black_cat_dealt: bool,
}

impl GameSession {
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phases.current()
    }

    #[must_use]
    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    #[must_use]
    pub fn result(&self) -> Option<&EndGameResult> {
        self.state.result()
    }

    /// The decision currently waiting on `submit_choice`.
    #[must_use]
    pub fn pending_choice(&self) -> Option<&ChoiceRequest> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_night_active(&self) -> bool {
        self.night.is_some()
    }

    /// Cards left in the draw source.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Restart the RNG stream. Used for replays and tests.
    pub fn reseed(&mut self, seed: u64) {
        self.state.rng.reseed(seed);
    }

    /// Run until the next suspension point.
    pub fn advance(&mut self) -> Step {
        let step = self.run();
        self.settle();
        step
    }

    fn run(&mut self) -> Step {
        loop {
            if let Some(result) = self.finish_if_over() {
                return Step::Finished(result);
            }
            if let Some(request) = &self.pending {
                return Step::AwaitingChoice(request.clone());
            }
            match self.stage {
                Stage::Setup => self.run_setup(),
                Stage::Dawn => self.run_dawn(),
                Stage::NextTurn => self.start_next_turn(),
                Stage::HumanTurn(player) => {
                    return Step::AwaitingAction {
                        player,
                        timeout: self.state.config.turn_timeout,
                    };
                }
                Stage::BotTurn(player) => {
                    if let Some(step) = self.delay(self.state.config.ai_think_delay) {
                        return step;
                    }
                    self.run_bot_turn(player);
                }
                Stage::Protect => {
                    if let Some(step) = self.collect_protection() {
                        return step;
                    }
                }
                Stage::Votes => {
                    if let Some(step) = self.collect_vote() {
                        return step;
                    }
                }
                Stage::ResolveNight => {
                    self.finish_night();
                }
                Stage::Conspiracy => {
                    if let Some(step) = self.run_conspiracy_phase() {
                        return step;
                    }
                }
                Stage::Finished => {
                    // Only reachable with a result recorded; the check above returns it.
                    tracing::error!("finished stage without a result");
                    self.state.evaluate_end_game();
                    if !self.state.is_over() {
                        self.stage = Stage::NextTurn;
                    }
                }
            }
        }
    }

    /// Yield one delay step, then let the caller continue on the next call.
    fn delay(&mut self, duration: Duration) -> Option<Step> {
        if std::mem::take(&mut self.delay_served) {
            return None;
        }
        self.delay_served = true;
        Some(Step::Delay { duration })
    }

    fn finish_if_over(&mut self) -> Option<EndGameResult> {
        let result = self.state.result()?.clone();
        if self.stage != Stage::Finished {
            self.turns.end_turn(&mut self.state);
            self.phases.enter_end_game(&mut self.state);
            self.stage = Stage::Finished;
            self.night = None;
            self.pending = None;
        }
        Some(result)
    }

    /// End-of-call housekeeping: spent cards back to the deck, events out.
    fn settle(&mut self) {
        self.finish_if_over();
        for card in std::mem::take(&mut self.state.discards) {
            self.deck.discard(card);
        }
        self.state.events.drain_into(self.sink.as_mut());
    }

    // ===== Setup and dawn =====

    fn run_setup(&mut self) {
        let players = self.state.players.len();
        let per_player = self.state.config.tryal_cards_per_player;
        let witches = self.state.config.witch_count(players);
        let tryals = build_tryal_deck(players * per_player, witches, 0);
        tracing::info!(players, witches, per_player, "dealing tryal cards");
        self.state.players.deal_tryals(tryals, per_player, &mut self.state.rng);
        if self.state.config.deal_town_hall {
            self.state.players.deal_town_hall(&mut self.state.rng);
        }

        self.deck.shuffle(&mut self.state.rng);
        self.deal_opening_hands();
        self.phases.advance(&mut self.state, GamePhase::Dawn);
        self.stage = Stage::Dawn;
    }

    fn deal_opening_hands(&mut self) {
        let config = self.state.config.clone();
        let restricted: Reject<'_> = &|card: &Card| config.is_opening_restricted(card.name()) || card.is_named(BLACK_CAT);
        let ids: Vec<PlayerId> = self.state.players.ids().collect();
        for player in ids {
            for _ in 0..config.opening_hand_size {
                let Some(card) = self.deck.draw(&mut self.state.rng, Some(restricted)) else {
                    tracing::warn!(%player, "draw source ran dry during the opening deal");
                    return;
                };
                if let DrawOutcome::Night(card) = self.resolver.on_card_drawn(&mut self.state, player, card) {
                    tracing::warn!(%player, "night card forced into an opening hand, discarding");
                    self.deck.discard(card);
                }
            }
        }
    }

    fn run_dawn(&mut self) {
        if !self.black_cat_dealt {
            self.black_cat_dealt = true;
            self.deal_black_cat();
        }
        self.state.evaluate_end_game();
        if self.state.is_over() {
            return;
        }
        self.phases.advance(&mut self.state, GamePhase::Day);
        self.stage = Stage::NextTurn;
    }

    fn deal_black_cat(&mut self) {
        if let Some(holder) = self.state.players.black_cat_holder() {
            tracing::info!(%holder, "black cat already assigned");
            return;
        }
        let Some(card) = self.deck.take_named(BLACK_CAT) else {
            tracing::warn!("no black cat in the draw source");
            return;
        };
        let alive = self.state.players.alive_ids();
        let Some(&holder) = self.state.rng.choose(&alive) else {
            self.deck.discard(card);
            return;
        };
        match self.state.players.assign_black_cat(holder, card) {
            Ok(()) => {
                tracing::info!(%holder, "black cat assigned");
                self.state.emit(GameEvent::BlackCatAssigned { player: holder });
            }
            Err(card) => self.deck.discard(card),
        }
    }

    // ===== Turns =====

    fn start_next_turn(&mut self) {
        let Some(player) = self.turns.next_player(&self.state.players) else {
            tracing::warn!("no living player to take a turn");
            self.state.evaluate_end_game();
            return;
        };
        if self.state.players.take_skip_turn(player) {
            self.turns.skip_turn(&mut self.state, player);
            return;
        }
        self.turns.begin_turn(&mut self.state, player);
        let human = self.state.players.get(player).is_some_and(|r| r.is_human());
        self.stage = if human {
            Stage::HumanTurn(player)
        } else {
            Stage::BotTurn(player)
        };
    }

    /// Automated turn: play a random playable card, else draw. Then end the turn.
    fn run_bot_turn(&mut self, player: PlayerId) {
        match self.bot_play(player) {
            Some(request) => {
                if let Err(err) = self.resolve_play(&request) {
                    tracing::warn!(%player, %err, "automated play rejected, drawing instead");
                    self.draw_for(player);
                }
            }
            None => self.draw_for(player),
        }
        if self.stage == Stage::BotTurn(player) {
            self.turns.end_turn(&mut self.state);
            self.stage = Stage::NextTurn;
        }
    }

    fn bot_play(&mut self, player: PlayerId) -> Option<PlayRequest> {
        let players = &self.state.players;
        let record = players.get(player)?;
        let playable: Vec<_> = record
            .hand()
            .iter()
            .filter(|card| card.def.is_playable())
            .filter(|card| {
                let def = &card.def;
                if !def.needs_primary_target {
                    return true;
                }
                let primaries = valid_primaries(players, player, def);
                if def.needs_secondary_target {
                    primaries.iter().any(|&p| !valid_secondaries(players, player, p).is_empty())
                } else {
                    !primaries.is_empty()
                }
            })
            .map(|card| (card.id, card.def.clone()))
            .collect();

        let (card, def) = self.state.rng.choose(&playable)?.clone();
        let mut request = PlayRequest::new(player, card);
        if !def.needs_primary_target {
            return Some(request);
        }

        let mut primaries = valid_primaries(&self.state.players, player, &def);
        if def.needs_secondary_target {
            primaries.retain(|&p| !valid_secondaries(&self.state.players, player, p).is_empty());
        }
        let primary = *self.state.rng.choose(&primaries)?;
        request = request.on(primary);
        if def.needs_secondary_target {
            let secondaries = valid_secondaries(&self.state.players, player, primary);
            request = request.giving_to(*self.state.rng.choose(&secondaries)?);
        }
        Some(request)
    }

    fn check_day_action(&self) -> Result<(), PlayError> {
        if self.state.is_over() {
            return Err(PlayError::GameOver);
        }
        if !self.phases.is(GamePhase::Day) || self.night.is_some() {
            return Err(PlayError::WrongPhase);
        }
        Ok(())
    }

    /// Take the draw action for the active player and end their turn.
    ///
    /// Drawing the Night card stops the draw and starts the night.
    pub fn draw_cards(&mut self, player: PlayerId) -> Result<(), PlayError> {
        let result = self
            .check_day_action()
            .and_then(|()| self.turns.try_begin_draw(player))
            .map(|()| self.draw_for(player));
        match &result {
            Ok(()) if self.stage == Stage::HumanTurn(player) => {
                self.turns.end_turn(&mut self.state);
                self.stage = Stage::NextTurn;
            }
            Ok(()) => {}
            Err(err) => tracing::warn!(%player, %err, "draw rejected"),
        }
        self.settle();
        result
    }

    fn draw_for(&mut self, player: PlayerId) {
        for card in std::mem::take(&mut self.state.discards) {
            self.deck.discard(card);
        }
        for _ in 0..self.state.config.draw_action_count {
            let Some(card) = self.deck.draw(&mut self.state.rng, None) else {
                tracing::warn!(%player, "draw source is empty");
                break;
            };
            if let DrawOutcome::Night(card) = self.resolver.on_card_drawn(&mut self.state, player, card) {
                self.start_night(Some(card));
                break;
            }
        }
    }

    /// Play a card for the active player.
    pub fn play_card(&mut self, request: PlayRequest) -> Result<PlayOutcome, PlayError> {
        let result = self
            .check_day_action()
            .and_then(|()| self.turns.check_play(request.source))
            .and_then(|()| self.resolve_play(&request));
        match &result {
            Ok(_) => {
                let source = request.source;
                if self.stage == Stage::HumanTurn(source) && !self.state.players.is_alive(source) {
                    self.turns.end_turn(&mut self.state);
                    self.stage = Stage::NextTurn;
                }
            }
            Err(err) => tracing::warn!(source = %request.source, %err, "play rejected"),
        }
        self.settle();
        result
    }

    fn resolve_play(&mut self, request: &PlayRequest) -> Result<PlayOutcome, PlayError> {
        let outcome = self.resolver.execute(&mut self.state, request)?;
        self.turns.mark_play();
        if outcome.follow_up == Some(FollowUp::Conspiracy) && !self.state.is_over() {
            self.start_conspiracy();
        }
        Ok(outcome)
    }

    /// End the active player's turn.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<(), PlayError> {
        let result = self.check_day_action().and_then(|()| self.turns.check_actor(player));
        match &result {
            Ok(()) => {
                self.turns.end_turn(&mut self.state);
                self.stage = Stage::NextTurn;
            }
            Err(err) => tracing::warn!(%player, %err, "end turn rejected"),
        }
        self.settle();
        result
    }

    /// The open human turn ran out of time. Returns `false` if no human
    /// turn was open.
    pub fn expire_turn(&mut self) -> bool {
        let Stage::HumanTurn(player) = self.stage else {
            tracing::warn!(stage = ?self.stage, "turn timeout with no open human turn");
            return false;
        };
        tracing::info!(%player, "turn timed out");
        self.turns.end_turn(&mut self.state);
        self.stage = Stage::NextTurn;
        self.settle();
        true
    }

    // ===== Night =====

    /// Start a night sequence without a Night card.
    ///
    /// A request while a night is already running is satisfied by that
    /// night and returns `false`.
    pub fn begin_night(&mut self) -> bool {
        if self.night.is_some() {
            tracing::warn!("night already in progress, ignoring duplicate request");
            return false;
        }
        if let Err(err) = self.check_day_action() {
            tracing::warn!(%err, "cannot start night now");
            return false;
        }
        self.start_night(None);
        self.settle();
        true
    }

    fn start_night(&mut self, card: Option<Card>) {
        if self.night.is_some() {
            tracing::warn!("night already in progress, ignoring duplicate request");
            if let Some(card) = card {
                self.deck.return_night_card(card, &mut self.state.rng);
            }
            return;
        }
        self.turns.end_turn(&mut self.state);
        self.delay_served = false;
        self.phases.advance(&mut self.state, GamePhase::Night);
        self.night = Some(NightRun {
            card,
            ..NightRun::default()
        });
        self.stage = Stage::Protect;
    }

    fn collect_protection(&mut self) -> Option<Step> {
        let constable = self.state.players.living_constable();
        let options = constable.map(|c| protect_options(&self.state, c)).unwrap_or_default();
        let Some(constable) = constable.filter(|_| !options.is_empty()) else {
            tracing::debug!("no protection tonight");
            self.start_votes();
            return None;
        };

        let request = ChoiceRequest {
            kind: ChoiceKind::Protect,
            chooser: constable,
            options: ChoiceOptions::Players(options),
            prompt: "Choose a player to protect tonight".to_string(),
        };
        self.decide(constable, request)
    }

    fn start_votes(&mut self) {
        let witches = self.state.players.living_witches();
        if let Some(night) = self.night.as_mut() {
            night.voters = witches.into();
        }
        self.stage = Stage::Votes;
    }

    fn collect_vote(&mut self) -> Option<Step> {
        loop {
            let Some(witch) = self.night.as_ref().and_then(|n| n.voters.front().copied()) else {
                self.stage = Stage::ResolveNight;
                return None;
            };
            let options = targets_for(&self.state, witch);
            if !self.state.players.is_alive(witch) || options.is_empty() {
                self.next_voter();
                continue;
            }
            let request = ChoiceRequest {
                kind: ChoiceKind::NightVote,
                chooser: witch,
                options: ChoiceOptions::Players(options),
                prompt: "Choose tonight's victim".to_string(),
            };
            return self.decide(witch, request);
        }
    }

    fn next_voter(&mut self) {
        if let Some(night) = self.night.as_mut() {
            night.voters.pop_front();
        }
    }

    fn finish_night(&mut self) {
        let Some(mut night) = self.night.take() else {
            self.stage = Stage::Dawn;
            return;
        };
        let report: NightReport = resolve_night(&mut self.state, &night.plan);
        tracing::info!(outcome = ?report.outcome, "night resolved");
        if let Some(card) = night.card.take() {
            for spent in std::mem::take(&mut self.state.discards) {
                self.deck.discard(spent);
            }
            self.deck.return_night_card(card, &mut self.state.rng);
        }
        if self.state.is_over() {
            return;
        }
        self.phases.advance(&mut self.state, GamePhase::Dawn);
        self.stage = Stage::Dawn;
    }

    // ===== Conspiracy =====

    fn start_conspiracy(&mut self) {
        self.turns.end_turn(&mut self.state);
        self.delay_served = false;
        self.phases.advance(&mut self.state, GamePhase::Conspiracy);
        self.stage = Stage::Conspiracy;
    }

    fn run_conspiracy_phase(&mut self) -> Option<Step> {
        let options = reveal_options(&self.state);
        if let Some((holder, indices)) = options {
            let controlled = self.state.players.get(holder).is_some_and(|r| r.is_controlled());
            if controlled {
                let request = ChoiceRequest {
                    kind: ChoiceKind::ConspiracyReveal,
                    chooser: holder,
                    options: ChoiceOptions::TryalIndices(indices.to_vec()),
                    prompt: "Choose one of your Tryal cards to reveal".to_string(),
                };
                return self.ask(request);
            }
        }
        self.finish_conspiracy(None);
        None
    }

    fn finish_conspiracy(&mut self, pick: Option<usize>) {
        let report = run_conspiracy(&mut self.state, pick);
        tracing::info!(revealed = ?report.revealed, swap = ?report.swap, "conspiracy finished");
        if self.state.is_over() {
            return;
        }
        self.phases.advance(&mut self.state, GamePhase::Day);
        self.stage = Stage::NextTurn;
    }

    // ===== Choices =====

    /// Ask a human chooser, or pick at random for an automated one.
    fn decide(&mut self, chooser: PlayerId, request: ChoiceRequest) -> Option<Step> {
        let controlled = self.state.players.get(chooser).is_some_and(|r| r.is_controlled());
        if controlled {
            return self.ask(request);
        }
        if let Some(step) = self.delay(self.state.config.night_decision_delay) {
            return Some(step);
        }
        let choice = request.options.random(&mut self.state.rng);
        self.apply_choice(&request, choice);
        None
    }

    fn ask(&mut self, request: ChoiceRequest) -> Option<Step> {
        let poll = match self.choices.as_mut() {
            Some(provider) => provider.request(&request),
            None => {
                tracing::warn!(kind = ?request.kind, "no choice provider, picking at random");
                ChoicePoll::Ready(None)
            }
        };
        match poll {
            ChoicePoll::Ready(choice) => {
                self.apply_choice(&request, choice);
                None
            }
            ChoicePoll::Pending => {
                let step = Step::AwaitingChoice(request.clone());
                self.pending = Some(request);
                Some(step)
            }
        }
    }

    /// Answer the outstanding choice. `None` cancels it, which falls back
    /// to a random legal option. Returns `false` if nothing was pending.
    pub fn submit_choice(&mut self, choice: Option<Choice>) -> bool {
        let Some(request) = self.pending.take() else {
            tracing::warn!(?choice, "no choice pending");
            return false;
        };
        self.apply_choice(&request, choice);
        self.settle();
        true
    }

    fn apply_choice(&mut self, request: &ChoiceRequest, choice: Option<Choice>) {
        let settled = request.settle(choice, &mut self.state.rng);
        match request.kind {
            ChoiceKind::Protect => {
                let protected = settled.and_then(Choice::player);
                if let (Some(night), Some(player)) = (self.night.as_mut(), protected) {
                    night.plan.protected = Some(player);
                    tracing::info!(constable = %request.chooser, %player, "protection chosen");
                    self.state.emit(GameEvent::Protected {
                        constable: request.chooser,
                        player,
                    });
                }
                self.start_votes();
            }
            ChoiceKind::NightVote => {
                if let (Some(night), Some(victim)) = (self.night.as_mut(), settled.and_then(Choice::player)) {
                    tracing::debug!(witch = %request.chooser, %victim, "vote cast");
                    night.plan.record_vote(request.chooser, victim);
                }
                self.next_voter();
            }
            ChoiceKind::ConspiracyReveal => {
                self.finish_conspiracy(settled.and_then(Choice::tryal_index));
            }
        }
    }
}
