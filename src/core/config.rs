//! Rules configuration.
//!
//! Every tunable rule lives in [`RulesConfig`]. Hosts start from
//! `RulesConfig::default()` and override with the `with_*` builders, or load
//! the struct from any serde format; missing fields take their defaults.
//!
//! Character passives are keyed by player name. The names are configurable
//! so that localized card sets keep working.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tunable rules for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Identity cards dealt to every player.
    pub tryal_cards_per_player: usize,

    /// Fraction of players that are witches, in `(0, 1]`.
    pub witch_ratio: f64,

    /// Accusations needed to force a reveal before status modifiers.
    pub base_accusation_limit: i32,

    /// Cards each player draws during setup.
    pub opening_hand_size: usize,

    /// Cards taken by the "draw" turn action.
    pub draw_action_count: usize,

    /// How long a human turn may last before it is ended for them.
    pub turn_timeout: Duration,

    /// Artificial thinking delay before an automated player acts.
    pub ai_think_delay: Duration,

    /// Delay before an automated constable or witch makes a night decision.
    pub night_decision_delay: Duration,

    /// May witches vote to kill other witches?
    pub witches_can_target_witches: bool,

    /// May the constable protect themselves?
    pub constable_can_self_protect: bool,

    /// Card names that may not appear in an opening hand.
    pub opening_hand_restricted: Vec<String>,

    /// Player name immune to Arson and Robbery.
    pub hand_immune_name: String,

    /// Player name for whom Evidence counts as a single accusation.
    pub light_evidence_name: String,

    /// Player name whose accusation limit starts one higher.
    pub steadfast_name: String,

    /// Deal one town-hall character card to each player at setup.
    pub deal_town_hall: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tryal_cards_per_player: 5,
            witch_ratio: 1.0 / 3.0,
            base_accusation_limit: 7,
            opening_hand_size: 3,
            draw_action_count: 2,
            turn_timeout: Duration::from_secs(30),
            ai_think_delay: Duration::from_millis(1500),
            night_decision_delay: Duration::from_millis(250),
            witches_can_target_witches: false,
            constable_can_self_protect: false,
            opening_hand_restricted: vec!["Night".to_string(), "Conspiracy".to_string()],
            hand_immune_name: "Sarah Good".to_string(),
            light_evidence_name: "Cotton Mather".to_string(),
            steadfast_name: "George Burroughs".to_string(),
            deal_town_hall: true,
        }
    }
}

impl RulesConfig {
    /// Configuration with every artificial delay removed.
    ///
    /// Useful for tests and headless simulation.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().without_delays()
    }

    /// Set the witch ratio.
    #[must_use]
    pub fn with_witch_ratio(mut self, ratio: f64) -> Self {
        self.witch_ratio = ratio;
        self
    }

    /// Set the number of identity cards per player.
    #[must_use]
    pub fn with_tryal_cards_per_player(mut self, count: usize) -> Self {
        self.tryal_cards_per_player = count;
        self
    }

    /// Set the base accusation limit.
    #[must_use]
    pub fn with_base_accusation_limit(mut self, limit: i32) -> Self {
        self.base_accusation_limit = limit;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set the human turn timeout.
    #[must_use]
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Zero the automated thinking and night decision delays.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.ai_think_delay = Duration::ZERO;
        self.night_decision_delay = Duration::ZERO;
        self
    }

    /// Allow witches to vote for other witches.
    #[must_use]
    pub fn with_witches_targeting_witches(mut self, allowed: bool) -> Self {
        self.witches_can_target_witches = allowed;
        self
    }

    /// Allow the constable to protect themselves.
    #[must_use]
    pub fn with_constable_self_protect(mut self, allowed: bool) -> Self {
        self.constable_can_self_protect = allowed;
        self
    }

    /// Enable or disable town-hall dealing.
    #[must_use]
    pub fn with_town_hall(mut self, deal: bool) -> Self {
        self.deal_town_hall = deal;
        self
    }

    /// Number of witches for a table of `player_count`.
    ///
    /// Halves round to the even neighbour. Always at least one.
    #[must_use]
    pub fn witch_count(&self, player_count: usize) -> usize {
        let raw = (player_count as f64 * self.witch_ratio).round_ties_even() as usize;
        raw.max(1)
    }

    /// Is `name` barred from the opening hand?
    #[must_use]
    pub fn is_opening_restricted(&self, name: &str) -> bool {
        self.opening_hand_restricted.iter().any(|n| n == name)
    }

    /// Check the configuration against a table size.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if !(2..=255).contains(&player_count) {
            return Err(ConfigError::PlayerCount(player_count));
        }
        if !(self.witch_ratio > 0.0 && self.witch_ratio <= 1.0) {
            return Err(ConfigError::WitchRatio(self.witch_ratio));
        }
        if self.tryal_cards_per_player == 0 {
            return Err(ConfigError::NoTryalCards);
        }
        // One constable plus the witches must fit in the identity deck.
        let needed = self.witch_count(player_count) + 1;
        let available = player_count * self.tryal_cards_per_player;
        if needed > available {
            return Err(ConfigError::TryalDeckTooSmall { needed, available });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.tryal_cards_per_player, 5);
        assert_eq!(config.base_accusation_limit, 7);
        assert_eq!(config.turn_timeout, Duration::from_secs(30));
        assert!(config.is_opening_restricted("Night"));
        assert!(config.is_opening_restricted("Conspiracy"));
        assert!(!config.is_opening_restricted("Accusation"));
    }

    #[test]
    fn test_witch_count() {
        let config = RulesConfig::default();
        assert_eq!(config.witch_count(3), 1);
        assert_eq!(config.witch_count(5), 2);
        assert_eq!(config.witch_count(9), 3);

        let sparse = RulesConfig::default().with_witch_ratio(0.2);
        assert_eq!(sparse.witch_count(5), 1);
        assert_eq!(sparse.witch_count(2), 1);
    }

    #[test]
    fn test_witch_count_halves_round_to_even() {
        let half = RulesConfig::default().with_witch_ratio(0.5);
        assert_eq!(half.witch_count(5), 2);
        assert_eq!(half.witch_count(7), 4);
        assert_eq!(half.witch_count(3), 2);
        assert_eq!(half.witch_count(1), 1);
    }

    #[test]
    fn test_validate() {
        let config = RulesConfig::default();
        assert!(config.validate(5).is_ok());
        assert_eq!(config.validate(1), Err(ConfigError::PlayerCount(1)));

        let bad_ratio = RulesConfig::default().with_witch_ratio(0.0);
        assert!(matches!(bad_ratio.validate(5), Err(ConfigError::WitchRatio(_))));

        let no_cards = RulesConfig::default().with_tryal_cards_per_player(0);
        assert_eq!(no_cards.validate(5), Err(ConfigError::NoTryalCards));

        let tight = RulesConfig::default()
            .with_tryal_cards_per_player(1)
            .with_witch_ratio(1.0);
        assert!(matches!(
            tight.validate(3),
            Err(ConfigError::TryalDeckTooSmall { needed: 4, available: 3 })
        ));
    }

    #[test]
    fn test_without_delays() {
        let config = RulesConfig::instant();
        assert_eq!(config.ai_think_delay, Duration::ZERO);
        assert_eq!(config.night_decision_delay, Duration::ZERO);
        assert_eq!(config.turn_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: RulesConfig =
            serde_json::from_str(r#"{"witch_ratio": 0.25, "deal_town_hall": false}"#).unwrap();
        assert_eq!(config.witch_ratio, 0.25);
        assert!(!config.deal_town_hall);
        assert_eq!(config.base_accusation_limit, 7);
        assert_eq!(config.hand_immune_name, "Sarah Good");
    }
}
