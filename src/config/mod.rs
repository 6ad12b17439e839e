//! Simulator configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DIALOGUE_SIM` prefix and nested values use double underscores as separators.
//! Every value has a default matching the movie-booking setup, so an empty
//! environment yields a runnable configuration.
//!
//! # Example
//!
//! ```no_run
//! use dialogue_sim::config::SimulatorConfig;
//!
//! let config = SimulatorConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init();
//!
//! println!("Turn limit: {}", config.environment.max_turns);
//! ```

mod agent;
mod dataset;
mod domain;
mod environment;
mod error;
mod logging;
mod rewards;

pub use agent::AgentConfig;
pub use dataset::DatasetConfig;
pub use domain::DomainConfig;
pub use environment::{EnvironmentConfig, SimulationMode};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use rewards::RewardConfig;

use serde::Deserialize;

use crate::domain::episode::RewardTable;

/// Keys holding comma-separated slot lists
const LIST_KEYS: [&str; 6] = [
    "domain.first_mention_slots",
    "domain.special_slots",
    "domain.filter_slots",
    "agent.inform_slots",
    "agent.request_slots",
    "agent.warmup_request_slots",
];

/// Root simulator configuration
///
/// Load using [`SimulatorConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulatorConfig {
    /// Turn limit, simulation mode, seed and component kinds
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Reward table overrides
    #[serde(default)]
    pub rewards: RewardConfig,

    /// Task domain slots
    #[serde(default)]
    pub domain: DomainConfig,

    /// Agent action space and warm-up policy
    #[serde(default)]
    pub agent: AgentConfig,

    /// Dataset file locations
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulatorConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DIALOGUE_SIM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits slot lists on commas
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DIALOGUE_SIM__ENVIRONMENT__MAX_TURNS=20` -> `environment.max_turns = 20`
    /// - `DIALOGUE_SIM__DOMAIN__FILTER_SLOTS=ticket,closing` -> `domain.filter_slots = ["ticket", "closing"]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let environment = LIST_KEYS.iter().fold(
            config::Environment::default()
                .prefix("DIALOGUE_SIM")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
            |source, key| source.with_list_parse_key(key),
        );

        let config = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a zero turn limit, a blank ultimate
    /// slot, a success reward not above the failure reward, duplicate slots
    /// in a list, an exploration rate outside `[0, 1]`, or a malformed log
    /// filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.environment.validate()?;
        self.rewards.validate(self.environment.max_turns)?;
        self.domain.validate()?;
        self.agent.validate()?;
        self.dataset.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Reward table resolved against the configured turn limit
    pub fn reward_table(&self) -> RewardTable {
        self.rewards.table(self.environment.max_turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "DIALOGUE_SIM__ENVIRONMENT__MAX_TURNS",
        "DIALOGUE_SIM__ENVIRONMENT__SIMULATION_MODE",
        "DIALOGUE_SIM__ENVIRONMENT__SEED",
        "DIALOGUE_SIM__REWARDS__SUCCESS",
        "DIALOGUE_SIM__DOMAIN__FILTER_SLOTS",
        "DIALOGUE_SIM__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<SimulatorConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = SimulatorConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.environment.max_turns, 40);
        assert_eq!(config.domain.ultimate_slot, "ticket");
        assert_eq!(config.reward_table(), RewardTable::new(80.0, -40.0, -1.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_turns_rescales_default_rewards() {
        let config = load_with(&[("DIALOGUE_SIM__ENVIRONMENT__MAX_TURNS", "10")]).unwrap();

        assert_eq!(config.environment.max_turns, 10);
        assert_eq!(config.reward_table(), RewardTable::new(20.0, -10.0, -1.0));
    }

    #[test]
    fn test_simulation_mode_and_seed() {
        let config = load_with(&[
            ("DIALOGUE_SIM__ENVIRONMENT__SIMULATION_MODE", "natural_language"),
            ("DIALOGUE_SIM__ENVIRONMENT__SEED", "42"),
        ])
        .unwrap();

        assert_eq!(config.environment.simulation_mode, SimulationMode::NaturalLanguage);
        assert_eq!(config.environment.seed, Some(42));
    }

    #[test]
    fn test_slot_list_from_comma_separated_value() {
        let config = load_with(&[("DIALOGUE_SIM__DOMAIN__FILTER_SLOTS", "ticket,closing")]).unwrap();

        assert_eq!(config.domain.filter_slots, vec!["ticket", "closing"]);
    }

    #[test]
    fn test_json_logging_flag() {
        let config = load_with(&[("DIALOGUE_SIM__LOGGING__JSON", "true")]).unwrap();
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_inverted_rewards() {
        let config = load_with(&[("DIALOGUE_SIM__REWARDS__SUCCESS", "-100")]).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ValidationError::RewardOrdering { .. })
        ));
    }

    #[test]
    fn test_unparseable_max_turns_fails_to_load() {
        let result = load_with(&[("DIALOGUE_SIM__ENVIRONMENT__MAX_TURNS", "many")]);
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
