//! Episode environment configuration

use serde::{Deserialize, Serialize};

use crate::domain::state_tracker::StateTrackerKind;
use crate::domain::user_simulator::UserSimulatorKind;

use super::error::ValidationError;

/// Level at which user turns travel between simulator and tracker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// User acts are passed through as structured acts
    #[default]
    SemanticFrame,
    /// User acts are rendered to text and parsed back before tracking
    NaturalLanguage,
}

/// Environment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    /// Turn limit shared by the tracker and the user simulator
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    #[serde(default)]
    pub simulation_mode: SimulationMode,

    /// Seed for the user simulator's random source. Unset draws from entropy.
    pub seed: Option<u64>,

    #[serde(default)]
    pub state_tracker: StateTrackerKind,

    #[serde(default)]
    pub user: UserSimulatorKind,
}

impl EnvironmentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_turns == 0 {
            return Err(ValidationError::ZeroMaxTurns);
        }
        Ok(())
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            simulation_mode: SimulationMode::default(),
            seed: None,
            state_tracker: StateTrackerKind::default(),
            user: UserSimulatorKind::default(),
        }
    }
}

fn default_max_turns() -> usize {
    40
}
