//! User simulator module - the goal-driven counterpart of the agent.
//!
//! Only the rule-based user is implemented. Model-based users and a live
//! human user are recognised kinds that the factory rejects.

mod errors;
mod internal_state;
mod responses;
mod rule_based;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::UserGoal;

pub use errors::SimulatorError;
pub use internal_state::UserInternalState;
pub use rule_based::{RuleBasedUserSimulator, UserResponse, UserSimulatorConfig};

/// Available user implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSimulatorKind {
    #[default]
    RuleBased,
    ModelBased,
    Real,
}

impl fmt::Display for UserSimulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleBased => f.write_str("rule-based"),
            Self::ModelBased => f.write_str("model-based"),
            Self::Real => f.write_str("real"),
        }
    }
}

impl UserSimulatorKind {
    /// Builds a user of this kind.
    ///
    /// # Errors
    ///
    /// `SimulatorError::Unsupported` for kinds without an implementation, and
    /// any error from the simulator constructor.
    pub fn build(
        self,
        config: UserSimulatorConfig,
        goals: Arc<[UserGoal]>,
        seed: Option<u64>,
    ) -> Result<RuleBasedUserSimulator, SimulatorError> {
        match self {
            Self::RuleBased => RuleBasedUserSimulator::new(config, goals, seed),
            Self::ModelBased | Self::Real => Err(SimulatorError::Unsupported(self)),
        }
    }
}
