//! User simulator errors.

use thiserror::Error;

use super::UserSimulatorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error("goal pool is empty")]
    EmptyGoalPool,

    #[error("episode is over, reset the simulator first")]
    EpisodeOver,

    #[error("episode has not started, reset the simulator first")]
    NotStarted,

    #[error("{0} user is not supported")]
    Unsupported(UserSimulatorKind),
}
