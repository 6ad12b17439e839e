//! State tracker errors.

use thiserror::Error;

use super::StateTrackerKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("{0} state tracker is not supported")]
    Unsupported(StateTrackerKind),
}
