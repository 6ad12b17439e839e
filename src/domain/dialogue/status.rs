//! Dialogue outcome as seen by the user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Outcome of an episode.
///
/// ```text
/// Ongoing ──► Success
///    │
///    └──────► Failed
/// ```
///
/// Both outcomes are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStatus {
    #[default]
    Ongoing,
    Success,
    Failed,
}

impl DialogueStatus {
    /// Returns true once an outcome has been decided.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

impl StateMachine for DialogueStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueStatus::*;
        matches!((self, target), (Ongoing, Success) | (Ongoing, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueStatus::*;
        match self {
            Ongoing => vec![Success, Failed],
            Success | Failed => vec![],
        }
    }
}

/// Result of the user checking the agent's final proposal against its
/// constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintCheck {
    Success,
    #[default]
    Failure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_ongoing() {
        assert_eq!(DialogueStatus::default(), DialogueStatus::Ongoing);
        assert!(!DialogueStatus::Ongoing.is_decided());
    }

    #[test]
    fn ongoing_can_end_either_way() {
        assert!(DialogueStatus::Ongoing.can_transition_to(&DialogueStatus::Success));
        assert!(DialogueStatus::Ongoing.can_transition_to(&DialogueStatus::Failed));
    }

    #[test]
    fn outcomes_are_terminal() {
        assert!(DialogueStatus::Success.is_terminal());
        assert!(DialogueStatus::Failed.is_terminal());
        assert!(DialogueStatus::Success
            .transition_to(DialogueStatus::Failed)
            .is_err());
    }

    #[test]
    fn constraint_check_defaults_to_failure() {
        assert_eq!(ConstraintCheck::default(), ConstraintCheck::Failure);
    }

    #[test]
    fn serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&DialogueStatus::Failed).unwrap(), "\"failed\"");
    }
}
