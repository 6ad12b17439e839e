//! Episode lifecycle as seen by the environment.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of one environment episode.
///
/// ```text
/// Idle ──► Ongoing ──► Done
///             ▲          │
///             └──────────┘  (reset)
/// ```
///
/// `reset` may also be called while `Ongoing`, abandoning the running episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodePhase {
    #[default]
    Idle,
    Ongoing,
    Done,
}

impl EpisodePhase {
    /// Returns true if `step` may be called.
    pub fn accepts_steps(&self) -> bool {
        matches!(self, Self::Ongoing)
    }
}

impl StateMachine for EpisodePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EpisodePhase::*;
        matches!(
            (self, target),
            (Idle, Ongoing) | (Ongoing, Ongoing) | (Ongoing, Done) | (Done, Ongoing)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EpisodePhase::*;
        match self {
            Idle => vec![Ongoing],
            Ongoing => vec![Ongoing, Done],
            Done => vec![Ongoing],
        }
    }
}
