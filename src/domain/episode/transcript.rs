//! Exportable record of a finished or running dialogue.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{DialogueStatus, UserGoal};
use crate::domain::state_tracker::HistoryEntry;

/// Ordered turns of one episode plus its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub goal: UserGoal,
    pub turns: Vec<HistoryEntry>,
    pub status: DialogueStatus,
    pub total_reward: f64,
}

impl Transcript {
    pub fn new(goal: UserGoal, turns: Vec<HistoryEntry>, status: DialogueStatus, total_reward: f64) -> Self {
        Self {
            goal,
            turns,
            status,
            total_reward,
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
