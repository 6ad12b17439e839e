//! Per-turn reward lookup.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::DialogueStatus;

/// Reward signalled to the agent for each dialogue status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardTable {
    pub success: f64,
    pub failure: f64,
    pub per_turn: f64,
}

impl RewardTable {
    pub fn new(success: f64, failure: f64, per_turn: f64) -> Self {
        Self {
            success,
            failure,
            per_turn,
        }
    }

    /// Table scaled to a turn limit: success is `2 * max_turns`, failure is
    /// `-max_turns`, every other turn costs one point.
    pub fn scaled_to(max_turns: usize) -> Self {
        let turns = max_turns as f64;
        Self::new(2.0 * turns, -turns, -1.0)
    }

    pub fn reward_for(&self, status: DialogueStatus) -> f64 {
        match status {
            DialogueStatus::Failed => self.failure,
            DialogueStatus::Success => self.success,
            DialogueStatus::Ongoing => self.per_turn,
        }
    }
}
