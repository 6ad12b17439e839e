//! Logged dialogue turns.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{DialogueAct, Intent, SlotMap, Speaker};

/// One turn as recorded by the state tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: usize,
    pub speaker: Speaker,
    pub intent: Intent,
    #[serde(default)]
    pub inform_slots: SlotMap,
    #[serde(default)]
    pub request_slots: SlotMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl HistoryEntry {
    /// Snapshots an act at the given turn.
    pub fn from_act(turn: usize, speaker: Speaker, act: &DialogueAct) -> Self {
        Self {
            turn,
            speaker,
            intent: act.intent,
            inform_slots: act.inform_slots.clone(),
            request_slots: act.request_slots.clone(),
            text: act.text.clone(),
        }
    }

    /// Rebuilds the act this entry was recorded from.
    pub fn to_act(&self) -> DialogueAct {
        DialogueAct {
            intent: self.intent,
            inform_slots: self.inform_slots.clone(),
            request_slots: self.request_slots.clone(),
            text: self.text.clone(),
        }
    }
}
