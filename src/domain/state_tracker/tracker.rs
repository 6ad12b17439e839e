//! Rule-based dialogue state tracker.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{DialogueAct, Speaker};
use crate::domain::foundation::Vocabulary;
use crate::domain::knowledge_base::KbQueryEngine;

use super::{EncoderInput, HistoryEntry, SlotRecord, StateEncoder, TrackerError};

/// Extra one-hot turn cells beyond the configured turn budget, so the final
/// agent turn of an exhausted episode still encodes.
pub const TURN_ENCODING_HEADROOM: usize = 4;

/// Available state tracker implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTrackerKind {
    #[default]
    RuleBased,
    ModelBased,
}

impl fmt::Display for StateTrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleBased => f.write_str("rule-based"),
            Self::ModelBased => f.write_str("model-based"),
        }
    }
}

impl StateTrackerKind {
    /// Builds a tracker of this kind.
    ///
    /// # Errors
    ///
    /// `TrackerError::Unsupported` for kinds without an implementation.
    pub fn build(
        self,
        acts: Vocabulary,
        slots: Vocabulary,
        max_turns: usize,
        engine: Arc<KbQueryEngine>,
    ) -> Result<RuleBasedStateTracker, TrackerError> {
        match self {
            Self::RuleBased => Ok(RuleBasedStateTracker::new(acts, slots, max_turns, engine)),
            Self::ModelBased => Err(TrackerError::Unsupported(self)),
        }
    }
}

/// Tracks the dialogue turn by turn and encodes it for the policy.
#[derive(Debug)]
pub struct RuleBasedStateTracker {
    engine: Arc<KbQueryEngine>,
    encoder: StateEncoder,
    history: Vec<HistoryEntry>,
    slot_record: SlotRecord,
    turn_count: usize,
}

impl RuleBasedStateTracker {
    /// Creates a tracker for episodes of at most `max_turns` turns.
    pub fn new(acts: Vocabulary, slots: Vocabulary, max_turns: usize, engine: Arc<KbQueryEngine>) -> Self {
        Self {
            engine,
            encoder: StateEncoder::new(acts, slots, max_turns + TURN_ENCODING_HEADROOM),
            history: Vec::new(),
            slot_record: SlotRecord::new(),
            turn_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.slot_record.clear();
        self.turn_count = 0;
    }

    /// Records a user act.
    pub fn record_user_action(&mut self, act: &DialogueAct) {
        for (slot, value) in &act.inform_slots {
            self.slot_record.record_inform(slot, value);
        }
        for slot in act.request_slots.keys() {
            self.slot_record.record_request(slot);
        }
        self.append(Speaker::User, act);
    }

    /// Records an agent act after resolving its inform slots against the
    /// knowledge base, and returns the resolved act.
    pub fn record_agent_action(&mut self, act: &DialogueAct) -> DialogueAct {
        let filled_slots = self
            .engine
            .fill_inform_slots(&act.inform_slots, self.slot_record.inform_slots());

        for (slot, value) in &filled_slots {
            self.slot_record.record_proposal(slot, value);
        }
        for slot in act.request_slots.keys() {
            self.slot_record.record_agent_request(slot);
        }

        let filled = DialogueAct {
            inform_slots: filled_slots,
            ..act.clone()
        };
        self.append(Speaker::Agent, &filled);
        filled
    }

    /// Encodes the current dialogue state.
    pub fn produce_state_vector(&self) -> Vec<f32> {
        let kb_counts = self.engine.counts_per_slot(self.slot_record.inform_slots());
        self.encoder.encode(EncoderInput {
            last_user: self.last_user_entry(),
            last_agent: self.last_agent_entry(),
            all_inform_slots: self.slot_record.inform_slots(),
            turn: self.turn_count,
            kb_counts: &kb_counts,
        })
    }

    pub fn state_dimension(&self) -> usize {
        self.encoder.dimension()
    }

    /// Number of turns the one-hot turn block can represent.
    pub fn max_turns(&self) -> usize {
        self.encoder.max_turns()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn slot_record(&self) -> &SlotRecord {
        &self.slot_record
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn engine(&self) -> &Arc<KbQueryEngine> {
        &self.engine
    }

    pub fn last_user_entry(&self) -> Option<&HistoryEntry> {
        self.last_entry_by(Speaker::User)
    }

    pub fn last_agent_entry(&self) -> Option<&HistoryEntry> {
        self.last_entry_by(Speaker::Agent)
    }

    fn last_entry_by(&self, speaker: Speaker) -> Option<&HistoryEntry> {
        self.history.iter().rev().find(|entry| entry.speaker == speaker)
    }

    fn append(&mut self, speaker: Speaker, act: &DialogueAct) {
        tracing::debug!(
            turn = self.turn_count,
            speaker = %speaker,
            intent = %act.intent,
            "recording dialogue act"
        );
        self.history
            .push(HistoryEntry::from_act(self.turn_count, speaker, act));
        self.turn_count += 1;
    }
}
