//! Running ledger of which slots are filled and which are still wanted.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::SlotMap;
use crate::domain::foundation::sentinels::UNKNOWN_SLOT_VALUE;

/// Slots informed, requested and proposed so far in the episode.
///
/// A slot is never informed and requested at the same time: informing a slot
/// drops any pending request for it, and requesting an already informed slot
/// is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    inform_slots: SlotMap,
    request_slots: SlotMap,
    proposed_slots: SlotMap,
    agent_request_slots: SlotMap,
}

impl SlotRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slot value stated so far by either speaker.
    pub fn inform_slots(&self) -> &SlotMap {
        &self.inform_slots
    }

    /// Slots the user asked for that have no value yet.
    pub fn request_slots(&self) -> &SlotMap {
        &self.request_slots
    }

    /// Values the agent proposed after knowledge base filling.
    pub fn proposed_slots(&self) -> &SlotMap {
        &self.proposed_slots
    }

    /// Slots the agent asked the user about.
    pub fn agent_request_slots(&self) -> &SlotMap {
        &self.agent_request_slots
    }

    /// Records a slot value, resolving any pending request for it.
    pub fn record_inform(&mut self, slot: &str, value: &str) {
        self.inform_slots.insert(slot.to_string(), value.to_string());
        self.request_slots.remove(slot);
    }

    /// Records a value proposed by the agent.
    pub fn record_proposal(&mut self, slot: &str, value: &str) {
        self.proposed_slots.insert(slot.to_string(), value.to_string());
        self.record_inform(slot, value);
    }

    /// Records a user request unless the slot already has a value.
    pub fn record_request(&mut self, slot: &str) {
        if self.inform_slots.contains_key(slot) {
            return;
        }
        self.request_slots
            .entry(slot.to_string())
            .or_insert_with(|| UNKNOWN_SLOT_VALUE.to_string());
    }

    /// Records a slot the agent asked about.
    pub fn record_agent_request(&mut self, slot: &str) {
        self.agent_request_slots
            .entry(slot.to_string())
            .or_insert_with(|| UNKNOWN_SLOT_VALUE.to_string());
    }

    /// True if no slot is both informed and requested.
    pub fn is_consistent(&self) -> bool {
        self.request_slots
            .keys()
            .all(|slot| !self.inform_slots.contains_key(slot))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
