//! Dialogue acts exchanged between the user and the agent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::sentinels::UNKNOWN_SLOT_VALUE;

use super::Intent;

/// Slot name to slot value map.
///
/// Ordered so that "the first slot" of an act is well defined.
pub type SlotMap = BTreeMap<String, String>;

/// One speaker turn: an intent plus the slots it informs and requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueAct {
    pub intent: Intent,
    #[serde(default)]
    pub inform_slots: SlotMap,
    #[serde(default)]
    pub request_slots: SlotMap,
    /// Natural-language rendering, filled by the language units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DialogueAct {
    /// Creates an act with no slots.
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            inform_slots: SlotMap::new(),
            request_slots: SlotMap::new(),
            text: None,
        }
    }

    /// Creates an act from explicit slot maps.
    pub fn with_slots(intent: Intent, inform_slots: SlotMap, request_slots: SlotMap) -> Self {
        Self {
            intent,
            inform_slots,
            request_slots,
            text: None,
        }
    }

    /// Adds an inform slot.
    pub fn inform(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.inform_slots.insert(slot.into(), value.into());
        self
    }

    /// Adds a request slot with the unknown-value placeholder.
    pub fn request(mut self, slot: impl Into<String>) -> Self {
        self.request_slots
            .insert(slot.into(), UNKNOWN_SLOT_VALUE.to_string());
        self
    }

    /// Attaches a natural-language rendering.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns the informed value for a slot.
    pub fn inform_value(&self, slot: &str) -> Option<&str> {
        self.inform_slots.get(slot).map(String::as_str)
    }

    /// Returns true if the act informs the slot.
    pub fn informs(&self, slot: &str) -> bool {
        self.inform_slots.contains_key(slot)
    }

    /// Returns true if the act requests the slot.
    pub fn requests(&self, slot: &str) -> bool {
        self.request_slots.contains_key(slot)
    }

    /// The identity of the act as a catalog template: intent plus slot names,
    /// ignoring slot values and text.
    pub fn same_template(&self, other: &DialogueAct) -> bool {
        self.intent == other.intent
            && self.inform_slots.keys().eq(other.inform_slots.keys())
            && self.request_slots.keys().eq(other.request_slots.keys())
    }
}
