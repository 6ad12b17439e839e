//! User goals: the hidden task a simulated user pursues.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::sentinels::UNKNOWN_SLOT_VALUE;

use super::SlotMap;

/// Inform constraints the user wants satisfied and slots the user wants
/// answered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserGoal {
    #[serde(default)]
    pub inform_slots: SlotMap,
    #[serde(default)]
    pub request_slots: SlotMap,
}

impl UserGoal {
    /// Creates a goal from its slot maps.
    pub fn new(inform_slots: SlotMap, request_slots: SlotMap) -> Self {
        Self {
            inform_slots,
            request_slots,
        }
    }

    /// Returns the goal with the ultimate slot guaranteed among its requests.
    pub fn with_ultimate_slot(mut self, ultimate_slot: &str) -> Self {
        self.request_slots
            .entry(ultimate_slot.to_string())
            .or_insert_with(|| UNKNOWN_SLOT_VALUE.to_string());
        self
    }

    /// Returns the constraint value for a slot.
    pub fn constraint(&self, slot: &str) -> Option<&str> {
        self.inform_slots.get(slot).map(String::as_str)
    }

    /// Returns true if the slot is one of the goal's inform constraints.
    pub fn is_constraint(&self, slot: &str) -> bool {
        self.inform_slots.contains_key(slot)
    }

    /// Returns true if the slot is one of the goal's request slots.
    pub fn is_request(&self, slot: &str) -> bool {
        self.request_slots.contains_key(slot)
    }
}
