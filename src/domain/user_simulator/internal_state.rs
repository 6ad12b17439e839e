//! Working memory of the simulated user.

use serde::Serialize;

use crate::domain::dialogue::{DialogueAct, Intent, SlotMap};
use crate::domain::foundation::sentinels::UNKNOWN_SLOT_VALUE;

/// What the user is about to say and what it still has to say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInternalState {
    /// Intent of the next user act.
    pub intent: Intent,
    /// Slots the next user act informs.
    pub inform_slots: SlotMap,
    /// Slots the user is waiting on.
    pub request_slots: SlotMap,
    /// Every value stated so far by either side, as the user remembers it.
    pub history_slots: SlotMap,
    /// Goal slots not yet brought up, in goal order.
    pub rest_slots: Vec<String>,
}

impl Default for UserInternalState {
    fn default() -> Self {
        Self {
            intent: Intent::Request,
            inform_slots: SlotMap::new(),
            request_slots: SlotMap::new(),
            history_slots: SlotMap::new(),
            rest_slots: Vec::new(),
        }
    }
}

impl UserInternalState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_rest(&self, slot: &str) -> bool {
        self.rest_slots.iter().any(|rest| rest == slot)
    }

    /// Removes a slot from the rest list, returning true if it was there.
    pub fn remove_rest(&mut self, slot: &str) -> bool {
        match self.rest_slots.iter().position(|rest| rest == slot) {
            Some(position) => {
                self.rest_slots.remove(position);
                true
            }
            None => false,
        }
    }

    /// Rest slots other than `excluded`.
    pub fn rest_without(&self, excluded: &str) -> Vec<String> {
        self.rest_slots
            .iter()
            .filter(|slot| slot.as_str() != excluded)
            .cloned()
            .collect()
    }

    /// Pending request slots other than `excluded`.
    pub fn requests_without(&self, excluded: &str) -> Vec<String> {
        self.request_slots
            .keys()
            .filter(|slot| slot.as_str() != excluded)
            .cloned()
            .collect()
    }

    pub fn add_request(&mut self, slot: &str) {
        self.request_slots
            .insert(slot.to_string(), UNKNOWN_SLOT_VALUE.to_string());
    }

    pub fn add_inform(&mut self, slot: &str, value: &str) {
        self.inform_slots.insert(slot.to_string(), value.to_string());
    }

    /// Moves the slots informed last turn into history.
    pub fn archive_informs(&mut self) {
        let informed = std::mem::take(&mut self.inform_slots);
        self.history_slots.extend(informed);
    }

    /// The act the user emits from this state.
    pub fn to_act(&self) -> DialogueAct {
        DialogueAct::with_slots(
            self.intent,
            self.inform_slots.clone(),
            self.request_slots.clone(),
        )
    }
}
