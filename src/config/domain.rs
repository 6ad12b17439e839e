//! Task domain configuration

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::domain::knowledge_base::KbQueryConfig;
use crate::domain::user_simulator::UserSimulatorConfig;

use super::error::ValidationError;

/// Task domain configuration (movie ticket booking by default)
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Slot every goal ultimately requests
    #[serde(default = "default_ultimate_slot")]
    pub ultimate_slot: String,

    /// Constraints the user states in the opening act when the goal has them
    #[serde(default = "default_first_mention_slots")]
    pub first_mention_slots: Vec<String>,

    /// Slots filled with the aggregate count instead of a KB value
    #[serde(default = "default_special_slots")]
    pub special_slots: Vec<String>,

    /// Slots never used as query constraints
    #[serde(default = "default_filter_slots")]
    pub filter_slots: Vec<String>,
}

impl DomainConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ultimate_slot.trim().is_empty() {
            return Err(ValidationError::MissingRequired("domain.ultimate_slot"));
        }
        check_unique("domain.first_mention_slots", &self.first_mention_slots)?;
        check_unique("domain.special_slots", &self.special_slots)?;
        check_unique("domain.filter_slots", &self.filter_slots)?;
        Ok(())
    }

    pub fn kb_query_config(&self) -> KbQueryConfig {
        KbQueryConfig {
            ultimate_slot: self.ultimate_slot.clone(),
            special_slots: self.special_slots.iter().cloned().collect::<BTreeSet<_>>(),
            filter_slots: self.filter_slots.iter().cloned().collect::<BTreeSet<_>>(),
        }
    }

    pub fn user_simulator_config(&self, max_turns: usize) -> UserSimulatorConfig {
        UserSimulatorConfig {
            ultimate_slot: self.ultimate_slot.clone(),
            first_mention_slots: self.first_mention_slots.clone(),
            max_turns,
        }
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            ultimate_slot: default_ultimate_slot(),
            first_mention_slots: default_first_mention_slots(),
            special_slots: default_special_slots(),
            filter_slots: default_filter_slots(),
        }
    }
}

pub(super) fn check_unique(list: &'static str, slots: &[String]) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for slot in slots {
        if !seen.insert(slot.as_str()) {
            return Err(ValidationError::DuplicateSlot {
                list,
                slot: slot.clone(),
            });
        }
    }
    Ok(())
}

pub(super) fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn default_ultimate_slot() -> String {
    "ticket".to_string()
}

fn default_first_mention_slots() -> Vec<String> {
    strings(&["moviename"])
}

fn default_special_slots() -> Vec<String> {
    strings(&["numberofpeople"])
}

fn default_filter_slots() -> Vec<String> {
    strings(&["ticket", "numberofpeople", "taskcomplete", "closing"])
}
