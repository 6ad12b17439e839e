//! Agent action space and warm-up policy configuration

use serde::Deserialize;

use crate::domain::agent::ActionCatalog;

use super::domain::{check_unique, strings};
use super::error::ValidationError;

/// Agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Slots the agent can inform, one `inform` template each
    #[serde(default = "default_inform_slots")]
    pub inform_slots: Vec<String>,

    /// Slots the agent can request, one `request` template each
    #[serde(default = "default_request_slots")]
    pub request_slots: Vec<String>,

    /// Slots the warm-up policy asks for, in order
    #[serde(default = "default_warmup_request_slots")]
    pub warmup_request_slots: Vec<String>,

    /// Probability of the warm-up policy choosing a random action
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Number of experiences collected during warm-up
    #[serde(default = "default_warmup_size")]
    pub warmup_size: usize,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ValidationError::InvalidEpsilon(self.epsilon));
        }
        check_unique("agent.inform_slots", &self.inform_slots)?;
        check_unique("agent.request_slots", &self.request_slots)?;
        check_unique("agent.warmup_request_slots", &self.warmup_request_slots)?;
        Ok(())
    }

    /// Build the feasible action catalog from the configured slot lists
    pub fn catalog(&self) -> ActionCatalog {
        ActionCatalog::from_slot_lists(&self.inform_slots, &self.request_slots)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            inform_slots: default_inform_slots(),
            request_slots: default_request_slots(),
            warmup_request_slots: default_warmup_request_slots(),
            epsilon: default_epsilon(),
            warmup_size: default_warmup_size(),
        }
    }
}

const SHARED_SLOTS: [&str; 18] = [
    "moviename",
    "theater",
    "starttime",
    "date",
    "genre",
    "state",
    "city",
    "zip",
    "critic_rating",
    "mpaa_rating",
    "distanceconstraints",
    "video_format",
    "theater_chain",
    "price",
    "actor",
    "description",
    "other",
    "numberofkids",
];

fn default_inform_slots() -> Vec<String> {
    let mut slots = strings(&SHARED_SLOTS);
    slots.extend(strings(&["taskcomplete", "ticket"]));
    slots
}

fn default_request_slots() -> Vec<String> {
    let mut slots = strings(&SHARED_SLOTS);
    slots.insert(4, "numberofpeople".to_string());
    slots
}

fn default_warmup_request_slots() -> Vec<String> {
    strings(&["moviename", "starttime", "city", "date", "theater", "numberofpeople"])
}

fn default_epsilon() -> f64 {
    0.1
}

fn default_warmup_size() -> usize {
    1000
}
