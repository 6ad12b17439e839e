//! The fixed, ordered set of acts the agent may take.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::dialogue::{DialogueAct, Intent};
use crate::domain::foundation::sentinels::PLACEHOLDER_SLOT_VALUE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("agent act {0} is not in the action catalog")]
    ActionNotFound(String),

    #[error("action index {index} out of range for catalog of {len} acts")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered list of agent act templates; a policy picks acts by index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionCatalog {
    actions: Vec<DialogueAct>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<DialogueAct>) -> Self {
        Self { actions }
    }

    /// Builds the standard catalog: confirm question, confirm answer, thanks
    /// and deny, then one inform template per informable slot, then one
    /// request template per requestable slot.
    pub fn from_slot_lists<S: AsRef<str>>(inform_slots: &[S], request_slots: &[S]) -> Self {
        let mut actions = vec![
            DialogueAct::new(Intent::ConfirmQuestion),
            DialogueAct::new(Intent::ConfirmAnswer),
            DialogueAct::new(Intent::Thanks),
            DialogueAct::new(Intent::Deny),
        ];
        actions.extend(
            inform_slots
                .iter()
                .map(|slot| DialogueAct::new(Intent::Inform).inform(slot.as_ref(), PLACEHOLDER_SLOT_VALUE)),
        );
        actions.extend(
            request_slots
                .iter()
                .map(|slot| DialogueAct::new(Intent::Request).request(slot.as_ref())),
        );
        Self { actions }
    }

    /// Returns a copy of the template at `index`.
    pub fn get(&self, index: usize) -> Result<DialogueAct, CatalogError> {
        self.actions
            .get(index)
            .cloned()
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.actions.len(),
            })
    }

    /// Finds the template with the same intent and slot names as `act`.
    pub fn index_of(&self, act: &DialogueAct) -> Result<usize, CatalogError> {
        self.actions
            .iter()
            .position(|template| template.same_template(act))
            .ok_or_else(|| CatalogError::ActionNotFound(describe(act)))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DialogueAct> {
        self.actions.iter()
    }
}

fn describe(act: &DialogueAct) -> String {
    let inform: Vec<&str> = act.inform_slots.keys().map(String::as_str).collect();
    let request: Vec<&str> = act.request_slots.keys().map(String::as_str).collect();
    format!(
        "{}(inform: [{}], request: [{}])",
        act.intent,
        inform.join(", "),
        request.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ActionCatalog {
        ActionCatalog::from_slot_lists(&["moviename", "taskcomplete"], &["date", "theater"])
    }

    #[test]
    fn layout_is_bare_acts_then_informs_then_requests() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4 + 2 + 2);
        assert_eq!(catalog.get(0).unwrap().intent, Intent::ConfirmQuestion);
        assert_eq!(catalog.get(2).unwrap().intent, Intent::Thanks);
        assert_eq!(catalog.get(4).unwrap().inform_value("moviename"), Some("PLACEHOLDER"));
        assert!(catalog.get(7).unwrap().requests("theater"));
    }

    #[test]
    fn index_of_ignores_slot_values() {
        let catalog = catalog();
        let filled = DialogueAct::new(Intent::Inform).inform("taskcomplete", "Ticket Available");
        assert_eq!(catalog.index_of(&filled), Ok(5));
        assert_eq!(catalog.index_of(&DialogueAct::new(Intent::Thanks)), Ok(2));
    }

    #[test]
    fn unknown_act_is_reported() {
        let catalog = catalog();
        let act = DialogueAct::new(Intent::Request).request("city");
        let err = catalog.index_of(&act).unwrap_err();
        assert_eq!(
            err,
            CatalogError::ActionNotFound("request(inform: [], request: [city])".to_string())
        );
    }

    #[test]
    fn get_out_of_range_fails() {
        let catalog = catalog();
        assert_eq!(
            catalog.get(99),
            Err(CatalogError::IndexOutOfRange { index: 99, len: 8 })
        );
    }

    #[test]
    fn get_returns_independent_copy() {
        let catalog = catalog();
        let mut act = catalog.get(4).unwrap();
        act.inform_slots.insert("moviename".into(), "deadpool".into());
        assert_eq!(catalog.get(4).unwrap().inform_value("moviename"), Some("PLACEHOLDER"));
    }
}
