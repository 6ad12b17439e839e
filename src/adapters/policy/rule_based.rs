//! Warm-up policy that follows a fixed booking script.
//!
//! The script asks for each configured slot in order, then announces the
//! task as complete, then thanks the user for every remaining turn. With
//! probability `epsilon` a uniformly random catalog action is taken instead.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::agent::{ActionCatalog, CatalogError};
use crate::domain::dialogue::{DialogueAct, Intent};
use crate::domain::foundation::sentinels::{PLACEHOLDER_SLOT_VALUE, TASK_COMPLETE_SLOT};
use crate::ports::Policy;

/// Scripted policy with epsilon-random exploration
#[derive(Debug, Clone)]
pub struct RuleBasedPolicy {
    script: Vec<usize>,
    position: usize,
    catalog_len: usize,
    epsilon: f64,
    rng: ChaCha8Rng,
}

impl RuleBasedPolicy {
    /// Resolve the script against the catalog.
    ///
    /// # Errors
    ///
    /// `CatalogError::ActionNotFound` if a scripted act has no template in
    /// the catalog.
    pub fn new<S: AsRef<str>>(
        catalog: &ActionCatalog,
        request_slots: &[S],
        epsilon: f64,
        seed: Option<u64>,
    ) -> Result<Self, CatalogError> {
        let mut script = Vec::with_capacity(request_slots.len() + 2);
        for slot in request_slots {
            script.push(catalog.index_of(&DialogueAct::new(Intent::Request).request(slot.as_ref()))?);
        }
        script.push(
            catalog.index_of(&DialogueAct::new(Intent::Inform).inform(TASK_COMPLETE_SLOT, PLACEHOLDER_SLOT_VALUE))?,
        );
        script.push(catalog.index_of(&DialogueAct::new(Intent::Thanks))?);

        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            script,
            position: 0,
            catalog_len: catalog.len(),
            epsilon,
            rng,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Catalog indices of the scripted actions, in order.
    pub fn script(&self) -> &[usize] {
        &self.script
    }

    fn next_scripted(&mut self) -> usize {
        let last = self.script.len() - 1;
        let index = self.script[self.position.min(last)];
        self.position += 1;
        index
    }
}

impl Policy for RuleBasedPolicy {
    fn select_action(&mut self, _state: &[f32]) -> usize {
        if self.rng.gen::<f64>() < self.epsilon {
            let index = self.rng.gen_range(0..self.catalog_len);
            tracing::trace!(index, "Exploring with random action");
            index
        } else {
            self.next_scripted()
        }
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}
