//! Experience replay pool.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One transition observed by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: Vec<f32>,
    pub action: usize,
    pub reward: f64,
    pub next_state: Vec<f32>,
    pub done: bool,
}

/// Unbounded pool of experiences with a separate warm-up cap.
#[derive(Debug, Clone, Default)]
pub struct ExperienceMemory {
    pool: Vec<Experience>,
    warmup_size: usize,
}

impl ExperienceMemory {
    pub fn new(warmup_size: usize) -> Self {
        Self {
            pool: Vec::new(),
            warmup_size,
        }
    }

    /// Appends during warm-up, only while the pool is below the warm-up size.
    /// Returns whether the experience was kept.
    pub fn append_warmup(&mut self, experience: Experience) -> bool {
        if self.pool.len() < self.warmup_size {
            self.pool.push(experience);
            true
        } else {
            false
        }
    }

    pub fn append(&mut self, experience: Experience) {
        self.pool.push(experience);
    }

    /// Draws `batch_size` experiences uniformly, with replacement.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<&Experience> {
        if self.pool.is_empty() {
            return Vec::new();
        }
        (0..batch_size)
            .map(|_| &self.pool[rng.gen_range(0..self.pool.len())])
            .collect()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn warmup_size(&self) -> usize {
        self.warmup_size
    }

    pub fn experiences(&self) -> &[Experience] {
        &self.pool
    }
}
