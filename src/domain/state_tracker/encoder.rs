//! Fixed-length numeric encoding of the dialogue state.
//!
//! Layout, in order:
//!
//! | block | length |
//! |---|---|
//! | last user intent, one-hot | A |
//! | last user inform slots, bag | S |
//! | last user request slots, bag | S |
//! | last agent intent, one-hot | A |
//! | last agent inform slots, bag | S |
//! | last agent request slots, bag | S |
//! | all informed slots, bag | S |
//! | turn / 10 | 1 |
//! | turn, one-hot | T |
//! | KB match indicators | S + 1 |
//! | KB match counts / 100 | S + 1 |
//!
//! where A is the act vocabulary size, S the slot vocabulary size and T the
//! encodable turn count.

use crate::domain::dialogue::{Intent, SlotMap};
use crate::domain::foundation::Vocabulary;
use crate::domain::knowledge_base::SlotCounts;

use super::HistoryEntry;

/// Encodes tracker state into a vector of `dimension()` floats.
#[derive(Debug, Clone)]
pub struct StateEncoder {
    acts: Vocabulary,
    slots: Vocabulary,
    max_turns: usize,
}

/// Everything the encoder reads from the tracker.
#[derive(Debug, Clone, Copy)]
pub struct EncoderInput<'a> {
    pub last_user: Option<&'a HistoryEntry>,
    pub last_agent: Option<&'a HistoryEntry>,
    pub all_inform_slots: &'a SlotMap,
    pub turn: usize,
    pub kb_counts: &'a SlotCounts,
}

impl StateEncoder {
    pub fn new(acts: Vocabulary, slots: Vocabulary, max_turns: usize) -> Self {
        Self {
            acts,
            slots,
            max_turns,
        }
    }

    pub fn acts(&self) -> &Vocabulary {
        &self.acts
    }

    pub fn slots(&self) -> &Vocabulary {
        &self.slots
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Length of every encoded vector: `2A + 7S + 3 + T`.
    pub fn dimension(&self) -> usize {
        2 * self.acts.len() + 7 * self.slots.len() + 3 + self.max_turns
    }

    pub fn encode(&self, input: EncoderInput<'_>) -> Vec<f32> {
        let mut state = Vec::with_capacity(self.dimension());

        self.push_turn_entry(&mut state, input.last_user);
        self.push_turn_entry(&mut state, input.last_agent);
        self.push_slot_bag(&mut state, input.all_inform_slots);

        state.push(input.turn as f32 / 10.0);
        state.extend(self.turn_one_hot(input.turn));

        let counts = input.kb_counts;
        state.extend(self.kb_block(counts, |count| if count > 0 { 1.0 } else { 0.0 }));
        state.extend(self.kb_block(counts, |count| count as f32 / 100.0));

        debug_assert_eq!(state.len(), self.dimension());
        state
    }

    fn push_turn_entry(&self, state: &mut Vec<f32>, entry: Option<&HistoryEntry>) {
        match entry {
            Some(entry) => {
                self.push_intent(state, entry.intent);
                self.push_slot_bag(state, &entry.inform_slots);
                self.push_slot_bag(state, &entry.request_slots);
            }
            None => {
                state.extend(std::iter::repeat(0.0).take(self.acts.len() + 2 * self.slots.len()));
            }
        }
    }

    fn push_intent(&self, state: &mut Vec<f32>, intent: Intent) {
        let mut block = vec![0.0; self.acts.len()];
        match self.acts.index_of(intent.as_str()) {
            Some(index) => block[index] = 1.0,
            None => tracing::warn!(intent = %intent, "intent missing from act vocabulary"),
        }
        state.extend(block);
    }

    fn push_slot_bag(&self, state: &mut Vec<f32>, slots: &SlotMap) {
        let mut block = vec![0.0; self.slots.len()];
        for slot in slots.keys() {
            match self.slots.index_of(slot) {
                Some(index) => block[index] = 1.0,
                None => tracing::warn!(slot = %slot, "slot missing from slot vocabulary"),
            }
        }
        state.extend(block);
    }

    fn turn_one_hot(&self, turn: usize) -> Vec<f32> {
        let mut block = vec![0.0; self.max_turns];
        match block.get_mut(turn) {
            Some(cell) => *cell = 1.0,
            None => tracing::warn!(turn, max_turns = self.max_turns, "turn beyond encodable range"),
        }
        block
    }

    /// The whole block starts at the aggregate value; each constraint slot
    /// known to the vocabulary then overwrites its own cell.
    fn kb_block(&self, counts: &SlotCounts, scale: impl Fn(usize) -> f32) -> Vec<f32> {
        let mut block = vec![scale(counts.matching_all); self.slots.len() + 1];
        for (slot, count) in &counts.per_slot {
            if let Some(index) = self.slots.index_of(slot) {
                block[index] = scale(*count);
            }
        }
        block
    }
}
