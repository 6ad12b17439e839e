//! In-Memory Dataset Adapter
//!
//! Serves datasets built in code. Useful for testing and for embedding a
//! small domain without files.

use crate::domain::dialogue::{Intent, UserGoal};
use crate::domain::foundation::Vocabulary;
use crate::domain::knowledge_base::KnowledgeBase;
use crate::ports::{DatasetError, DatasetSource};

/// In-memory dataset
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetSource {
    acts: Vec<String>,
    slots: Vec<String>,
    knowledge_base: KnowledgeBase,
    goals: Vec<UserGoal>,
}

impl InMemoryDatasetSource {
    /// Create a source whose act vocabulary is every known intent
    pub fn new() -> Self {
        Self {
            acts: Intent::ALL.iter().map(|intent| intent.as_str().to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_acts<S: Into<String>>(mut self, acts: impl IntoIterator<Item = S>) -> Self {
        self.acts = acts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_slots<S: Into<String>>(mut self, slots: impl IntoIterator<Item = S>) -> Self {
        self.slots = slots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_knowledge_base(mut self, knowledge_base: KnowledgeBase) -> Self {
        self.knowledge_base = knowledge_base;
        self
    }

    pub fn with_goal(mut self, goal: UserGoal) -> Self {
        self.goals.push(goal);
        self
    }

    pub fn with_goals(mut self, goals: impl IntoIterator<Item = UserGoal>) -> Self {
        self.goals.extend(goals);
        self
    }
}

impl DatasetSource for InMemoryDatasetSource {
    fn load_act_vocabulary(&self) -> Result<Vocabulary, DatasetError> {
        Ok(Vocabulary::from_names("act_vocabulary", self.acts.iter().cloned())?)
    }

    fn load_slot_vocabulary(&self) -> Result<Vocabulary, DatasetError> {
        Ok(Vocabulary::from_names("slot_vocabulary", self.slots.iter().cloned())?)
    }

    fn load_knowledge_base(&self) -> Result<KnowledgeBase, DatasetError> {
        Ok(self.knowledge_base.clone())
    }

    fn load_goal_pool(&self) -> Result<Vec<UserGoal>, DatasetError> {
        Ok(self.goals.clone())
    }
}
