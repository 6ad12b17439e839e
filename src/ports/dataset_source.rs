//! Dataset Source Port - Interface for loading simulation data.
//!
//! A simulation needs four artifacts: the act vocabulary, the slot
//! vocabulary, the knowledge base and the pool of user goals. This port
//! defines how they are obtained, supporting both file-backed and in-memory
//! sources.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::dialogue::UserGoal;
use crate::domain::foundation::{ValidationError, Vocabulary};
use crate::domain::knowledge_base::KnowledgeBase;

/// Errors that can occur while loading datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported dataset format for {0}, expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid dataset: {0}")]
    Invalid(#[from] ValidationError),
}

/// Everything a simulation is built from.
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub acts: Vocabulary,
    pub slots: Vocabulary,
    pub knowledge_base: KnowledgeBase,
    pub goals: Arc<[UserGoal]>,
}

/// Port for loading simulation datasets.
///
/// # Contract
///
/// Implementations must:
/// - Preserve vocabulary order, since a name's position is its index
/// - Reject duplicate vocabulary entries
/// - Return goals in source order
pub trait DatasetSource: Send + Sync {
    fn load_act_vocabulary(&self) -> Result<Vocabulary, DatasetError>;

    fn load_slot_vocabulary(&self) -> Result<Vocabulary, DatasetError>;

    fn load_knowledge_base(&self) -> Result<KnowledgeBase, DatasetError>;

    fn load_goal_pool(&self) -> Result<Vec<UserGoal>, DatasetError>;

    /// Loads all four artifacts.
    ///
    /// # Errors
    ///
    /// The first error raised by any of the individual loaders, or
    /// `DatasetError::Invalid` if the goal pool is empty.
    fn load_bundle(&self) -> Result<DatasetBundle, DatasetError> {
        let goals = self.load_goal_pool()?;
        if goals.is_empty() {
            return Err(ValidationError::empty_field("goals").into());
        }
        Ok(DatasetBundle {
            acts: self.load_act_vocabulary()?,
            slots: self.load_slot_vocabulary()?,
            knowledge_base: self.load_knowledge_base()?,
            goals: goals.into(),
        })
    }
}
