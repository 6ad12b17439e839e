//! Dataset location configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Paths to the four simulation artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Line-delimited act names
    #[serde(default = "default_act_vocabulary")]
    pub act_vocabulary: PathBuf,

    /// Line-delimited slot names
    #[serde(default = "default_slot_vocabulary")]
    pub slot_vocabulary: PathBuf,

    /// Entity table, JSON or YAML
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: PathBuf,

    /// Goal list, JSON or YAML
    #[serde(default = "default_goals")]
    pub goals: PathBuf,
}

impl DatasetConfig {
    /// Resolve every path against a data directory
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            act_vocabulary: dir.join(defaults.act_vocabulary),
            slot_vocabulary: dir.join(defaults.slot_vocabulary),
            knowledge_base: dir.join(defaults.knowledge_base),
            goals: dir.join(defaults.goals),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (&self.act_vocabulary, "dataset.act_vocabulary"),
            (&self.slot_vocabulary, "dataset.slot_vocabulary"),
            (&self.knowledge_base, "dataset.knowledge_base"),
            (&self.goals, "dataset.goals"),
        ];
        for (path, name) in required {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::MissingRequired(name));
            }
        }
        Ok(())
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            act_vocabulary: default_act_vocabulary(),
            slot_vocabulary: default_slot_vocabulary(),
            knowledge_base: default_knowledge_base(),
            goals: default_goals(),
        }
    }
}

fn default_act_vocabulary() -> PathBuf {
    PathBuf::from("data/dia_acts.txt")
}

fn default_slot_vocabulary() -> PathBuf {
    PathBuf::from("data/slot_set.txt")
}

fn default_knowledge_base() -> PathBuf {
    PathBuf::from("data/movie_kb.json")
}

fn default_goals() -> PathBuf {
    PathBuf::from("data/user_goals.json")
}
