//! Dataset Adapters
//!
//! Implementations of the DatasetSource port.
//!
//! ## Available Adapters
//!
//! - **FileDatasetSource** - Reads text vocabularies and JSON/YAML tables from disk
//! - **InMemoryDatasetSource** - Serves datasets built in code (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::dataset::{FileDatasetSource, InMemoryDatasetSource};
//!
//! // Production: files named by the dataset configuration
//! let bundle = FileDatasetSource::new(config.dataset.clone()).load_bundle()?;
//!
//! // Testing: in-memory dataset
//! let bundle = InMemoryDatasetSource::new()
//!     .with_slots(["moviename", "ticket"])
//!     .with_goal(goal)
//!     .load_bundle()?;
//! ```

mod file_source;
mod in_memory_source;

pub use file_source::{load_goal_pool, load_knowledge_base, load_vocabulary, FileDatasetSource};
pub use in_memory_source::InMemoryDatasetSource;
