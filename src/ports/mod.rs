//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the simulator and its collaborators. Adapters implement these ports.
//!
//! - `Policy` - Chooses agent actions from encoded dialogue states
//! - `NaturalLanguageGenerator` / `NaturalLanguageUnderstanding` - Text rendering and parsing of acts
//! - `DatasetSource` - Vocabularies, knowledge base and goal pool

mod dataset_source;
mod language;
mod policy;

pub use dataset_source::{DatasetBundle, DatasetError, DatasetSource};
pub use language::{LanguageError, NaturalLanguageGenerator, NaturalLanguageUnderstanding};
pub use policy::Policy;
