//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the simulator to data and text:
//! - `dataset` - File-backed and in-memory dataset sources
//! - `language` - Template generation and keyword understanding of acts
//! - `policy` - Rule-based warm-up policy

pub mod dataset;
pub mod language;
pub mod policy;

pub use dataset::{FileDatasetSource, InMemoryDatasetSource};
pub use language::{KeywordNlu, TemplateNlg};
pub use policy::RuleBasedPolicy;
