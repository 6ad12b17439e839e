//! Agent module - the action catalog and replay memory shared by policies.

mod catalog;
mod memory;

pub use catalog::{ActionCatalog, CatalogError};
pub use memory::{Experience, ExperienceMemory};
