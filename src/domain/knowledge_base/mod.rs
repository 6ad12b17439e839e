//! Knowledge base module - entity table and memoized constraint queries.

mod cache;
mod entity;
mod query_engine;

pub use cache::{CacheEntry, ConstraintKey, QueryCache};
pub use entity::KnowledgeBase;
pub use query_engine::{KbQueryConfig, KbQueryEngine, SlotCounts};
