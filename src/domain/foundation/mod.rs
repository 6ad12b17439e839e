//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, reserved slot values and error types
//! that form the vocabulary of the dialogue simulator.

mod errors;
mod ids;
pub mod sentinels;
mod state_machine;
mod timestamp;
mod vocabulary;

pub use errors::ValidationError;
pub use ids::{EntityId, EpisodeId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use vocabulary::Vocabulary;
