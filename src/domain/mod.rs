//! Domain layer containing simulation logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, vocabularies, errors)
//! - `dialogue` - Acts, intents, user goals and dialogue outcomes
//! - `knowledge_base` - Entity table and the cached query engine
//! - `state_tracker` - Turn history, slot record and state encoding
//! - `user_simulator` - Rule-based simulated user
//! - `agent` - Action catalog and experience replay memory
//! - `episode` - Episode lifecycle, rewards and transcripts

pub mod agent;
pub mod dialogue;
pub mod episode;
pub mod foundation;
pub mod knowledge_base;
pub mod state_tracker;
pub mod user_simulator;
