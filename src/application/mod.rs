//! Application layer - Environments and episode runners.
//!
//! This layer orchestrates domain components and coordinates between ports.
//! `SimulationBuilder` assembles environments from configuration and data,
//! `DialogueEnvironment` plays turns, and `EpisodeRunner` drives policies
//! through whole episodes.

mod builder;
mod environment;
mod episode_runner;

pub use builder::SimulationBuilder;
pub use environment::{DialogueEnvironment, EnvironmentError, LanguageUnits, StepResult};
pub use episode_runner::{BatchSummary, EpisodeReport, EpisodeRunner, MemoryMode};
