//! Episode module - lifecycle, rewards and transcripts of one dialogue.

mod phase;
mod reward;
mod transcript;

pub use phase::EpisodePhase;
pub use reward::RewardTable;
pub use transcript::Transcript;
