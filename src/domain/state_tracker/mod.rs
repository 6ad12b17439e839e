//! State tracker module - turn history, slot ledger and state encoding.
//!
//! The tracker is fed every user and agent act of an episode and turns the
//! dialogue so far into the fixed-length vector the policy consumes.

mod encoder;
mod errors;
mod history;
mod slot_record;
mod tracker;

pub use encoder::{EncoderInput, StateEncoder};
pub use errors::TrackerError;
pub use history::HistoryEntry;
pub use slot_record::SlotRecord;
pub use tracker::{RuleBasedStateTracker, StateTrackerKind, TURN_ENCODING_HEADROOM};
