//! Dialogue module - acts, intents, goals and outcomes.
//!
//! These types are shared by the state tracker, the user simulator and the
//! environment.

mod act;
mod goal;
mod intent;
mod status;

pub use act::{DialogueAct, SlotMap};
pub use goal::UserGoal;
pub use intent::{Intent, Speaker};
pub use status::{ConstraintCheck, DialogueStatus};
