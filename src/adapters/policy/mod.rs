//! Policy Adapters
//!
//! Implementations of the Policy port.
//!
//! ## Available Adapters
//!
//! - **RuleBasedPolicy** - Scripted booking flow with epsilon-random exploration,
//!   used to warm up replay memory

mod rule_based;

pub use rule_based::RuleBasedPolicy;
