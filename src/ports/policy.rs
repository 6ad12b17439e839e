//! Policy Port - Interface for agent action selection.
//!
//! The environment never decides what the agent says. A policy reads the
//! encoded dialogue state and answers with an index into the action catalog;
//! learning policies additionally consume the resulting transitions.

use crate::domain::agent::Experience;

/// Port for choosing agent actions.
///
/// # Contract
///
/// Implementations must:
/// - Return an index valid for the catalog the environment was built with
/// - Treat `reset` as the start of a new episode
///
/// # Usage
///
/// ```rust,ignore
/// let mut state = env.reset()?;
/// policy.reset();
/// loop {
///     let action = policy.select_action(&state);
///     let step = env.step_index(action)?;
///     policy.update(&Experience { state, action, reward: step.reward, next_state: step.state.clone(), done: step.done });
///     if step.done { break; }
///     state = step.state;
/// }
/// ```
pub trait Policy: Send {
    /// Chooses the next agent action for the given state vector.
    fn select_action(&mut self, state: &[f32]) -> usize;

    /// Observes one transition. Non-learning policies ignore it.
    fn update(&mut self, _experience: &Experience) {}

    /// Clears per-episode state.
    fn reset(&mut self) {}
}
