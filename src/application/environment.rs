//! DialogueEnvironment - runs one dialogue turn by turn for an agent.
//!
//! The environment owns a state tracker and a simulated user. Each agent act
//! is rendered to text, recorded by the tracker (which resolves its inform
//! slots against the knowledge base) and shown to the user; the user's reply
//! is rendered, optionally re-parsed from text, and recorded in turn. The
//! agent receives the encoded state, the reward for the turn and whether the
//! dialogue ended.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::SimulationMode;
use crate::domain::agent::{ActionCatalog, CatalogError};
use crate::domain::dialogue::{DialogueAct, DialogueStatus, Speaker, UserGoal};
use crate::domain::episode::{EpisodePhase, RewardTable, Transcript};
use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::state_tracker::{HistoryEntry, RuleBasedStateTracker, TrackerError};
use crate::domain::user_simulator::{RuleBasedUserSimulator, SimulatorError};
use crate::ports::{LanguageError, NaturalLanguageGenerator, NaturalLanguageUnderstanding};

/// Errors raised while driving an episode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvironmentError {
    #[error("step called before reset")]
    NotStarted,

    #[error("step called after the episode ended")]
    EpisodeOver,

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Language(#[from] LanguageError),

    #[error("invalid episode phase change: {0}")]
    Lifecycle(#[from] ValidationError),
}

/// Outcome of one agent turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// Encoded dialogue state after the user's reply
    pub state: Vec<f32>,
    pub reward: f64,
    pub done: bool,
    pub status: DialogueStatus,
}

/// The text units used to render and re-read acts.
#[derive(Clone)]
pub struct LanguageUnits {
    pub nlg: Arc<dyn NaturalLanguageGenerator>,
    pub nlu: Arc<dyn NaturalLanguageUnderstanding>,
}

impl std::fmt::Debug for LanguageUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageUnits").finish_non_exhaustive()
    }
}

/// Turn orchestrator for a single dialogue at a time.
#[derive(Debug)]
pub struct DialogueEnvironment {
    tracker: RuleBasedStateTracker,
    user: RuleBasedUserSimulator,
    catalog: Arc<ActionCatalog>,
    language: LanguageUnits,
    rewards: RewardTable,
    mode: SimulationMode,
    phase: EpisodePhase,
    turn_count: usize,
    status: DialogueStatus,
    total_reward: f64,
    final_reply: Option<HistoryEntry>,
}

impl DialogueEnvironment {
    pub fn new(
        tracker: RuleBasedStateTracker,
        user: RuleBasedUserSimulator,
        catalog: Arc<ActionCatalog>,
        language: LanguageUnits,
        rewards: RewardTable,
        mode: SimulationMode,
    ) -> Self {
        Self {
            tracker,
            user,
            catalog,
            language,
            rewards,
            mode,
            phase: EpisodePhase::Idle,
            turn_count: 0,
            status: DialogueStatus::Ongoing,
            total_reward: 0.0,
            final_reply: None,
        }
    }

    /// Starts a new episode and returns the initial state.
    ///
    /// Any running episode is abandoned.
    ///
    /// # Errors
    ///
    /// `EnvironmentError::Language` if, in natural-language mode, the user's
    /// opening act cannot be rendered or understood. The environment is then
    /// left unstarted.
    pub fn reset(&mut self) -> Result<Vec<f32>, EnvironmentError> {
        let started = self.phase.transition_to(EpisodePhase::Ongoing)?;
        self.tracker.reset();
        let opening = self.user.reset();

        self.phase = EpisodePhase::Idle;
        self.turn_count = 1;
        self.status = DialogueStatus::Ongoing;
        self.total_reward = 0.0;
        self.final_reply = None;

        let opening = self.process_user_action(opening)?;
        self.tracker.record_user_action(&opening);
        self.phase = started;

        tracing::debug!(intent = %opening.intent, "Episode started");
        Ok(self.tracker.produce_state_vector())
    }

    /// Plays one agent act and the user's reply.
    ///
    /// # Errors
    ///
    /// `NotStarted` before the first reset, `EpisodeOver` once the user has
    /// ended the dialogue, and `Language` when, in natural-language mode, a
    /// user reply cannot be rendered or understood.
    pub fn step(&mut self, agent_act: &DialogueAct) -> Result<StepResult, EnvironmentError> {
        match self.phase {
            EpisodePhase::Idle => return Err(EnvironmentError::NotStarted),
            EpisodePhase::Done => return Err(EnvironmentError::EpisodeOver),
            EpisodePhase::Ongoing => {}
        }

        self.turn_count += 1;
        let agent_act = self.process_agent_action(agent_act);
        let filled = self.tracker.record_agent_action(&agent_act);
        tracing::debug!(turn = self.turn_count, intent = %filled.intent, slots = ?filled.inform_slots, "Agent act");

        let response = self.user.step(&filled)?;
        let reward = self.rewards.reward_for(response.status);
        self.total_reward += reward;
        self.status = response.status;

        if response.done {
            self.phase = self.phase.transition_to(EpisodePhase::Done)?;
            let reply = self.describe(response.action, Speaker::User);
            self.final_reply = Some(HistoryEntry::from_act(
                self.tracker.turn_count(),
                Speaker::User,
                &reply,
            ));
            tracing::info!(
                status = ?self.status,
                turns = self.turn_count,
                total_reward = self.total_reward,
                "Episode finished"
            );
        } else {
            self.turn_count += 1;
            let reply = self.process_user_action(response.action)?;
            tracing::debug!(turn = self.turn_count, intent = %reply.intent, "User act");
            self.tracker.record_user_action(&reply);
        }

        Ok(StepResult {
            state: self.tracker.produce_state_vector(),
            reward,
            done: response.done,
            status: response.status,
        })
    }

    /// Resolves a catalog index to its act template and plays it.
    ///
    /// # Errors
    ///
    /// `EnvironmentError::Catalog` for an index outside the catalog, plus
    /// everything [`step`](Self::step) returns.
    pub fn step_index(&mut self, index: usize) -> Result<StepResult, EnvironmentError> {
        let act = self.catalog.get(index)?;
        self.step(&act)
    }

    pub fn state_dimension(&self) -> usize {
        self.tracker.state_dimension()
    }

    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn status(&self) -> DialogueStatus {
        self.status
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn catalog(&self) -> &Arc<ActionCatalog> {
        &self.catalog
    }

    pub fn goal(&self) -> &UserGoal {
        self.user.goal()
    }

    pub fn tracker(&self) -> &RuleBasedStateTracker {
        &self.tracker
    }

    pub fn user(&self) -> &RuleBasedUserSimulator {
        &self.user
    }

    pub fn simulation_mode(&self) -> SimulationMode {
        self.mode
    }

    /// Snapshot of the episode so far, including the user's closing reply.
    pub fn transcript(&self) -> Transcript {
        let mut turns = self.tracker.history().to_vec();
        turns.extend(self.final_reply.iter().cloned());
        Transcript::new(self.user.goal().clone(), turns, self.status, self.total_reward)
    }

    /// Attaches generated text to an act. Text is informational here, so a
    /// generation failure leaves the act without text.
    fn describe(&self, mut act: DialogueAct, speaker: Speaker) -> DialogueAct {
        match self.language.nlg.act_to_text(&act, speaker) {
            Ok(text) => act.text = Some(text),
            Err(error) => {
                tracing::warn!(speaker = %speaker, intent = %act.intent, error = %error, "No text for act");
                act.text = None;
            }
        }
        act
    }

    fn process_agent_action(&self, act: &DialogueAct) -> DialogueAct {
        self.describe(act.clone(), Speaker::Agent)
    }

    fn process_user_action(&self, act: DialogueAct) -> Result<DialogueAct, EnvironmentError> {
        match self.mode {
            SimulationMode::SemanticFrame => Ok(self.describe(act, Speaker::User)),
            SimulationMode::NaturalLanguage => {
                let text = self.language.nlg.act_to_text(&act, Speaker::User)?;
                let understood = self.language.nlu.text_to_act(&text)?;
                Ok(understood.with_text(text))
            }
        }
    }
}
