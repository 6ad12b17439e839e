//! Rule-based simulated user.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{ConstraintCheck, DialogueAct, DialogueStatus, Intent, UserGoal};
use crate::domain::foundation::StateMachine;

use super::responses::{Reaction, Responder};
use super::{SimulatorError, UserInternalState};

/// Domain knowledge the simulated user needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSimulatorConfig {
    /// The slot the user ultimately wants resolved.
    pub ultimate_slot: String,
    /// Goal constraints always stated in the opening act.
    #[serde(default)]
    pub first_mention_slots: Vec<String>,
    /// Turn budget; zero disables the limit.
    pub max_turns: usize,
}

/// The user's reply to one agent act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub action: DialogueAct,
    pub done: bool,
    pub status: DialogueStatus,
}

/// A user that pursues a sampled goal by fixed rules.
#[derive(Debug)]
pub struct RuleBasedUserSimulator {
    config: UserSimulatorConfig,
    goals: Arc<[UserGoal]>,
    rng: ChaCha8Rng,
    goal: UserGoal,
    state: UserInternalState,
    current_turn: usize,
    status: DialogueStatus,
    constraint_check: ConstraintCheck,
    started: bool,
    episode_over: bool,
}

impl RuleBasedUserSimulator {
    /// Creates a simulator drawing goals from `goals`.
    ///
    /// A `None` seed draws the random stream from OS entropy.
    ///
    /// # Errors
    ///
    /// `SimulatorError::EmptyGoalPool` if there is no goal to sample.
    pub fn new(
        config: UserSimulatorConfig,
        goals: impl Into<Arc<[UserGoal]>>,
        seed: Option<u64>,
    ) -> Result<Self, SimulatorError> {
        let goals = goals.into();
        if goals.is_empty() {
            return Err(SimulatorError::EmptyGoalPool);
        }
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            config,
            goals,
            rng,
            goal: UserGoal::default(),
            state: UserInternalState::default(),
            current_turn: 0,
            status: DialogueStatus::Ongoing,
            constraint_check: ConstraintCheck::Failure,
            started: false,
            episode_over: false,
        })
    }

    /// Starts a new episode with a freshly sampled goal and returns the
    /// user's opening act.
    pub fn reset(&mut self) -> DialogueAct {
        self.current_turn = 0;
        self.state.clear();
        self.status = DialogueStatus::Ongoing;
        self.constraint_check = ConstraintCheck::Failure;
        self.started = true;
        self.episode_over = false;

        let index = self.rng.gen_range(0..self.goals.len());
        self.goal = self.goals[index]
            .clone()
            .with_ultimate_slot(&self.config.ultimate_slot);
        tracing::debug!(goal = ?self.goal, "sampled user goal");

        self.opening_act()
    }

    /// Replies to an agent act.
    ///
    /// # Errors
    ///
    /// `NotStarted` before the first `reset`, `EpisodeOver` once the episode
    /// has ended.
    pub fn step(&mut self, agent: &DialogueAct) -> Result<UserResponse, SimulatorError> {
        if !self.started {
            return Err(SimulatorError::NotStarted);
        }
        if self.episode_over {
            return Err(SimulatorError::EpisodeOver);
        }

        self.current_turn += 2;

        let reaction = if self.config.max_turns > 0 && self.current_turn > self.config.max_turns {
            tracing::debug!(turn = self.current_turn, "user turn budget exhausted");
            self.state.intent = Intent::Closing;
            Reaction::End(DialogueStatus::Failed)
        } else {
            self.state.archive_informs();
            Responder {
                goal: &self.goal,
                ultimate_slot: &self.config.ultimate_slot,
                state: &mut self.state,
                constraint_check: &mut self.constraint_check,
                rng: &mut self.rng,
            }
            .respond(agent)
        };

        if let Reaction::End(outcome) = reaction {
            self.episode_over = true;
            self.settle(outcome);
        }

        let action = self.state.to_act();
        tracing::debug!(intent = %action.intent, done = self.episode_over, "user act");

        Ok(UserResponse {
            action,
            done: self.episode_over,
            status: self.status,
        })
    }

    pub fn goal(&self) -> &UserGoal {
        &self.goal
    }

    pub fn internal_state(&self) -> &UserInternalState {
        &self.state
    }

    pub fn dialog_status(&self) -> DialogueStatus {
        self.status
    }

    pub fn constraint_check(&self) -> ConstraintCheck {
        self.constraint_check
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn is_episode_over(&self) -> bool {
        self.episode_over
    }

    pub fn config(&self) -> &UserSimulatorConfig {
        &self.config
    }

    fn opening_act(&mut self) -> DialogueAct {
        self.current_turn += 1;
        self.state.intent = Intent::Request;

        let goal = &self.goal;
        let ultimate = self.config.ultimate_slot.as_str();
        let first_mention = &self.config.first_mention_slots;

        let constraints: Vec<&String> = goal.inform_slots.keys().collect();
        if let Some(sampled) = constraints.choose(&mut self.rng).copied() {
            self.state.add_inform(sampled, &goal.inform_slots[sampled]);

            for slot in first_mention {
                if slot != sampled {
                    if let Some(value) = goal.constraint(slot) {
                        self.state.add_inform(slot, value);
                    }
                }
            }

            for slot in &constraints {
                if *slot != sampled && !first_mention.contains(*slot) {
                    self.state.rest_slots.push((*slot).clone());
                }
            }
        }

        self.state
            .rest_slots
            .extend(goal.request_slots.keys().cloned());

        let requestable: Vec<&String> = goal
            .request_slots
            .keys()
            .filter(|slot| slot.as_str() != ultimate)
            .collect();
        let request_slot = requestable
            .choose(&mut self.rng)
            .map(|slot| slot.as_str())
            .unwrap_or(ultimate);
        self.state.add_request(request_slot);

        self.state.to_act()
    }

    fn settle(&mut self, outcome: DialogueStatus) {
        if !outcome.is_decided() {
            return;
        }
        match self.status.transition_to(outcome) {
            Ok(status) => self.status = status,
            Err(err) => tracing::warn!(error = %err, "dialogue outcome already decided"),
        }
    }
}
