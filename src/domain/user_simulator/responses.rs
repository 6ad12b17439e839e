//! How the simulated user reacts to each agent intent.
//!
//! The user only ever says things that follow from its goal: it informs goal
//! constraints, requests goal slots, corrects wrong values and finally judges
//! the agent's proposal.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::dialogue::{ConstraintCheck, DialogueAct, DialogueStatus, Intent, UserGoal};
use crate::domain::foundation::sentinels::{
    I_DO_NOT_CARE, MULTIPLE_CHOICE_SEPARATOR, NO_VALUE_MATCH, TASK_COMPLETE_SLOT,
};

use super::UserInternalState;

/// Whether the exchange goes on after the user's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Reaction {
    Continue,
    End(DialogueStatus),
}

/// Borrowed view of the simulator while it builds one reply.
pub(super) struct Responder<'a, R: Rng> {
    pub goal: &'a UserGoal,
    pub ultimate_slot: &'a str,
    pub state: &'a mut UserInternalState,
    pub constraint_check: &'a mut ConstraintCheck,
    pub rng: &'a mut R,
}

impl<'a, R: Rng> Responder<'a, R> {
    pub fn respond(&mut self, agent: &DialogueAct) -> Reaction {
        tracing::debug!(intent = %agent.intent, "user responding to agent act");
        match agent.intent {
            Intent::Inform if agent.informs(TASK_COMPLETE_SLOT) => {
                self.task_complete(agent);
                Reaction::Continue
            }
            Intent::Inform => {
                self.inform(agent);
                Reaction::Continue
            }
            Intent::Request => {
                self.request(agent);
                Reaction::Continue
            }
            Intent::ConfirmAnswer => {
                self.confirm_answer();
                Reaction::Continue
            }
            Intent::Closing => {
                self.state.intent = Intent::Thanks;
                Reaction::End(DialogueStatus::Ongoing)
            }
            Intent::MultipleChoice => {
                self.multiple_choice(agent);
                Reaction::Continue
            }
            Intent::Thanks => Reaction::End(self.judge(agent)),
            Intent::ConfirmQuestion
            | Intent::Greeting
            | Intent::Welcome
            | Intent::Deny
            | Intent::NotSure => Reaction::Continue,
        }
    }

    fn pick(&mut self, candidates: &[String]) -> Option<String> {
        candidates.choose(self.rng).cloned()
    }

    /// The agent claims the task is done; check its proposal against every
    /// goal constraint.
    fn task_complete(&mut self, agent: &DialogueAct) {
        let ultimate = self.ultimate_slot;
        self.state.intent = Intent::Thanks;
        *self.constraint_check = ConstraintCheck::Success;

        if agent.inform_value(TASK_COMPLETE_SLOT) == Some(NO_VALUE_MATCH) {
            self.state
                .history_slots
                .insert(ultimate.to_string(), NO_VALUE_MATCH.to_string());
            self.state.remove_rest(ultimate);
            self.state.request_slots.remove(ultimate);
        }

        let violated = self.goal.inform_slots.iter().any(|(slot, wanted)| {
            agent
                .inform_value(slot)
                .map_or(true, |offered| offered.to_lowercase() != wanted.to_lowercase())
        });
        if violated {
            self.state.intent = Intent::Deny;
            self.state.request_slots.clear();
            self.state.inform_slots.clear();
            *self.constraint_check = ConstraintCheck::Failure;
        }
    }

    fn inform(&mut self, agent: &DialogueAct) {
        let goal = self.goal;
        for (slot, value) in &agent.inform_slots {
            self.state.history_slots.insert(slot.clone(), value.clone());

            match goal.constraint(slot) {
                Some(wanted) if wanted == value.as_str() => {
                    self.state.remove_rest(slot);
                    self.continue_after_confirmed_value();
                }
                Some(wanted) => {
                    self.state.intent = Intent::Inform;
                    self.state.add_inform(slot, wanted);
                    self.state.remove_rest(slot);
                }
                None => {
                    self.state.remove_rest(slot);
                    self.state.request_slots.remove(slot);
                    self.continue_after_other_value();
                }
            }
        }
    }

    /// Next move after the agent stated a goal constraint correctly.
    fn continue_after_confirmed_value(&mut self) {
        let goal = self.goal;
        let ultimate = self.ultimate_slot;

        if !self.state.request_slots.is_empty() {
            self.state.intent = Intent::Request;
        } else if !self.state.rest_slots.is_empty() {
            let candidates = self.state.rest_without(ultimate);
            match self.pick(&candidates) {
                Some(slot) => {
                    if let Some(value) = goal.constraint(&slot) {
                        self.state.add_inform(&slot, value);
                        self.state.intent = Intent::Inform;
                        self.state.remove_rest(&slot);
                    } else if goal.is_request(&slot) {
                        self.state.add_request(&slot);
                        self.state.intent = Intent::Request;
                    }
                }
                None => {
                    self.state.add_request(ultimate);
                    self.state.intent = Intent::Request;
                }
            }
        } else {
            self.state.intent = Intent::Thanks;
        }
    }

    /// Next move after the agent stated a slot outside the goal constraints.
    fn continue_after_other_value(&mut self) {
        let goal = self.goal;
        let ultimate = self.ultimate_slot;

        if !self.state.request_slots.is_empty() {
            let candidates = self.state.requests_without(ultimate);
            let slot = self.pick(&candidates).unwrap_or_else(|| ultimate.to_string());
            self.state.add_request(&slot);
            self.state.intent = Intent::Request;
        } else if !self.state.rest_slots.is_empty() {
            let candidates = self.state.rest_without(ultimate);
            match self.pick(&candidates) {
                Some(slot) => {
                    if let Some(value) = goal.constraint(&slot) {
                        self.state.add_inform(&slot, value);
                        self.state.intent = Intent::Inform;
                        self.state.remove_rest(&slot);
                        if self.state.has_rest(ultimate) {
                            self.state.add_request(ultimate);
                            self.state.intent = Intent::Request;
                        }
                    } else if let Some(value) = goal.request_slots.get(&slot) {
                        self.state.request_slots.insert(slot, value.clone());
                        self.state.intent = Intent::Request;
                    }
                }
                None => {
                    self.state.add_request(ultimate);
                    self.state.intent = Intent::Request;
                }
            }
        } else {
            self.state.intent = Intent::Thanks;
        }
    }

    fn request(&mut self, agent: &DialogueAct) {
        let goal = self.goal;

        let Some(slot) = agent.request_slots.keys().next() else {
            self.volunteer_rest_slot();
            return;
        };

        if let Some(value) = goal.constraint(slot) {
            self.state.add_inform(slot, value);
            self.state.intent = Intent::Inform;
            self.state.remove_rest(slot);
            self.state.request_slots.clear();
        } else if goal.is_request(slot)
            && !self.state.has_rest(slot)
            && self.state.history_slots.contains_key(slot)
        {
            let answered = self.state.history_slots[slot].clone();
            self.state.add_inform(slot, &answered);
            self.state.request_slots.clear();
            self.state.intent = Intent::Inform;
        } else if goal.is_request(slot) && self.state.has_rest(slot) {
            self.state.intent = Intent::Request;
            self.state.add_request(slot);

            let pending: Vec<String> = self
                .state
                .rest_slots
                .iter()
                .filter(|rest| goal.is_constraint(rest))
                .cloned()
                .collect();
            for rest in &pending {
                if let Some(value) = goal.constraint(rest) {
                    self.state.add_inform(rest, value);
                }
                self.state.remove_rest(rest);
            }
        } else {
            self.state.intent =
                if self.state.request_slots.is_empty() && self.state.rest_slots.is_empty() {
                    Intent::Thanks
                } else {
                    Intent::Inform
                };
            self.state.add_inform(slot, I_DO_NOT_CARE);
        }
    }

    /// The agent asked without naming a slot: bring up something still
    /// pending.
    fn volunteer_rest_slot(&mut self) {
        let goal = self.goal;
        let candidates = self.state.rest_slots.clone();
        let Some(slot) = self.pick(&candidates) else {
            return;
        };

        if let Some(value) = goal.constraint(&slot) {
            self.state.add_inform(&slot, value);
            self.state.remove_rest(&slot);
            self.state.intent = Intent::Inform;
        } else if let Some(value) = goal.request_slots.get(&slot) {
            self.state.request_slots.insert(slot, value.clone());
            self.state.intent = Intent::Request;
        }
    }

    fn confirm_answer(&mut self) {
        let goal = self.goal;
        let candidates = self.state.rest_slots.clone();
        match self.pick(&candidates) {
            Some(slot) => {
                if goal.is_request(&slot) {
                    self.state.intent = Intent::Request;
                    self.state.add_request(&slot);
                } else if let Some(value) = goal.constraint(&slot) {
                    self.state.intent = Intent::Inform;
                    self.state.add_inform(&slot, value);
                    self.state.remove_rest(&slot);
                }
            }
            None => self.state.intent = Intent::Thanks,
        }
    }

    fn multiple_choice(&mut self, agent: &DialogueAct) {
        let goal = self.goal;
        let Some((slot, offered)) = agent.inform_slots.iter().next() else {
            return;
        };

        if let Some(value) = goal.constraint(slot) {
            self.state.add_inform(slot, value);
        } else if goal.is_request(slot) {
            let options: Vec<String> = offered
                .split(MULTIPLE_CHOICE_SEPARATOR)
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(str::to_string)
                .collect();
            if let Some(choice) = self.pick(&options) {
                self.state.add_inform(slot, &choice);
            }
        }

        self.state.intent = Intent::Inform;
        self.state.remove_rest(slot);
        self.state.request_slots.remove(slot);
    }

    /// Final verdict when the agent closes with thanks.
    fn judge(&self, agent: &DialogueAct) -> DialogueStatus {
        let ultimate = self.ultimate_slot;
        let goal = self.goal;

        let unanswered = !self.state.requests_without(ultimate).is_empty()
            || !self.state.rest_without(ultimate).is_empty();
        let unmatched = self
            .state
            .history_slots
            .values()
            .any(|value| value == NO_VALUE_MATCH);
        let contradicted = self.state.history_slots.iter().any(|(slot, value)| {
            goal.constraint(slot)
                .map_or(false, |wanted| wanted != value.as_str())
        });
        let unavailable = agent.inform_value(ultimate) == Some(NO_VALUE_MATCH);
        let unchecked = *self.constraint_check == ConstraintCheck::Failure;

        if unanswered || unmatched || contradicted || unavailable || unchecked {
            DialogueStatus::Failed
        } else {
            DialogueStatus::Success
        }
    }
}
