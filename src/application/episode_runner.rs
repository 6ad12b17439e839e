//! EpisodeRunner - drives a policy through complete episodes.
//!
//! One runner owns one environment. Batches run sequentially on that
//! environment; `run_parallel` gives each worker its own environment and
//! policy on a scoped thread, all sharing the builder's query engine.

use serde::Serialize;

use crate::domain::agent::{Experience, ExperienceMemory};
use crate::domain::dialogue::DialogueStatus;
use crate::domain::episode::{EpisodePhase, Transcript};
use crate::domain::foundation::{EpisodeId, Timestamp};
use crate::ports::Policy;

use super::builder::SimulationBuilder;
use super::environment::{DialogueEnvironment, EnvironmentError};

/// How collected experiences enter the replay memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryMode {
    /// Keep everything
    #[default]
    Training,
    /// Stop once the memory holds its warm-up size
    Warmup,
}

/// Result of one finished episode.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeReport {
    pub episode_id: EpisodeId,
    pub started_at: Timestamp,
    pub status: DialogueStatus,
    pub turns: usize,
    pub total_reward: f64,
    pub transcript: Transcript,
}

/// Aggregate statistics over a set of episodes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BatchSummary {
    pub episodes: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub average_reward: f64,
    pub average_turns: f64,
}

impl BatchSummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a EpisodeReport>) -> Self {
        let mut episodes = 0;
        let mut successes = 0;
        let mut reward = 0.0;
        let mut turns = 0;
        for report in reports {
            episodes += 1;
            if report.status == DialogueStatus::Success {
                successes += 1;
            }
            reward += report.total_reward;
            turns += report.turns;
        }

        if episodes == 0 {
            return Self::default();
        }
        let count = episodes as f64;
        Self {
            episodes,
            successes,
            success_rate: successes as f64 / count,
            average_reward: reward / count,
            average_turns: turns as f64 / count,
        }
    }
}

/// Runs complete episodes on one environment.
#[derive(Debug)]
pub struct EpisodeRunner {
    env: DialogueEnvironment,
    memory: Option<ExperienceMemory>,
    memory_mode: MemoryMode,
    max_steps: usize,
}

impl EpisodeRunner {
    /// Caps each episode at one step per allowed turn; the user ends every
    /// dialogue well before that.
    pub fn new(env: DialogueEnvironment) -> Self {
        let max_steps = env.tracker().max_turns() + 1;
        Self {
            env,
            memory: None,
            memory_mode: MemoryMode::default(),
            max_steps,
        }
    }

    pub fn with_memory(mut self, memory: ExperienceMemory, mode: MemoryMode) -> Self {
        self.memory = Some(memory);
        self.memory_mode = mode;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn environment(&self) -> &DialogueEnvironment {
        &self.env
    }

    pub fn memory(&self) -> Option<&ExperienceMemory> {
        self.memory.as_ref()
    }

    pub fn into_memory(self) -> Option<ExperienceMemory> {
        self.memory
    }

    /// Plays one episode from reset until the user ends it.
    ///
    /// # Errors
    ///
    /// Any error raised by the environment, including an out-of-range
    /// action index from the policy.
    pub fn run_episode(&mut self, policy: &mut dyn Policy) -> Result<EpisodeReport, EnvironmentError> {
        let episode_id = EpisodeId::new();
        let started_at = Timestamp::now();

        policy.reset();
        let mut state = self.env.reset()?;

        for _ in 0..self.max_steps {
            let action = policy.select_action(&state);
            let step = self.env.step_index(action)?;
            let experience = Experience {
                state,
                action,
                reward: step.reward,
                next_state: step.state.clone(),
                done: step.done,
            };
            policy.update(&experience);
            self.remember(experience);

            if step.done {
                break;
            }
            state = step.state;
        }

        if self.env.phase() != EpisodePhase::Done {
            tracing::warn!(%episode_id, max_steps = self.max_steps, "Episode hit the step cap");
        }

        let transcript = self.env.transcript();
        Ok(EpisodeReport {
            episode_id,
            started_at,
            status: transcript.status,
            turns: self.env.turn_count(),
            total_reward: transcript.total_reward,
            transcript,
        })
    }

    /// Plays `episodes` episodes in sequence and returns every report.
    pub fn run_batch_reports(
        &mut self,
        episodes: usize,
        policy: &mut dyn Policy,
    ) -> Result<Vec<EpisodeReport>, EnvironmentError> {
        (0..episodes).map(|_| self.run_episode(policy)).collect()
    }

    /// Plays `episodes` episodes in sequence.
    pub fn run_batch(&mut self, episodes: usize, policy: &mut dyn Policy) -> Result<BatchSummary, EnvironmentError> {
        let reports = self.run_batch_reports(episodes, policy)?;
        let summary = BatchSummary::from_reports(&reports);
        tracing::info!(
            episodes = summary.episodes,
            success_rate = summary.success_rate,
            average_reward = summary.average_reward,
            "Batch finished"
        );
        Ok(summary)
    }

    /// Runs `workers` independent workers, each playing
    /// `episodes_per_worker` episodes with its own environment and the
    /// policy `make_policy(worker)`.
    ///
    /// # Errors
    ///
    /// The first error raised by any worker.
    pub fn run_parallel<P, F>(
        builder: &SimulationBuilder,
        workers: usize,
        episodes_per_worker: usize,
        make_policy: F,
    ) -> Result<BatchSummary, EnvironmentError>
    where
        P: Policy,
        F: Fn(usize) -> P + Sync,
    {
        let results: Vec<Result<Vec<EpisodeReport>, EnvironmentError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let make_policy = &make_policy;
                    scope.spawn(move || {
                        let mut runner = EpisodeRunner::new(builder.build_worker(worker)?);
                        let mut policy = make_policy(worker);
                        runner.run_batch_reports(episodes_per_worker, &mut policy)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        let mut reports = Vec::with_capacity(workers * episodes_per_worker);
        for result in results {
            reports.extend(result?);
        }
        let summary = BatchSummary::from_reports(&reports);
        tracing::info!(
            workers,
            episodes = summary.episodes,
            success_rate = summary.success_rate,
            "Parallel batch finished"
        );
        Ok(summary)
    }

    fn remember(&mut self, experience: Experience) {
        if let Some(memory) = self.memory.as_mut() {
            match self.memory_mode {
                MemoryMode::Training => memory.append(experience),
                MemoryMode::Warmup => {
                    memory.append_warmup(experience);
                }
            }
        }
    }
}
