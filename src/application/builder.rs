//! SimulationBuilder - assembles environments from configuration and data.
//!
//! The knowledge base query engine and the action catalog are built once and
//! shared by every environment the builder produces, so parallel workers
//! reuse the same caches.

use std::sync::Arc;

use crate::adapters::language::{KeywordNlu, TemplateNlg};
use crate::adapters::policy::RuleBasedPolicy;
use crate::config::SimulatorConfig;
use crate::domain::agent::{ActionCatalog, CatalogError};
use crate::domain::dialogue::UserGoal;
use crate::domain::foundation::Vocabulary;
use crate::domain::knowledge_base::KbQueryEngine;
use crate::ports::DatasetBundle;

use super::environment::{DialogueEnvironment, EnvironmentError, LanguageUnits};

/// Factory for environments sharing one dataset.
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    config: SimulatorConfig,
    acts: Vocabulary,
    slots: Vocabulary,
    goals: Arc<[UserGoal]>,
    engine: Arc<KbQueryEngine>,
    catalog: Arc<ActionCatalog>,
    language: LanguageUnits,
}

impl SimulationBuilder {
    /// Uses the template language units and the catalog described by the
    /// agent configuration.
    pub fn new(config: SimulatorConfig, bundle: DatasetBundle) -> Self {
        let engine = Arc::new(KbQueryEngine::new(
            bundle.knowledge_base,
            config.domain.kb_query_config(),
        ));
        let catalog = Arc::new(config.agent.catalog());
        let language = LanguageUnits {
            nlg: Arc::new(TemplateNlg::new()),
            nlu: Arc::new(KeywordNlu::new(bundle.slots.clone())),
        };

        Self {
            config,
            acts: bundle.acts,
            slots: bundle.slots,
            goals: bundle.goals,
            engine,
            catalog,
            language,
        }
    }

    pub fn with_language(mut self, language: LanguageUnits) -> Self {
        self.language = language;
        self
    }

    pub fn with_catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<KbQueryEngine> {
        &self.engine
    }

    pub fn catalog(&self) -> &Arc<ActionCatalog> {
        &self.catalog
    }

    pub fn language(&self) -> &LanguageUnits {
        &self.language
    }

    /// Builds an environment seeded from the configuration.
    ///
    /// # Errors
    ///
    /// `Tracker` or `Simulator` errors for unsupported component kinds.
    pub fn build(&self) -> Result<DialogueEnvironment, EnvironmentError> {
        self.build_seeded(self.config.environment.seed)
    }

    /// Builds the environment for one parallel worker. Worker `i` is seeded
    /// with `seed + i`; an unseeded configuration stays unseeded.
    pub fn build_worker(&self, worker: usize) -> Result<DialogueEnvironment, EnvironmentError> {
        self.build_seeded(self.worker_seed(worker))
    }

    /// The warm-up policy over this builder's catalog.
    ///
    /// # Errors
    ///
    /// `CatalogError::ActionNotFound` if the catalog lacks a scripted act.
    pub fn warmup_policy(&self, seed: Option<u64>) -> Result<RuleBasedPolicy, CatalogError> {
        RuleBasedPolicy::new(
            &self.catalog,
            &self.config.agent.warmup_request_slots,
            self.config.agent.epsilon,
            seed,
        )
    }

    pub(crate) fn worker_seed(&self, worker: usize) -> Option<u64> {
        self.config
            .environment
            .seed
            .map(|seed| seed.wrapping_add(worker as u64))
    }

    fn build_seeded(&self, seed: Option<u64>) -> Result<DialogueEnvironment, EnvironmentError> {
        let env_config = &self.config.environment;
        let tracker = env_config.state_tracker.build(
            self.acts.clone(),
            self.slots.clone(),
            env_config.max_turns,
            Arc::clone(&self.engine),
        )?;
        let user = env_config.user.build(
            self.config.domain.user_simulator_config(env_config.max_turns),
            Arc::clone(&self.goals),
            seed,
        )?;

        Ok(DialogueEnvironment::new(
            tracker,
            user,
            Arc::clone(&self.catalog),
            self.language.clone(),
            self.config.reward_table(),
            env_config.simulation_mode,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::dataset::InMemoryDatasetSource;
    use crate::domain::state_tracker::{StateTrackerKind, TrackerError};
    use crate::domain::user_simulator::{SimulatorError, UserSimulatorKind};
    use crate::ports::DatasetSource;

    fn bundle() -> DatasetBundle {
        InMemoryDatasetSource::new()
            .with_slots(["moviename", "ticket"])
            .with_goal(UserGoal::default())
            .load_bundle()
            .unwrap()
    }

    #[test]
    fn environments_share_engine_and_catalog() {
        let builder = SimulationBuilder::new(SimulatorConfig::default(), bundle());

        let a = builder.build().unwrap();
        let b = builder.build_worker(1).unwrap();

        assert!(Arc::ptr_eq(a.tracker().engine(), b.tracker().engine()));
        assert!(Arc::ptr_eq(a.catalog(), b.catalog()));
    }

    #[test]
    fn worker_seeds_are_offset() {
        let mut config = SimulatorConfig::default();
        config.environment.seed = Some(100);
        let builder = SimulationBuilder::new(config, bundle());

        assert_eq!(builder.worker_seed(0), Some(100));
        assert_eq!(builder.worker_seed(3), Some(103));
    }

    #[test]
    fn unseeded_workers_stay_unseeded() {
        let builder = SimulationBuilder::new(SimulatorConfig::default(), bundle());
        assert_eq!(builder.worker_seed(2), None);
    }

    #[test]
    fn unsupported_tracker_is_reported() {
        let mut config = SimulatorConfig::default();
        config.environment.state_tracker = StateTrackerKind::ModelBased;

        let result = SimulationBuilder::new(config, bundle()).build();

        assert!(matches!(
            result,
            Err(EnvironmentError::Tracker(TrackerError::Unsupported(StateTrackerKind::ModelBased)))
        ));
    }

    #[test]
    fn real_user_is_reported() {
        let mut config = SimulatorConfig::default();
        config.environment.user = UserSimulatorKind::Real;

        let result = SimulationBuilder::new(config, bundle()).build();

        assert!(matches!(
            result,
            Err(EnvironmentError::Simulator(SimulatorError::Unsupported(UserSimulatorKind::Real)))
        ));
    }

    #[test]
    fn default_warmup_policy_resolves() {
        let builder = SimulationBuilder::new(SimulatorConfig::default(), bundle());
        let policy = builder.warmup_policy(Some(0)).unwrap();
        assert_eq!(policy.script().len(), 8);
    }
}
