//! Integration tests for full simulated episodes.
//!
//! These tests verify the end-to-end flow:
//! 1. Dataset files are loaded into a bundle
//! 2. The builder assembles environments from configuration and data
//! 3. Policies play complete episodes through the runner
//! 4. Reports, summaries and transcripts reflect the outcomes
//!
//! Uses file and in-memory dataset sources without external services.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use dialogue_sim::adapters::InMemoryDatasetSource;
use dialogue_sim::application::{EnvironmentError, EpisodeRunner, MemoryMode, SimulationBuilder};
use dialogue_sim::config::{DatasetConfig, SimulatorConfig};
use dialogue_sim::domain::agent::{Experience, ExperienceMemory};
use dialogue_sim::domain::dialogue::{DialogueStatus, UserGoal};
use dialogue_sim::domain::knowledge_base::KnowledgeBase;
use dialogue_sim::ports::{DatasetBundle, DatasetSource, Policy};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ACTS: &str = "request\ninform\nconfirm_question\nconfirm_answer\ngreeting\nclosing\nmultiple_choice\nthanks\nwelcome\ndeny\nnot_sure\n";

const SLOTS: &str = "moviename\nstarttime\ncity\ndate\ntheater\nnumberofpeople\nticket\ntaskcomplete\nclosing\n";

const KB: &str = r#"{
    "1": {"moviename": "deadpool", "starttime": "9 pm", "city": "seattle", "date": "today", "theater": "amc"},
    "2": {"moviename": "deadpool", "starttime": "7 pm", "city": "seattle", "date": "tomorrow", "theater": "regal"},
    "3": {"moviename": "zootopia", "starttime": "4 pm", "city": "portland", "date": "today", "theater": "cinemark"}
}"#;

const GOALS: &str = r#"[
    {"inform_slots": {"moviename": "deadpool", "numberofpeople": "2"}, "request_slots": {"ticket": "UNK"}},
    {"inform_slots": {"moviename": "zootopia", "city": "portland"}, "request_slots": {"ticket": "UNK", "theater": "UNK"}}
]"#;

fn write_dataset(dir: &TempDir) -> DatasetConfig {
    let path = |name: &str| -> PathBuf { dir.path().join(name) };
    fs::write(path("dia_acts.txt"), ACTS).unwrap();
    fs::write(path("slot_set.txt"), SLOTS).unwrap();
    fs::write(path("movie_kb.json"), KB).unwrap();
    fs::write(path("user_goals.json"), GOALS).unwrap();

    DatasetConfig {
        act_vocabulary: path("dia_acts.txt"),
        slot_vocabulary: path("slot_set.txt"),
        knowledge_base: path("movie_kb.json"),
        goals: path("user_goals.json"),
    }
}

fn seeded_config(seed: u64) -> SimulatorConfig {
    let mut config = SimulatorConfig::default();
    config.environment.seed = Some(seed);
    config
}

fn file_builder(dir: &TempDir, seed: u64) -> SimulationBuilder {
    let bundle = DatasetBundle::load(&write_dataset(dir)).unwrap();
    SimulationBuilder::new(seeded_config(seed), bundle)
}

/// Policy that always picks the same catalog index.
struct FixedPolicy(usize);

impl Policy for FixedPolicy {
    fn select_action(&mut self, _state: &[f32]) -> usize {
        self.0
    }
}

/// Policy that counts the transitions it is shown.
struct CountingPolicy {
    inner: FixedPolicy,
    updates: usize,
    resets: usize,
}

impl Policy for CountingPolicy {
    fn select_action(&mut self, state: &[f32]) -> usize {
        self.inner.select_action(state)
    }

    fn update(&mut self, _experience: &Experience) {
        self.updates += 1;
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn file_dataset_drives_warmup_policy_to_completion() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 11);
    let mut policy = builder.warmup_policy(Some(11)).unwrap();
    let mut runner = EpisodeRunner::new(builder.build().unwrap());

    let report = runner.run_episode(&mut policy).unwrap();

    assert!(report.status.is_decided());
    assert!(report.turns >= 2);
    assert!(report.turns <= 42);
    assert_eq!(report.transcript.status, report.status);
    assert_eq!(report.transcript.turns.first().map(|t| t.turn), Some(0));
    for pair in report.transcript.turns.windows(2) {
        assert_eq!(pair[1].turn, pair[0].turn + 1);
    }
}

#[test]
fn immediate_thanks_always_fails() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 3);
    let thanks = builder
        .catalog()
        .iter()
        .position(|act| act.intent.as_str() == "thanks")
        .unwrap();
    let mut runner = EpisodeRunner::new(builder.build().unwrap());

    let summary = runner.run_batch(5, &mut FixedPolicy(thanks)).unwrap();

    assert_eq!(summary.episodes, 5);
    assert_eq!(summary.successes, 0);
    assert_eq!(summary.success_rate, 0.0);
    assert_eq!(summary.average_reward, -40.0);
    assert_eq!(summary.average_turns, 2.0);
}

#[test]
fn confirm_question_loops_until_turn_limit() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 5);
    let confirm = builder
        .catalog()
        .iter()
        .position(|act| act.intent.as_str() == "confirm_question")
        .unwrap();
    let mut runner = EpisodeRunner::new(builder.build().unwrap());

    let report = runner.run_episode(&mut FixedPolicy(confirm)).unwrap();

    assert_eq!(report.status, DialogueStatus::Failed);
    // twenty rewarded turns at -1 then the failure penalty
    assert_eq!(report.total_reward, -19.0 - 40.0);
}

#[test]
fn policy_sees_every_transition() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 8);
    let mut runner = EpisodeRunner::new(builder.build().unwrap());
    let mut policy = CountingPolicy {
        inner: FixedPolicy(0),
        updates: 0,
        resets: 0,
    };

    runner.run_batch(3, &mut policy).unwrap();

    assert_eq!(policy.resets, 3);
    assert!(policy.updates >= 3);
}

#[test]
fn warmup_memory_respects_its_size() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 21);
    let mut policy = builder.warmup_policy(Some(21)).unwrap();
    let mut runner = EpisodeRunner::new(builder.build().unwrap())
        .with_memory(ExperienceMemory::new(10), MemoryMode::Warmup);

    runner.run_batch(10, &mut policy).unwrap();

    let memory = runner.into_memory().unwrap();
    assert_eq!(memory.len(), 10);
    assert!(memory.experiences().iter().all(|e| e.state.len() == e.next_state.len()));
}

#[test]
fn training_memory_keeps_every_transition() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 4);
    let thanks = builder
        .catalog()
        .iter()
        .position(|act| act.intent.as_str() == "thanks")
        .unwrap();
    let mut runner = EpisodeRunner::new(builder.build().unwrap())
        .with_memory(ExperienceMemory::new(0), MemoryMode::Training);

    runner.run_batch(4, &mut FixedPolicy(thanks)).unwrap();

    let memory = runner.memory().unwrap();
    assert_eq!(memory.len(), 4);
    assert!(memory.experiences().iter().all(|e| e.done));
}

#[test]
fn same_seed_replays_same_episode() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 99);

    let mut first = EpisodeRunner::new(builder.build().unwrap());
    let mut second = EpisodeRunner::new(builder.build().unwrap());
    let a = first.run_episode(&mut builder.warmup_policy(Some(1)).unwrap()).unwrap();
    let b = second.run_episode(&mut builder.warmup_policy(Some(1)).unwrap()).unwrap();

    assert_eq!(a.transcript, b.transcript);
    assert_ne!(a.episode_id, b.episode_id);
}

#[test]
fn parallel_workers_share_one_engine() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 40);

    let summary = EpisodeRunner::run_parallel(&builder, 4, 5, |worker| {
        builder.warmup_policy(Some(worker as u64)).unwrap()
    })
    .unwrap();

    assert_eq!(summary.episodes, 20);
    assert!(summary.success_rate >= 0.0 && summary.success_rate <= 1.0);
    assert!(summary.average_turns >= 2.0);
}

#[test]
fn out_of_range_policy_is_reported() {
    let dir = TempDir::new().unwrap();
    let builder = file_builder(&dir, 2);
    let len = builder.catalog().len();
    let mut runner = EpisodeRunner::new(builder.build().unwrap());

    let result = runner.run_episode(&mut FixedPolicy(len));

    assert!(matches!(result, Err(EnvironmentError::Catalog(_))));
}

#[test]
fn transcript_exports_to_json_and_yaml() {
    let goal = UserGoal::new(
        [("moviename".to_string(), "deadpool".to_string())].into_iter().collect(),
        [("ticket".to_string(), "UNK".to_string())].into_iter().collect(),
    );
    let bundle = InMemoryDatasetSource::new()
        .with_slots(["moviename", "ticket", "taskcomplete"])
        .with_knowledge_base(KnowledgeBase::from_rows([(
            1,
            [("moviename".to_string(), "deadpool".to_string())].into_iter().collect(),
        )]))
        .with_goal(goal)
        .load_bundle()
        .unwrap();
    let builder = SimulationBuilder::new(seeded_config(1), bundle);
    let mut runner = EpisodeRunner::new(builder.build().unwrap());

    let report = runner.run_episode(&mut FixedPolicy(2)).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.transcript.to_json().unwrap()).unwrap();
    assert_eq!(json["goal"]["inform_slots"]["moviename"], "deadpool");
    assert_eq!(json["turns"][0]["speaker"], "usr");
    assert!(report.transcript.to_yaml().unwrap().contains("moviename: deadpool"));

    let report_json = serde_json::to_value(&report).unwrap();
    assert!(report_json["episode_id"].is_string());
    assert!(report_json["started_at"].is_string());
}
