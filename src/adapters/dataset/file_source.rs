//! File-based Dataset Adapter
//!
//! Reads vocabularies from line-delimited text files and the knowledge base
//! and goal pool from JSON or YAML, chosen by file extension.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DatasetConfig;
use crate::domain::dialogue::{SlotMap, UserGoal};
use crate::domain::foundation::Vocabulary;
use crate::domain::knowledge_base::KnowledgeBase;
use crate::ports::{DatasetBundle, DatasetError, DatasetSource};

/// Dataset source reading the four artifacts from disk
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    config: DatasetConfig,
}

impl FileDatasetSource {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }
}

impl DatasetSource for FileDatasetSource {
    fn load_act_vocabulary(&self) -> Result<Vocabulary, DatasetError> {
        load_vocabulary(&self.config.act_vocabulary, "act_vocabulary")
    }

    fn load_slot_vocabulary(&self) -> Result<Vocabulary, DatasetError> {
        load_vocabulary(&self.config.slot_vocabulary, "slot_vocabulary")
    }

    fn load_knowledge_base(&self) -> Result<KnowledgeBase, DatasetError> {
        load_knowledge_base(&self.config.knowledge_base)
    }

    fn load_goal_pool(&self) -> Result<Vec<UserGoal>, DatasetError> {
        load_goal_pool(&self.config.goals)
    }
}

impl DatasetBundle {
    /// Load all four artifacts from the configured paths
    pub fn load(config: &DatasetConfig) -> Result<Self, DatasetError> {
        FileDatasetSource::new(config.clone()).load_bundle()
    }
}

/// Read a line-delimited vocabulary; a name's line number is its index.
///
/// Carriage returns are stripped and trailing blank lines ignored. A blank
/// line between names is an error.
pub fn load_vocabulary(path: &Path, field: &str) -> Result<Vocabulary, DatasetError> {
    let text = read(path)?;
    let mut names: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();
    while names.last().is_some_and(|name| name.trim().is_empty()) {
        names.pop();
    }
    let vocabulary = Vocabulary::from_names(field, names)?;
    tracing::debug!(path = %path.display(), size = vocabulary.len(), "Loaded vocabulary");
    Ok(vocabulary)
}

/// Read an entity table mapping ids to slot values.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase, DatasetError> {
    let raw: BTreeMap<RawId, RawSlots> = parse(path)?;
    let mut rows = Vec::with_capacity(raw.len());
    for (id, slots) in raw {
        rows.push((id.resolve(path)?, to_slot_map(slots)));
    }
    let kb = KnowledgeBase::from_rows(rows);
    tracing::debug!(path = %path.display(), entities = kb.len(), "Loaded knowledge base");
    Ok(kb)
}

/// Read the list of user goals in file order.
pub fn load_goal_pool(path: &Path) -> Result<Vec<UserGoal>, DatasetError> {
    let raw: Vec<RawGoal> = parse(path)?;
    let goals: Vec<UserGoal> = raw
        .into_iter()
        .map(|goal| UserGoal::new(to_slot_map(goal.inform_slots), to_slot_map(goal.request_slots)))
        .collect();
    tracing::debug!(path = %path.display(), goals = goals.len(), "Loaded goal pool");
    Ok(goals)
}

type RawSlots = BTreeMap<String, RawValue>;

#[derive(Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn resolve(self, path: &Path) -> Result<u64, DatasetError> {
        match self {
            Self::Number(id) => Ok(id),
            Self::Text(text) => text.trim().parse().map_err(|_| DatasetError::Parse {
                path: path.to_path_buf(),
                message: format!("entity id '{}' is not a non-negative integer", text),
            }),
        }
    }
}

/// Slot values as written; numbers and booleans are kept in their textual form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Flag(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGoal {
    #[serde(default)]
    inform_slots: RawSlots,
    #[serde(default)]
    request_slots: RawSlots,
}

fn to_slot_map(raw: RawSlots) -> SlotMap {
    raw.into_iter()
        .map(|(slot, value)| (slot, value.into_text()))
        .collect()
}

enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format, DatasetError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn parse<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let format = format_of(path)?;
    let text = read(path)?;
    let parsed = match format {
        Format::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| DatasetError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn read(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EntityId;
    use crate::domain::foundation::ValidationError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    mod vocabulary {
        use super::*;

        #[test]
        fn line_number_is_index() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "acts.txt", "request\ninform\nthanks\n");

            let vocab = load_vocabulary(&path, "acts").unwrap();

            assert_eq!(vocab.len(), 3);
            assert_eq!(vocab.index_of("thanks"), Some(2));
        }

        #[test]
        fn strips_carriage_returns_and_trailing_blanks() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "slots.txt", "city\r\ndate\r\n\r\n\n");

            let vocab = load_vocabulary(&path, "slots").unwrap();

            assert_eq!(vocab.names().collect::<Vec<_>>(), vec!["city", "date"]);
        }

        #[test]
        fn interior_blank_line_is_invalid() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "slots.txt", "city\n\ndate\n");

            let result = load_vocabulary(&path, "slots");

            assert!(matches!(
                result,
                Err(DatasetError::Invalid(ValidationError::InvalidFormat { .. }))
            ));
        }

        #[test]
        fn duplicate_name_is_invalid() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "slots.txt", "city\ncity\n");

            assert!(matches!(
                load_vocabulary(&path, "slots"),
                Err(DatasetError::Invalid(ValidationError::Duplicate { .. }))
            ));
        }

        #[test]
        fn missing_file_reports_path() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("absent.txt");

            match load_vocabulary(&path, "slots") {
                Err(DatasetError::Io { path: reported, .. }) => assert_eq!(reported, path),
                other => panic!("expected Io error, got {:?}", other),
            }
        }
    }

    mod knowledge_base {
        use super::*;

        #[test]
        fn json_string_ids_are_parsed() {
            let dir = TempDir::new().unwrap();
            let path = write(
                &dir,
                "kb.json",
                r#"{"1": {"moviename": "deadpool", "date": "today"}, "2": {"moviename": "deadpool", "date": "tomorrow"}}"#,
            );

            let kb = load_knowledge_base(&path).unwrap();

            assert_eq!(kb.len(), 2);
            assert_eq!(kb.get(EntityId::new(2)).unwrap()["date"], "tomorrow");
        }

        #[test]
        fn yaml_numbers_become_text() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "kb.yaml", "7:\n  moviename: zootopia\n  price: 12\n");

            let kb = load_knowledge_base(&path).unwrap();

            assert_eq!(kb.get(EntityId::new(7)).unwrap()["price"], "12");
        }

        #[test]
        fn non_numeric_id_is_a_parse_error() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "kb.json", r#"{"first": {"moviename": "deadpool"}}"#);

            assert!(matches!(
                load_knowledge_base(&path),
                Err(DatasetError::Parse { .. })
            ));
        }

        #[test]
        fn unknown_extension_is_unsupported() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "kb.p", "");

            assert!(matches!(
                load_knowledge_base(&path),
                Err(DatasetError::UnsupportedFormat(_))
            ));
        }
    }

    mod goals {
        use super::*;

        #[test]
        fn keeps_file_order() {
            let dir = TempDir::new().unwrap();
            let path = write(
                &dir,
                "goals.json",
                r#"[
                    {"inform_slots": {"moviename": "deadpool"}, "request_slots": {"ticket": "UNK"}},
                    {"inform_slots": {"city": "seattle", "numberofpeople": 2}, "request_slots": {}}
                ]"#,
            );

            let goals = load_goal_pool(&path).unwrap();

            assert_eq!(goals.len(), 2);
            assert_eq!(goals[0].constraint("moviename"), Some("deadpool"));
            assert_eq!(goals[1].constraint("numberofpeople"), Some("2"));
        }

        #[test]
        fn malformed_json_is_a_parse_error() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "goals.json", "[{");

            assert!(matches!(load_goal_pool(&path), Err(DatasetError::Parse { .. })));
        }
    }

    mod bundle {
        use super::*;

        #[test]
        fn loads_all_artifacts() {
            let dir = TempDir::new().unwrap();
            let config = DatasetConfig {
                act_vocabulary: write(&dir, "acts.txt", "request\ninform\n"),
                slot_vocabulary: write(&dir, "slots.txt", "moviename\nticket\n"),
                knowledge_base: write(&dir, "kb.json", r#"{"1": {"moviename": "deadpool"}}"#),
                goals: write(
                    &dir,
                    "goals.yaml",
                    "- inform_slots:\n    moviename: deadpool\n  request_slots:\n    ticket: UNK\n",
                ),
            };

            let bundle = DatasetBundle::load(&config).unwrap();

            assert_eq!(bundle.acts.len(), 2);
            assert_eq!(bundle.slots.len(), 2);
            assert_eq!(bundle.knowledge_base.len(), 1);
            assert_eq!(bundle.goals.len(), 1);
        }

        #[test]
        fn empty_goal_pool_is_invalid() {
            let dir = TempDir::new().unwrap();
            let config = DatasetConfig {
                act_vocabulary: write(&dir, "acts.txt", "request\n"),
                slot_vocabulary: write(&dir, "slots.txt", "ticket\n"),
                knowledge_base: write(&dir, "kb.json", "{}"),
                goals: write(&dir, "goals.json", "[]"),
            };

            assert!(matches!(
                DatasetBundle::load(&config),
                Err(DatasetError::Invalid(ValidationError::EmptyField { .. }))
            ));
        }
    }
}
