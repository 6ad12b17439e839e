//! Language Ports - Natural-language generation and understanding.
//!
//! Dialogue acts are the simulator's native currency. These ports render acts
//! as text and recover acts from text, so episodes can be run on surface
//! utterances instead of semantic frames.

use thiserror::Error;

use crate::domain::dialogue::{DialogueAct, Speaker};

/// Errors raised by language units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("Cannot render {intent} act: {reason}")]
    Generation { intent: String, reason: String },

    #[error("Cannot understand utterance '{text}': {reason}")]
    Understanding { text: String, reason: String },
}

/// Port for turning dialogue acts into utterances.
///
/// # Contract
///
/// Implementations must be deterministic for a given act and speaker.
pub trait NaturalLanguageGenerator: Send + Sync {
    /// Renders an act as spoken by `speaker`.
    ///
    /// # Errors
    ///
    /// `LanguageError::Generation` if the act cannot be rendered.
    fn act_to_text(&self, act: &DialogueAct, speaker: Speaker) -> Result<String, LanguageError>;
}

/// Port for turning user utterances back into dialogue acts.
pub trait NaturalLanguageUnderstanding: Send + Sync {
    /// Parses an utterance into an act.
    ///
    /// # Errors
    ///
    /// `LanguageError::Understanding` if no act can be recovered.
    fn text_to_act(&self, text: &str) -> Result<DialogueAct, LanguageError>;
}
