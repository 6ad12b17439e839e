//! Template-based natural-language generation.
//!
//! An utterance is an intent phrase followed by one sentence per informed
//! slot and one question per requested slot:
//!
//! ```text
//! I would like to know something. The moviename is "deadpool". What is the ticket?
//! ```
//!
//! Values are quoted; `"` and `\` inside a value are escaped with a backslash.

use crate::domain::dialogue::{DialogueAct, Intent, Speaker};
use crate::ports::{LanguageError, NaturalLanguageGenerator};

pub(super) const INFORM_PREFIX: &str = "The ";
pub(super) const INFORM_INFIX: &str = " is \"";
pub(super) const INFORM_SUFFIX: &str = "\".";
pub(super) const REQUEST_PREFIX: &str = "What is the ";
pub(super) const REQUEST_SUFFIX: &str = "?";
pub(super) const ESCAPE: char = '\\';

/// Opening phrase for each intent, distinct per speaker.
pub(super) fn intent_phrase(intent: Intent, speaker: Speaker) -> &'static str {
    match (speaker, intent) {
        (Speaker::User, Intent::Request) => "I would like to know something.",
        (Speaker::User, Intent::Inform) => "Here is what I want.",
        (Speaker::User, Intent::ConfirmQuestion) => "Can you confirm that?",
        (Speaker::User, Intent::ConfirmAnswer) => "Yes, that is right.",
        (Speaker::User, Intent::Greeting) => "Hello.",
        (Speaker::User, Intent::Closing) => "Goodbye.",
        (Speaker::User, Intent::MultipleChoice) => "I have a few options in mind.",
        (Speaker::User, Intent::Thanks) => "Thank you.",
        (Speaker::User, Intent::Welcome) => "You are welcome.",
        (Speaker::User, Intent::Deny) => "No, that is not what I want.",
        (Speaker::User, Intent::NotSure) => "I am not sure.",
        (Speaker::Agent, Intent::Request) => "Let me ask you something.",
        (Speaker::Agent, Intent::Inform) => "Here is what I found.",
        (Speaker::Agent, Intent::ConfirmQuestion) => "Shall I confirm that?",
        (Speaker::Agent, Intent::ConfirmAnswer) => "Confirmed.",
        (Speaker::Agent, Intent::Greeting) => "Hi, how can I help?",
        (Speaker::Agent, Intent::Closing) => "Have a nice day.",
        (Speaker::Agent, Intent::MultipleChoice) => "Please choose one of these options.",
        (Speaker::Agent, Intent::Thanks) => "Thanks, enjoy!",
        (Speaker::Agent, Intent::Welcome) => "My pleasure.",
        (Speaker::Agent, Intent::Deny) => "Sorry, that is not available.",
        (Speaker::Agent, Intent::NotSure) => "I am not certain.",
    }
}

/// Deterministic generator rendering acts from fixed templates
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNlg;

impl TemplateNlg {
    pub fn new() -> Self {
        Self
    }
}

impl NaturalLanguageGenerator for TemplateNlg {
    fn act_to_text(&self, act: &DialogueAct, speaker: Speaker) -> Result<String, LanguageError> {
        let mut text = intent_phrase(act.intent, speaker).to_string();

        for (slot, value) in &act.inform_slots {
            text.push(' ');
            text.push_str(INFORM_PREFIX);
            text.push_str(slot);
            text.push_str(INFORM_INFIX);
            for c in value.chars() {
                if c == '"' || c == ESCAPE {
                    text.push(ESCAPE);
                }
                text.push(c);
            }
            text.push_str(INFORM_SUFFIX);
        }

        for slot in act.request_slots.keys() {
            text.push(' ');
            text.push_str(REQUEST_PREFIX);
            text.push_str(slot);
            text.push_str(REQUEST_SUFFIX);
        }

        Ok(text)
    }
}
