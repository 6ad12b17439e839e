//! Keyword-based natural-language understanding.
//!
//! Recovers acts from utterances produced by [`TemplateNlg`](super::TemplateNlg):
//! the leading phrase gives the intent, and the slot sentences give the
//! informed and requested slots. Slot names must belong to the slot
//! vocabulary.

use crate::domain::dialogue::{DialogueAct, Intent, Speaker};
use crate::domain::foundation::sentinels::UNKNOWN_SLOT_VALUE;
use crate::domain::foundation::Vocabulary;
use crate::ports::{LanguageError, NaturalLanguageUnderstanding};

use super::template_nlg::{
    intent_phrase, ESCAPE, INFORM_INFIX, INFORM_PREFIX, INFORM_SUFFIX, REQUEST_PREFIX,
    REQUEST_SUFFIX,
};

/// Parser for template utterances
#[derive(Debug, Clone)]
pub struct KeywordNlu {
    slots: Vocabulary,
}

impl KeywordNlu {
    pub fn new(slots: Vocabulary) -> Self {
        Self { slots }
    }

    fn leading_intent<'t>(&self, text: &'t str) -> Option<(Intent, &'t str)> {
        [Speaker::User, Speaker::Agent]
            .into_iter()
            .flat_map(|speaker| Intent::ALL.into_iter().map(move |intent| (intent, intent_phrase(intent, speaker))))
            .filter(|(_, phrase)| text.starts_with(phrase))
            .max_by_key(|(_, phrase)| phrase.len())
            .map(|(intent, phrase)| (intent, &text[phrase.len()..]))
    }

    fn known_slot<'t>(&self, text: &str, slot: &'t str) -> Result<&'t str, LanguageError> {
        if self.slots.contains(slot) {
            Ok(slot)
        } else {
            Err(failure(text, format!("unknown slot '{}'", slot)))
        }
    }
}

impl NaturalLanguageUnderstanding for KeywordNlu {
    fn text_to_act(&self, text: &str) -> Result<DialogueAct, LanguageError> {
        let trimmed = text.trim();
        let (intent, mut rest) = self
            .leading_intent(trimmed)
            .ok_or_else(|| failure(text, "no known intent phrase"))?;
        let mut act = DialogueAct::new(intent);

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            if let Some(after) = rest.strip_prefix(REQUEST_PREFIX) {
                let (slot, tail) = after
                    .split_once(REQUEST_SUFFIX)
                    .ok_or_else(|| failure(text, "unterminated question"))?;
                act.request_slots
                    .insert(self.known_slot(text, slot)?.to_string(), UNKNOWN_SLOT_VALUE.to_string());
                rest = tail;
            } else if let Some(after) = rest.strip_prefix(INFORM_PREFIX) {
                let (slot, tail) = after
                    .split_once(INFORM_INFIX)
                    .ok_or_else(|| failure(text, "inform sentence without a value"))?;
                let (value, tail) =
                    unquote(tail).ok_or_else(|| failure(text, "unterminated value"))?;
                act.inform_slots
                    .insert(self.known_slot(text, slot)?.to_string(), value);
                rest = tail;
            } else {
                return Err(failure(text, format!("unexpected text '{}'", rest)));
            }
        }

        Ok(act)
    }
}

/// Reads an escaped value up to the closing `".`, returning the value and
/// the text after it.
fn unquote(text: &str) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = text.char_indices();
    while let Some((index, c)) = chars.next() {
        if c == ESCAPE {
            value.push(chars.next()?.1);
        } else if text[index..].starts_with(INFORM_SUFFIX) {
            return Some((value, &text[index + INFORM_SUFFIX.len()..]));
        } else {
            value.push(c);
        }
    }
    None
}

fn failure(text: &str, reason: impl Into<String>) -> LanguageError {
    LanguageError::Understanding {
        text: text.to_string(),
        reason: reason.into(),
    }
}
