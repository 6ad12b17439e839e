//! Language Adapters
//!
//! Implementations of the NaturalLanguageGenerator and
//! NaturalLanguageUnderstanding ports.
//!
//! ## Available Adapters
//!
//! - **TemplateNlg** - Renders acts from fixed per-intent templates
//! - **KeywordNlu** - Parses template utterances back into acts
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::language::{KeywordNlu, TemplateNlg};
//!
//! let nlg = TemplateNlg::new();
//! let text = nlg.act_to_text(&act, Speaker::User)?;
//!
//! let nlu = KeywordNlu::new(bundle.slots.clone());
//! let parsed = nlu.text_to_act(&text)?;
//! ```

mod keyword_nlu;
mod template_nlg;

pub use keyword_nlu::KeywordNlu;
pub use template_nlg::TemplateNlg;
