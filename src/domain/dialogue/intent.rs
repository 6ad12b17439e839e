//! Dialogue intents and speakers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The closed set of dialogue intents shared by user and agent.
///
/// Wire names are snake_case and match the act vocabulary files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Asks for the value of one or more slots.
    Request,
    /// Provides values for one or more slots.
    Inform,
    ConfirmQuestion,
    ConfirmAnswer,
    Greeting,
    /// Ends the dialogue.
    Closing,
    /// Offers several candidate values for a slot.
    MultipleChoice,
    Thanks,
    Welcome,
    /// Rejects the last proposal.
    Deny,
    NotSure,
}

impl Intent {
    /// Every intent, in canonical act-vocabulary order.
    pub const ALL: [Intent; 11] = [
        Intent::Request,
        Intent::Inform,
        Intent::ConfirmQuestion,
        Intent::ConfirmAnswer,
        Intent::Greeting,
        Intent::Closing,
        Intent::MultipleChoice,
        Intent::Thanks,
        Intent::Welcome,
        Intent::Deny,
        Intent::NotSure,
    ];

    /// Returns the wire name of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Inform => "inform",
            Self::ConfirmQuestion => "confirm_question",
            Self::ConfirmAnswer => "confirm_answer",
            Self::Greeting => "greeting",
            Self::Closing => "closing",
            Self::MultipleChoice => "multiple_choice",
            Self::Thanks => "thanks",
            Self::Welcome => "welcome",
            Self::Deny => "deny",
            Self::NotSure => "not_sure",
        }
    }

    /// Returns true for intents that end the episode when the agent uses them.
    pub fn ends_episode(&self) -> bool {
        matches!(self, Self::Closing | Self::Thanks)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("intent", format!("unknown intent '{}'", s)))
    }
}

/// Who produced a dialogue turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "usr")]
    User,
    #[serde(rename = "agt")]
    Agent,
}

impl Speaker {
    /// Returns the wire name of the speaker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "usr",
            Self::Agent => "agt",
        }
    }

    /// Returns the other participant.
    pub fn other(&self) -> Self {
        match self {
            Self::User => Self::Agent,
            Self::Agent => Self::User,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
