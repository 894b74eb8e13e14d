//! Turn - One role-tagged message unit within a conversation
//!
//! A turn is immutable once written, apart from the single edit-in-place
//! operation that rewrites its first fragment's text.

mod content;

pub use content::ContentPart;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a turn.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The human side of the exchange.
    User,
    /// The AI model side of the exchange.
    Model,
}

/// One message exchange unit. The role is fixed at creation; only the first
/// fragment's text (plus the edit markers) may change afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub role: TurnRole,

    /// Ordered content fragments. Never empty: every constructor produces
    /// exactly one fragment.
    pub parts: Vec<ContentPart>,

    /// Set once the turn's text has been altered after creation.
    #[serde(default)]
    pub edited: bool,

    /// Present iff `edited` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Turn {
    /// Create a user turn with a single text fragment
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![ContentPart::text(text)],
            edited: false,
            edited_at: None,
        }
    }

    /// Create a user turn carrying an attachment reference
    pub fn user_with_attachment(text: impl Into<String>, attachment: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            parts: vec![ContentPart::text(text).with_attachment(attachment)],
            edited: false,
            edited_at: None,
        }
    }

    /// Create a model turn with a single text fragment
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            parts: vec![ContentPart::text(text)],
            edited: false,
            edited_at: None,
        }
    }

    /// Text of the first fragment, or `""` for a turn deserialized with no
    /// fragments (constructors never produce one).
    pub fn text(&self) -> &str {
        self.parts.first().map(|p| p.text.as_str()).unwrap_or("")
    }

    /// Rewrite the first fragment's text and stamp the edit markers.
    /// The role and any further fragments are left untouched.
    pub fn apply_edit(&mut self, new_text: impl Into<String>, at: DateTime<Utc>) {
        if let Some(first) = self.parts.first_mut() {
            first.text = new_text.into();
        }
        self.edited = true;
        self.edited_at = Some(at);
    }
}
