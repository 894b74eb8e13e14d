//! ConversationSummary - Per-owner listing entries
//!
//! Each conversation gets exactly one `{id, title}` entry in its owner's
//! index collection, written right after the conversation itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 40;

/// Truncate seed text to a listing title.
pub fn truncate_title(text: &str) -> String {
    text.chars().take(TITLE_MAX_CHARS).collect()
}

/// One navigation entry in an owner's conversation index.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    pub title: String,
}

impl ConversationSummary {
    pub fn new(conversation_id: Uuid, seed_text: &str) -> Self {
        Self {
            conversation_id,
            title: truncate_title(seed_text),
        }
    }
}
