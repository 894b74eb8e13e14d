//! Branch - An independent copy-on-fork derivative of a conversation
//!
//! Editing a past turn does not rewrite shared history; it derives a branch
//! carrying a value copy of the origin's turns with the forked turn's text
//! replaced. The origin stays live and independently editable afterwards, so
//! the copy must be deep: sharing would let a later edit to the origin
//! silently alter a branch that was already frozen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::Conversation;
use crate::message::Turn;

/// A frozen snapshot of a conversation, forked at one edited turn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: Uuid,

    /// Weak reference back to the origin conversation: relation and lookup
    /// only. The branch outlives any edits to the origin.
    pub origin_conversation_id: Uuid,

    /// Value copy of the origin's history as of fork time, with the forked
    /// turn overwritten. Never reflects later mutations of the origin.
    pub branch_history: Vec<Turn>,

    pub created_at: DateTime<Utc>,
}

impl Branch {
    /// Fork `origin` at `fork_index`, replacing that turn's text with
    /// `new_text`. Returns None when `fork_index` is outside the origin's
    /// history; the origin is never mutated either way.
    pub fn forked_from(
        origin: &Conversation,
        fork_index: usize,
        new_text: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Option<Self> {
        if fork_index >= origin.history.len() {
            return None;
        }

        // Element-wise value copy. Turn owns all of its data, so a clone of
        // the vector shares nothing mutable with the origin.
        let mut branch_history = origin.history.clone();
        branch_history[fork_index].apply_edit(new_text, at);

        Some(Self {
            id: Uuid::new_v4(),
            origin_conversation_id: origin.id,
            branch_history,
            created_at: at,
        })
    }
}
