//! Conversation - The primary, append-only owned timeline
//!
//! A conversation is created with exactly one seed user turn and only ever
//! grows, apart from the single-turn edit-in-place operation. The owner id
//! partitions all reads and writes; there is no cross-owner access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Turn;
use crate::summary::truncate_title;

/// An owned, ordered sequence of turns.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Assigned at creation, never reused.
    pub id: Uuid,

    /// Owning user. Immutable.
    pub owner_id: String,

    /// Never empty after creation.
    pub history: Vec<Turn>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a conversation seeded with one user turn.
    pub fn new(owner_id: impl Into<String>, seed_text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            history: vec![Turn::user(seed_text)],
            created_at: now,
            updated_at: now,
        }
    }

    /// Listing title: the seed turn's text, truncated.
    pub fn title(&self) -> String {
        truncate_title(self.history.first().map(|t| t.text()).unwrap_or(""))
    }

    /// Append turns to the end of the history.
    pub fn append_turns(&mut self, turns: Vec<Turn>, at: DateTime<Utc>) {
        self.history.extend(turns);
        self.updated_at = at;
    }

    /// Edit `history[index]` in place. Returns false when the index is
    /// outside the current history, leaving the conversation untouched.
    pub fn edit_turn(&mut self, index: usize, new_text: impl Into<String>, at: DateTime<Utc>) -> bool {
        match self.history.get_mut(index) {
            Some(turn) => {
                turn.apply_edit(new_text, at);
                self.updated_at = at;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TurnRole;

    #[test]
    fn test_new_conversation_has_one_seed_turn() {
        let conversation = Conversation::new("user_1", "Hello");
        assert_eq!(conversation.history.len(), 1);
        assert_eq!(conversation.history[0].role, TurnRole::User);
        assert_eq!(conversation.history[0].text(), "Hello");
        assert_eq!(conversation.owner_id, "user_1");
    }

    #[test]
    fn test_title_comes_from_seed_turn() {
        let conversation = Conversation::new("user_1", "Hello there, how do branches work?");
        assert_eq!(conversation.title(), "Hello there, how do branches work?");
    }

    #[test]
    fn test_append_turns_extends_history() {
        let mut conversation = Conversation::new("user_1", "Hello");
        conversation.append_turns(vec![Turn::user("2+2?"), Turn::model("4")], Utc::now());

        assert_eq!(conversation.history.len(), 3);
        assert_eq!(conversation.history[1].text(), "2+2?");
        assert_eq!(conversation.history[2].text(), "4");
    }

    #[test]
    fn test_edit_turn_in_bounds() {
        let mut conversation = Conversation::new("user_1", "Hello");
        let at = Utc::now();
        assert!(conversation.edit_turn(0, "Hi", at));
        assert_eq!(conversation.history[0].text(), "Hi");
        assert!(conversation.history[0].edited);
        assert_eq!(conversation.updated_at, at);
    }

    #[test]
    fn test_edit_turn_out_of_bounds_is_a_noop() {
        let mut conversation = Conversation::new("user_1", "Hello");
        let before = conversation.clone();
        assert!(!conversation.edit_turn(1, "nope", Utc::now()));
        assert_eq!(conversation, before);
    }
}
