//! Storage provider trait and the conditional-update primitives

use crate::error::Result;
use async_trait::async_trait;
use chat_core::{Branch, Conversation, ConversationSummary, Turn};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The write shapes applied through [`StorageProvider::update_conversation`]:
/// a tail append, or a single-turn in-place edit.
#[derive(Clone, Debug)]
pub enum HistoryMutation {
    AppendTurns(Vec<Turn>),
    EditTurn {
        index: usize,
        new_text: String,
        edited_at: DateTime<Utc>,
    },
}

impl HistoryMutation {
    /// Apply the mutation to a loaded document. Providers call this inside
    /// their per-document critical section, so bounds are checked against
    /// the history as it exists at commit time.
    pub fn apply(self, conversation: &mut Conversation) -> MutationOutcome {
        match self {
            Self::AppendTurns(turns) => {
                conversation.append_turns(turns, Utc::now());
                MutationOutcome::Applied
            }
            Self::EditTurn {
                index,
                new_text,
                edited_at,
            } => {
                let len = conversation.history.len();
                if conversation.edit_turn(index, new_text, edited_at) {
                    MutationOutcome::Applied
                } else {
                    MutationOutcome::OutOfRange { index, len }
                }
            }
        }
    }
}

/// Result of a conditional update: whether the id+owner filter matched and,
/// if it did, whether the mutation was applicable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
    OutOfRange { index: usize, len: usize },
}

/// Document-store boundary.
///
/// Every conversation operation filters by id AND owner together; a
/// non-owner observes the same outcome as a missing document.
/// `update_conversation` must be atomic per document: two concurrent
/// appends never interleave, and a concurrent edit never lands on a stale
/// index.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    async fn insert_conversation(&self, conversation: &Conversation) -> Result<()>;

    async fn find_conversation(&self, id: Uuid, owner_id: &str) -> Result<Option<Conversation>>;

    /// Conditional update keyed by id+owner. Returns `NotFound` when the
    /// filter matches nothing; the mutation decides `Applied`/`OutOfRange`.
    async fn update_conversation(
        &self,
        id: Uuid,
        owner_id: &str,
        mutation: HistoryMutation,
    ) -> Result<MutationOutcome>;

    async fn insert_branch(&self, branch: &Branch) -> Result<()>;

    /// All branches forked from `origin_id`, in insertion order.
    async fn find_branches_by_origin(&self, origin_id: Uuid) -> Result<Vec<Branch>>;

    /// Append one entry to the owner's index, lazily creating the
    /// collection on first use.
    async fn append_index_entry(&self, owner_id: &str, entry: ConversationSummary) -> Result<()>;

    /// The owner's index entries, empty when no collection exists yet.
    async fn load_index(&self, owner_id: &str) -> Result<Vec<ConversationSummary>>;
}
