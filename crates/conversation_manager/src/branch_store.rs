//! BranchStore - creation and enumeration of forked branches
//!
//! Forking reads the origin and writes a new, independent branch document;
//! the origin is never written. A concurrent edit to the origin between the
//! read and the branch write is tolerated: the branch reflects the snapshot
//! as of its read (last observed state wins).

use crate::error::{HistoryError, Result};
use crate::storage::StorageProvider;
use chat_core::Branch;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct BranchStore<S: StorageProvider> {
    storage: Arc<S>,
}

impl<S: StorageProvider> BranchStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Derive a new branch from `(conversation_id, owner_id)` by editing the
    /// turn at `fork_index`. The branch carries a deep copy of the origin's
    /// history, so later edits to the origin can never reach it. Fan-out is
    /// unbounded; any index may be forked any number of times.
    ///
    /// Not internally retried: a replayed call would create a second branch.
    pub async fn create(
        &self,
        conversation_id: Uuid,
        owner_id: &str,
        fork_index: usize,
        new_text: &str,
    ) -> Result<Branch> {
        if new_text.trim().is_empty() {
            return Err(HistoryError::Validation(
                "branch text cannot be empty".to_string(),
            ));
        }

        let origin = self
            .storage
            .find_conversation(conversation_id, owner_id)
            .await?
            .ok_or(HistoryError::NotFound)?;

        let branch = Branch::forked_from(&origin, fork_index, new_text, Utc::now()).ok_or(
            HistoryError::OutOfRange {
                index: fork_index,
                len: origin.history.len(),
            },
        )?;

        self.storage.insert_branch(&branch).await?;

        tracing::info!(
            branch_id = %branch.id,
            origin_id = %conversation_id,
            fork_index = fork_index,
            "BranchStore: branch created"
        );

        Ok(branch)
    }

    /// All branches forked from `origin_id`, in creation order. No ownership
    /// filter is applied here: the caller must already have proven ownership
    /// of the origin (by loading it) before enumerating its branches.
    pub async fn list_by_origin(&self, origin_id: Uuid) -> Result<Vec<Branch>> {
        self.storage.find_branches_by_origin(origin_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation_store::ConversationStore;
    use crate::storage::MemoryStorageProvider;
    use chat_core::Turn;

    fn stores() -> (
        ConversationStore<MemoryStorageProvider>,
        BranchStore<MemoryStorageProvider>,
    ) {
        let storage = Arc::new(MemoryStorageProvider::new());
        (
            ConversationStore::new(storage.clone()),
            BranchStore::new(storage),
        )
    }

    #[tokio::test]
    async fn test_branch_scenario_from_three_turn_history() {
        let (conversations, branches) = stores();
        let conversation = conversations.create("user_1", "Hello").await.unwrap();
        conversations
            .append_turns(
                conversation.id,
                "user_1",
                vec![Turn::user("2+2?"), Turn::model("4")],
            )
            .await
            .unwrap();

        let branch = branches
            .create(conversation.id, "user_1", 1, "3+3?")
            .await
            .unwrap();

        assert_eq!(branch.branch_history.len(), 3);
        assert_eq!(branch.branch_history[1].text(), "3+3?");
        assert!(branch.branch_history[1].edited);

        // The origin still reads "2+2?" at the fork point.
        let origin = conversations.get(conversation.id, "user_1").await.unwrap();
        assert_eq!(origin.history[1].text(), "2+2?");
        assert!(!origin.history[1].edited);
    }

    #[tokio::test]
    async fn test_branch_survives_later_origin_edits_unchanged() {
        let (conversations, branches) = stores();
        let conversation = conversations.create("user_1", "Hello").await.unwrap();
        conversations
            .append_turns(
                conversation.id,
                "user_1",
                vec![Turn::user("2+2?"), Turn::model("4")],
            )
            .await
            .unwrap();

        let branch = branches
            .create(conversation.id, "user_1", 1, "3+3?")
            .await
            .unwrap();
        let frozen = serde_json::to_string(&branch.branch_history).unwrap();

        conversations
            .edit_turn_text(conversation.id, "user_1", 0, "rewritten")
            .await
            .unwrap();
        conversations
            .edit_turn_text(conversation.id, "user_1", 2, "5")
            .await
            .unwrap();

        let listed = branches.list_by_origin(conversation.id).await.unwrap();
        assert_eq!(
            serde_json::to_string(&listed[0].branch_history).unwrap(),
            frozen
        );
    }

    #[tokio::test]
    async fn test_two_branches_at_different_indices_are_independent() {
        let (conversations, branches) = stores();
        let conversation = conversations.create("user_1", "Hello").await.unwrap();
        conversations
            .append_turns(
                conversation.id,
                "user_1",
                vec![Turn::user("2+2?"), Turn::model("4")],
            )
            .await
            .unwrap();

        let first = branches
            .create(conversation.id, "user_1", 0, "Hey")
            .await
            .unwrap();
        let second = branches
            .create(conversation.id, "user_1", 2, "22")
            .await
            .unwrap();

        let listed = branches.list_by_origin(conversation.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);

        // Neither branch reflects the other's edit.
        assert_eq!(listed[0].branch_history[2].text(), "4");
        assert_eq!(listed[1].branch_history[0].text(), "Hello");
    }

    #[tokio::test]
    async fn test_branch_from_foreign_owner_is_not_found() {
        let (conversations, branches) = stores();
        let conversation = conversations.create("owner_a", "Hello").await.unwrap();

        let err = branches
            .create(conversation.id, "owner_b", 0, "hijack")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::NotFound));
    }

    #[tokio::test]
    async fn test_branch_index_out_of_range() {
        let (conversations, branches) = stores();
        let conversation = conversations.create("user_1", "Hello").await.unwrap();

        let err = branches
            .create(conversation.id, "user_1", 1, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::OutOfRange { index: 1, len: 1 }));
    }

    #[tokio::test]
    async fn test_branch_rejects_empty_text() {
        let (conversations, branches) = stores();
        let conversation = conversations.create("user_1", "Hello").await.unwrap();

        let err = branches
            .create(conversation.id, "user_1", 0, " ")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::Validation(_)));
    }
}
