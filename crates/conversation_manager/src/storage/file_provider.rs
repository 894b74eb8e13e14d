//! File-based storage provider
//!
//! One JSON document per conversation, per origin's branch list, and per
//! owner's index, under a base directory:
//!
//! ```text
//! base_dir/
//! ├── conversations/{conversation_id}.json
//! ├── branches/{origin_id}.json
//! └── indexes/{owner_id}.json
//! ```
//!
//! Read-modify-write sequences are serialized through a per-document lock
//! map, which stands in for the document store's conditional update
//! primitive. Owner ids are used as file names and are assumed to be the
//! filesystem-safe opaque tokens the identity provider issues.

use crate::error::Result;
use async_trait::async_trait;
use chat_core::{Branch, Conversation, ConversationSummary};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::provider::{HistoryMutation, MutationOutcome, StorageProvider};

pub struct FileStorageProvider {
    base_dir: PathBuf,
    /// Per-document write serialization, keyed by document path.
    locks: RwLock<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl FileStorageProvider {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            locks: RwLock::new(HashMap::new()),
        }
    }

    fn conversation_path(&self, id: Uuid) -> PathBuf {
        self.base_dir.join("conversations").join(format!("{id}.json"))
    }

    fn branches_path(&self, origin_id: Uuid) -> PathBuf {
        self.base_dir.join("branches").join(format!("{origin_id}.json"))
    }

    fn index_path(&self, owner_id: &str) -> PathBuf {
        self.base_dir.join("indexes").join(format!("{owner_id}.json"))
    }

    async fn document_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.write().await;
        locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn read_document<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn write_document<T: serde::Serialize>(&self, path: &Path, document: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(document)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for FileStorageProvider {
    async fn insert_conversation(&self, conversation: &Conversation) -> Result<()> {
        let path = self.conversation_path(conversation.id);
        self.write_document(&path, conversation).await?;

        tracing::debug!(
            conversation_id = %conversation.id,
            path = %path.display(),
            "FileStorage: conversation written"
        );
        Ok(())
    }

    async fn find_conversation(&self, id: Uuid, owner_id: &str) -> Result<Option<Conversation>> {
        let path = self.conversation_path(id);
        let conversation: Option<Conversation> = self.read_document(&path).await?;
        // id+owner filter together: a foreign owner sees the same "missing
        // document" result as a bad id.
        Ok(conversation.filter(|c| c.owner_id == owner_id))
    }

    async fn update_conversation(
        &self,
        id: Uuid,
        owner_id: &str,
        mutation: HistoryMutation,
    ) -> Result<MutationOutcome> {
        let path = self.conversation_path(id);
        let lock = self.document_lock(&path).await;
        let _guard = lock.lock().await;

        let mut conversation = match self.find_conversation(id, owner_id).await? {
            Some(conversation) => conversation,
            None => return Ok(MutationOutcome::NotFound),
        };

        let outcome = mutation.apply(&mut conversation);
        if outcome == MutationOutcome::Applied {
            self.write_document(&path, &conversation).await?;
            tracing::debug!(
                conversation_id = %id,
                history_len = conversation.history.len(),
                "FileStorage: conversation updated"
            );
        }
        Ok(outcome)
    }

    async fn insert_branch(&self, branch: &Branch) -> Result<()> {
        let path = self.branches_path(branch.origin_conversation_id);
        let lock = self.document_lock(&path).await;
        let _guard = lock.lock().await;

        let mut branches: Vec<Branch> = self.read_document(&path).await?.unwrap_or_default();
        branches.push(branch.clone());
        self.write_document(&path, &branches).await?;

        tracing::debug!(
            branch_id = %branch.id,
            origin_id = %branch.origin_conversation_id,
            branch_count = branches.len(),
            "FileStorage: branch appended"
        );
        Ok(())
    }

    async fn find_branches_by_origin(&self, origin_id: Uuid) -> Result<Vec<Branch>> {
        let path = self.branches_path(origin_id);
        Ok(self.read_document(&path).await?.unwrap_or_default())
    }

    async fn append_index_entry(&self, owner_id: &str, entry: ConversationSummary) -> Result<()> {
        let path = self.index_path(owner_id);
        let lock = self.document_lock(&path).await;
        let _guard = lock.lock().await;

        let mut index: Vec<ConversationSummary> =
            self.read_document(&path).await?.unwrap_or_default();
        index.push(entry);
        self.write_document(&path, &index).await
    }

    async fn load_index(&self, owner_id: &str) -> Result<Vec<ConversationSummary>> {
        let path = self.index_path(owner_id);
        Ok(self.read_document(&path).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Turn;
    use chrono::Utc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_conversation_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorageProvider::new(dir.path());

        let conversation = Conversation::new("user_1", "Hello");
        storage.insert_conversation(&conversation).await.unwrap();

        let loaded = storage
            .find_conversation(conversation.id, "user_1")
            .await
            .unwrap();
        assert_eq!(loaded, Some(conversation));
    }

    #[tokio::test]
    async fn test_missing_conversation_is_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorageProvider::new(dir.path());

        let loaded = storage
            .find_conversation(Uuid::new_v4(), "user_1")
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_foreign_owner_sees_missing_document() {
        let dir = tempdir().unwrap();
        let storage = FileStorageProvider::new(dir.path());

        let conversation = Conversation::new("user_1", "Hello");
        storage.insert_conversation(&conversation).await.unwrap();

        let loaded = storage
            .find_conversation(conversation.id, "user_2")
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_edit_update_persists() {
        let dir = tempdir().unwrap();
        let storage = FileStorageProvider::new(dir.path());

        let conversation = Conversation::new("user_1", "Hello");
        storage.insert_conversation(&conversation).await.unwrap();

        let outcome = storage
            .update_conversation(
                conversation.id,
                "user_1",
                HistoryMutation::EditTurn {
                    index: 0,
                    new_text: "Hi".to_string(),
                    edited_at: Utc::now(),
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Applied);

        let loaded = storage
            .find_conversation(conversation.id, "user_1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.history[0].text(), "Hi");
        assert!(loaded.history[0].edited);
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileStorageProvider::new(dir.path()));

        let conversation = Conversation::new("user_1", "Hello");
        storage.insert_conversation(&conversation).await.unwrap();

        let first = {
            let storage = storage.clone();
            let id = conversation.id;
            tokio::spawn(async move {
                storage
                    .update_conversation(
                        id,
                        "user_1",
                        HistoryMutation::AppendTurns(vec![Turn::user("a"), Turn::model("b")]),
                    )
                    .await
            })
        };
        let second = {
            let storage = storage.clone();
            let id = conversation.id;
            tokio::spawn(async move {
                storage
                    .update_conversation(
                        id,
                        "user_1",
                        HistoryMutation::AppendTurns(vec![Turn::user("c"), Turn::model("d")]),
                    )
                    .await
            })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let loaded = storage
            .find_conversation(conversation.id, "user_1")
            .await
            .unwrap()
            .unwrap();
        // Both batches land whole: seed + 2 + 2.
        assert_eq!(loaded.history.len(), 5);
    }

    #[tokio::test]
    async fn test_branches_roundtrip_in_order() {
        let dir = tempdir().unwrap();
        let storage = FileStorageProvider::new(dir.path());

        let origin = Conversation::new("user_1", "Hello");
        let first = Branch::forked_from(&origin, 0, "first", Utc::now()).unwrap();
        let second = Branch::forked_from(&origin, 0, "second", Utc::now()).unwrap();
        storage.insert_branch(&first).await.unwrap();
        storage.insert_branch(&second).await.unwrap();

        let listed = storage.find_branches_by_origin(origin.id).await.unwrap();
        assert_eq!(
            listed.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
    }

    #[tokio::test]
    async fn test_index_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorageProvider::new(dir.path());

        assert!(storage.load_index("user_1").await.unwrap().is_empty());

        let id = Uuid::new_v4();
        storage
            .append_index_entry("user_1", ConversationSummary::new(id, "Hello"))
            .await
            .unwrap();

        let index = storage.load_index("user_1").await.unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].title, "Hello");
    }
}
