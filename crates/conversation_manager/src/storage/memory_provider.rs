//! In-memory storage provider
//!
//! Default for tests and ephemeral runs. Each map write happens under one
//! write-lock acquisition, which gives the per-document atomicity the
//! update primitive requires.

use crate::error::Result;
use async_trait::async_trait;
use chat_core::{Branch, Conversation, ConversationSummary};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::provider::{HistoryMutation, MutationOutcome, StorageProvider};

#[derive(Default)]
pub struct MemoryStorageProvider {
    conversations: RwLock<HashMap<Uuid, Conversation>>,
    /// Insertion-ordered; listing filters by origin.
    branches: RwLock<Vec<Branch>>,
    indexes: RwLock<HashMap<String, Vec<ConversationSummary>>>,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    async fn insert_conversation(&self, conversation: &Conversation) -> Result<()> {
        let mut conversations = self.conversations.write().await;
        conversations.insert(conversation.id, conversation.clone());
        Ok(())
    }

    async fn find_conversation(&self, id: Uuid, owner_id: &str) -> Result<Option<Conversation>> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .get(&id)
            .filter(|c| c.owner_id == owner_id)
            .cloned())
    }

    async fn update_conversation(
        &self,
        id: Uuid,
        owner_id: &str,
        mutation: HistoryMutation,
    ) -> Result<MutationOutcome> {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(&id).filter(|c| c.owner_id == owner_id) {
            Some(conversation) => Ok(mutation.apply(conversation)),
            None => Ok(MutationOutcome::NotFound),
        }
    }

    async fn insert_branch(&self, branch: &Branch) -> Result<()> {
        let mut branches = self.branches.write().await;
        branches.push(branch.clone());
        Ok(())
    }

    async fn find_branches_by_origin(&self, origin_id: Uuid) -> Result<Vec<Branch>> {
        let branches = self.branches.read().await;
        Ok(branches
            .iter()
            .filter(|b| b.origin_conversation_id == origin_id)
            .cloned()
            .collect())
    }

    async fn append_index_entry(&self, owner_id: &str, entry: ConversationSummary) -> Result<()> {
        let mut indexes = self.indexes.write().await;
        indexes.entry(owner_id.to_string()).or_default().push(entry);
        Ok(())
    }

    async fn load_index(&self, owner_id: &str) -> Result<Vec<ConversationSummary>> {
        let indexes = self.indexes.read().await;
        Ok(indexes.get(owner_id).cloned().unwrap_or_default())
    }
}
