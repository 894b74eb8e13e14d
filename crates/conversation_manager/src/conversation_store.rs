//! ConversationStore - append-only mutation surface over conversations
//!
//! Mutating operations are NOT retried internally: without an idempotency
//! key a replayed append or edit is an at-least-once risk, so persistence
//! failures surface to the caller instead. Pure reads are safe to retry at
//! the call site.

use crate::error::{HistoryError, Result};
use crate::storage::{HistoryMutation, MutationOutcome, StorageProvider};
use chat_core::{Conversation, ConversationSummary, Turn};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct ConversationStore<S: StorageProvider> {
    storage: Arc<S>,
}

impl<S: StorageProvider> ConversationStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Create a conversation seeded with one user turn, then append the
    /// `{id, title}` entry to the owner's index. The index append runs
    /// after the primary write and is best-effort relative to it: a failure
    /// is reported through the error log, not returned, since the
    /// conversation itself was already durably created.
    pub async fn create(&self, owner_id: &str, seed_text: &str) -> Result<Conversation> {
        if seed_text.trim().is_empty() {
            return Err(HistoryError::Validation(
                "seed text cannot be empty".to_string(),
            ));
        }

        let conversation = Conversation::new(owner_id, seed_text);
        self.storage.insert_conversation(&conversation).await?;

        tracing::info!(
            conversation_id = %conversation.id,
            owner_id = %owner_id,
            "ConversationStore: conversation created"
        );

        let entry = ConversationSummary::new(conversation.id, seed_text);
        if let Err(err) = self.storage.append_index_entry(owner_id, entry).await {
            tracing::error!(
                conversation_id = %conversation.id,
                owner_id = %owner_id,
                error = %err,
                "ConversationStore: index append failed; conversation missing from listings"
            );
        }

        Ok(conversation)
    }

    /// Atomically append one or more turns to the history.
    pub async fn append_turns(
        &self,
        conversation_id: Uuid,
        owner_id: &str,
        turns: Vec<Turn>,
    ) -> Result<()> {
        if turns.is_empty() {
            return Err(HistoryError::Validation(
                "turn batch cannot be empty".to_string(),
            ));
        }
        if turns.iter().any(|t| t.text().trim().is_empty()) {
            return Err(HistoryError::Validation(
                "turn text cannot be empty".to_string(),
            ));
        }

        let outcome = self
            .storage
            .update_conversation(conversation_id, owner_id, HistoryMutation::AppendTurns(turns))
            .await?;
        outcome_to_result(outcome)
    }

    /// Edit `history[index]` of the origin conversation in place. This never
    /// branches; retroactive forking lives in
    /// [`crate::branch_store::BranchStore`].
    pub async fn edit_turn_text(
        &self,
        conversation_id: Uuid,
        owner_id: &str,
        index: usize,
        new_text: &str,
    ) -> Result<()> {
        if new_text.trim().is_empty() {
            return Err(HistoryError::Validation(
                "edit text cannot be empty".to_string(),
            ));
        }

        let outcome = self
            .storage
            .update_conversation(
                conversation_id,
                owner_id,
                HistoryMutation::EditTurn {
                    index,
                    new_text: new_text.to_string(),
                    edited_at: Utc::now(),
                },
            )
            .await?;
        outcome_to_result(outcome)
    }

    pub async fn get(&self, conversation_id: Uuid, owner_id: &str) -> Result<Conversation> {
        self.storage
            .find_conversation(conversation_id, owner_id)
            .await?
            .ok_or(HistoryError::NotFound)
    }

    /// The owner's navigation listing. Eventually consistent with creates:
    /// an entry lands at least once, normally immediately after the
    /// conversation write.
    pub async fn list(&self, owner_id: &str) -> Result<Vec<ConversationSummary>> {
        self.storage.load_index(owner_id).await
    }
}

fn outcome_to_result(outcome: MutationOutcome) -> Result<()> {
    match outcome {
        MutationOutcome::Applied => Ok(()),
        MutationOutcome::NotFound => Err(HistoryError::NotFound),
        MutationOutcome::OutOfRange { index, len } => Err(HistoryError::OutOfRange { index, len }),
    }
}
