//! # Conversation Manager
//!
//! Append-only conversation stores with edit-to-fork branching.
//!
//! A conversation is the primary timeline a user appends to; editing a past
//! turn derives an independent [`chat_core::Branch`] instead of rewriting
//! shared history. This crate provides the store surfaces over both entity
//! types plus the per-owner index used for navigation listings.

pub mod branch_store;
pub mod conversation_store;
pub mod error;
pub mod storage;

// Re-exports
pub use branch_store::BranchStore;
pub use conversation_store::ConversationStore;
pub use error::HistoryError;
pub use storage::{
    FileStorageProvider, HistoryMutation, MemoryStorageProvider, MutationOutcome, StorageProvider,
};
