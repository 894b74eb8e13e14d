//! chat_core - Core types for the branching chat history model
//!
//! This crate provides the foundational types used across the history crates:
//! - `message` - Turn, TurnRole, ContentPart
//! - `conversation` - Conversation, the primary per-owner timeline
//! - `branch` - Branch, an independent copy-on-fork derivative
//! - `summary` - ConversationSummary entries for per-owner listings

pub mod branch;
pub mod conversation;
pub mod message;
pub mod summary;

// Re-export commonly used types
pub use branch::Branch;
pub use conversation::Conversation;
pub use message::{ContentPart, Turn, TurnRole};
pub use summary::{truncate_title, ConversationSummary, TITLE_MAX_CHARS};
