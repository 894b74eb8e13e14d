//! Storage providers for conversation documents
//!
//! The provider boundary assumes a document store with atomic per-document
//! create/read/conditional-update and collection-scoped find, keyed by
//! opaque ids. Providers are initialized once at process start and live for
//! the process lifetime.

pub mod file_provider;
pub mod memory_provider;
pub mod provider;

pub use file_provider::FileStorageProvider;
pub use memory_provider::MemoryStorageProvider;
pub use provider::{HistoryMutation, MutationOutcome, StorageProvider};
