//! HTTP transport for the branching chat history service.
//!
//! Thin glue over `conversation_manager`: controllers translate requests
//! into store calls and store error kinds into status codes. Identity
//! arrives pre-authenticated from the gateway (`X-User-Id` header) and is
//! trusted completely; this layer performs no authentication itself.

pub mod config;
pub mod controllers;
pub mod error;
pub mod identity;
pub mod server;

pub use config::ServiceConfig;
pub use error::AppError;
pub use server::{run, AppState};
