//! ContentPart - Turn content fragments
//!
//! Defines the content fragments that make up a turn.

use serde::{Deserialize, Serialize};

/// One fragment of a turn's content: text plus an optional opaque
/// attachment reference (e.g. an image path supplied by the upload service).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContentPart {
    pub text: String,

    /// Opaque attachment reference. Stored verbatim, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl ContentPart {
    /// Create a text-only content part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    /// Attach an opaque reference to this part
    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }
}
