//! Note model

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a note, assigned by the remote data service.
///
/// Opaque on the client: never generated locally, never interpreted. A note
/// has no id until the create round trip succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wrap a server-assigned identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Server-assigned unique identifier
    pub id: NoteId,
    /// Optional short title; `None` when the user left it blank
    pub header: Option<String>,
    /// Plain text body, non-empty after trimming
    pub content: String,
    /// Ordered tags; may be empty, duplicates permitted
    pub tags: Vec<String>,
}

impl Note {
    /// Title to show on a card; empty string when the note has no header.
    #[must_use]
    pub fn display_header(&self) -> &str {
        self.header.as_deref().unwrap_or("")
    }
}
