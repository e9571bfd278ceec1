//! Compose/edit draft state and input normalization.

use serde::Serialize;

use crate::models::{Note, NoteId};
use crate::util::normalize_text_option;

/// Whether the draft composes a new note or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftMode {
    /// Composing a note that does not exist yet
    #[default]
    Composing,
    /// Editing the note with the given id
    Editing(NoteId),
}

/// Transient form state for the compose/edit form.
///
/// Exactly one draft exists at a time; it is never persisted. The draft is
/// reset on save success and explicit cancel, and left populated after a
/// failed save so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    /// Raw title field, may be blank
    pub header: String,
    /// Raw body field
    pub content: String,
    /// Raw comma-separated tags field
    pub tags_input: String,
    /// Compose vs. edit
    pub mode: DraftMode,
}

impl Draft {
    /// Reset to the empty composing state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pre-populate the draft from an existing note for editing.
    #[must_use]
    pub fn for_note(note: &Note) -> Self {
        Self {
            header: note.header.clone().unwrap_or_default(),
            content: note.content.clone(),
            tags_input: join_tags(&note.tags),
            mode: DraftMode::Editing(note.id.clone()),
        }
    }

    /// Id of the note currently being edited, if any.
    #[must_use]
    pub fn editing_target(&self) -> Option<&NoteId> {
        match &self.mode {
            DraftMode::Composing => None,
            DraftMode::Editing(id) => Some(id),
        }
    }

    /// Normalize the raw fields into a service input.
    ///
    /// Returns `None` when the content trims to empty; no remote call may be
    /// attempted for such a draft.
    #[must_use]
    pub fn to_input(&self) -> Option<NoteInput> {
        let content = self.content.trim();
        if content.is_empty() {
            return None;
        }
        Some(NoteInput {
            header: normalize_text_option(Some(self.header.clone())),
            content: content.to_string(),
            tags: parse_tags(&self.tags_input),
        })
    }
}

/// Normalized note fields sent to the remote data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteInput {
    /// Title, already normalized to `None` when blank
    pub header: Option<String>,
    /// Trimmed non-empty body
    pub content: String,
    /// Parsed tags in input order
    pub tags: Vec<String>,
}

/// Parse a comma-separated tag string into trimmed, non-empty tokens.
///
/// Order is preserved and duplicates are kept; empty tokens are dropped.
///
/// # Examples
///
/// ```
/// use stickies_core::models::parse_tags;
///
/// let tags = parse_tags("work, personal ,, urgent");
/// assert_eq!(tags, vec!["work", "personal", "urgent"]);
/// ```
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags back into the display form shown in the tags field.
#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
