//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use std::sync::Arc;

use dioxus::prelude::*;

use stickies_core::api::NotesApiClient;
use stickies_core::auth::AuthSession;
use stickies_core::models::NoteId;
use stickies_core::NoteCollection;

use crate::services::IdentityService;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// The note collection controller: notes, draft, pins
    pub collection: Signal<NoteCollection>,
    /// Data API client for the current session, if signed in
    pub notes_client: Signal<Option<Arc<NotesApiClient>>>,
    /// Identity service if configured for this build
    pub identity: Signal<Option<Arc<IdentityService>>>,
    /// Active session, if signed in
    pub session: Signal<Option<AuthSession>>,
    /// Last remote failure, rendered as a dismissible notice
    pub error_notice: Signal<Option<String>>,
    /// Whether a mutation round trip is currently in flight
    pub busy: Signal<bool>,
    /// Note awaiting the user's delete confirmation, if any
    pub pending_delete: Signal<Option<NoteId>>,
}

impl AppState {
    /// Surface a remote failure to the user.
    pub fn report_error(&mut self, context: &str, message: &str) {
        tracing::error!("{}: {}", context, message);
        self.error_notice.set(Some(message.to_string()));
    }

    /// Drop everything tied to the signed-in user.
    pub fn clear_session_state(&mut self) {
        self.session.set(None);
        self.notes_client.set(None);
        self.collection.set(NoteCollection::new());
        self.pending_delete.set(None);
        self.error_notice.set(None);
    }
}
