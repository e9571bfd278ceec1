//! Shared user-intent handlers used by UI components.
//!
//! Each remote mutation runs in three phases around the await: read and
//! validate from the collection, perform the single service call, then merge
//! the result back on success. Signal write guards are never held across the
//! await, and `busy` gates the submit affordances so only one mutation is in
//! flight at a time.

use dioxus::prelude::*;

use stickies_core::api::NoteService;
use stickies_core::models::{NoteId, NoteInput};

use crate::state::AppState;

enum PendingSave {
    Create(NoteInput),
    Update(NoteId, NoteInput),
}

/// Submit the draft: create when composing, update when editing.
///
/// A draft whose content trims to empty is rejected locally; no request is
/// made and the form keeps its values.
pub fn submit_draft(state: &AppState) {
    let mut state = *state;
    if (state.busy)() {
        return;
    }
    let Some(client) = state.notes_client.read().clone() else {
        return;
    };

    let pending = {
        let collection = state.collection.read();
        collection.edit_input().map_or_else(
            || collection.compose_input().map(PendingSave::Create),
            |(id, input)| Some(PendingSave::Update(id, input)),
        )
    };
    let Some(pending) = pending else {
        return;
    };

    state.busy.set(true);
    spawn(async move {
        match pending {
            PendingSave::Create(input) => match client.create_note(&input).await {
                Ok(note) => {
                    tracing::info!("Created note {}", note.id);
                    state.collection.write().apply_created(note);
                }
                Err(error) => state.report_error("Failed to create note", &error.to_string()),
            },
            PendingSave::Update(id, input) => match client.update_note(&id, &input).await {
                Ok(note) => {
                    tracing::info!("Updated note {}", note.id);
                    state.collection.write().apply_updated(note);
                }
                Err(error) => state.report_error("Failed to update note", &error.to_string()),
            },
        }
        state.busy.set(false);
    });
}

/// Delete the note the user just confirmed in the dialog.
pub fn confirm_pending_delete(state: &AppState) {
    let mut state = *state;
    if (state.busy)() {
        return;
    }
    let Some(id) = state.pending_delete.take() else {
        return;
    };
    let Some(client) = state.notes_client.read().clone() else {
        return;
    };

    state.busy.set(true);
    spawn(async move {
        match client.delete_note(&id).await {
            Ok(()) => {
                tracing::info!("Deleted note {}", id);
                state.collection.write().apply_deleted(&id);
            }
            Err(error) => state.report_error("Failed to delete note", &error.to_string()),
        }
        state.busy.set(false);
    });
}

/// Revoke the session and drop all per-user state.
pub fn sign_out(state: &AppState) {
    let mut state = *state;
    let identity = state.identity.read().clone();
    let session = state.session.read().clone();

    spawn(async move {
        if let (Some(identity), Some(session)) = (identity, session) {
            if let Err(error) = identity.sign_out(&session.access_token).await {
                tracing::warn!("Sign-out request failed: {}", error);
            }
        }
        state.clear_session_state();
    });
}
