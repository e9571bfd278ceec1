//! Main application component

use std::sync::Arc;

use dioxus::prelude::*;

use stickies_core::api::{NoteService, NotesApiClient};
use stickies_core::NoteCollection;

use crate::components::SignIn;
use crate::config::DesktopConfig;
use crate::services::IdentityService;
use crate::state::AppState;
use crate::views::Home;

/// Root application component
#[component]
pub fn App() -> Element {
    let config = use_signal(DesktopConfig::from_env);

    // State signals
    let collection = use_signal(NoteCollection::new);
    let mut notes_client = use_signal(|| None);
    let mut identity = use_signal(|| None);
    let mut session = use_signal(|| None);
    let mut error_notice = use_signal(|| None);
    let busy = use_signal(|| false);
    let pending_delete = use_signal(|| None);

    let mut state = use_context_provider(|| AppState {
        collection,
        notes_client,
        identity,
        session,
        error_notice,
        busy,
        pending_delete,
    });

    // Build the identity service once and try to restore a persisted session.
    use_future(move || async move {
        match IdentityService::new_from_config(&config()) {
            Ok(Some(service)) => {
                let service = Arc::new(service);
                identity.set(Some(service.clone()));
                match service.restore_session().await {
                    Ok(Some(restored)) => {
                        tracing::info!("Restored a persisted session");
                        session.set(Some(restored));
                    }
                    Ok(None) => {}
                    Err(error) => {
                        tracing::warn!("Session restore failed: {}", error);
                    }
                }
            }
            Ok(None) => {
                tracing::warn!("Identity service is not configured");
            }
            Err(error) => {
                error_notice.set(Some(error.to_string()));
            }
        }
    });

    // Once a session exists, build the data API client for it and fetch the
    // note list exactly once. The client is dropped again on sign-out.
    use_effect(move || {
        let Some(active) = session() else {
            return;
        };
        if notes_client.read().is_some() {
            return;
        }
        let Some(endpoint) = config.read().data_api_url.clone() else {
            error_notice.set(Some(
                "Data API is not configured. Set STICKIES_DATA_API_URL.".to_string(),
            ));
            return;
        };

        match NotesApiClient::new(endpoint, active.access_token) {
            Ok(client) => {
                let client = Arc::new(client);
                notes_client.set(Some(client.clone()));
                spawn(async move {
                    match client.list_notes().await {
                        Ok(notes) => {
                            tracing::info!("Loaded {} notes", notes.len());
                            state.collection.write().apply_listed(notes);
                        }
                        Err(error) => {
                            state.report_error("Failed to load notes", &error.to_string());
                        }
                    }
                });
            }
            Err(error) => {
                error_notice.set(Some(error.to_string()));
            }
        }
    });

    let signed_in = session.read().is_some();

    rsx! {
        div {
            class: "app-container",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
            ",

            if signed_in {
                Home {}
            } else {
                SignIn {}
            }
        }
    }
}
