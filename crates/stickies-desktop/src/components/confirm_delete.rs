//! Delete confirmation dialog

use dioxus::prelude::*;

use super::actions::confirm_pending_delete;
use crate::state::AppState;

/// Blocking yes/no prompt shown before any delete request is sent.
///
/// The confirmation is part of the delete contract: until the user answers,
/// no remote call happens, and declining changes nothing.
#[component]
pub fn ConfirmDeleteDialog() -> Element {
    let mut state = use_context::<AppState>();

    if state.pending_delete.read().is_none() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "confirm-overlay",
            style: "
                position: fixed;
                inset: 0;
                background: rgba(0,0,0,0.4);
                display: flex;
                align-items: center;
                justify-content: center;
            ",

            div {
                class: "confirm-dialog",
                style: "
                    background: #ffffff;
                    border-radius: 8px;
                    padding: 24px;
                    max-width: 360px;
                    box-shadow: 0 4px 16px rgba(0,0,0,0.3);
                ",

                div {
                    style: "margin-bottom: 16px;",
                    "Are you sure you want to delete this note?"
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",

                    button {
                        style: "
                            background: transparent;
                            border: 1px solid #9ca3af;
                            border-radius: 4px;
                            padding: 6px 14px;
                            cursor: pointer;
                        ",
                        onclick: move |_| state.pending_delete.set(None),
                        "Cancel"
                    }
                    button {
                        style: "
                            background: #dc2626;
                            color: #ffffff;
                            border: none;
                            border-radius: 4px;
                            padding: 6px 14px;
                            cursor: pointer;
                        ",
                        onclick: move |_| confirm_pending_delete(&state),
                        "Delete"
                    }
                }
            }
        }
    }
}
