//! Home view - the notes screen shown once signed in

use dioxus::prelude::*;

use crate::components::{ConfirmDeleteDialog, HeaderBar, NoteForm, NoteGrid};
use crate::state::AppState;

/// Main screen: compose form, card grid, and the delete confirmation overlay.
#[component]
pub fn Home() -> Element {
    let mut state = use_context::<AppState>();
    let error_notice = (state.error_notice)();

    rsx! {
        div {
            class: "home-container",
            style: "
                min-height: 100vh;
                display: flex;
                flex-direction: column;
                background: #f3f4f6;
            ",

            HeaderBar {}

            div {
                class: "main-content",
                style: "flex: 1; padding: 16px; display: flex; flex-direction: column;",

                if let Some(message) = error_notice {
                    div {
                        class: "error-notice",
                        style: "
                            background: #fee2e2;
                            color: #991b1b;
                            border-radius: 4px;
                            padding: 8px 12px;
                            margin-bottom: 12px;
                            display: flex;
                            justify-content: space-between;
                            align-items: center;
                        ",
                        span { "{message}" }
                        button {
                            style: "border: none; background: transparent; cursor: pointer; color: #991b1b;",
                            onclick: move |_| state.error_notice.set(None),
                            "Dismiss"
                        }
                    }
                }

                NoteForm {}
                NoteGrid {}
            }

            ConfirmDeleteDialog {}
        }
    }
}
