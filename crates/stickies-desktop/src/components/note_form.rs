//! Compose/edit form component

use dioxus::prelude::*;

use super::actions::submit_draft;
use crate::state::AppState;

/// The single compose/edit form above the grid.
///
/// Bound directly to the collection's draft; the submit label follows the
/// draft mode. Editing can also be saved or cancelled inline on the card.
#[component]
pub fn NoteForm() -> Element {
    let mut state = use_context::<AppState>();
    let draft = state.collection.read().draft.clone();
    let editing = draft.editing_target().is_some();
    let busy = (state.busy)();

    let submit_label = if editing { "Update Note" } else { "Add Note" };

    rsx! {
        div {
            class: "note-form",
            style: "
                background: #ffffff;
                border-radius: 8px;
                box-shadow: 0 1px 4px rgba(0,0,0,0.15);
                padding: 16px;
                margin-bottom: 24px;
                display: flex;
                flex-direction: column;
                gap: 12px;
            ",

            input {
                class: "note-form-header",
                placeholder: "Optional title for the note",
                value: "{draft.header}",
                oninput: move |evt| {
                    state.collection.write().draft.header = evt.value();
                },
            }

            textarea {
                class: "note-form-content",
                rows: 4,
                placeholder: "Enter your note here...",
                value: "{draft.content}",
                oninput: move |evt| {
                    state.collection.write().draft.content = evt.value();
                },
            }

            input {
                class: "note-form-tags",
                placeholder: "Tags (comma separated), e.g. work,personal,urgent",
                value: "{draft.tags_input}",
                oninput: move |evt| {
                    state.collection.write().draft.tags_input = evt.value();
                },
            }

            div {
                style: "display: flex; gap: 8px;",

                button {
                    class: "note-form-submit",
                    style: "
                        background: #2563eb;
                        color: #ffffff;
                        border: none;
                        border-radius: 4px;
                        padding: 8px 16px;
                        cursor: pointer;
                    ",
                    disabled: busy,
                    onclick: move |_| submit_draft(&state),
                    "{submit_label}"
                }

                if editing {
                    button {
                        class: "note-form-cancel",
                        style: "
                            background: transparent;
                            border: 1px solid #9ca3af;
                            border-radius: 4px;
                            padding: 8px 16px;
                            cursor: pointer;
                        ",
                        onclick: move |_| state.collection.write().cancel_edit(),
                        "Cancel"
                    }
                }
            }
        }
    }
}
