//! Note card component

use dioxus::prelude::*;

use stickies_core::models::Note;

/// A single sticky-note card in the grid.
#[component]
pub fn NoteCard(
    note: Note,
    color: String,
    pinned: bool,
    on_pin: EventHandler<MouseEvent>,
    on_edit: EventHandler<MouseEvent>,
    on_delete: EventHandler<MouseEvent>,
) -> Element {
    let pin_color = if pinned { "#dc2626" } else { "#1e3a8a" };
    let pin_title = if pinned { "Unpin note" } else { "Pin note" };

    rsx! {
        div {
            class: "note-card",
            style: "
                background: {color};
                border-radius: 4px;
                box-shadow: 0 2px 6px rgba(0,0,0,0.2);
                transform: rotate(-2deg);
                padding: 16px;
                min-height: 200px;
                display: flex;
                flex-direction: column;
            ",

            if !note.display_header().is_empty() {
                div {
                    class: "note-card-header",
                    style: "font-weight: 700; margin-bottom: 8px;",
                    "{note.display_header()}"
                }
            }

            div {
                class: "note-card-content",
                style: "flex: 1; white-space: pre-wrap; overflow: hidden;",
                "{note.content}"
            }

            if !note.tags.is_empty() {
                div {
                    class: "note-card-tags",
                    style: "display: flex; flex-wrap: wrap; gap: 4px; margin-top: 8px;",
                    for (index, tag) in note.tags.iter().enumerate() {
                        span {
                            key: "{index}",
                            style: "
                                background: rgba(0,0,0,0.08);
                                border-radius: 10px;
                                padding: 2px 8px;
                                font-size: 12px;
                            ",
                            "{tag}"
                        }
                    }
                }
            }

            div {
                class: "note-card-actions",
                style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 8px;",

                button {
                    title: "{pin_title}",
                    style: "border: none; background: transparent; cursor: pointer; color: {pin_color};",
                    onclick: move |evt| on_pin.call(evt),
                    "\u{1f4cc}"
                }
                button {
                    title: "Edit note",
                    style: "border: none; background: transparent; cursor: pointer; color: #1e3a8a;",
                    onclick: move |evt| on_edit.call(evt),
                    "\u{270e}"
                }
                button {
                    title: "Delete note",
                    style: "border: none; background: transparent; cursor: pointer; color: #dc2626;",
                    onclick: move |evt| on_delete.call(evt),
                    "\u{1f5d1}"
                }
            }
        }
    }
}
