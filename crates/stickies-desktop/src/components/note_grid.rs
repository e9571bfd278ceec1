//! Note grid component

use dioxus::prelude::*;

use super::NoteCard;
use crate::state::AppState;

/// Sticky-note background colors, rotated per card.
const CARD_COLORS: [&str; 7] = [
    "#FFFACD", "#FFEB99", "#FFEEAD", "#E0BBE4", "#FFB3BA", "#BFFCC6", "#FFDFBA",
];

/// Grid of note cards, pinned notes first.
#[component]
pub fn NoteGrid() -> Element {
    let mut state = use_context::<AppState>();

    // Stable pinned-first partition over the authoritative order
    let ordered: Vec<_> = {
        let collection = state.collection.read();
        collection
            .display_order()
            .into_iter()
            .map(|note| (note.clone(), collection.is_pinned(&note.id)))
            .collect()
    };

    rsx! {
        if ordered.is_empty() {
            div {
                style: "padding: 32px; text-align: center; color: #6b7280;",
                "No notes yet"
            }
        } else {
            div {
                class: "note-grid",
                style: "
                    display: grid;
                    grid-template-columns: repeat(5, 1fr);
                    gap: 16px;
                    width: 100%;
                ",

                for (index, (note, pinned)) in ordered.into_iter().enumerate() {
                    {
                        let color = CARD_COLORS[index % CARD_COLORS.len()].to_string();
                        let pin_id = note.id.clone();
                        let delete_id = note.id.clone();
                        let edit_note = note.clone();

                        rsx! {
                            NoteCard {
                                key: "{note.id}",
                                note: note.clone(),
                                color,
                                pinned,
                                on_pin: move |_| {
                                    state.collection.write().toggle_pin(&pin_id);
                                },
                                on_edit: move |_| {
                                    state.collection.write().begin_edit(&edit_note);
                                },
                                on_delete: move |_| {
                                    state.pending_delete.set(Some(delete_id.clone()));
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}
