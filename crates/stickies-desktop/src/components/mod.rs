//! UI Components
//!
//! Reusable UI components for the desktop application.

pub mod actions;
mod confirm_delete;
mod header_bar;
mod note_card;
mod note_form;
mod note_grid;
mod sign_in;

pub use confirm_delete::ConfirmDeleteDialog;
pub use header_bar::HeaderBar;
pub use note_card::NoteCard;
pub use note_form::NoteForm;
pub use note_grid::NoteGrid;
pub use sign_in::SignIn;
