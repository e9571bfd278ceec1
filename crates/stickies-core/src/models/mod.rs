//! Data models shared across the Stickies clients

mod draft;
mod note;

pub use draft::{join_tags, parse_tags, Draft, DraftMode, NoteInput};
pub use note::{Note, NoteId};
