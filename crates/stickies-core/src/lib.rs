//! stickies-core - Core library for Stickies
//!
//! This crate contains the note model, the collection controller that owns
//! list/draft/pin state, and the clients for the managed data API and the
//! hosted identity service. The desktop UI is a thin layer over this crate.

pub mod api;
pub mod auth;
pub mod collection;
pub mod error;
pub mod models;
pub mod util;

pub use collection::NoteCollection;
pub use error::{ServiceError, ServiceResult};
pub use models::{Note, NoteId};
