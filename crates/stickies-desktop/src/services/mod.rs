//! Application services
//!
//! Identity access with secure session storage.

mod auth;

pub use auth::IdentityService;
