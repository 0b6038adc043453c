//! Business logic services for the portal.
//!
//! # Services
//!
//! - `auth` - Password hashing, registration, login and logout
//! - `session` - Deriving the signed-in user from the record collection

pub mod auth;
pub mod session;
