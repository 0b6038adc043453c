//! Domain models for the portal.
//!
//! The persisted [`UserRecord`](fleetmaster_core::UserRecord) lives in the core
//! crate; this module holds what the portal keeps per visitor.

pub mod session;

pub use session::{CurrentUser, keys as session_keys};
