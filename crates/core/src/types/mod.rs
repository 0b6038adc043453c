//! Core types for FleetMaster.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod record;

pub use email::{Email, EmailError};
pub use record::UserRecord;
