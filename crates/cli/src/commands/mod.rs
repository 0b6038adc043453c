//! CLI command implementations.

pub mod users;
