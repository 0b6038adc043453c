//! FleetMaster Core - Shared domain types.
//!
//! This crate provides the types shared by every FleetMaster component:
//! - `portal` - The web portal (landing page, auth forms, dashboard)
//! - `cli` - Operator tooling for the user-record collection
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated email addresses and the persisted user record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
