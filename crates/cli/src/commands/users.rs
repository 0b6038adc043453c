//! User record commands.
//!
//! # Environment Variables
//!
//! - `FLEET_DATA_DIR` - Directory holding the record storage (default: data)
//! - `FLEET_STORAGE_KEY` - Key of the user-record collection (default: fleetUser)

use std::io::Write;

use fleetmaster_core::UserRecord;
use fleetmaster_portal::config::{ConfigError, PortalConfig};
use fleetmaster_portal::db::users::{UserRepository, find_index_by_email};
use fleetmaster_portal::db::{self, RepositoryError};
use fleetmaster_portal::services::auth::{AuthError, AuthService};
use fleetmaster_portal::services::session::current_user;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during user record operations.
#[derive(Debug, Error)]
pub enum UsersError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record storage could not be read or written.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Auth service failure.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// No record has this email.
    #[error("No user record with email: {0}")]
    NotFound(String),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record as printed by the CLI. The password digest is never shown.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordView<'a> {
    email: &'a str,
    business_name: &'a str,
    is_logged_in: bool,
}

impl<'a> From<&'a UserRecord> for RecordView<'a> {
    fn from(record: &'a UserRecord) -> Self {
        Self {
            email: record.email.as_str(),
            business_name: &record.business_name,
            is_logged_in: record.is_logged_in,
        }
    }
}

fn write_record(out: &mut impl Write, record: &UserRecord) -> std::io::Result<()> {
    writeln!(out, "Email:         {}", record.email)?;
    writeln!(out, "Business name: {}", record.business_name)?;
    writeln!(
        out,
        "Logged in:     {}",
        if record.is_logged_in { "yes" } else { "no" }
    )
}

/// Open the repository described by the environment.
///
/// # Errors
///
/// Returns `UsersError::Config` if an environment variable is invalid.
pub fn open_repository() -> Result<UserRepository, UsersError> {
    let config = PortalConfig::from_env()?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Opening user records"
    );

    Ok(UserRepository::new(
        db::create_storage(&config),
        config.storage_key,
    ))
}

/// List every stored record.
///
/// # Errors
///
/// Returns `UsersError` if the records cannot be read or printed.
pub async fn list(
    users: &UserRepository,
    json: bool,
    out: &mut impl Write,
) -> Result<(), UsersError> {
    let records = users.load().await?;

    if json {
        let views: Vec<RecordView<'_>> = records.iter().map(RecordView::from).collect();
        serde_json::to_writer_pretty(&mut *out, &views)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No user records.")?;
        return Ok(());
    }

    writeln!(out, "{:<32} {:<32} LOGGED IN", "EMAIL", "BUSINESS NAME")?;
    for record in &records {
        writeln!(
            out,
            "{:<32} {:<32} {}",
            record.email,
            record.business_name,
            if record.is_logged_in { "yes" } else { "no" }
        )?;
    }
    writeln!(out, "{} record(s)", records.len())?;

    Ok(())
}

/// Show the record for `email`.
///
/// # Errors
///
/// Returns `UsersError::NotFound` if no record has this email.
pub async fn show(users: &UserRepository, email: &str, out: &mut impl Write) -> Result<(), UsersError> {
    let records = users.load().await?;
    let record = find_index_by_email(&records, email)
        .and_then(|i| records.get(i))
        .ok_or_else(|| UsersError::NotFound(email.to_owned()))?;

    write_record(out, record)?;
    Ok(())
}

/// Show the first record flagged as logged in.
///
/// # Errors
///
/// Returns `UsersError` if the records cannot be read or printed.
pub async fn current(users: &UserRepository, out: &mut impl Write) -> Result<(), UsersError> {
    let records = users.load().await?;

    match current_user(&records) {
        Some(record) => write_record(out, record)?,
        None => writeln!(out, "No user is logged in.")?,
    }

    Ok(())
}

/// Clear the logged-in flag of the record for `email`.
///
/// # Errors
///
/// Returns `UsersError::NotFound` if no record has this email.
pub async fn logout(
    users: &UserRepository,
    email: &str,
    out: &mut impl Write,
) -> Result<(), UsersError> {
    let record = AuthService::new(users)
        .logout(email)
        .await?
        .ok_or_else(|| UsersError::NotFound(email.to_owned()))?;

    tracing::info!(email = %record.email, "Logged-in flag cleared");
    writeln!(out, "Logged out {}", record.email)?;
    Ok(())
}
