//! FleetMaster CLI - inspect and repair the portal's user records.
//!
//! # Usage
//!
//! ```bash
//! # List every stored record
//! fleet-cli users list
//!
//! # Show one record
//! fleet-cli users show ops@acme.com
//!
//! # Show the first record flagged as logged in
//! fleet-cli users current
//!
//! # Clear a record's logged-in flag
//! fleet-cli users logout ops@acme.com
//! ```
//!
//! Storage location and key are read from the same environment variables as
//! the portal (`FLEET_DATA_DIR`, `FLEET_STORAGE_KEY`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fleet-cli")]
#[command(author, version, about = "FleetMaster operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and repair user records
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List every stored record
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the record for an email
    Show {
        /// Email address (exact, case-sensitive)
        email: String,
    },
    /// Show the first record flagged as logged in
    Current,
    /// Clear the logged-in flag of a record
    Logout {
        /// Email address (exact, case-sensitive)
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::users::UsersError> {
    let users = commands::users::open_repository()?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Users { action } => match action {
            UsersAction::List { json } => commands::users::list(&users, json, &mut out).await?,
            UsersAction::Show { email } => commands::users::show(&users, &email, &mut out).await?,
            UsersAction::Current => commands::users::current(&users, &mut out).await?,
            UsersAction::Logout { email } => {
                commands::users::logout(&users, &email, &mut out).await?;
            }
        },
    }
    Ok(())
}
