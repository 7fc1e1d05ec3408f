//! Habitd API server binary.
//!
//! Opens the concrete store implementation and passes it to the API
//! layer, which stays agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use habitd::api::{self, ApiError, Config, auth::JwtAuthenticator};
use habitd::db::{DbError, SqliteHabitStore};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(habitd::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(habitd::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(habitd::binary::api))]
    Api(#[from] ApiError),

    #[error("Missing JWT secret")]
    #[diagnostic(
        code(habitd::binary::config),
        help("Pass --jwt-secret or set the HABITD_JWT_SECRET environment variable.")
    )]
    MissingSecret,
}

#[derive(Parser)]
#[command(name = "habitd-api")]
#[command(author, version, about = "Habitd API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Database file path
    #[arg(long, default_value = "habitd.db")]
    db: PathBuf,

    /// Shared secret for verifying bearer tokens (falls back to HABITD_JWT_SECRET)
    #[arg(long)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let secret = cli
        .jwt_secret
        .or_else(|| std::env::var("HABITD_JWT_SECRET").ok())
        .ok_or(BinaryError::MissingSecret)?;

    println!("Opening database at {:?}", cli.db);

    if let Some(parent) = cli.db.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let store = SqliteHabitStore::open(&cli.db).await?;
    store.migrate().await?;
    println!("Database migrations complete");

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        store,
        JwtAuthenticator::new(secret.as_bytes()),
    )
    .await?;

    Ok(())
}
