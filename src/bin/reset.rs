//! Habitd reset binary.
//!
//! Runs one reset pass over the store and exits: every habit that is both
//! 'done' and active moves back to 'pending'. Intended to be invoked once
//! daily by cron or an orchestrator job; the cadence lives entirely in the
//! scheduler. Per-habit persistence failures are logged and do not fail
//! the process; an unreadable store does.

use std::path::PathBuf;

use clap::Parser;
use habitd::db::{DbError, SqliteHabitStore};
use habitd::reset::run_reset;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(habitd::binary::database))]
    Database(#[from] DbError),
}

#[derive(Parser)]
#[command(name = "habitd-reset")]
#[command(author, version, about = "Daily habit reset task", long_about = None)]
struct Cli {
    /// Database file path
    #[arg(long, default_value = "habitd.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    habitd::api::init_tracing();

    let cli = Cli::parse();

    let store = SqliteHabitStore::open(&cli.db).await?;
    store.migrate().await?;

    let report = run_reset(&store).await?;

    info!(
        eligible = report.eligible,
        updated = report.updated,
        failed = report.failures.len(),
        "reset run finished"
    );
    println!(
        "Reset complete: {} updated, {} failed (of {} eligible)",
        report.updated,
        report.failures.len(),
        report.eligible
    );

    Ok(())
}
