//! Database error types.
//!
//! Abstracted error types for store operations, storage-backend agnostic.
//! Uses miette for diagnostic output and thiserror for derive macros.

use miette::Diagnostic;
use thiserror::Error;

/// Store operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    /// The habit does not exist, or belongs to someone else. The two cases
    /// are deliberately indistinguishable so ownership is never leaked.
    #[error("Habit not found: '{id}'")]
    #[diagnostic(code(habitd::db::not_found))]
    NotFound { id: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(habitd::db::validation_error))]
    Validation { message: String },

    #[error("Invalid status: '{value}' (expected pending, in_progress or done)")]
    #[diagnostic(code(habitd::db::invalid_status))]
    InvalidStatus { value: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(habitd::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(habitd::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(habitd::db::connection_error))]
    Connection { message: String },
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
