//! Storage layer for habit records.
//!
//! - `error`: storage-agnostic error types
//! - `models`: domain entities (Habit, HabitStatus, query types)
//! - `store`: the `HabitStore` trait defining the data access contract
//! - `transition`: status transition validation
//! - `sqlite`: SQLite-backed implementation

mod error;
mod models;
mod store;
pub mod transition;
pub mod utils;

pub mod sqlite;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use sqlite::SqliteHabitStore;
pub use store::HabitStore;
