//! SQLite implementation of the habit store.

mod connection;
mod habit;

#[cfg(test)]
mod habit_test;

pub use connection::SqliteHabitStore;
