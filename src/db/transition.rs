//! Status transition validation.
//!
//! The engine is deliberately permissive: any of the three enumerated
//! statuses may move to any other, because users correct mistaken entries
//! by hand. The only rejected input is a status literal outside the
//! enumeration, which is caught at the string boundary by
//! [`parse_status`]. The engine knows nothing about `is_active`; a habit
//! may receive status updates while inactive.

use crate::db::{DbError, DbResult, HabitStatus};

/// Parse a status literal, mapping unknown values to `InvalidStatus`.
pub fn parse_status(value: &str) -> DbResult<HabitStatus> {
    value.parse().map_err(|_| DbError::InvalidStatus {
        value: value.to_string(),
    })
}

/// Validate a requested status change before the store commits it.
pub fn check(_current: HabitStatus, _requested: HabitStatus) -> DbResult<()> {
    // No ordering constraint among pending, in_progress and done.
    Ok(())
}
