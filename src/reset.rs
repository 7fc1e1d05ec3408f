//! Periodic reset of completed habits.
//!
//! Once per scheduling period (intended: daily), every habit that is both
//! `done` and active moves back to `pending`. Habits that are
//! `in_progress`, or inactive, are left untouched. Cadence is the
//! scheduler's business; this module only guarantees idempotence within a
//! period and partial-failure tolerance per invocation.

use tracing::{debug, info, warn};

use crate::db::{DbResult, HabitStore};

/// Outcome of one reset pass.
#[derive(Debug, Default)]
pub struct ResetReport {
    /// Habits that were eligible when the pass started.
    pub eligible: usize,
    /// Habits actually moved back to `pending`.
    pub updated: usize,
    /// Habits whose reset failed to persist. The pass continues past them.
    pub failures: Vec<ResetFailure>,
}

/// A single habit the pass could not reset.
#[derive(Debug)]
pub struct ResetFailure {
    pub habit_id: String,
    pub message: String,
}

/// Run one reset pass over the whole store, across all owners.
///
/// An unreadable store fails the run; a failure to persist an individual
/// habit's reset is logged and recorded, prior resets in the same run are
/// not rolled back.
pub async fn run_reset<S: HabitStore>(store: &S) -> DbResult<ResetReport> {
    let due = store.due_for_reset().await?;
    info!(eligible = due.len(), "starting habit reset pass");

    let mut report = ResetReport {
        eligible: due.len(),
        ..ResetReport::default()
    };

    for habit in due {
        match store.reset_to_pending(&habit.id).await {
            Ok(true) => report.updated += 1,
            Ok(false) => {
                // Changed under us since the scan; no longer eligible.
                debug!(habit_id = %habit.id, "habit no longer eligible, skipping");
            }
            Err(e) => {
                warn!(habit_id = %habit.id, error = %e, "failed to reset habit, continuing");
                report.failures.push(ResetFailure {
                    habit_id: habit.id,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        updated = report.updated,
        failed = report.failures.len(),
        "habit reset pass complete"
    );

    Ok(report)
}
