//! The `HabitStore` trait for data access abstraction.
//!
//! The trait defines the contract for habit persistence, allowing the API
//! layer, the reset task and tests to share one seam without depending on
//! a concrete backend. An explicit store handle is passed to constructors;
//! there is no process-wide connection singleton.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Habit, HabitQuery, HabitStatus, ListResult, NewHabit, UpdateHabit},
};

/// Persistent store of habits, scoped by owner.
///
/// Every operation that takes an `owner_id` treats a habit owned by a
/// different user exactly like a missing one. Every successful mutation
/// refreshes the habit's `updated_at` timestamp.
pub trait HabitStore: Send + Sync {
    /// Create a new habit owned by `owner_id`, starting `pending` and
    /// active. Fails with `Validation` if the title is empty.
    fn create(
        &self,
        owner_id: &str,
        input: NewHabit,
    ) -> impl Future<Output = DbResult<Habit>> + Send;

    /// Get a habit by id, verifying ownership.
    fn get(&self, id: &str, owner_id: &str) -> impl Future<Output = DbResult<Habit>> + Send;

    /// List the owner's habits in creation order. Inactive habits are
    /// excluded unless `query.include_inactive` is set. Fails with
    /// `Validation` for non-positive limit or negative skip.
    fn list(
        &self,
        owner_id: &str,
        query: &HabitQuery,
    ) -> impl Future<Output = DbResult<ListResult<Habit>>> + Send;

    /// Replace a habit's title and description.
    fn update(
        &self,
        id: &str,
        owner_id: &str,
        input: UpdateHabit,
    ) -> impl Future<Output = DbResult<Habit>> + Send;

    /// Change a habit's status. The transition engine is consulted before
    /// the change is persisted.
    fn update_status(
        &self,
        id: &str,
        owner_id: &str,
        status: HabitStatus,
    ) -> impl Future<Output = DbResult<Habit>> + Send;

    /// Flip the habit's active flag. Allowed regardless of status.
    fn toggle_active(
        &self,
        id: &str,
        owner_id: &str,
    ) -> impl Future<Output = DbResult<Habit>> + Send;

    /// Hard-delete a habit.
    fn delete(&self, id: &str, owner_id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// All habits eligible for the periodic reset, across every owner:
    /// `status == done && is_active`.
    fn due_for_reset(&self) -> impl Future<Output = DbResult<Vec<Habit>>> + Send;

    /// Move a single habit back to `pending`, only if it is still done and
    /// active at the moment of the write. Returns `false` when the habit
    /// was no longer eligible (already reset, toggled inactive, or gone).
    fn reset_to_pending(&self, id: &str) -> impl Future<Output = DbResult<bool>> + Send;
}
