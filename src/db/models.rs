//! Domain models for the habit store.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

/// A trackable recurring user goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    /// Authenticated user who created the habit. Set once, never changed.
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: HabitStatus,
    /// Visibility flag, orthogonal to status. Inactive habits are excluded
    /// from default listings and from reset eligibility, but not deleted.
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Lifecycle status of a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HabitStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl std::fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitStatus::Pending => write!(f, "pending"),
            HabitStatus::InProgress => write!(f, "in_progress"),
            HabitStatus::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for HabitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(HabitStatus::Pending),
            "in_progress" => Ok(HabitStatus::InProgress),
            "done" => Ok(HabitStatus::Done),
            _ => Err(format!("Invalid HabitStatus: {}", s)),
        }
    }
}

/// Input for creating a habit. Status and active flag are not accepted
/// here: new habits always start `pending` and active.
#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub title: String,
    pub description: Option<String>,
}

/// Input for replacing a habit's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateHabit {
    pub title: String,
    pub description: Option<String>,
}

/// Pagination options for habit listings.
#[derive(Debug, Clone)]
pub struct HabitQuery {
    /// Number of items to skip.
    pub skip: i64,
    /// Maximum number of items to return. Must be positive.
    pub limit: i64,
    /// Include inactive habits in the listing.
    pub include_inactive: bool,
}

impl Default for HabitQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            include_inactive: false,
        }
    }
}

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page, in creation order.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: i64,
    /// Limit that was applied.
    pub limit: i64,
    /// Offset that was applied.
    pub offset: i64,
}
