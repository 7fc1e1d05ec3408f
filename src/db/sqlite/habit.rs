//! SQLite `HabitStore` implementation.

use std::str::FromStr;

use sqlx::Row;

use super::connection::SqliteHabitStore;
use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{
    DbError, DbResult, Habit, HabitQuery, HabitStatus, HabitStore, ListResult, NewHabit,
    UpdateHabit, transition,
};

impl HabitStore for SqliteHabitStore {
    async fn create(&self, owner_id: &str, input: NewHabit) -> DbResult<Habit> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(DbError::Validation {
                message: "title must not be empty".to_string(),
            });
        }

        let id = generate_entity_id();
        let now = current_timestamp();
        let status = HabitStatus::Pending;

        sqlx::query(
            r#"
            INSERT INTO habit (id, owner_id, title, description, status, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(title)
        .bind(&input.description)
        .bind(status.to_string())
        .bind(true)
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(Habit {
            id,
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            description: input.description,
            status,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn get(&self, id: &str, owner_id: &str) -> DbResult<Habit> {
        let row = sqlx::query(
            "SELECT id, owner_id, title, description, status, is_active, created_at, updated_at
             FROM habit WHERE id = ? AND owner_id = ?",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let row = row.ok_or(DbError::NotFound { id: id.to_string() })?;

        Ok(row_to_habit(&row))
    }

    async fn list(&self, owner_id: &str, query: &HabitQuery) -> DbResult<ListResult<Habit>> {
        if query.limit <= 0 {
            return Err(DbError::Validation {
                message: format!("limit must be positive, got {}", query.limit),
            });
        }
        if query.skip < 0 {
            return Err(DbError::Validation {
                message: format!("skip must not be negative, got {}", query.skip),
            });
        }

        let active_filter = if query.include_inactive {
            ""
        } else {
            "AND is_active = 1"
        };

        // created_at has second resolution, so rowid breaks ties to keep
        // creation order stable.
        let sql = format!(
            "SELECT id, owner_id, title, description, status, is_active, created_at, updated_at
             FROM habit
             WHERE owner_id = ? {}
             ORDER BY created_at ASC, rowid ASC
             LIMIT ? OFFSET ?",
            active_filter
        );

        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .bind(query.limit)
            .bind(query.skip)
            .fetch_all(self.pool())
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let items: Vec<Habit> = rows.iter().map(row_to_habit).collect();

        let count_sql = format!(
            "SELECT COUNT(*) FROM habit WHERE owner_id = ? {}",
            active_filter
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(owner_id)
            .fetch_one(self.pool())
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(ListResult {
            items,
            total,
            limit: query.limit,
            offset: query.skip,
        })
    }

    async fn update(&self, id: &str, owner_id: &str, input: UpdateHabit) -> DbResult<Habit> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(DbError::Validation {
                message: "title must not be empty".to_string(),
            });
        }

        let current = self.get(id, owner_id).await?;
        let now = current_timestamp();

        let result = sqlx::query(
            "UPDATE habit SET title = ?, description = ?, updated_at = ?
             WHERE id = ? AND owner_id = ?",
        )
        .bind(title)
        .bind(&input.description)
        .bind(&now)
        .bind(id)
        .bind(owner_id)
        .execute(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id: id.to_string() });
        }

        Ok(Habit {
            title: title.to_string(),
            description: input.description,
            updated_at: now,
            ..current
        })
    }

    async fn update_status(
        &self,
        id: &str,
        owner_id: &str,
        status: HabitStatus,
    ) -> DbResult<Habit> {
        let current = self.get(id, owner_id).await?;
        transition::check(current.status, status)?;

        let now = current_timestamp();

        let result = sqlx::query(
            "UPDATE habit SET status = ?, updated_at = ? WHERE id = ? AND owner_id = ?",
        )
        .bind(status.to_string())
        .bind(&now)
        .bind(id)
        .bind(owner_id)
        .execute(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id: id.to_string() });
        }

        Ok(Habit {
            status,
            updated_at: now,
            ..current
        })
    }

    async fn toggle_active(&self, id: &str, owner_id: &str) -> DbResult<Habit> {
        let current = self.get(id, owner_id).await?;
        let flipped = !current.is_active;
        let now = current_timestamp();

        let result = sqlx::query(
            "UPDATE habit SET is_active = ?, updated_at = ? WHERE id = ? AND owner_id = ?",
        )
        .bind(flipped)
        .bind(&now)
        .bind(id)
        .bind(owner_id)
        .execute(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id: id.to_string() });
        }

        Ok(Habit {
            is_active: flipped,
            updated_at: now,
            ..current
        })
    }

    async fn delete(&self, id: &str, owner_id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM habit WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool())
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id: id.to_string() });
        }

        Ok(())
    }

    async fn due_for_reset(&self) -> DbResult<Vec<Habit>> {
        let rows = sqlx::query(
            "SELECT id, owner_id, title, description, status, is_active, created_at, updated_at
             FROM habit
             WHERE status = 'done' AND is_active = 1
             ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(rows.iter().map(row_to_habit).collect())
    }

    async fn reset_to_pending(&self, id: &str) -> DbResult<bool> {
        let now = current_timestamp();

        // Guarded write: a habit updated or deactivated since the scan is
        // simply skipped, which keeps reruns idempotent and concurrent
        // user writes last-writer-wins.
        let result = sqlx::query(
            "UPDATE habit SET status = 'pending', updated_at = ?
             WHERE id = ? AND status = 'done' AND is_active = 1",
        )
        .bind(&now)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a Habit model.
fn row_to_habit(row: &sqlx::sqlite::SqliteRow) -> Habit {
    Habit {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        description: row.get("description"),
        status: {
            let status_str: String = row.get("status");
            HabitStatus::from_str(&status_str).unwrap_or_default()
        },
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
