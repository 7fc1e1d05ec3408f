//! Tests for the SQLite habit store.

use crate::db::{
    DbError, Habit, HabitQuery, HabitStatus, HabitStore, NewHabit, SqliteHabitStore, UpdateHabit,
};

async fn setup_store() -> SqliteHabitStore {
    let store = SqliteHabitStore::in_memory()
        .await
        .expect("Failed to create in-memory database");
    store.migrate().await.expect("Migration should succeed");
    store
}

async fn create_habit(store: &SqliteHabitStore, owner: &str, title: &str) -> Habit {
    store
        .create(
            owner,
            NewHabit {
                title: title.to_string(),
                description: None,
            },
        )
        .await
        .expect("Create should succeed")
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_with_defaults() {
    let store = setup_store().await;

    let created = store
        .create(
            "user_a",
            NewHabit {
                title: "Morning run".to_string(),
                description: Some("5km before breakfast".to_string()),
            },
        )
        .await
        .expect("Create should succeed");

    assert_eq!(created.id.len(), 8);
    assert_eq!(created.owner_id, "user_a");
    assert_eq!(created.title, "Morning run");
    assert_eq!(created.description.as_deref(), Some("5km before breakfast"));
    assert_eq!(created.status, HabitStatus::Pending);
    assert!(created.is_active);

    let retrieved = store
        .get(&created.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_trims_title() {
    let store = setup_store().await;

    let created = create_habit(&store, "user_a", "  Meditate  ").await;
    assert_eq!(created.title, "Meditate");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_empty_title() {
    let store = setup_store().await;

    for title in ["", "   "] {
        let result = store
            .create(
                "user_a",
                NewHabit {
                    title: title.to_string(),
                    description: None,
                },
            )
            .await;
        assert!(
            matches!(result, Err(DbError::Validation { .. })),
            "title {title:?} should be rejected"
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_returns_not_found() {
    let store = setup_store().await;

    let result = store.get("nonexist", "user_a").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_with_wrong_owner_returns_not_found() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Stretch").await;

    let result = store.get(&habit.id, "user_b").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_title_and_description() {
    let store = setup_store().await;
    let habit = store
        .create(
            "user_a",
            NewHabit {
                title: "Read".to_string(),
                description: Some("One chapter".to_string()),
            },
        )
        .await
        .expect("Create should succeed");

    let updated = store
        .update(
            &habit.id,
            "user_a",
            UpdateHabit {
                title: "Read more".to_string(),
                description: None,
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(updated.title, "Read more");
    // A None description replaces the old one: updates are full replacement.
    assert_eq!(updated.description, None);
    assert_eq!(updated.status, habit.status);

    let retrieved = store
        .get(&habit.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved.title, "Read more");
    assert_eq!(retrieved.description, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_empty_title() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Journal").await;

    let result = store
        .update(
            &habit.id,
            "user_a",
            UpdateHabit {
                title: "  ".to_string(),
                description: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::Validation { .. })));

    // The stored habit is unchanged.
    let retrieved = store
        .get(&habit.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved.title, "Journal");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_wrong_owner_returns_not_found() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Walk").await;

    let result = store
        .update(
            &habit.id,
            "user_b",
            UpdateHabit {
                title: "Hijacked".to_string(),
                description: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    let retrieved = store
        .get(&habit.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved.title, "Walk");
}

#[tokio::test(flavor = "multi_thread")]
async fn status_moves_between_all_pairs() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Practice piano").await;

    let all = [
        HabitStatus::Pending,
        HabitStatus::InProgress,
        HabitStatus::Done,
    ];
    for from in all {
        for to in all {
            store
                .update_status(&habit.id, "user_a", from)
                .await
                .expect("Setting the starting status should succeed");
            let updated = store
                .update_status(&habit.id, "user_a", to)
                .await
                .unwrap_or_else(|e| panic!("{from} -> {to} should succeed: {e}"));
            assert_eq!(updated.status, to);
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn status_update_with_wrong_owner_returns_not_found() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Swim").await;

    let result = store
        .update_status(&habit.id, "user_b", HabitStatus::Done)
        .await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    let retrieved = store
        .get(&habit.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved.status, HabitStatus::Pending);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_active_twice_restores_the_flag() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Floss").await;
    assert!(habit.is_active);

    let toggled = store
        .toggle_active(&habit.id, "user_a")
        .await
        .expect("Toggle should succeed");
    assert!(!toggled.is_active);
    // Status survives deactivation.
    assert_eq!(toggled.status, habit.status);

    let restored = store
        .toggle_active(&habit.id, "user_a")
        .await
        .expect("Toggle should succeed");
    assert!(restored.is_active);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_returns_creation_order_pages() {
    let store = setup_store().await;
    let h1 = create_habit(&store, "user_a", "First").await;
    let h2 = create_habit(&store, "user_a", "Second").await;
    let h3 = create_habit(&store, "user_a", "Third").await;
    let h4 = create_habit(&store, "user_a", "Fourth").await;

    let page = store
        .list(
            "user_a",
            &HabitQuery {
                skip: 0,
                limit: 2,
                include_inactive: false,
            },
        )
        .await
        .expect("List should succeed");
    assert_eq!(page.total, 4);
    assert_eq!(page.limit, 2);
    assert_eq!(page.offset, 0);
    let ids: Vec<&str> = page.items.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec![h1.id.as_str(), h2.id.as_str()]);

    let page = store
        .list(
            "user_a",
            &HabitQuery {
                skip: 2,
                limit: 2,
                include_inactive: false,
            },
        )
        .await
        .expect("List should succeed");
    assert_eq!(page.total, 4);
    assert_eq!(page.offset, 2);
    let ids: Vec<&str> = page.items.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec![h3.id.as_str(), h4.id.as_str()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_is_scoped_to_the_owner() {
    let store = setup_store().await;
    create_habit(&store, "user_a", "Mine").await;
    create_habit(&store, "user_b", "Theirs").await;

    let result = store
        .list("user_a", &HabitQuery::default())
        .await
        .expect("List should succeed");
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].title, "Mine");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_excludes_inactive_unless_requested() {
    let store = setup_store().await;
    let active = create_habit(&store, "user_a", "Active").await;
    let hidden = create_habit(&store, "user_a", "Hidden").await;
    store
        .toggle_active(&hidden.id, "user_a")
        .await
        .expect("Toggle should succeed");

    let result = store
        .list("user_a", &HabitQuery::default())
        .await
        .expect("List should succeed");
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, active.id);

    let result = store
        .list(
            "user_a",
            &HabitQuery {
                include_inactive: true,
                ..HabitQuery::default()
            },
        )
        .await
        .expect("List should succeed");
    assert_eq!(result.total, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_bad_bounds() {
    let store = setup_store().await;

    let result = store
        .list(
            "user_a",
            &HabitQuery {
                skip: 0,
                limit: 0,
                include_inactive: false,
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::Validation { .. })));

    let result = store
        .list(
            "user_a",
            &HabitQuery {
                skip: -1,
                limit: 10,
                include_inactive: false,
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_habit() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Ephemeral").await;

    store
        .delete(&habit.id, "user_a")
        .await
        .expect("Delete should succeed");

    let result = store.get(&habit.id, "user_a").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_with_wrong_owner_returns_not_found() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Guarded").await;

    let result = store.delete(&habit.id, "user_b").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    store
        .get(&habit.id, "user_a")
        .await
        .expect("Habit should still exist");
}

#[tokio::test(flavor = "multi_thread")]
async fn due_for_reset_selects_only_done_and_active() {
    let store = setup_store().await;

    // Four combinations of status x active flag; only done + active is due.
    let done_active = create_habit(&store, "user_a", "Done active").await;
    store
        .update_status(&done_active.id, "user_a", HabitStatus::Done)
        .await
        .expect("Status update should succeed");

    let done_inactive = create_habit(&store, "user_a", "Done inactive").await;
    store
        .update_status(&done_inactive.id, "user_a", HabitStatus::Done)
        .await
        .expect("Status update should succeed");
    store
        .toggle_active(&done_inactive.id, "user_a")
        .await
        .expect("Toggle should succeed");

    let started_active = create_habit(&store, "user_b", "Started active").await;
    store
        .update_status(&started_active.id, "user_b", HabitStatus::InProgress)
        .await
        .expect("Status update should succeed");

    let started_inactive = create_habit(&store, "user_b", "Started inactive").await;
    store
        .update_status(&started_inactive.id, "user_b", HabitStatus::InProgress)
        .await
        .expect("Status update should succeed");
    store
        .toggle_active(&started_inactive.id, "user_b")
        .await
        .expect("Toggle should succeed");

    let due = store
        .due_for_reset()
        .await
        .expect("Scan should succeed");
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, done_active.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn reset_to_pending_is_guarded() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Daily review").await;
    store
        .update_status(&habit.id, "user_a", HabitStatus::Done)
        .await
        .expect("Status update should succeed");

    let reset = store
        .reset_to_pending(&habit.id)
        .await
        .expect("Reset should succeed");
    assert!(reset);

    let retrieved = store
        .get(&habit.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved.status, HabitStatus::Pending);
    assert!(retrieved.is_active);

    // No longer done, so a second write reports ineligible.
    let reset = store
        .reset_to_pending(&habit.id)
        .await
        .expect("Reset should succeed");
    assert!(!reset);
}

#[tokio::test(flavor = "multi_thread")]
async fn reset_to_pending_skips_inactive_habits() {
    let store = setup_store().await;
    let habit = create_habit(&store, "user_a", "Paused").await;
    store
        .update_status(&habit.id, "user_a", HabitStatus::Done)
        .await
        .expect("Status update should succeed");
    store
        .toggle_active(&habit.id, "user_a")
        .await
        .expect("Toggle should succeed");

    let reset = store
        .reset_to_pending(&habit.id)
        .await
        .expect("Reset should succeed");
    assert!(!reset);

    let retrieved = store
        .get(&habit.id, "user_a")
        .await
        .expect("Get should succeed");
    assert_eq!(retrieved.status, HabitStatus::Done);
}
