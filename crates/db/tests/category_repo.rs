//! Integration tests for the category repository.

use chrono::Utc;
use sqlx::PgPool;
use taskmitra_core::category::DEFAULT_CATEGORY_COLOR;
use taskmitra_core::task::TaskStatus;
use taskmitra_db::models::category::{CreateCategory, UpdateCategory};
use taskmitra_db::models::task::TaskFields;
use taskmitra_db::models::user::CreateUser;
use taskmitra_db::repositories::{CategoryRepo, TaskRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: String::new(),
        first_name: String::new(),
        last_name: String::new(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        color: None,
    }
}

fn task_in(category_id: i64, status: TaskStatus) -> TaskFields {
    TaskFields {
        category_id: Some(category_id),
        title: format!("{status} task"),
        description: None,
        priority: "moderate".into(),
        status: status.as_str().to_string(),
        due_date: None,
        completed_at: status.is_completed().then(Utc::now),
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_uses_default_color(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;

    let category = CategoryRepo::create(&pool, alice, &new_category("Home"))
        .await
        .unwrap();
    assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
    assert_eq!(category.user_id, alice);

    let custom = CategoryRepo::create(
        &pool,
        alice,
        &CreateCategory {
            name: "Work".into(),
            color: Some("#112233".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(custom.color, "#112233");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_keeps_other_fields(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let category = CategoryRepo::create(&pool, alice, &new_category("Home"))
        .await
        .unwrap();

    let update = UpdateCategory {
        name: None,
        color: Some("#abcdef".into()),
    };
    let updated = CategoryRepo::update(&pool, alice, category.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Home");
    assert_eq!(updated.color, "#abcdef");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_categories_are_scoped_to_owner(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let category = CategoryRepo::create(&pool, alice, &new_category("Private"))
        .await
        .unwrap();

    assert!(CategoryRepo::find_by_id(&pool, bob, category.id)
        .await
        .unwrap()
        .is_none());
    assert!(CategoryRepo::find_with_stats(&pool, bob, category.id)
        .await
        .unwrap()
        .is_none());
    assert!(CategoryRepo::list_with_stats(&pool, bob).await.unwrap().is_empty());
    assert!(CategoryRepo::update(&pool, bob, category.id, &UpdateCategory::default())
        .await
        .unwrap()
        .is_none());
    assert!(!CategoryRepo::delete(&pool, bob, category.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_detaches_tasks(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let category = CategoryRepo::create(&pool, alice, &new_category("Temporary"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, alice, &task_in(category.id, TaskStatus::NotStarted))
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&pool, alice, category.id).await.unwrap());

    let task = TaskRepo::find_by_id(&pool, alice, task.id)
        .await
        .unwrap()
        .expect("task survives category deletion");
    assert_eq!(task.category_id, None);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_stats_count_tasks_and_progress(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let work = CategoryRepo::create(&pool, alice, &new_category("Work"))
        .await
        .unwrap();
    let empty = CategoryRepo::create(&pool, alice, &new_category("Empty"))
        .await
        .unwrap();

    for status in [
        TaskStatus::Completed,
        TaskStatus::InProgress,
        TaskStatus::NotStarted,
    ] {
        TaskRepo::create(&pool, alice, &task_in(work.id, status))
            .await
            .unwrap();
    }

    let stats = CategoryRepo::list_with_stats(&pool, alice).await.unwrap();
    assert_eq!(stats.len(), 2);

    // Ordered by id ascending.
    assert_eq!(stats[0].id, work.id);
    assert_eq!(stats[0].task_count, 3);
    assert_eq!(stats[0].completed_count, 1);
    assert_eq!(stats[0].progress_percent, 33);

    assert_eq!(stats[1].id, empty.id);
    assert_eq!(stats[1].task_count, 0);
    assert_eq!(stats[1].progress_percent, 0);

    let single = CategoryRepo::find_with_stats(&pool, alice, work.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(single, stats[0]);
}
