use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::db::{establish_connection, run_migrations};
use crate::transfer::import_data;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub async fn empty_pool() -> SqlitePool {
    let pool = establish_connection("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

// 6 categories, 19 questions
pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    import_data(&pool, &fixtures_dir())
        .await
        .expect("Failed to import fixtures");
    pool
}
