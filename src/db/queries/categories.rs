use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Renders categories as an `id -> type` lookup.
pub fn categories_by_id(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, type) VALUES (?1, ?2)
ON CONFLICT(id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
