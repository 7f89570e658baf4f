//! Table DDL for the trivia schema and stock category seeding.

use crate::error::AppError;
use crate::store::quote_ident;
use sqlx::PgPool;

/// Categories inserted by [`seed_categories`] when the table is empty.
pub const DEFAULT_CATEGORIES: &[&str] = &["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

/// CREATE SCHEMA / TABLE IF NOT EXISTS for `categories` and `questions`. Idempotent.
/// `questions.category` carries no foreign key; dangling references are allowed.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let schema = quote_ident(schema);
    let statements = [
        format!("CREATE SCHEMA IF NOT EXISTS {}", schema),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.categories (
                id BIGSERIAL PRIMARY KEY,
                type TEXT NOT NULL
            )
            "#,
            schema
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.questions (
                id BIGSERIAL PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category BIGINT NOT NULL,
                difficulty INTEGER NOT NULL
            )
            "#,
            schema
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS questions_category_idx ON {}.questions (category)",
            schema
        ),
    ];
    for sql in &statements {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}

/// Insert [`DEFAULT_CATEGORIES`] in a transaction when `categories` has no rows.
/// Returns the number of rows inserted.
pub async fn seed_categories(pool: &PgPool, schema: &str) -> Result<usize, AppError> {
    let table = format!("{}.categories", quote_ident(schema));
    let mut tx = pool.begin().await?;
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&mut *tx)
        .await?;
    if count > 0 {
        return Ok(0);
    }
    let insert = format!("INSERT INTO {} (type) VALUES ($1)", table);
    for kind in DEFAULT_CATEGORIES {
        sqlx::query(&insert).bind(*kind).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded categories");
    Ok(DEFAULT_CATEGORIES.len())
}
