//! Persistence seam for questions and categories, plus database bootstrap.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::{AppError, ConfigError};
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Store adapter used by the request handlers. Every sequence is in id order.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Persist a question and return its assigned id.
    async fn insert_question(&self, question: NewQuestion) -> Result<i64, AppError>;

    /// Remove a question permanently. Returns false when no row had that id.
    async fn delete_question(&self, id: i64) -> Result<bool, AppError>;

    async fn find_question(&self, id: i64) -> Result<Option<Question>, AppError>;

    async fn all_questions(&self) -> Result<Vec<Question>, AppError>;

    async fn count_questions(&self) -> Result<u64, AppError>;

    async fn questions_by_category(&self, category_id: i64) -> Result<Vec<Question>, AppError>;

    /// Case-insensitive substring match on the question text.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, AppError>;

    async fn all_categories(&self) -> Result<Vec<Category>, AppError>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Connect to the `postgres` admin database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|_| invalid_database_url(database_url))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_database_url(url))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn invalid_database_url(url: &str) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
    })
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/trivia?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "trivia");
    }

    #[test]
    fn url_without_path_is_rejected() {
        let err = parse_db_name_from_url("postgres://localhost").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. })
        ));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("trivia"), "\"trivia\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
