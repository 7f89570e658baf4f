//! PostgreSQL store over a sqlx pool. Tables live in a configurable schema.

use super::{quote_ident, TriviaStore};
use crate::error::AppError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    questions: String,
    categories: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        let schema = quote_ident(schema);
        PgStore {
            pool,
            questions: format!("{}.questions", schema),
            categories: format!("{}.categories", schema),
        }
    }

    async fn fetch_questions(&self, sql: &str, bind: Option<QuestionBind<'_>>) -> Result<Vec<Question>, AppError> {
        tracing::debug!(sql = %sql, params = ?bind, "query");
        let query = sqlx::query(sql);
        let query = match bind {
            Some(QuestionBind::Id(id)) => query.bind(id),
            Some(QuestionBind::Text(s)) => query.bind(s),
            None => query,
        };
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_question).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum QuestionBind<'a> {
    Id(i64),
    Text(&'a str),
}

fn row_to_question(row: &PgRow) -> Result<Question, AppError> {
    Ok(Question {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        category: row.try_get("category")?,
        difficulty: row.try_get("difficulty")?,
    })
}

fn row_to_category(row: &PgRow) -> Result<Category, AppError> {
    Ok(Category {
        id: row.try_get("id")?,
        kind: row.try_get("type")?,
    })
}

/// Escape LIKE metacharacters so the term matches literally.
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[async_trait]
impl TriviaStore for PgStore {
    async fn insert_question(&self, question: NewQuestion) -> Result<i64, AppError> {
        let sql = format!(
            "INSERT INTO {} (question, answer, category, difficulty) VALUES ($1, $2, $3, $4) RETURNING id",
            self.questions
        );
        tracing::debug!(sql = %sql, params = ?question, "query");
        let (id,): (i64,) = sqlx::query_as(&sql)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.questions);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", QUESTION_COLUMNS, self.questions);
        let mut rows = self.fetch_questions(&sql, Some(QuestionBind::Id(id))).await?;
        Ok(rows.pop())
    }

    async fn all_questions(&self) -> Result<Vec<Question>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", QUESTION_COLUMNS, self.questions);
        self.fetch_questions(&sql, None).await
    }

    async fn count_questions(&self) -> Result<u64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.questions);
        tracing::debug!(sql = %sql, "query");
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn questions_by_category(&self, category_id: i64) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE category = $1 ORDER BY id",
            QUESTION_COLUMNS, self.questions
        );
        self.fetch_questions(&sql, Some(QuestionBind::Id(category_id))).await
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE question ILIKE $1 ESCAPE '\\' ORDER BY id",
            QUESTION_COLUMNS, self.questions
        );
        let pattern = like_pattern(term);
        self.fetch_questions(&sql, Some(QuestionBind::Text(&pattern))).await
    }

    async fn all_categories(&self) -> Result<Vec<Category>, AppError> {
        let sql = format!("SELECT id, type FROM {} ORDER BY id", self.categories);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_category).collect()
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        let sql = format!("SELECT id, type FROM {} WHERE id = $1", self.categories);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_category).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("title"), "%title%");
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
