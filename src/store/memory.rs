//! In-memory store: id-ordered tables behind an async RwLock.

use super::TriviaStore;
use crate::error::AppError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    questions: BTreeMap<i64, Question>,
    categories: BTreeMap<i64, Category>,
    next_question_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with categories and questions. Question ids are kept as given.
    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_question_id = questions.iter().map(|q| q.id).max().unwrap_or(0);
        let tables = Tables {
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            next_question_id,
        };
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn insert_question(&self, question: NewQuestion) -> Result<i64, AppError> {
        let mut tables = self.tables.write().await;
        tables.next_question_id += 1;
        let id = tables.next_question_id;
        tables.questions.insert(id, question.with_id(id));
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.questions.remove(&id).is_some())
    }

    async fn find_question(&self, id: i64) -> Result<Option<Question>, AppError> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn all_questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn count_questions(&self) -> Result<u64, AppError> {
        Ok(self.tables.read().await.questions.len() as u64)
    }

    async fn questions_by_category(&self, category_id: i64) -> Result<Vec<Question>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, AppError> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn all_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, AppError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.into(),
            answer: "a".into(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn ids_are_monotonic_after_delete() {
        let store = MemoryStore::new();
        let first = store.insert_question(draft("one", 1)).await.unwrap();
        let second = store.insert_question(draft("two", 1)).await.unwrap();
        assert!(store.delete_question(second).await.unwrap());
        let third = store.insert_question(draft("three", 1)).await.unwrap();
        assert_eq!((first, second, third), (1, 2, 3));
        assert!(!store.delete_question(second).await.unwrap());
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::new();
        store.insert_question(draft("What is the capital?", 1)).await.unwrap();
        store.insert_question(draft("Title of this book?", 2)).await.unwrap();
        let hits = store.search_questions("TITLE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[tokio::test]
    async fn preloaded_ids_continue_from_max() {
        let store = MemoryStore::with_data(Vec::new(), vec![draft("x", 1).with_id(40)]);
        assert_eq!(store.insert_question(draft("y", 1)).await.unwrap(), 41);
        assert_eq!(store.count_questions().await.unwrap(), 2);
    }
}
