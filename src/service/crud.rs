//! Question and category operations composed from the store, paginator and formatter.

use crate::error::AppError;
use crate::model::{format_all, Format, NewQuestion};
use crate::pagination::paginate;
use crate::response::{CategoryList, CategoryQuestions, QuestionPage, SearchResults};
use crate::store::TriviaStore;
use std::collections::BTreeSet;

pub struct TriviaService;

impl TriviaService {
    pub async fn categories(store: &dyn TriviaStore) -> Result<CategoryList, AppError> {
        let categories = store.all_categories().await?;
        Ok(CategoryList {
            categories: format_all(&categories),
        })
    }

    /// One page of questions plus the total count, all categories, and the
    /// distinct categories among the page's questions. Empty page is NotFound.
    pub async fn question_page(store: &dyn TriviaStore, page: i64) -> Result<QuestionPage, AppError> {
        let all = store.all_questions().await?;
        let slice = paginate(&all, page);
        if slice.is_empty() {
            return Err(AppError::NotFound(format!("questions page {}", page)));
        }
        let categories = store.all_categories().await?;
        Ok(QuestionPage {
            questions: format_all(slice),
            total_questions: all.len() as u64,
            categories: categories.into_iter().map(|c| (c.id, c.kind)).collect(),
            current_category: distinct_categories(slice.iter().map(|q| q.category)),
        })
    }

    pub async fn delete_question(store: &dyn TriviaStore, id: i64) -> Result<(), AppError> {
        if store.find_question(id).await?.is_none() {
            return Err(AppError::NotFound(format!("question {}", id)));
        }
        if !store.delete_question(id).await? {
            // Removed concurrently between lookup and delete.
            return Err(AppError::NotFound(format!("question {}", id)));
        }
        tracing::info!(id, "deleted question");
        Ok(())
    }

    pub async fn create_question(store: &dyn TriviaStore, question: NewQuestion) -> Result<i64, AppError> {
        let id = store.insert_question(question).await?;
        tracing::info!(id, "created question");
        Ok(id)
    }

    /// Unpaginated case-insensitive substring search over question text.
    pub async fn search(store: &dyn TriviaStore, term: &str) -> Result<SearchResults, AppError> {
        let hits = store.search_questions(term).await?;
        Ok(SearchResults {
            total_questions: hits.len() as u64,
            current_category: distinct_categories(hits.iter().map(|q| q.category)),
            questions: hits.iter().map(Format::format).collect(),
        })
    }

    /// Every question in an existing category, unpaginated.
    pub async fn questions_in_category(
        store: &dyn TriviaStore,
        category_id: i64,
    ) -> Result<CategoryQuestions, AppError> {
        let category = store
            .find_category(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category {}", category_id)))?;
        let questions = store.questions_by_category(category.id).await?;
        Ok(CategoryQuestions {
            total_questions: questions.len() as u64,
            questions: format_all(&questions),
            current_category: category.id,
        })
    }
}

fn distinct_categories(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Question};
    use crate::store::MemoryStore;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {}", id),
            answer: "answer".into(),
            category,
            difficulty: 1,
        }
    }

    fn store_with(n: i64) -> MemoryStore {
        let categories = vec![
            Category { id: 1, kind: "Science".into() },
            Category { id: 2, kind: "Art".into() },
        ];
        MemoryStore::with_data(categories, (1..=n).map(|id| question(id, if id % 3 == 0 { 2 } else { 1 })).collect())
    }

    #[tokio::test]
    async fn page_reports_totals_and_page_scoped_categories() {
        let store = store_with(12);
        let page = TriviaService::question_page(&store, 2).await.unwrap();
        assert_eq!(page.total_questions, 12);
        let ids: Vec<_> = page.questions.iter().map(|q| q["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![11, 12]);
        assert_eq!(page.current_category, vec![1, 2]);
        assert_eq!(page.categories, vec![(1, "Science".to_string()), (2, "Art".to_string())]);
    }

    #[tokio::test]
    async fn empty_page_is_not_found() {
        let store = store_with(12);
        assert!(matches!(TriviaService::question_page(&store, 3).await, Err(AppError::NotFound(_))));
        let empty = MemoryStore::new();
        assert!(matches!(TriviaService::question_page(&empty, 1).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_unknown_leaves_store_unchanged() {
        let store = store_with(3);
        assert!(matches!(TriviaService::delete_question(&store, 99).await, Err(AppError::NotFound(_))));
        assert_eq!(store.count_questions().await.unwrap(), 3);
        TriviaService::delete_question(&store, 2).await.unwrap();
        assert_eq!(store.count_questions().await.unwrap(), 2);
        assert!(store.find_question(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn category_listing_is_unpaginated() {
        let store = store_with(40);
        let listing = TriviaService::questions_in_category(&store, 1).await.unwrap();
        assert_eq!(listing.total_questions, 27);
        assert_eq!(listing.questions.len(), 27);
        assert!(listing.questions.iter().all(|q| q["category"] == 1));
        assert!(matches!(
            TriviaService::questions_in_category(&store, 9).await,
            Err(AppError::NotFound(_))
        ));
    }
}
