//! Standard success envelope: `{"success": true, ...payload}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

pub fn success<T: Serialize>(payload: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            success: true,
            payload,
        }),
    )
}

#[derive(Serialize, Debug)]
pub struct CategoryList {
    pub categories: Vec<Map<String, Value>>,
}

#[derive(Serialize, Debug)]
pub struct QuestionPage {
    pub questions: Vec<Map<String, Value>>,
    pub total_questions: u64,
    /// `[id, type]` pairs.
    pub categories: Vec<(i64, String)>,
    pub current_category: Vec<i64>,
}

#[derive(Serialize, Debug)]
pub struct SearchResults {
    pub questions: Vec<Map<String, Value>>,
    pub total_questions: u64,
    pub current_category: Vec<i64>,
}

#[derive(Serialize, Debug)]
pub struct CategoryQuestions {
    pub questions: Vec<Map<String, Value>>,
    pub total_questions: u64,
    pub current_category: i64,
}

#[derive(Serialize, Debug)]
pub struct Deleted {
    pub deleted: i64,
}

#[derive(Serialize, Debug)]
pub struct Created {
    pub created: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_flattened_next_to_success() {
        let (status, Json(body)) = success(Deleted { deleted: 7 });
        assert_eq!(status, StatusCode::OK);
        let v = serde_json::to_value(body).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "deleted": 7}));
    }

    #[test]
    fn categories_serialize_as_pairs() {
        let page = QuestionPage {
            questions: Vec::new(),
            total_questions: 0,
            categories: vec![(1, "Science".into())],
            current_category: Vec::new(),
        };
        let v = serde_json::to_value(page).unwrap();
        assert_eq!(v["categories"], serde_json::json!([[1, "Science"]]));
    }
}
