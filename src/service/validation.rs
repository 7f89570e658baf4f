//! Parse-and-validate step for `POST /questions` bodies.

use crate::error::AppError;
use crate::model::NewQuestion;
use serde_json::{Map, Value};

/// What a `POST /questions` body asks for: `searchTerm` present means search.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionRequest {
    Search(String),
    Create(NewQuestion),
}

impl QuestionRequest {
    pub fn parse(body: Value) -> Result<Self, AppError> {
        let body = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        match body.get("searchTerm") {
            Some(Value::String(term)) => Ok(QuestionRequest::Search(term.clone())),
            Some(_) => Err(AppError::Validation("searchTerm must be a string".into())),
            None => new_question(&body).map(QuestionRequest::Create),
        }
    }
}

fn new_question(body: &Map<String, Value>) -> Result<NewQuestion, AppError> {
    let difficulty = integer_field(body, "difficulty")?;
    Ok(NewQuestion {
        question: text_field(body, "question")?,
        answer: text_field(body, "answer")?,
        category: integer_field(body, "category")?,
        difficulty: i32::try_from(difficulty)
            .map_err(|_| AppError::Validation("difficulty is out of range".into()))?,
    })
}

fn text_field(body: &Map<String, Value>, key: &str) -> Result<String, AppError> {
    match body.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(AppError::Validation(format!("{} must not be empty", key))),
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", key))),
        Some(_) => Err(AppError::Validation(format!("{} must be a string", key))),
    }
}

/// Integer coercion: JSON integers, integral floats and numeric strings.
fn integer_field(body: &Map<String, Value>, key: &str) -> Result<i64, AppError> {
    let invalid = || AppError::Validation(format!("{} must be an integer", key));
    match body.get(key) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", key))),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if !n.is_f64() {
                // u64 beyond i64::MAX
                return Err(invalid());
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                _ => Err(invalid()),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_term_selects_search() {
        let req = QuestionRequest::parse(json!({"searchTerm": "title", "question": "ignored"})).unwrap();
        assert_eq!(req, QuestionRequest::Search("title".into()));
    }

    #[test]
    fn create_coerces_numeric_strings() {
        let req = QuestionRequest::parse(json!({
            "question": "Q?",
            "answer": "A",
            "category": "3",
            "difficulty": "2"
        }))
        .unwrap();
        assert_eq!(
            req,
            QuestionRequest::Create(NewQuestion {
                question: "Q?".into(),
                answer: "A".into(),
                category: 3,
                difficulty: 2,
            })
        );
    }

    #[test]
    fn integral_floats_are_accepted() {
        let req = QuestionRequest::parse(json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 4.0})).unwrap();
        assert!(matches!(req, QuestionRequest::Create(NewQuestion { difficulty: 4, .. })));
    }

    #[test]
    fn rejects_bad_bodies() {
        let cases = [
            json!([1, 2]),
            json!({"searchTerm": 5}),
            json!({"answer": "A", "category": 1, "difficulty": 1}),
            json!({"question": " ", "answer": "A", "category": 1, "difficulty": 1}),
            json!({"question": "Q", "answer": "A", "category": 1, "difficulty": "hard"}),
            json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 2.5}),
            json!({"question": "Q", "answer": "A", "category": true, "difficulty": 1}),
            json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 9_000_000_000i64}),
            json!({"question": "Q", "answer": "A", "category": 9_223_372_036_854_775_808u64, "difficulty": 1}),
            json!({"question": "Q", "answer": "A", "category": 9.223372036854775808e18, "difficulty": 1}),
        ];
        for body in cases {
            let err = QuestionRequest::parse(body.clone()).unwrap_err();
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST, "{}", body);
        }
    }
}
