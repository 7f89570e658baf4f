//! Domain entities and their flat wire representation.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Category id. Not checked against the categories table.
    pub category: i64,
    /// Expected 1..=5, not enforced.
    pub difficulty: i32,
}

/// A question that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    /// Human-readable label; `type` on the wire.
    pub kind: String,
}

/// Flat field-name to scalar mapping used for every entity before serialization.
pub trait Format {
    fn format(&self) -> Map<String, Value>;
}

impl Format for Question {
    fn format(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("question".into(), Value::from(self.question.as_str()));
        map.insert("answer".into(), Value::from(self.answer.as_str()));
        map.insert("category".into(), Value::from(self.category));
        map.insert("difficulty".into(), Value::from(self.difficulty));
        map
    }
}

impl Format for Category {
    fn format(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("type".into(), Value::from(self.kind.as_str()));
        map
    }
}

pub fn format_all<T: Format>(items: &[T]) -> Vec<Map<String, Value>> {
    items.iter().map(Format::format).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_formats_flat() {
        let q = Question {
            id: 2,
            question: "Title of this book?".into(),
            answer: "Dune".into(),
            category: 4,
            difficulty: 3,
        };
        assert_eq!(
            Value::Object(q.format()),
            json!({"id": 2, "question": "Title of this book?", "answer": "Dune", "category": 4, "difficulty": 3})
        );
        assert!(q.format().values().all(|v| !v.is_object() && !v.is_array()));
    }

    #[test]
    fn category_uses_type_key() {
        let c = Category { id: 1, kind: "Science".into() };
        assert_eq!(Value::Object(c.format()), json!({"id": 1, "type": "Science"}));
    }
}
