//! Trivia operations and request validation.

mod crud;
mod validation;
pub use crud::TriviaService;
pub use validation::QuestionRequest;
