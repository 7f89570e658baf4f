//! HTTP handlers for categories and questions.

pub mod categories;
pub mod questions;
pub use categories::*;
pub use questions::*;

use crate::error::AppError;

/// Integer path id. Anything else is a route miss, so NotFound.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("no route for id '{}'", id_str)))
}
