use super::parse_id;
use crate::error::AppError;
use crate::pagination::page_from_query;
use crate::response::{success, Created, Deleted};
use crate::service::{QuestionRequest, TriviaService};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = page_from_query(params.get("page").map(String::as_str));
    let page = TriviaService::question_page(state.store.as_ref(), page).await?;
    Ok(success(page))
}

pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let id = parse_id(&id_str)?;
    TriviaService::delete_question(state.store.as_ref(), id).await?;
    Ok(success(Deleted { deleted: id }))
}

/// `POST /questions`: search when the body carries `searchTerm`, create otherwise.
pub async fn post_question(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    match QuestionRequest::parse(body)? {
        QuestionRequest::Search(term) => {
            let results = TriviaService::search(state.store.as_ref(), &term).await?;
            Ok(success(results).into_response())
        }
        QuestionRequest::Create(question) => {
            let id = TriviaService::create_question(state.store.as_ref(), question).await?;
            Ok(success(Created { created: id }).into_response())
        }
    }
}
