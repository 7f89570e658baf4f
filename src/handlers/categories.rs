use super::parse_id;
use crate::error::AppError;
use crate::response::success;
use crate::service::TriviaService;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
};

pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = TriviaService::categories(state.store.as_ref()).await?;
    Ok(success(categories))
}

pub async fn category_questions(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let id = parse_id(&id_str)?;
    let listing = TriviaService::questions_in_category(state.store.as_ref(), id).await?;
    Ok(success(listing))
}
