//! Trivia route table and the middleware stack shared by every route.

use crate::error::{AppError, ErrorBody};
use crate::handlers::{category_questions, delete_question, list_categories, list_questions, post_question};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
pub const ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Trivia endpoints with the 404 fallback, no middleware.
pub(crate) fn trivia_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories).fallback(method_not_allowed))
        .route(
            "/categories/:id/questions",
            get(category_questions).fallback(method_not_allowed),
        )
        .route(
            "/questions",
            get(list_questions).post(post_question).fallback(method_not_allowed),
        )
        .route("/questions/:id", delete(delete_question).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
}

/// Body limit (enforced by the body extractors, so oversized bodies get the
/// 400 envelope), CORS, request tracing, and the Access-Control-Allow-Headers/Methods
/// pair on every response including errors and fallbacks.
pub(crate) fn with_middleware(router: Router, body_limit: usize) -> Router {
    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}

async fn not_found() -> impl IntoResponse {
    AppError::NotFound("route".into())
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new(StatusCode::METHOD_NOT_ALLOWED)),
    )
}
