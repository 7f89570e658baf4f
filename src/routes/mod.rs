//! Route tables: common probes and the trivia API.

mod common;
mod trivia;

pub use common::common_routes;
pub use trivia::{ALLOW_HEADERS, ALLOW_METHODS, DEFAULT_BODY_LIMIT};

use crate::state::AppState;
use axum::Router;

/// Full application router: common routes and the trivia route table behind one middleware stack.
pub fn app(state: AppState, body_limit: usize) -> Router {
    let router = common_routes(state.clone()).merge(trivia::trivia_router(state));
    trivia::with_middleware(router, body_limit)
}
