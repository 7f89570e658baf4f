//! Trivia API: question and category REST backend library.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, seed_categories};
pub use model::{Category, Format, NewQuestion, Question};
pub use routes::{app, common_routes};
pub use service::{QuestionRequest, TriviaService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, TriviaStore};
