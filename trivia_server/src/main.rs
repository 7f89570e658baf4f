//! Trivia API server.
//!
//! Run from repo root: `cargo run -p trivia-server`
//! `TRIVIA_STORE=memory` serves from an in-memory store seeded with the stock categories.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use trivia_api::{
    app,
    apply_migrations,
    ensure_database_exists,
    migration::DEFAULT_CATEGORIES,
    seed_categories,
    AppState,
    Category,
    MemoryStore,
    PgStore,
    ServerConfig,
    StoreKind,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trivia_api=info,trivia_server=info,tower_http=info")),
        )
        .init();

    let state = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            apply_migrations(&pool, &config.schema).await?;
            if config.seed_categories {
                seed_categories(&pool, &config.schema).await?;
            }
            AppState::new(PgStore::new(pool, &config.schema))
        }
        StoreKind::Memory => {
            let categories = if config.seed_categories {
                DEFAULT_CATEGORIES
                    .iter()
                    .zip(1..)
                    .map(|(kind, id)| Category {
                        id,
                        kind: kind.to_string(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            tracing::warn!("using in-memory store; data is lost on exit");
            AppState::new(MemoryStore::with_data(categories, Vec::new()))
        }
    };

    let router = app(state, config.body_limit);
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("trivia api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
