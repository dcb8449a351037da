use std::sync::Arc;

use tower::limit::GlobalConcurrencyLimitLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::SellerRepository;
use roster_db::{init_database, RedbItemStore};
use roster_server::{routes, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: ROSTER_LISTEN_ADDR, ROSTER_DB_PATH, ROSTER_MAX_CONCURRENCY");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting roster server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Database path: {}", config.db_path.display());
    tracing::info!("Max concurrent requests: {}", config.max_concurrency);

    // Initialize database
    let db = match init_database(&config.db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Database error: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(RedbItemStore::new(db));
    let repository = Arc::new(SellerRepository::new(store));
    let state = AppState::new(repository);

    // Build router with a global cap on in-flight requests
    let app = routes::create_router(state)
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrency));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
