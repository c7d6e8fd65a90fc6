use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use configuration::Settings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod forms;
pub mod handlers;
pub mod views;

use views::Views;

/// Largest form body accepted.
const BODY_LIMIT: usize = 64 * 1024;

/// The shared application state that all handlers can access.
///
/// Built once by [`run_server`] (or by a test) and handed to the router;
/// there is no other global state.
pub struct AppState {
    pub db_repo: DbRepository,
    pub views: Views,
}

impl AppState {
    pub fn new(db_repo: DbRepository) -> anyhow::Result<Self> {
        Ok(Self { db_repo, views: Views::new()? })
    }
}

/// Builds the router with all routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::home))
        .route("/addgame", get(handlers::game_form).post(handlers::add_game))
        .route("/drive", get(handlers::drive_form).post(handlers::add_drive))
        .route("/play", get(handlers::play_form).post(handlers::add_play))
        .route("/game/:id", get(handlers::game_details))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/records", get(handlers::api_records))
        .route("/api/games/:id", get(handlers::api_game))
        .fallback(handlers::not_found)
        .layer(middleware::map_response_with_state(state.clone(), error::render_error_pages))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

/// Opens the record store, applies the schema and serves until Ctrl-C.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    let db_pool = database::connect(&settings.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app_state = Arc::new(AppState::new(db_repo.clone())?);
    let app = app(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_repo.close().await;
    tracing::info!("Web server stopped, record store closed.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
