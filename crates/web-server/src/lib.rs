use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Config;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod response;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the application router with all routes and middleware attached.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/scientists",
            get(handlers::get_scientists).post(handlers::create_scientist),
        )
        .route(
            "/scientists/:id",
            get(handlers::get_scientist)
                .patch(handlers::update_scientist)
                .delete(handlers::delete_scientist),
        )
        .route("/planets", get(handlers::get_planets))
        .route("/missions", post(handlers::create_mission))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Connects to the database, brings the schema up to date and serves the API
/// until the process is stopped.
///
/// Tracing is expected to be initialised by the caller.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;

    let db_pool = database::connect(&config.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app = app(Arc::new(AppState { db_repo }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
