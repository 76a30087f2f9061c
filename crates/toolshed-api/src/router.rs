//! Route table and server entry point

use std::future::Future;

use axum::Router;
use axum::routing::{get, patch, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the API router over `state`
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/categories", get(handlers::list_categories))
        .route("/categories/:id", get(handlers::get_category))
        .route(
            "/categories/:id/workshops",
            get(handlers::list_category_workshops),
        )
        .route("/workshops", get(handlers::list_workshops))
        .route("/workshops/featured", get(handlers::list_featured_workshops))
        .route("/workshops/weekend", get(handlers::list_weekend_workshops))
        .route("/workshops/:id", get(handlers::get_workshop))
        .route(
            "/workshops/:id/availability",
            patch(handlers::update_availability),
        )
        .route("/workshops/:id/book", post(handlers::book_workshop))
        .route("/hosts", get(handlers::list_hosts))
        .route("/hosts/:id", get(handlers::get_host))
        .route("/testimonials", get(handlers::list_testimonials));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
