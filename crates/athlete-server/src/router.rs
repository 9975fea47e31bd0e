//! HTTP routing

use crate::handlers::{self, api_not_found};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // REST API routes
        .nest("/api", api_routes())
        // Static files, then SPA fallback
        .fallback(handlers::static_files::serve)
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(handlers::auth::login).fallback(api_not_found),
        )
        .route(
            "/logout",
            post(handlers::auth::logout).fallback(api_not_found),
        )
        .route(
            "/athletes",
            get(handlers::athletes::list)
                .post(handlers::athletes::create)
                .fallback(api_not_found),
        )
        .route(
            "/athletes/:id",
            get(handlers::athletes::get)
                .put(handlers::athletes::update)
                .delete(handlers::athletes::delete)
                .fallback(api_not_found),
        )
        .fallback(api_not_found)
}
