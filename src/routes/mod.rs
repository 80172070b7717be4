//! Rutas HTTP
//!
//! Ensambla los routers de cada grupo de endpoints bajo `/api`.

pub mod auth_routes;
pub mod maintenance_routes;
pub mod profile_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación con estado y capas aplicadas
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/profile", profile_routes::create_profile_router(state.clone()))
        .nest("/catalog", maintenance_routes::create_catalog_router())
        .nest(
            "/maintenance",
            maintenance_routes::create_maintenance_router(state.clone()),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
