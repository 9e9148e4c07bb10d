pub mod dashboard_routes;
pub mod mechanic_routes;
pub mod profile_routes;
pub mod service_request_routes;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/roles", profile_routes::create_roles_router())
        .nest("/api/profile", profile_routes::create_profile_router())
        .nest("/api/mechanics", mechanic_routes::create_mechanic_router())
        .nest("/api/service-requests", service_request_routes::create_service_request_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = match &state.pool {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => "ok",
            Err(e) => {
                log::error!("❌ Health check de base de datos falló: {}", e);
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "status": "degraded", "database": "unreachable" })),
                );
            }
        },
        None => "in_memory",
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "database": database,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
