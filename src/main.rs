use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use roadside_assist::cache::{CacheConfig, RedisClient};
use roadside_assist::config::database::DatabaseConfig;
use roadside_assist::config::environment::EnvironmentConfig;
use roadside_assist::database::DatabaseConnection;
use roadside_assist::repositories::InMemoryBackend;
use roadside_assist::services::GeocodingService;
use roadside_assist::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🔧 FixItFast - Roadside Assistance API");
    info!("======================================");

    let config = EnvironmentConfig::from_env()?;

    // Cache opcional de geocodificación inversa
    let mut geocoder = GeocodingService::new(config.mapbox_geocoding_url.clone())?;
    if let Some(redis_url) = &config.redis_url {
        match RedisClient::new(CacheConfig::new(redis_url.clone(), config.geocode_cache_ttl)).await {
            Ok(client) => {
                info!("✅ Redis conectado exitosamente");
                geocoder = geocoder.with_cache(client);
            }
            Err(e) => warn!("⚠️ Redis no disponible, geocodificación sin cache: {}", e),
        }
    }
    let geocoder = Arc::new(geocoder);

    if config.mapbox_token.is_none() {
        warn!("⚠️ MAPBOX_TOKEN no configurado: los clientes deberán enviar su token");
    }

    let state = match &config.database_url {
        Some(url) => {
            let connection = DatabaseConnection::new(&DatabaseConfig::new(url.clone())).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                e
            })?;
            AppState::with_pool(connection.pool().clone(), config.clone(), geocoder)
        }
        None => {
            warn!("⚠️ DATABASE_URL no configurado: usando backend en memoria (solo desarrollo)");
            AppState::in_memory(InMemoryBackend::new(), config.clone(), geocoder)
        }
    };

    let app = create_app(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    info!("   GET    /api/roles");
    info!("   GET    /api/profile/me");
    info!("   GET    /api/mechanics");
    info!("   PATCH  /api/mechanics/me/availability");
    info!("   GET    /api/service-requests");
    info!("   POST   /api/service-requests");
    info!("📊 Dashboard:");
    info!("   POST   /api/dashboard/session");
    info!("   GET    /api/dashboard");
    info!("   DELETE /api/dashboard/session");
    info!("   POST   /api/dashboard/map/token");
    info!("   POST   /api/dashboard/mechanics/refresh");
    info!("   POST   /api/dashboard/request-form");
    info!("   DELETE /api/dashboard/request-form");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
