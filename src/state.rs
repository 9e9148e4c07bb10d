//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    InMemoryBackend, MechanicRepository, PgMechanicRepository, PgProfileRepository,
    PgServiceRequestRepository, ProfileRepository, ServiceRequestRepository,
};
use crate::services::{
    DashboardSessions, LocationProvider, MechanicDirectoryService, ReverseGeocoder,
};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub profiles: Arc<dyn ProfileRepository>,
    pub mechanics: Arc<dyn MechanicRepository>,
    pub service_requests: Arc<dyn ServiceRequestRepository>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub directory: MechanicDirectoryService,
    pub location: LocationProvider,
    pub sessions: DashboardSessions,
    /// Solo con backend PostgreSQL; lo usa `/health`
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        profiles: Arc<dyn ProfileRepository>,
        mechanics: Arc<dyn MechanicRepository>,
        service_requests: Arc<dyn ServiceRequestRepository>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            location: LocationProvider::new(config.fallback_location),
            directory: MechanicDirectoryService::new(mechanics.clone()),
            sessions: DashboardSessions::new(),
            config,
            profiles,
            mechanics,
            service_requests,
            geocoder,
            pool: None,
        }
    }

    /// Estado sobre PostgreSQL
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        let mut state = Self::new(
            config,
            Arc::new(PgProfileRepository::new(pool.clone())),
            Arc::new(PgMechanicRepository::new(pool.clone())),
            Arc::new(PgServiceRequestRepository::new(pool.clone())),
            geocoder,
        );
        state.pool = Some(pool);
        state
    }

    /// Estado sobre el backend en memoria (desarrollo y tests)
    pub fn in_memory(
        backend: InMemoryBackend,
        config: EnvironmentConfig,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let backend = Arc::new(backend);
        Self::new(config, backend.clone(), backend.clone(), backend, geocoder)
    }

    /// Token de mapas efectivo: el de la sesión, si no el del servidor
    pub fn map_token(&self, session_token: Option<&str>) -> Option<String> {
        session_token
            .or(self.config.mapbox_token.as_deref())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }
}
