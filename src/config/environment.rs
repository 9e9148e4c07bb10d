//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Context, Result};
use std::env;

use crate::models::geo::Coordinates;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Ausente en desarrollo => backend en memoria
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub mapbox_token: Option<String>,
    pub mapbox_geocoding_url: String,
    pub fallback_location: Coordinates,
    pub redis_url: Option<String>,
    pub geocode_cache_ttl: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: None,
            jwt_secret: String::new(),
            jwt_expiration: 3600,
            cors_origins: Vec::new(),
            mapbox_token: None,
            mapbox_geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            fallback_location: Coordinates::FALLBACK,
            redis_url: None,
            geocode_cache_ttl: 86_400,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno (después de `dotenv()`)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        let fallback_location = Coordinates::new(
            parse_var("FALLBACK_LATITUDE", defaults.fallback_location.lat)?,
            parse_var("FALLBACK_LONGITUDE", defaults.fallback_location.lng)?,
        );
        if !fallback_location.is_valid() {
            return Err(anyhow!("FALLBACK_LATITUDE/FALLBACK_LONGITUDE out of range"));
        }

        let config = Self {
            environment,
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: optional_var("DATABASE_URL"),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: optional_var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            mapbox_token: optional_var("MAPBOX_TOKEN"),
            mapbox_geocoding_url: optional_var("MAPBOX_GEOCODING_URL")
                .unwrap_or(defaults.mapbox_geocoding_url),
            fallback_location,
            redis_url: optional_var("REDIS_URL"),
            geocode_cache_ttl: parse_var("GEOCODE_CACHE_TTL", defaults.geocode_cache_ttl)?,
        };

        if config.database_url.is_none() && !config.is_development() {
            return Err(anyhow!("DATABASE_URL must be set outside development"));
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} must be a valid value: {}", key, e)),
        None => Ok(default),
    }
}
