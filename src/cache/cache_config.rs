//! Configuración de cache
//!
//! Este módulo contiene la configuración para el sistema de cache.

/// Configuración del cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl: u64,
}

impl CacheConfig {
    pub fn new(redis_url: impl Into<String>, default_ttl: u64) -> Self {
        Self {
            redis_url: redis_url.into(),
            default_ttl,
        }
    }
}
