//! Cache
//!
//! Cache Redis opcional para las geocodificaciones inversas.

pub mod cache_config;
pub mod redis_client;

pub use cache_config::CacheConfig;
pub use redis_client::RedisClient;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Operaciones de cache con valores serializados en JSON
#[async_trait::async_trait]
pub trait CacheOperations: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
}
