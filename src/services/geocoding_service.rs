use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::cache::{redis_client::reverse_geocode_key, CacheOperations, RedisClient};
use crate::models::Coordinates;

lazy_static! {
    // Credenciales de ejemplo tipo "YOUR_MAPBOX_TOKEN" o "<token>"
    static ref PLACEHOLDER_TOKEN: Regex =
        Regex::new(r"(?i)^(your[_-]?\w*token|<[^>]*>|x+|changeme|placeholder)$")
            .expect("valid placeholder regex");
}

/// Un token vacío o de ejemplo nunca llega al proveedor
pub fn is_placeholder_token(token: &str) -> bool {
    let token = token.trim();
    token.is_empty() || PLACEHOLDER_TOKEN.is_match(token)
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Nombre legible del lugar en `location`
    async fn reverse_geocode(&self, location: Coordinates, access_token: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct MapboxReverseResponse {
    #[serde(default)]
    features: Vec<MapboxFeature>,
}

#[derive(Debug, Deserialize)]
struct MapboxFeature {
    place_name: Option<String>,
}

pub struct GeocodingService {
    base_url: String,
    client: reqwest::Client,
    cache: Option<RedisClient>,
}

impl GeocodingService {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("RoadsideAssist/1.0")
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: RedisClient) -> Self {
        self.cache = Some(cache);
        self
    }

    /// `{base}/{lng},{lat}.json?access_token=...`
    fn reverse_url(&self, location: Coordinates, access_token: &str) -> String {
        format!(
            "{}/{},{}.json?access_token={}",
            self.base_url,
            location.lng,
            location.lat,
            urlencoding::encode(access_token)
        )
    }

    async fn fetch_place_name(&self, location: Coordinates, access_token: &str) -> Result<String> {
        let url = self.reverse_url(location, access_token);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        log::debug!("📡 Reverse geocoding status: {}", status);
        if !status.is_success() {
            bail!("Reverse geocoding failed with status {}", status);
        }

        let body: MapboxReverseResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse reverse geocoding response: {}", e))?;

        body.features
            .into_iter()
            .next()
            .and_then(|feature| feature.place_name)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| anyhow!("No place found for {}", location))
    }
}

#[async_trait]
impl ReverseGeocoder for GeocodingService {
    async fn reverse_geocode(&self, location: Coordinates, access_token: &str) -> Result<String> {
        if is_placeholder_token(access_token) {
            bail!("Mapbox token missing or placeholder");
        }

        log::info!("🗺️ Reverse geocoding {}", location);

        let key = reverse_geocode_key(location);
        if let Some(cache) = &self.cache {
            if let Ok(Some(place_name)) = cache.get::<String>(&key).await {
                return Ok(place_name);
            }
        }

        let place_name = self.fetch_place_name(location, access_token).await?;
        log::info!("✅ Reverse geocoding successful: {} -> {}", location, place_name);

        if let Some(cache) = &self.cache {
            // Un fallo del cache no invalida el resultado
            let _ = cache.set(&key, &place_name, cache.default_ttl()).await;
        }

        Ok(place_name)
    }
}
