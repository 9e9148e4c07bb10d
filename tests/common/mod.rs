#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use roadside_assist::config::environment::EnvironmentConfig;
use roadside_assist::models::{Coordinates, MechanicProfile, Profile, UserRole};
use roadside_assist::repositories::{InMemoryBackend, ProfileRepository};
use roadside_assist::utils::errors::AppError;
use roadside_assist::services::ReverseGeocoder;
use roadside_assist::utils::jwt::{generate_token, JwtConfig};
use roadside_assist::{create_app, AppState};

pub const TEST_SECRET: &str = "test-secret";

/// Geocodificador sin red que cuenta las llamadas
pub struct StubGeocoder {
    place_name: Option<String>,
    pub calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn succeeding(place_name: &str) -> Self {
        Self {
            place_name: Some(place_name.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            place_name: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReverseGeocoder for StubGeocoder {
    async fn reverse_geocode(&self, _location: Coordinates, _access_token: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.place_name {
            Some(name) => Ok(name.clone()),
            None => bail!("geocoding unavailable"),
        }
    }
}

/// Perfiles en memoria con latencia, para cargas del dashboard que tardan
pub struct SlowProfiles {
    inner: InMemoryBackend,
    delay: Duration,
}

#[async_trait]
impl ProfileRepository for SlowProfiles {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_by_user_id(user_id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: InMemoryBackend,
    pub geocoder: Arc<StubGeocoder>,
    pub customer: Profile,
    pub mechanic: Profile,
    /// Mecánicos que deben aparecer en el directorio
    pub listed_mechanics: usize,
}

pub fn test_config(mapbox_token: Option<&str>) -> EnvironmentConfig {
    EnvironmentConfig {
        jwt_secret: TEST_SECRET.to_string(),
        mapbox_token: mapbox_token.map(str::to_string),
        ..EnvironmentConfig::default()
    }
}

pub fn profile(role: UserRole, first_name: &str, last_name: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        role,
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        phone: None,
        avatar_url: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn mechanic_row(
    profile_id: Uuid,
    business_name: Option<&str>,
    is_available: Option<bool>,
    location: Option<(f64, f64)>,
) -> MechanicProfile {
    MechanicProfile {
        id: Uuid::new_v4(),
        profile_id,
        business_name: business_name.map(str::to_string),
        latitude: location.map(|(lat, _)| lat),
        longitude: location.map(|(_, lng)| lng),
        hourly_rate: Decimal::from_str("75.00").ok(),
        specialties: Some(vec!["Tires".to_string(), "Batteries".to_string()]),
        is_available,
        service_radius_km: Some(25),
        years_experience: Some(8),
        license_number: None,
        created_at: None,
        updated_at: None,
    }
}

/// App con un cliente, un mecánico propio y un directorio mixto:
/// dos mecánicos listados, uno no disponible y uno sin coordenadas.
pub async fn spawn_app(mapbox_token: Option<&str>, geocoder: StubGeocoder) -> TestApp {
    spawn_app_with_profile_delay(mapbox_token, geocoder, None).await
}

pub async fn spawn_app_with_profile_delay(
    mapbox_token: Option<&str>,
    geocoder: StubGeocoder,
    profile_delay: Option<Duration>,
) -> TestApp {
    let backend = InMemoryBackend::new();

    let customer = profile(UserRole::Customer, "Casey", "Driver");
    let mechanic = profile(UserRole::Mechanic, "Morgan", "Wrench");
    backend.insert_profile(customer.clone()).await;
    backend.insert_profile(mechanic.clone()).await;

    // El mecánico propio empieza no disponible y sin ubicación
    backend
        .insert_mechanic(mechanic_row(mechanic.id, None, Some(false), None))
        .await;

    let others = [
        ("Ana", "Gomez", Some("Quick Fix"), Some(true), Some((40.72, -74.01))),
        ("Bo", "Li", None, Some(true), Some((40.70, -73.99))),
        ("Cy", "Ray", Some("Closed Garage"), Some(false), Some((40.71, -74.00))),
        ("Di", "Fox", Some("Nowhere Motors"), Some(true), None),
    ];
    for (first, last, business, available, location) in others {
        let owner = profile(UserRole::Mechanic, first, last);
        backend
            .insert_mechanic(mechanic_row(owner.id, business, available, location))
            .await;
        backend.insert_profile(owner).await;
    }

    let geocoder = Arc::new(geocoder);
    let state = match profile_delay {
        Some(delay) => {
            let shared = Arc::new(backend.clone());
            let profiles = SlowProfiles {
                inner: backend.clone(),
                delay,
            };
            AppState::new(
                test_config(mapbox_token),
                Arc::new(profiles),
                shared.clone(),
                shared,
                geocoder.clone(),
            )
        }
        None => AppState::in_memory(backend.clone(), test_config(mapbox_token), geocoder.clone()),
    };

    TestApp {
        router: create_app(state),
        backend,
        geocoder,
        customer,
        mechanic,
        listed_mechanics: 2,
    }
}

pub fn token_for(user_id: Uuid) -> String {
    let config = JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration: 3600,
    };
    generate_token(user_id, &config).unwrap()
}

impl TestApp {
    pub fn customer_token(&self) -> String {
        token_for(self.customer.user_id)
    }

    pub fn mechanic_token(&self) -> String {
        token_for(self.mechanic.user_id)
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }
}
