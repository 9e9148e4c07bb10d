//! Formulario de solicitud de servicio
//!
//! Valida título y descripción y resuelve la dirección: la escrita por el
//! usuario, o una geocodificación inversa de la ubicación actual, o un texto
//! de respaldo.

use serde::Deserialize;
use validator::Validate;

use crate::models::Coordinates;
use crate::services::geocoding_service::ReverseGeocoder;
use crate::utils::validation::validate_not_blank;

pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceRequestForm {
    #[validate(custom = "validate_not_blank")]
    pub title: String,
    #[validate(custom = "validate_not_blank")]
    pub description: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Datos listos para persistir
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedServiceRequest {
    pub title: String,
    pub description: String,
    pub address: String,
}

impl ServiceRequestForm {
    fn typed_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }

    /// Resolver la dirección final.
    ///
    /// Se hace como mucho una llamada al geocodificador, y solo cuando el
    /// usuario no escribió dirección y hay coordenadas.
    pub async fn resolve(
        &self,
        location: Option<Coordinates>,
        geocoder: &dyn ReverseGeocoder,
        access_token: &str,
    ) -> ResolvedServiceRequest {
        let address = match (self.typed_address(), location) {
            (Some(address), _) => address.to_string(),
            (None, Some(location)) => match geocoder.reverse_geocode(location, access_token).await {
                Ok(place_name) => place_name,
                Err(e) => {
                    log::error!("❌ Error getting address: {}", e);
                    location.to_string()
                }
            },
            (None, None) => LOCATION_NOT_SPECIFIED.to_string(),
        };

        ResolvedServiceRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGeocoder {
        place_name: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubGeocoder {
        fn new(place_name: Option<&'static str>) -> Self {
            Self {
                place_name,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReverseGeocoder for StubGeocoder {
        async fn reverse_geocode(&self, _location: Coordinates, _access_token: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.place_name {
                Some(name) => Ok(name.to_string()),
                None => bail!("geocoding unavailable"),
            }
        }
    }

    fn form(title: &str, description: &str, address: Option<&str>) -> ServiceRequestForm {
        ServiceRequestForm {
            title: title.to_string(),
            description: description.to_string(),
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn test_validation_requires_title_and_description() {
        assert!(form("Flat tire", "Rear left", None).validate().is_ok());
        assert!(form("", "Rear left", None).validate().is_err());
        assert!(form("Flat tire", "   ", None).validate().is_err());
    }

    #[tokio::test]
    async fn test_typed_address_skips_geocoding() {
        let geocoder = StubGeocoder::new(Some("Somewhere"));
        let resolved = form(" Flat tire ", " Rear left ", Some(" 5th Ave "))
            .resolve(Some(Coordinates::new(40.0, -75.0)), &geocoder, "pk.test")
            .await;

        assert_eq!(resolved.title, "Flat tire");
        assert_eq!(resolved.description, "Rear left");
        assert_eq!(resolved.address, "5th Ave");
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_geocoded_address_is_used() {
        let geocoder = StubGeocoder::new(Some("1 Main St, Springfield"));
        let resolved = form("Dead battery", "Won't start", Some(""))
            .resolve(Some(Coordinates::new(40.0, -75.0)), &geocoder, "pk.test")
            .await;

        assert_eq!(resolved.address, "1 Main St, Springfield");
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_geocoding_failure_falls_back_to_coordinates() {
        let geocoder = StubGeocoder::new(None);
        let resolved = form("Dead battery", "Won't start", None)
            .resolve(Some(Coordinates::new(40.0, -75.0)), &geocoder, "pk.test")
            .await;

        assert_eq!(resolved.address, "40, -75");
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_coordinates_no_address() {
        let geocoder = StubGeocoder::new(Some("unused"));
        let resolved = form("Engine trouble", "Smoke", None)
            .resolve(None, &geocoder, "pk.test")
            .await;

        assert_eq!(resolved.address, LOCATION_NOT_SPECIFIED);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }
}
