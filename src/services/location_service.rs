//! Proveedor de ubicación
//!
//! El cliente hace una sola lectura de geolocalización y nos envía el
//! resultado. Cualquier fallo se sustituye por la coordenada de respaldo; no
//! hay reintentos ni seguimiento continuo.

use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// Motivo por el que el dispositivo no entregó una posición
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

/// Lectura única informada por el cliente
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationReading {
    Position { lat: f64, lng: f64 },
    Failed { error: GeolocationError },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub is_fallback: bool,
}

#[derive(Debug, Clone)]
pub struct LocationProvider {
    fallback: Coordinates,
}

impl Default for LocationProvider {
    fn default() -> Self {
        Self::new(Coordinates::FALLBACK)
    }
}

impl LocationProvider {
    pub fn new(fallback: Coordinates) -> Self {
        Self { fallback }
    }

    pub fn resolve(&self, reading: Option<LocationReading>) -> LocationFix {
        let error = match reading {
            Some(LocationReading::Position { lat, lng }) => {
                let coordinates = Coordinates::new(lat, lng);
                if coordinates.is_valid() {
                    return LocationFix {
                        coordinates,
                        is_fallback: false,
                    };
                }
                GeolocationError::PositionUnavailable
            }
            Some(LocationReading::Failed { error }) => error,
            None => GeolocationError::Unsupported,
        };

        log::warn!(
            "📍 Error getting location ({:?}), using fallback {}",
            error,
            self.fallback
        );
        LocationFix {
            coordinates: self.fallback,
            is_fallback: true,
        }
    }
}
