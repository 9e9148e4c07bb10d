//! Coordenadas geográficas

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::validation::{validate_latitude, validate_longitude};

/// Punto en grados decimales (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Coordenada de respaldo cuando la geolocalización no está disponible (NYC)
    pub const FALLBACK: Coordinates = Coordinates {
        lat: 40.7128,
        lng: -74.0060,
    };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        validate_latitude(self.lat).is_ok() && validate_longitude(self.lng).is_ok()
    }

    /// Orden `[lng, lat]` que espera Mapbox
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// `"{lat}, {lng}"` con la representación decimal más corta (`40.0` -> `40`)
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_shortest_representation() {
        assert_eq!(Coordinates::new(40.0, -75.0).to_string(), "40, -75");
        assert_eq!(Coordinates::FALLBACK.to_string(), "40.7128, -74.006");
    }

    #[test]
    fn test_validity() {
        assert!(Coordinates::FALLBACK.is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_lng_lat_order() {
        assert_eq!(Coordinates::new(1.5, 2.5).lng_lat(), [2.5, 1.5]);
    }
}
