use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Coordinates, MechanicDirectoryEntry, MechanicProfile};
use crate::utils::errors::{validation_error, AppError};

// Entrada del directorio
#[derive(Debug, Clone, Serialize)]
pub struct MechanicResponse {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub display_name: String,
    pub business_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hourly_rate: Option<Decimal>,
    pub specialties: Vec<String>,
    pub service_radius_km: Option<i32>,
    pub years_experience: Option<i32>,
}

impl From<MechanicDirectoryEntry> for MechanicResponse {
    fn from(entry: MechanicDirectoryEntry) -> Self {
        Self {
            display_name: entry.display_name(),
            id: entry.id,
            profile_id: entry.profile_id,
            business_name: entry.business_name,
            first_name: entry.first_name,
            last_name: entry.last_name,
            latitude: entry.latitude,
            longitude: entry.longitude,
            hourly_rate: entry.hourly_rate,
            specialties: entry.specialties.unwrap_or_default(),
            service_radius_km: entry.service_radius_km,
            years_experience: entry.years_experience,
        }
    }
}

// Request para cambiar disponibilidad
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAvailabilityRequest {
    pub is_available: bool,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl UpdateAvailabilityRequest {
    /// Las coordenadas van juntas o no van
    pub fn location(&self) -> Result<Option<Coordinates>, AppError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinates::new(lat, lng))),
            (None, None) => Ok(None),
            (None, Some(_)) => Err(validation_error("latitude", "latitude and longitude go together")),
            (Some(_), None) => Err(validation_error("longitude", "latitude and longitude go together")),
        }
    }
}

// Response de disponibilidad
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub id: Uuid,
    pub is_available: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Visible en el directorio tras el cambio
    pub listed: bool,
}

impl From<&MechanicProfile> for AvailabilityResponse {
    fn from(mechanic: &MechanicProfile) -> Self {
        let is_available = mechanic.is_available == Some(true);
        Self {
            id: mechanic.id,
            is_available,
            latitude: mechanic.latitude,
            longitude: mechanic.longitude,
            listed: is_available && mechanic.latitude.is_some() && mechanic.longitude.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(latitude: Option<f64>, longitude: Option<f64>) -> UpdateAvailabilityRequest {
        UpdateAvailabilityRequest {
            is_available: true,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_coordinates_go_together() {
        assert_eq!(request(None, None).location().unwrap(), None);
        assert_eq!(
            request(Some(40.0), Some(-75.0)).location().unwrap(),
            Some(Coordinates::new(40.0, -75.0))
        );
        assert!(request(Some(40.0), None).location().is_err());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(request(Some(91.0), Some(0.0)).validate().is_err());
        assert!(request(Some(0.0), Some(-181.0)).validate().is_err());
        assert!(request(Some(45.0), Some(170.0)).validate().is_ok());
    }
}
