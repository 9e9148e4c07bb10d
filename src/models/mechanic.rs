//! Modelos de mecánicos
//!
//! `MechanicProfile` mapea la tabla `mechanic_profiles` (1:1 con `profiles`).
//! `MechanicDirectoryEntry` es la misma fila unida con el nombre del perfil,
//! tal como la consume el directorio de mecánicos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::geo::Coordinates;
use super::profile::full_name;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MechanicProfile {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub business_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hourly_rate: Option<Decimal>,
    pub specialties: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub service_radius_km: Option<i32>,
    pub years_experience: Option<i32>,
    pub license_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MechanicDirectoryEntry {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub business_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hourly_rate: Option<Decimal>,
    pub specialties: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub service_radius_km: Option<i32>,
    pub years_experience: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl MechanicDirectoryEntry {
    pub fn from_parts(
        mechanic: &MechanicProfile,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            id: mechanic.id,
            profile_id: mechanic.profile_id,
            business_name: mechanic.business_name.clone(),
            latitude: mechanic.latitude,
            longitude: mechanic.longitude,
            hourly_rate: mechanic.hourly_rate,
            specialties: mechanic.specialties.clone(),
            is_available: mechanic.is_available,
            service_radius_km: mechanic.service_radius_km,
            years_experience: mechanic.years_experience,
            first_name,
            last_name,
        }
    }

    /// Solo si ambas coordenadas están presentes
    pub fn location(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }

    /// Un mecánico aparece en el directorio si está disponible y tiene coordenadas
    pub fn is_listed(&self) -> bool {
        self.is_available == Some(true) && self.location().is_some()
    }

    /// Nombre comercial, o "first last" si no hay
    pub fn display_name(&self) -> String {
        match self.business_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => full_name(self.first_name.as_deref(), self.last_name.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> MechanicDirectoryEntry {
        MechanicDirectoryEntry {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            business_name: None,
            latitude: Some(40.73),
            longitude: Some(-73.99),
            hourly_rate: None,
            specialties: None,
            is_available: Some(true),
            service_radius_km: Some(25),
            years_experience: None,
            first_name: Some("Joe".to_string()),
            last_name: Some("Wrench".to_string()),
        }
    }

    #[test]
    fn test_is_listed_requires_availability_and_both_coordinates() {
        assert!(entry().is_listed());

        let mut unavailable = entry();
        unavailable.is_available = Some(false);
        assert!(!unavailable.is_listed());

        let mut unknown = entry();
        unknown.is_available = None;
        assert!(!unknown.is_listed());

        let mut no_lng = entry();
        no_lng.longitude = None;
        assert!(!no_lng.is_listed());
        assert!(no_lng.location().is_none());
    }

    #[test]
    fn test_display_name_prefers_business_name() {
        let mut mechanic = entry();
        assert_eq!(mechanic.display_name(), "Joe Wrench");

        mechanic.business_name = Some("Joe's Garage".to_string());
        assert_eq!(mechanic.display_name(), "Joe's Garage");

        mechanic.business_name = Some("  ".to_string());
        assert_eq!(mechanic.display_name(), "Joe Wrench");
    }
}
