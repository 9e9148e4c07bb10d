//! Modelo de ServiceRequest
//!
//! Mapea la tabla `service_requests`. Las filas nacen en estado `pending`;
//! `mechanic_id` y las transiciones posteriores las aplica un colaborador
//! externo, este servicio no impone el ciclo de vida.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::geo::Coordinates;

/// Estado de la solicitud - mapea al ENUM service_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "service_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

/// Variante visual del badge de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "pending",
            ServiceStatus::Accepted => "accepted",
            ServiceStatus::InProgress => "in_progress",
            ServiceStatus::Completed => "completed",
            ServiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn badge_variant(&self) -> BadgeVariant {
        match self {
            ServiceStatus::Pending => BadgeVariant::Outline,
            ServiceStatus::Accepted => BadgeVariant::Default,
            ServiceStatus::Completed => BadgeVariant::Secondary,
            ServiceStatus::InProgress | ServiceStatus::Cancelled => BadgeVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceRequest {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub mechanic_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: Option<ServiceStatus>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub completed_time: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    /// La columna admite NULL; el valor por defecto del backend es `pending`
    pub fn status(&self) -> ServiceStatus {
        self.status.unwrap_or(ServiceStatus::Pending)
    }
}

/// Fila a insertar; el estado siempre es `pending`
#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    pub customer_id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Coordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&ServiceStatus::InProgress).unwrap(), "\"in_progress\"");
        let status: ServiceStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, ServiceStatus::Cancelled);
    }

    #[test]
    fn test_badge_variants() {
        assert_eq!(ServiceStatus::Pending.badge_variant(), BadgeVariant::Outline);
        assert_eq!(ServiceStatus::Accepted.badge_variant(), BadgeVariant::Default);
        assert_eq!(ServiceStatus::Completed.badge_variant(), BadgeVariant::Secondary);
        assert_eq!(ServiceStatus::InProgress.badge_variant(), BadgeVariant::Destructive);
        assert_eq!(ServiceStatus::Cancelled.badge_variant(), BadgeVariant::Destructive);
    }
}
