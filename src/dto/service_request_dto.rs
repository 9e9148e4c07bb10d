use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::service_request::BadgeVariant;
use crate::models::{ServiceRequest, ServiceStatus};
use crate::services::dashboard_service::Toast;

pub use crate::services::service_request_form::ServiceRequestForm as SubmitServiceRequest;

// Response de solicitud
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRequestResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub mechanic_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ServiceStatus,
    pub badge: BadgeVariant,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&ServiceRequest> for ServiceRequestResponse {
    fn from(request: &ServiceRequest) -> Self {
        let status = request.status();
        Self {
            id: request.id,
            customer_id: request.customer_id,
            mechanic_id: request.mechanic_id,
            title: request.title.clone(),
            description: request.description.clone(),
            address: request.address.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            status,
            badge: status.badge_variant(),
            created_at: request.created_at,
        }
    }
}

// Resultado del envío del formulario
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<ServiceRequestResponse>,
    pub toast: Toast,
    pub request_form_open: bool,
}
