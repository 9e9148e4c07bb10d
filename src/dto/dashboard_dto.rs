use serde::{Deserialize, Serialize};

use crate::dto::profile_dto::ProfileResponse;
use crate::services::dashboard_service::{
    panels_for, DashboardPhase, DashboardSession, Panel, Toast, BRAND,
};
use crate::services::location_service::{LocationFix, LocationReading};
use crate::services::map_service::{MapSurface, MarkerDiff};

// Request de montaje: la lectura única de geolocalización del cliente
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MountDashboardRequest {
    #[serde(default)]
    pub location: Option<LocationReading>,
}

// Request con el token del proveedor de mapas
#[derive(Debug, Clone, Deserialize)]
pub struct MapTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardHeader {
    pub brand: &'static str,
    pub role_badge: &'static str,
}

// Vista completa del dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generation: u64,
    pub phase: &'static str,
    pub request_form_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<DashboardHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationFix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapSurface>,
    pub panels: Vec<Panel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}

impl From<&DashboardSession> for DashboardView {
    fn from(session: &DashboardSession) -> Self {
        let role = session.role();
        // En `loading` solo se muestra el indicador de carga
        let (phase, panels) = match session.phase {
            DashboardPhase::Loading => ("loading", Vec::new()),
            DashboardPhase::Ready { .. } => ("ready", panels_for(session)),
        };

        Self {
            generation: session.generation,
            phase,
            request_form_open: session.is_request_form_open(),
            header: role.map(|role| DashboardHeader {
                brand: BRAND,
                role_badge: role.label(),
            }),
            profile: session.profile.as_ref().map(ProfileResponse::from),
            location: session.location,
            map: session.map.clone(),
            panels,
            toast: session.toast.clone(),
        }
    }
}

// Resultado de refrescar el directorio en el mapa
#[derive(Debug, Clone, Serialize)]
pub struct MechanicsRefreshResponse {
    /// false cuando no hay mapa o el rol no muestra mecánicos
    pub refreshed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<MarkerDiff>,
    pub marker_count: usize,
}
