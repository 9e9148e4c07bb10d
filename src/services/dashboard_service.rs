//! Estado del dashboard por sesión
//!
//! Cada usuario montado tiene una `DashboardSession`. Montar la sesión abre
//! una nueva generación; los resultados asíncronos se confirman solo si su
//! generación sigue siendo la actual, así una carga que termina después de
//! desmontar (o de volver a montar) no pisa el estado.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Profile, ServiceRequest, UserRole};
use crate::models::service_request::BadgeVariant;
use crate::services::location_service::LocationFix;
use crate::services::map_service::MapSurface;

pub const BRAND: &str = "FixItFast";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DashboardPhase {
    Loading,
    Ready { request_form_open: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(description: &str) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.to_string(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn profile_load_failed() -> Self {
        Self::error("Failed to load profile")
    }

    pub fn request_submitted() -> Self {
        Self::success(
            "Request Submitted",
            "Your service request has been submitted successfully!",
        )
    }

    pub fn request_failed() -> Self {
        Self::error("Failed to submit service request")
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    pub generation: u64,
    pub phase: DashboardPhase,
    pub profile: Option<Profile>,
    pub location: Option<LocationFix>,
    pub requests: Vec<ServiceRequest>,
    pub map: Option<MapSurface>,
    /// Token del proveedor de mapas tecleado por el usuario; solo en memoria
    pub map_token: Option<String>,
    pub toast: Option<Toast>,
    /// Disponibilidad actual; solo para mecánicos
    pub is_available: Option<bool>,
}

impl DashboardSession {
    fn loading(generation: u64, map_token: Option<String>) -> Self {
        Self {
            generation,
            phase: DashboardPhase::Loading,
            profile: None,
            location: None,
            requests: Vec::new(),
            map: None,
            map_token,
            toast: None,
            is_available: None,
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.profile.as_ref().map(|p| p.role)
    }

    pub fn is_request_form_open(&self) -> bool {
        matches!(self.phase, DashboardPhase::Ready { request_form_open: true })
    }

    /// Solo los clientes ven mecánicos en el mapa
    pub fn shows_mechanics(&self) -> bool {
        self.role() == Some(UserRole::Customer)
    }

    pub fn set_request_form_open(&mut self, open: bool) -> bool {
        match self.phase {
            DashboardPhase::Ready { .. } => {
                self.phase = DashboardPhase::Ready { request_form_open: open };
                true
            }
            DashboardPhase::Loading => false,
        }
    }
}

/// Resultado de una carga, pendiente de confirmar contra la generación
#[derive(Debug, Clone)]
pub struct LoadedDashboard {
    pub profile: Option<Profile>,
    pub location: LocationFix,
    pub requests: Vec<ServiceRequest>,
    pub map: MapSurface,
    pub toast: Option<Toast>,
    pub is_available: Option<bool>,
}

#[derive(Clone, Default)]
pub struct DashboardSessions {
    sessions: Arc<RwLock<HashMap<Uuid, DashboardSession>>>,
    next_generation: Arc<AtomicU64>,
}

impl DashboardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abrir una nueva generación en estado `loading`; el token del mapa sobrevive
    pub async fn begin_mount(&self, user_id: Uuid) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut sessions = self.sessions.write().await;

        let map_token = sessions.get(&user_id).and_then(|s| s.map_token.clone());
        sessions.insert(user_id, DashboardSession::loading(generation, map_token));

        log::debug!("🧭 Dashboard mount for {} (generation {})", user_id, generation);
        generation
    }

    /// Confirmar una carga; devuelve false si la generación ya no es la actual
    pub async fn commit_load(&self, user_id: Uuid, generation: u64, loaded: LoadedDashboard) -> bool {
        self.update_if_current(user_id, generation, |session| {
            session.profile = loaded.profile;
            session.location = Some(loaded.location);
            session.requests = loaded.requests;
            session.map = Some(loaded.map);
            session.toast = loaded.toast;
            session.is_available = loaded.is_available;
            session.phase = DashboardPhase::Ready { request_form_open: false };
        })
        .await
        .is_some()
    }

    /// Aplicar `f` solo si la sesión existe y sigue en `generation`
    pub async fn update_if_current<R>(
        &self,
        user_id: Uuid,
        generation: u64,
        f: impl FnOnce(&mut DashboardSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&user_id) {
            Some(session) if session.generation == generation => Some(f(session)),
            _ => {
                log::debug!(
                    "🗑️ Discarding stale result for {} (generation {})",
                    user_id,
                    generation
                );
                None
            }
        }
    }

    pub async fn update<R>(&self, user_id: Uuid, f: impl FnOnce(&mut DashboardSession) -> R) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&user_id).map(f)
    }

    pub async fn snapshot(&self, user_id: Uuid) -> Option<DashboardSession> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    pub async fn unmount(&self, user_id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&user_id).is_some();
        if removed {
            log::debug!("🧭 Dashboard unmounted for {}", user_id);
        }
        removed
    }
}

// ---------------------------------------------------------------------------
// Paneles por rol

#[derive(Debug, Clone, Serialize)]
pub struct RequestListItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub status: &'static str,
    pub badge: BadgeVariant,
}

impl From<&ServiceRequest> for RequestListItem {
    fn from(request: &ServiceRequest) -> Self {
        let status = request.status();
        Self {
            id: request.id,
            title: request.title.clone(),
            description: request.description.clone(),
            address: request.address.clone(),
            status: status.as_str(),
            badge: status.badge_variant(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Map {
        title: &'static str,
        description: &'static str,
        show_mechanics: bool,
    },
    RequestHelp {
        title: &'static str,
        description: &'static str,
        action: &'static str,
    },
    Availability {
        title: &'static str,
        description: &'static str,
        is_available: bool,
    },
    RequestList {
        title: &'static str,
        empty_message: &'static str,
        items: Vec<RequestListItem>,
    },
}

fn map_panel(show_mechanics: bool) -> Panel {
    Panel::Map {
        title: "Nearby Mechanics",
        description: "Find mechanics in your area and track service requests",
        show_mechanics,
    }
}

fn request_items(requests: &[ServiceRequest]) -> Vec<RequestListItem> {
    requests.iter().map(RequestListItem::from).collect()
}

pub fn customer_panels(requests: &[ServiceRequest]) -> Vec<Panel> {
    vec![
        map_panel(true),
        Panel::RequestHelp {
            title: "Request Service",
            description: "Need roadside assistance? Submit a request",
            action: "Request Help",
        },
        Panel::RequestList {
            title: "My Requests",
            empty_message: "No service requests yet",
            items: request_items(requests),
        },
    ]
}

pub fn mechanic_panels(requests: &[ServiceRequest], is_available: bool) -> Vec<Panel> {
    vec![
        map_panel(false),
        Panel::Availability {
            title: "Availability",
            description: "Toggle whether customers can see you on the map",
            is_available,
        },
        Panel::RequestList {
            title: "Available Jobs",
            empty_message: "No available jobs",
            items: request_items(requests),
        },
    ]
}

pub fn panels_for(session: &DashboardSession) -> Vec<Panel> {
    let requests = &session.requests;
    match session.role() {
        Some(UserRole::Customer) => customer_panels(requests),
        Some(UserRole::Mechanic) => mechanic_panels(requests, session.is_available.unwrap_or(false)),
        // Sin perfil no hay paneles de rol
        None => vec![map_panel(false)],
    }
}
