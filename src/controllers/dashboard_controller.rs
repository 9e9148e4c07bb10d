//! Orquestación del dashboard
//!
//! Las cargas se hacen sin tener el lock de sesiones tomado y se confirman
//! después contra la generación con la que empezaron.

use uuid::Uuid;

use crate::controllers::profile_controller::ProfileController;
use crate::controllers::service_request_controller::ServiceRequestController;
use crate::dto::dashboard_dto::{DashboardView, MechanicsRefreshResponse, MountDashboardRequest};
use crate::models::{Coordinates, UserRole};
use crate::services::dashboard_service::{DashboardSession, LoadedDashboard, Toast};
use crate::services::map_service::{MapRenderer, MapSurface, MarkerDiff};
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError};

pub struct DashboardController<'a> {
    state: &'a AppState,
}

impl<'a> DashboardController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn mount(&self, user_id: Uuid, request: MountDashboardRequest) -> Result<DashboardView, AppError> {
        let sessions = &self.state.sessions;
        let generation = sessions.begin_mount(user_id).await;
        let session_token = sessions
            .snapshot(user_id)
            .await
            .and_then(|s| s.map_token);

        let location = self.state.location.resolve(request.location);

        let profile = ProfileController::new(self.state).load(user_id).await;
        let toast = profile.is_none().then(Toast::profile_load_failed);

        let requests = match &profile {
            Some(profile) => {
                ServiceRequestController::new(self.state)
                    .list_for_profile(profile.id)
                    .await
            }
            None => Vec::new(),
        };

        let is_available = match profile.as_ref() {
            Some(profile) if profile.role == UserRole::Mechanic => self.load_availability(profile.id).await,
            _ => None,
        };

        let shows_mechanics = profile.as_ref().map(|p| p.role) == Some(UserRole::Customer);
        let map = self
            .build_map(session_token.as_deref(), location.coordinates, shows_mechanics)
            .await;

        let loaded = LoadedDashboard {
            profile,
            location,
            requests,
            map,
            toast,
            is_available,
        };

        if sessions.commit_load(user_id, generation, loaded).await {
            log::info!("📊 Dashboard ready for {}", user_id);
            self.initialize_pending_map(user_id, generation).await;
        }

        self.view(user_id).await
    }

    pub async fn unmount(&self, user_id: Uuid) -> bool {
        self.state.sessions.unmount(user_id).await
    }

    pub async fn view(&self, user_id: Uuid) -> Result<DashboardView, AppError> {
        self.state
            .sessions
            .snapshot(user_id)
            .await
            .map(|session| DashboardView::from(&session))
            .ok_or_else(not_mounted)
    }

    /// Guardar el token del mapa y, si ya hay ubicación, inicializar el mapa
    pub async fn set_map_token(&self, user_id: Uuid, token: String) -> Result<DashboardView, AppError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(AppError::BadRequest("Map token must not be empty".to_string()));
        }
        MapRenderer::warn_if_placeholder(&token);

        let generation = self.session(user_id).await?.generation;

        // La ubicación se lee bajo el mismo lock que guarda el token: o la
        // carga ya se confirmó y construimos aquí, o la confirmación verá el token
        let target = self
            .state
            .sessions
            .update_if_current(user_id, generation, |s| {
                s.map_token = Some(token.clone());
                s.location.map(|fix| (fix.coordinates, s.shows_mechanics()))
            })
            .await
            .flatten();

        if let Some((center, shows_mechanics)) = target {
            let map = self.build_map(Some(&token), center, shows_mechanics).await;
            self.state
                .sessions
                .update_if_current(user_id, generation, move |s| s.map = Some(map))
                .await;
        }

        self.view(user_id).await
    }

    /// Tras confirmar la carga: si llegó un token mientras cargaba, inicializar el mapa
    async fn initialize_pending_map(&self, user_id: Uuid, generation: u64) {
        let pending = self
            .state
            .sessions
            .update_if_current(user_id, generation, |s| {
                let prompting = matches!(s.map, Some(MapSurface::TokenRequired(_)));
                match (prompting, s.map_token.clone(), s.location) {
                    (true, Some(token), Some(fix)) => Some((token, fix.coordinates, s.shows_mechanics())),
                    _ => None,
                }
            })
            .await
            .flatten();

        let Some((token, center, shows_mechanics)) = pending else {
            return;
        };

        log::debug!("🗺️ Map token arrived during load for {}", user_id);
        let map = self.build_map(Some(&token), center, shows_mechanics).await;
        self.state
            .sessions
            .update_if_current(user_id, generation, |s| {
                if s.map.as_ref().and_then(MapSurface::view).is_none() {
                    s.map = Some(map);
                }
            })
            .await;
    }

    /// Refrescar los marcadores de mecánicos; solo con mapa y rol cliente
    pub async fn refresh_mechanics(&self, user_id: Uuid) -> Result<MechanicsRefreshResponse, AppError> {
        let session = self.session(user_id).await?;
        let marker_count = map_marker_count(&session);

        let has_map = session.map.as_ref().and_then(MapSurface::view).is_some();
        if !has_map || !session.shows_mechanics() {
            return Ok(MechanicsRefreshResponse {
                refreshed: false,
                diff: None,
                marker_count,
            });
        }

        let mechanics = self.state.directory.fetch_available().await;
        let result = self
            .state
            .sessions
            .update_if_current(user_id, session.generation, |s| {
                s.map
                    .as_mut()
                    .and_then(MapSurface::view_mut)
                    .map(|view| (view.sync_mechanics(&mechanics), view.marker_count()))
            })
            .await
            .flatten();

        Ok(match result {
            Some((diff, marker_count)) => {
                log_diff(&diff);
                MechanicsRefreshResponse {
                    refreshed: true,
                    diff: Some(diff),
                    marker_count,
                }
            }
            None => MechanicsRefreshResponse {
                refreshed: false,
                diff: None,
                marker_count,
            },
        })
    }

    /// Abrir o cerrar el formulario de solicitud (solo clientes)
    pub async fn set_request_form(&self, user_id: Uuid, open: bool) -> Result<DashboardView, AppError> {
        let session = self.session(user_id).await?;
        if open && session.role() != Some(UserRole::Customer) {
            return Err(forbidden_error("open request form", "only customers request help"));
        }

        let changed = self
            .state
            .sessions
            .update_if_current(user_id, session.generation, |s| s.set_request_form_open(open))
            .await
            .unwrap_or(false);
        if !changed {
            return Err(AppError::BadRequest("Dashboard is still loading".to_string()));
        }

        self.view(user_id).await
    }

    async fn session(&self, user_id: Uuid) -> Result<DashboardSession, AppError> {
        self.state
            .sessions
            .snapshot(user_id)
            .await
            .ok_or_else(not_mounted)
    }

    async fn load_availability(&self, profile_id: Uuid) -> Option<bool> {
        match self.state.mechanics.find_by_profile_id(profile_id).await {
            Ok(mechanic) => mechanic.map(|m| m.is_available == Some(true)),
            Err(e) => {
                log::error!("❌ Error fetching mechanic profile: {}", e);
                None
            }
        }
    }

    /// Mapa inicial; con rol cliente se consulta el directorio una vez
    async fn build_map(&self, session_token: Option<&str>, center: Coordinates, shows_mechanics: bool) -> MapSurface {
        let token = self.state.map_token(session_token);
        let mut map = MapRenderer::initialize(token.as_deref(), center);

        if let (Some(view), true) = (map.view_mut(), shows_mechanics) {
            let mechanics = self.state.directory.fetch_available().await;
            log_diff(&view.sync_mechanics(&mechanics));
        }

        map
    }
}

fn not_mounted() -> AppError {
    AppError::NotFound("Dashboard session not mounted".to_string())
}

fn map_marker_count(session: &DashboardSession) -> usize {
    session
        .map
        .as_ref()
        .and_then(MapSurface::view)
        .map_or(0, |view| view.marker_count())
}

fn log_diff(diff: &MarkerDiff) {
    if !diff.is_empty() {
        log::debug!(
            "📍 Markers: +{} ~{} -{}",
            diff.added.len(),
            diff.updated.len(),
            diff.removed.len()
        );
    }
}
