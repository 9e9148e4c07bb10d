use uuid::Uuid;
use validator::Validate;

use crate::controllers::profile_controller::ProfileController;
use crate::dto::service_request_dto::{
    ServiceRequestResponse, SubmissionOutcome, SubmitServiceRequest,
};
use crate::models::{Coordinates, NewServiceRequest, Profile, ServiceRequest, UserRole};
use crate::services::dashboard_service::Toast;
use crate::services::service_request_form::ResolvedServiceRequest;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError};

pub struct ServiceRequestController<'a> {
    state: &'a AppState,
}

impl<'a> ServiceRequestController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Solicitudes del perfil, más nuevas primero; un fallo deja la lista vacía
    pub async fn list_for_profile(&self, profile_id: Uuid) -> Vec<ServiceRequest> {
        match self.state.service_requests.find_by_customer(profile_id).await {
            Ok(requests) => requests,
            Err(e) => {
                log::error!("❌ Error fetching service requests: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn list(&self, user_id: Uuid) -> Vec<ServiceRequestResponse> {
        let Some(profile) = ProfileController::new(self.state).load(user_id).await else {
            return Vec::new();
        };

        let requests = self.list_for_profile(profile.id).await;
        requests.iter().map(ServiceRequestResponse::from).collect()
    }

    /// Enviar el formulario.
    ///
    /// Un formulario inválido se rechaza sin tocar el almacén. Cualquier
    /// fallo posterior se traduce en el toast genérico y el formulario
    /// sigue abierto; el éxito lo cierra y recarga la lista de la sesión.
    pub async fn submit(&self, user_id: Uuid, form: SubmitServiceRequest) -> Result<SubmissionOutcome, AppError> {
        form.validate()?;

        let session = self.state.sessions.snapshot(user_id).await;
        let generation = session.as_ref().map(|s| s.generation);

        let profile = match ProfileController::new(self.state).require(user_id).await {
            Ok(profile) => profile,
            Err(e) => return Ok(self.fail(user_id, generation, e).await),
        };
        if profile.role != UserRole::Customer {
            return Err(forbidden_error("submit service request", "only customers request help"));
        }

        let location = session
            .as_ref()
            .and_then(|s| s.location)
            .map(|fix| fix.coordinates);
        let token = self
            .state
            .map_token(session.as_ref().and_then(|s| s.map_token.as_deref()))
            .unwrap_or_default();

        let resolved = form
            .resolve(location, self.state.geocoder.as_ref(), &token)
            .await;

        let created = match self.create(&profile, resolved, location).await {
            Ok(created) => created,
            Err(e) => return Ok(self.fail(user_id, generation, e).await),
        };
        log::info!("✅ Service request {} submitted", created.id);

        let toast = Toast::request_submitted();
        if let Some(generation) = generation {
            let requests = self.list_for_profile(profile.id).await;
            let toast = toast.clone();
            self.state
                .sessions
                .update_if_current(user_id, generation, move |session| {
                    session.requests = requests;
                    session.set_request_form_open(false);
                    session.toast = Some(toast);
                })
                .await;
        }

        Ok(SubmissionOutcome {
            submitted: true,
            request: Some(ServiceRequestResponse::from(&created)),
            toast,
            request_form_open: false,
        })
    }

    async fn create(
        &self,
        profile: &Profile,
        resolved: ResolvedServiceRequest,
        location: Option<Coordinates>,
    ) -> Result<ServiceRequest, AppError> {
        // latitude/longitude son NOT NULL en service_requests
        let location = location.ok_or_else(|| {
            AppError::BadRequest("Service request needs coordinates".to_string())
        })?;

        self.state
            .service_requests
            .create(NewServiceRequest {
                customer_id: profile.id,
                title: resolved.title,
                description: resolved.description,
                address: resolved.address,
                location,
            })
            .await
    }

    async fn fail(&self, user_id: Uuid, generation: Option<u64>, error: AppError) -> SubmissionOutcome {
        log::error!("❌ Error submitting request: {}", error);
        let toast = Toast::request_failed();

        let mut request_form_open = true;
        if let Some(generation) = generation {
            let session_toast = toast.clone();
            request_form_open = self
                .state
                .sessions
                .update_if_current(user_id, generation, move |session| {
                    session.toast = Some(session_toast);
                    session.is_request_form_open()
                })
                .await
                .unwrap_or(true);
        }

        SubmissionOutcome {
            submitted: false,
            request: None,
            toast,
            request_form_open,
        }
    }
}
