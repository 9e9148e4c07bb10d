use uuid::Uuid;
use validator::Validate;

use crate::controllers::profile_controller::ProfileController;
use crate::dto::mechanic_dto::{AvailabilityResponse, MechanicResponse, UpdateAvailabilityRequest};
use crate::dto::ApiResponse;
use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, AppError};

pub struct MechanicController<'a> {
    state: &'a AppState,
}

impl<'a> MechanicController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn directory(&self) -> Vec<MechanicResponse> {
        self.state
            .directory
            .fetch_available()
            .await
            .into_iter()
            .map(MechanicResponse::from)
            .collect()
    }

    pub async fn update_availability(
        &self,
        user_id: Uuid,
        request: UpdateAvailabilityRequest,
    ) -> Result<ApiResponse<AvailabilityResponse>, AppError> {
        request.validate()?;
        let location = request.location()?;

        let profile = ProfileController::new(self.state).require(user_id).await?;
        if profile.role != UserRole::Mechanic {
            return Err(forbidden_error("update availability", "only mechanics have availability"));
        }

        let mechanic = self
            .state
            .mechanics
            .update_availability(profile.id, request.is_available, location)
            .await?;

        // El panel de disponibilidad del dashboard refleja el cambio
        let is_available = request.is_available;
        self.state
            .sessions
            .update(user_id, move |session| session.is_available = Some(is_available))
            .await;

        log::info!(
            "🔧 Mechanic {} availability set to {}",
            mechanic.id,
            request.is_available
        );

        Ok(ApiResponse::success_with_message(
            AvailabilityResponse::from(&mechanic),
            "Availability updated".to_string(),
        ))
    }
}
