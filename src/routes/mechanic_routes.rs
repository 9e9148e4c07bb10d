use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};

use crate::controllers::mechanic_controller::MechanicController;
use crate::dto::mechanic_dto::{AvailabilityResponse, MechanicResponse, UpdateAvailabilityRequest};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_mechanic_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mechanics))
        .route("/me/availability", patch(update_availability))
}

async fn list_mechanics(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Json<ApiResponse<Vec<MechanicResponse>>> {
    let mechanics = MechanicController::new(&state).directory().await;
    Json(ApiResponse::success(mechanics))
}

async fn update_availability(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, AppError> {
    let response = MechanicController::new(&state)
        .update_availability(user.user_id, request)
        .await?;
    Ok(Json(response))
}
