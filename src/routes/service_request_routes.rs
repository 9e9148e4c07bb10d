use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::service_request_controller::ServiceRequestController;
use crate::dto::service_request_dto::{ServiceRequestResponse, SubmissionOutcome, SubmitServiceRequest};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_request_router() -> Router<AppState> {
    Router::new().route("/", get(list_service_requests).post(submit_service_request))
}

async fn list_service_requests(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Json<ApiResponse<Vec<ServiceRequestResponse>>> {
    let requests = ServiceRequestController::new(&state).list(user.user_id).await;
    Json(ApiResponse::success(requests))
}

async fn submit_service_request(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(form): Json<SubmitServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionOutcome>>), AppError> {
    let outcome = ServiceRequestController::new(&state)
        .submit(user.user_id, form)
        .await?;

    let message = outcome.toast.description.clone();
    if outcome.submitted {
        Ok((StatusCode::CREATED, Json(ApiResponse::success_with_message(outcome, message))))
    } else {
        Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::failure(outcome, message))))
    }
}
