use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{DashboardView, MapTokenRequest, MechanicsRefreshResponse, MountDashboardRequest};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/session", post(mount_dashboard).delete(unmount_dashboard))
        .route("/map/token", post(set_map_token))
        .route("/mechanics/refresh", post(refresh_mechanics))
        .route("/request-form", post(open_request_form).delete(close_request_form))
}

async fn mount_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    request: Option<Json<MountDashboardRequest>>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let view = DashboardController::new(&state).mount(user.user_id, request).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn unmount_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Json<ApiResponse<()>> {
    if DashboardController::new(&state).unmount(user.user_id).await {
        Json(ApiResponse::ok("Dashboard unmounted".to_string()))
    } else {
        Json(ApiResponse::ok("Dashboard was not mounted".to_string()))
    }
}

async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = DashboardController::new(&state).view(user.user_id).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn set_map_token(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<MapTokenRequest>,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = DashboardController::new(&state)
        .set_map_token(user.user_id, request.token)
        .await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn refresh_mechanics(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<MechanicsRefreshResponse>>, AppError> {
    let response = DashboardController::new(&state)
        .refresh_mechanics(user.user_id)
        .await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn open_request_form(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = DashboardController::new(&state)
        .set_request_form(user.user_id, true)
        .await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn close_request_form(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let view = DashboardController::new(&state)
        .set_request_form(user.user_id, false)
        .await?;
    Ok(Json(ApiResponse::success(view)))
}
