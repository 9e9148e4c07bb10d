use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::profile_controller::ProfileController;
use crate::dto::profile_dto::ProfileResponse;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::services::role_catalog::{role_catalog, RoleCatalog};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_profile_router() -> Router<AppState> {
    Router::new().route("/me", get(get_my_profile))
}

pub fn create_roles_router() -> Router<AppState> {
    Router::new().route("/", get(list_roles))
}

async fn get_my_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let profile = ProfileController::new(&state).me(user.user_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

async fn list_roles() -> Json<ApiResponse<RoleCatalog>> {
    Json(ApiResponse::success(role_catalog()))
}
