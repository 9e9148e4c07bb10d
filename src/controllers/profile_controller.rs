use uuid::Uuid;

use crate::dto::profile_dto::ProfileResponse;
use crate::models::Profile;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct ProfileController<'a> {
    state: &'a AppState,
}

impl<'a> ProfileController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Perfil del usuario o error (404 si no existe)
    pub async fn require(&self, user_id: Uuid) -> Result<Profile, AppError> {
        self.state
            .profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("Profile for user", &user_id.to_string()))
    }

    /// Igual que `require`, pero el fallo solo se registra
    pub async fn load(&self, user_id: Uuid) -> Option<Profile> {
        match self.require(user_id).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::error!("❌ Error fetching profile for {}: {}", user_id, e);
                None
            }
        }
    }

    pub async fn me(&self, user_id: Uuid) -> Result<ProfileResponse, AppError> {
        let profile = self.require(user_id).await?;
        Ok(ProfileResponse::from(&profile))
    }
}
