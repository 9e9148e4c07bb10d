use serde::Serialize;
use uuid::Uuid;

use crate::models::{Profile, UserRole};

// Response de perfil
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: UserRole,
    pub role_label: &'static str,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            role: profile.role,
            role_label: profile.role.label(),
            display_name: profile.display_name(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone: profile.phone.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}
