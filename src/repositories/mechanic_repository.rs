use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::MechanicRepository;
use crate::models::{Coordinates, MechanicDirectoryEntry, MechanicProfile};
use crate::utils::errors::AppError;

pub struct PgMechanicRepository {
    pool: PgPool,
}

impl PgMechanicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MechanicRepository for PgMechanicRepository {
    async fn find_available(&self) -> Result<Vec<MechanicDirectoryEntry>, AppError> {
        let mechanics = sqlx::query_as::<_, MechanicDirectoryEntry>(
            r#"
            SELECT m.id, m.profile_id, m.business_name, m.latitude, m.longitude,
                   m.hourly_rate, m.specialties, m.is_available, m.service_radius_km,
                   m.years_experience, p.first_name, p.last_name
            FROM mechanic_profiles m
            LEFT JOIN profiles p ON p.id = m.profile_id
            WHERE m.is_available = true
              AND m.latitude IS NOT NULL
              AND m.longitude IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(mechanics)
    }

    async fn find_by_profile_id(&self, profile_id: Uuid) -> Result<Option<MechanicProfile>, AppError> {
        let mechanic = sqlx::query_as::<_, MechanicProfile>(
            "SELECT * FROM mechanic_profiles WHERE profile_id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mechanic)
    }

    async fn update_availability(
        &self,
        profile_id: Uuid,
        is_available: bool,
        location: Option<Coordinates>,
    ) -> Result<MechanicProfile, AppError> {
        // Sin coordenadas nuevas se conservan las actuales
        let mechanic = sqlx::query_as::<_, MechanicProfile>(
            r#"
            UPDATE mechanic_profiles
            SET is_available = $2,
                latitude = COALESCE($3, latitude),
                longitude = COALESCE($4, longitude),
                updated_at = now()
            WHERE profile_id = $1
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(is_available)
        .bind(location.map(|l| l.lat))
        .bind(location.map(|l| l.lng))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Mechanic profile not found".to_string()))?;

        Ok(mechanic)
    }
}
