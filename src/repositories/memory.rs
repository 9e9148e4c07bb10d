//! Backend en memoria
//!
//! Implementa los tres repositorios sobre vectores protegidos por `RwLock`.
//! Se usa cuando no hay `DATABASE_URL` en desarrollo y en los tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MechanicRepository, ProfileRepository, ServiceRequestRepository};
use crate::models::{
    Coordinates, MechanicDirectoryEntry, MechanicProfile, NewServiceRequest, Profile,
    ServiceRequest, ServiceStatus,
};
use crate::utils::errors::AppError;

#[derive(Default)]
struct Tables {
    profiles: Vec<Profile>,
    mechanic_profiles: Vec<MechanicProfile>,
    // Orden de inserción; desempata `created_at` iguales
    service_requests: Vec<ServiceRequest>,
}

#[derive(Clone, Default)]
pub struct InMemoryBackend {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: Profile) {
        self.tables.write().await.profiles.push(profile);
    }

    pub async fn insert_mechanic(&self, mechanic: MechanicProfile) {
        self.tables.write().await.mechanic_profiles.push(mechanic);
    }

    pub async fn service_request_count(&self) -> usize {
        self.tables.read().await.service_requests.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryBackend {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }
}

#[async_trait]
impl MechanicRepository for InMemoryBackend {
    async fn find_available(&self) -> Result<Vec<MechanicDirectoryEntry>, AppError> {
        let tables = self.tables.read().await;

        let entries = tables
            .mechanic_profiles
            .iter()
            .map(|mechanic| {
                let owner = tables.profiles.iter().find(|p| p.id == mechanic.profile_id);
                MechanicDirectoryEntry::from_parts(
                    mechanic,
                    owner.and_then(|p| p.first_name.clone()),
                    owner.and_then(|p| p.last_name.clone()),
                )
            })
            .filter(MechanicDirectoryEntry::is_listed)
            .collect();

        Ok(entries)
    }

    async fn find_by_profile_id(&self, profile_id: Uuid) -> Result<Option<MechanicProfile>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .mechanic_profiles
            .iter()
            .find(|m| m.profile_id == profile_id)
            .cloned())
    }

    async fn update_availability(
        &self,
        profile_id: Uuid,
        is_available: bool,
        location: Option<Coordinates>,
    ) -> Result<MechanicProfile, AppError> {
        let mut tables = self.tables.write().await;

        let mechanic = tables
            .mechanic_profiles
            .iter_mut()
            .find(|m| m.profile_id == profile_id)
            .ok_or_else(|| AppError::NotFound("Mechanic profile not found".to_string()))?;

        mechanic.is_available = Some(is_available);
        if let Some(location) = location {
            mechanic.latitude = Some(location.lat);
            mechanic.longitude = Some(location.lng);
        }
        mechanic.updated_at = Some(Utc::now());

        Ok(mechanic.clone())
    }
}

#[async_trait]
impl ServiceRequestRepository for InMemoryBackend {
    async fn create(&self, request: NewServiceRequest) -> Result<ServiceRequest, AppError> {
        let now = Utc::now();
        let created = ServiceRequest {
            id: Uuid::new_v4(),
            customer_id: request.customer_id,
            mechanic_id: None,
            title: request.title,
            description: Some(request.description),
            address: Some(request.address),
            latitude: request.location.lat,
            longitude: request.location.lng,
            status: Some(ServiceStatus::Pending),
            estimated_cost: None,
            actual_cost: None,
            scheduled_time: None,
            completed_time: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.tables.write().await.service_requests.push(created.clone());
        Ok(created)
    }

    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<ServiceRequest>, AppError> {
        let tables = self.tables.read().await;

        // Recorrido inverso + sort estable: los más nuevos primero también en empates
        let mut requests: Vec<ServiceRequest> = tables
            .service_requests
            .iter()
            .rev()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn profile(role: UserRole) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role,
            first_name: Some("Sam".to_string()),
            last_name: Some("Spanner".to_string()),
            phone: None,
            avatar_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn mechanic(profile_id: Uuid, available: Option<bool>, lat: Option<f64>, lng: Option<f64>) -> MechanicProfile {
        MechanicProfile {
            id: Uuid::new_v4(),
            profile_id,
            business_name: None,
            latitude: lat,
            longitude: lng,
            hourly_rate: None,
            specialties: Some(vec!["Tires".to_string()]),
            is_available: available,
            service_radius_km: None,
            years_experience: None,
            license_number: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_available_excludes_unavailable_and_unlocated() {
        let backend = InMemoryBackend::new();
        let owner = profile(UserRole::Mechanic);
        let owner_id = owner.id;
        backend.insert_profile(owner).await;

        let listed = mechanic(owner_id, Some(true), Some(40.7), Some(-74.0));
        let listed_id = listed.id;
        backend.insert_mechanic(listed).await;
        backend.insert_mechanic(mechanic(Uuid::new_v4(), Some(false), Some(40.7), Some(-74.0))).await;
        backend.insert_mechanic(mechanic(Uuid::new_v4(), Some(true), None, Some(-74.0))).await;
        backend.insert_mechanic(mechanic(Uuid::new_v4(), Some(true), Some(40.7), None)).await;
        backend.insert_mechanic(mechanic(Uuid::new_v4(), None, Some(40.7), Some(-74.0))).await;

        let available = backend.find_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, listed_id);
        assert_eq!(available[0].first_name.as_deref(), Some("Sam"));
    }

    #[tokio::test]
    async fn test_find_by_customer_is_newest_first() {
        let backend = InMemoryBackend::new();
        let customer_id = Uuid::new_v4();

        for title in ["first", "second", "third"] {
            backend
                .create(NewServiceRequest {
                    customer_id,
                    title: title.to_string(),
                    description: "desc".to_string(),
                    address: "somewhere".to_string(),
                    location: Coordinates::FALLBACK,
                })
                .await
                .unwrap();
        }
        backend
            .create(NewServiceRequest {
                customer_id: Uuid::new_v4(),
                title: "other customer".to_string(),
                description: "desc".to_string(),
                address: "elsewhere".to_string(),
                location: Coordinates::FALLBACK,
            })
            .await
            .unwrap();

        let titles: Vec<String> = backend
            .find_by_customer(customer_id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_availability() {
        let backend = InMemoryBackend::new();
        let profile_id = Uuid::new_v4();
        backend.insert_mechanic(mechanic(profile_id, Some(false), None, None)).await;

        let updated = backend
            .update_availability(profile_id, true, Some(Coordinates::new(41.0, -73.5)))
            .await
            .unwrap();
        assert_eq!(updated.is_available, Some(true));
        assert_eq!(updated.latitude, Some(41.0));
        assert_eq!(backend.find_available().await.unwrap().len(), 1);

        let missing = backend.update_availability(Uuid::new_v4(), true, None).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
