//! Repositorios
//!
//! Cada tabla del backend gestionado se consume a través de un trait, con una
//! implementación PostgreSQL y un backend en memoria para desarrollo y tests.

pub mod profile_repository;
pub mod mechanic_repository;
pub mod service_request_repository;
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Coordinates, MechanicDirectoryEntry, MechanicProfile, NewServiceRequest, Profile,
    ServiceRequest,
};
use crate::utils::errors::AppError;

pub use memory::InMemoryBackend;
pub use mechanic_repository::PgMechanicRepository;
pub use profile_repository::PgProfileRepository;
pub use service_request_repository::PgServiceRequestRepository;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;
}

#[async_trait]
pub trait MechanicRepository: Send + Sync {
    /// Mecánicos con `is_available = true` y ambas coordenadas, unidos con su perfil
    async fn find_available(&self) -> Result<Vec<MechanicDirectoryEntry>, AppError>;

    async fn find_by_profile_id(&self, profile_id: Uuid) -> Result<Option<MechanicProfile>, AppError>;

    async fn update_availability(
        &self,
        profile_id: Uuid,
        is_available: bool,
        location: Option<Coordinates>,
    ) -> Result<MechanicProfile, AppError>;
}

#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    async fn create(&self, request: NewServiceRequest) -> Result<ServiceRequest, AppError>;

    /// Ordenadas por `created_at` descendente
    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<ServiceRequest>, AppError>;
}
