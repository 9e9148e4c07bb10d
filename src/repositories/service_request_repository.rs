use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceRequestRepository;
use crate::models::{NewServiceRequest, ServiceRequest, ServiceStatus};
use crate::utils::errors::AppError;

// `id` desempata `created_at` iguales para que el orden sea estable entre consultas
const FIND_BY_CUSTOMER_SQL: &str =
    "SELECT * FROM service_requests WHERE customer_id = $1 ORDER BY created_at DESC, id DESC";

pub struct PgServiceRequestRepository {
    pool: PgPool,
}

impl PgServiceRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRequestRepository for PgServiceRequestRepository {
    async fn create(&self, request: NewServiceRequest) -> Result<ServiceRequest, AppError> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, ServiceRequest>(
            r#"
            INSERT INTO service_requests
                (id, customer_id, title, description, address, latitude, longitude, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.customer_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.address)
        .bind(request.location.lat)
        .bind(request.location.lng)
        .bind(ServiceStatus::Pending)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<ServiceRequest>, AppError> {
        let requests = sqlx::query_as::<_, ServiceRequest>(
            FIND_BY_CUSTOMER_SQL,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_has_secondary_sort_key() {
        assert!(FIND_BY_CUSTOMER_SQL.ends_with("ORDER BY created_at DESC, id DESC"));
    }
}
