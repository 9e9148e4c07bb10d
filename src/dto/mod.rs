//! DTOs de la API HTTP

pub mod api_response;
pub mod dashboard_dto;
pub mod mechanic_dto;
pub mod profile_dto;
pub mod service_request_dto;

pub use api_response::ApiResponse;
