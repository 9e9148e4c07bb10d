//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: ubicación,
//! directorio de mecánicos, mapa, formulario de solicitudes y dashboard.

pub mod dashboard_service;
pub mod directory_service;
pub mod geocoding_service;
pub mod location_service;
pub mod map_service;
pub mod role_catalog;
pub mod service_request_form;

pub use dashboard_service::DashboardSessions;
pub use directory_service::MechanicDirectoryService;
pub use geocoding_service::{GeocodingService, ReverseGeocoder};
pub use location_service::LocationProvider;
