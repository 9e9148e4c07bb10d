//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL del backend gestionado.

pub mod geo;
pub mod profile;
pub mod mechanic;
pub mod service_request;

pub use geo::Coordinates;
pub use mechanic::{MechanicDirectoryEntry, MechanicProfile};
pub use profile::{Profile, UserRole};
pub use service_request::{NewServiceRequest, ServiceRequest, ServiceStatus};
