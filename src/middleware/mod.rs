//! Middleware del sistema
//!
//! Autenticación por bearer token y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::AuthenticatedUser;
pub use cors::cors_layer;
