//! Roadside assistance marketplace API
//!
//! Perfiles, directorio de mecánicos, solicitudes de servicio, mapa y
//! dashboard por rol, servidos con axum sobre PostgreSQL.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
