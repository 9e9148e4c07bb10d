//! Directorio de mecánicos
//!
//! Mecánicos disponibles con coordenadas, unidos con su nombre. Sin
//! paginación ni filtro por radio: se devuelven todas las filas que cumplen.

use std::sync::Arc;

use crate::models::MechanicDirectoryEntry;
use crate::repositories::MechanicRepository;

#[derive(Clone)]
pub struct MechanicDirectoryService {
    repository: Arc<dyn MechanicRepository>,
}

impl MechanicDirectoryService {
    pub fn new(repository: Arc<dyn MechanicRepository>) -> Self {
        Self { repository }
    }

    /// Un fallo del backend se registra y deja el directorio vacío
    pub async fn fetch_available(&self) -> Vec<MechanicDirectoryEntry> {
        match self.repository.find_available().await {
            Ok(entries) => {
                let total = entries.len();
                let listed: Vec<_> = entries.into_iter().filter(|m| m.is_listed()).collect();
                if listed.len() != total {
                    log::warn!(
                        "⚠️ Backend returned {} mechanics outside the directory filter",
                        total - listed.len()
                    );
                }
                log::info!("🔧 Mechanic directory: {} available", listed.len());
                listed
            }
            Err(e) => {
                log::error!("❌ Error fetching mechanics: {}", e);
                Vec::new()
            }
        }
    }
}
