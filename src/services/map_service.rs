//! Renderizado del mapa
//!
//! Una superficie de mapa viva por sesión: marcador del usuario y un
//! conjunto de marcadores de mecánicos indexado por id. Cada refresco del
//! directorio aplica solo el delta (altas, cambios, bajas).

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::{Coordinates, MechanicDirectoryEntry};
use crate::services::geocoding_service::is_placeholder_token;

pub const STREETS_STYLE: &str = "mapbox://styles/mapbox/streets-v12";
pub const DEFAULT_ZOOM: f64 = 12.0;
pub const USER_MARKER_COLOR: &str = "#3b82f6";
pub const MECHANIC_MARKER_COLOR: &str = "#10b981";
pub const AVAILABLE_BADGE: &str = "Available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub html: String,
}

impl Popup {
    fn user_location() -> Self {
        Self {
            title: "Your Location".to_string(),
            rate: None,
            specialties: None,
            badge: None,
            html: "<strong>Your Location</strong>".to_string(),
        }
    }

    fn for_mechanic(mechanic: &MechanicDirectoryEntry) -> Self {
        let title = mechanic.display_name();
        let rate = mechanic
            .hourly_rate
            .filter(|rate| !rate.is_zero())
            .map(format_hourly_rate);
        let specialties = mechanic
            .specialties
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| s.join(", "));

        let mut html = format!(
            r#"<div class="p-2"><h3 class="font-semibold text-sm">{}</h3>"#,
            escape_html(&title)
        );
        if let Some(rate) = &rate {
            html.push_str(&format!(r#"<p class="text-xs text-gray-600">{}</p>"#, escape_html(rate)));
        }
        if let Some(specialties) = &specialties {
            html.push_str(&format!(
                r#"<p class="text-xs text-gray-600">{}</p>"#,
                escape_html(specialties)
            ));
        }
        html.push_str(&format!(
            r#"<span class="inline-block mt-1 px-2 py-1 text-xs bg-green-100 text-green-800 rounded">{}</span></div>"#,
            AVAILABLE_BADGE
        ));

        Self {
            title,
            rate,
            specialties,
            badge: Some(AVAILABLE_BADGE.to_string()),
            html,
        }
    }
}

/// `$75/hour`, `$62.5/hour`
fn format_hourly_rate(rate: Decimal) -> String {
    format!("${}/hour", rate.normalize())
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: &'static str,
    pub lng_lat: [f64; 2],
    pub popup: Popup,
}

impl Marker {
    fn for_mechanic(mechanic: &MechanicDirectoryEntry, location: Coordinates) -> Self {
        Self {
            color: MECHANIC_MARKER_COLOR,
            lng_lat: location.lng_lat(),
            popup: Popup::for_mechanic(mechanic),
        }
    }
}

/// Resultado de sincronizar los marcadores con el directorio
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerDiff {
    pub added: Vec<Uuid>,
    pub updated: Vec<Uuid>,
    pub removed: Vec<Uuid>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub style: &'static str,
    pub center: Coordinates,
    pub zoom: f64,
    pub navigation_control: ControlPosition,
    pub user_marker: Marker,
    pub mechanic_markers: BTreeMap<Uuid, Marker>,
}

impl MapView {
    pub fn new(center: Coordinates) -> Self {
        Self {
            style: STREETS_STYLE,
            center,
            zoom: DEFAULT_ZOOM,
            navigation_control: ControlPosition::TopRight,
            user_marker: Marker {
                color: USER_MARKER_COLOR,
                lng_lat: center.lng_lat(),
                popup: Popup::user_location(),
            },
            mechanic_markers: BTreeMap::new(),
        }
    }

    pub fn marker_count(&self) -> usize {
        self.mechanic_markers.len()
    }

    /// Dejar exactamente un marcador por mecánico listado en `mechanics`
    pub fn sync_mechanics(&mut self, mechanics: &[MechanicDirectoryEntry]) -> MarkerDiff {
        // Ids repetidos: gana la última fila
        let mut desired: BTreeMap<Uuid, Marker> = BTreeMap::new();
        for mechanic in mechanics {
            if let (true, Some(location)) = (mechanic.is_listed(), mechanic.location()) {
                desired.insert(mechanic.id, Marker::for_mechanic(mechanic, location));
            }
        }

        let mut diff = MarkerDiff::default();

        self.mechanic_markers.retain(|id, _| {
            let keep = desired.contains_key(id);
            if !keep {
                diff.removed.push(*id);
            }
            keep
        });

        for (id, marker) in desired {
            match self.mechanic_markers.get_mut(&id) {
                Some(current) if *current == marker => {}
                Some(current) => {
                    *current = marker;
                    diff.updated.push(id);
                }
                None => {
                    self.mechanic_markers.insert(id, marker);
                    diff.added.push(id);
                }
            }
        }

        diff
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub placeholder: &'static str,
    pub help_url: &'static str,
}

impl Default for TokenPrompt {
    fn default() -> Self {
        Self {
            title: "Mapbox Configuration",
            message: "Enter your Mapbox public token to view the map",
            placeholder: "pk.eyJ1IjoieW91cnVzZXJuYW1lIi...",
            help_url: "https://mapbox.com/",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MapSurface {
    TokenRequired(TokenPrompt),
    Ready(MapView),
}

impl MapSurface {
    pub fn view(&self) -> Option<&MapView> {
        match self {
            MapSurface::Ready(view) => Some(view),
            MapSurface::TokenRequired(_) => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut MapView> {
        match self {
            MapSurface::Ready(view) => Some(view),
            MapSurface::TokenRequired(_) => None,
        }
    }
}

pub struct MapRenderer;

impl MapRenderer {
    /// Sin token utilizable el mapa degrada a la petición de token
    pub fn initialize(token: Option<&str>, center: Coordinates) -> MapSurface {
        match token {
            Some(token) if !token.trim().is_empty() => MapSurface::Ready(MapView::new(center)),
            _ => MapSurface::TokenRequired(TokenPrompt::default()),
        }
    }

    /// Un token de ejemplo sí inicializa el mapa, pero lo avisamos
    pub fn warn_if_placeholder(token: &str) {
        if is_placeholder_token(token) {
            log::warn!("⚠️ Map token looks like a placeholder; tiles will not load");
        }
    }
}
