use serde::Serialize;

use crate::data::Dataset;
use crate::geo::{nearest_sos, Coordinate};
use crate::render::html::escape;
use crate::types::{OrientationFilter, PoleRecord, SosContact};

/// Marker icon color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Blue,
}

impl MarkerColor {
    /// Red for even pole numbers, blue for odd.
    ///
    /// Integral decimals such as `7.0` count as their integer value. Other
    /// ids count as 0 and are drawn red.
    pub fn for_pole(pole_id: &str) -> Self {
        let number = pole_number(pole_id).unwrap_or(0);
        if number.rem_euclid(2) == 0 {
            MarkerColor::Red
        } else {
            MarkerColor::Blue
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            MarkerColor::Red => "#d63e2a",
            MarkerColor::Blue => "#38aadd",
        }
    }
}

fn pole_number(pole_id: &str) -> Option<i64> {
    let trimmed = pole_id.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return Some(number);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15)
        .map(|value| value as i64)
}

/// One map marker with its popup markup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub pole_id: String,
    pub position: Coordinate,
    pub color: MarkerColor,
    pub popup: String,
}

/// Everything the page needs to draw the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Builds markers for the poles visible under `filter`
    pub fn build(dataset: &Dataset, filter: OrientationFilter, zoom: u8) -> Self {
        let markers = dataset
            .visible(filter)
            .map(|pole| Marker {
                pole_id: pole.pole_id.clone(),
                position: pole.estimated,
                color: MarkerColor::for_pole(&pole.pole_id),
                popup: popup_html(pole, nearest_sos(&pole.estimated, &dataset.sos)),
            })
            .collect();

        Self {
            center: dataset.route.center(),
            zoom,
            markers,
        }
    }
}

/// Popup body for a pole marker
pub fn popup_html(pole: &PoleRecord, sos: Option<&SosContact>) -> String {
    let (locality, phone) = match sos {
        Some(contact) => (escape(&contact.locality), escape(&contact.phone)),
        None => ("-".to_string(), "-".to_string()),
    };

    format!(
        "Poste {}<br>Km {}<br>{}<br>SOS: {}<br>Teléfono: {}",
        escape(&pole.pole_id),
        format_km(pole.kilometer),
        escape(pole.orientation.code()),
        locality,
        phone,
    )
}

/// Kilometer as shown to users: whole values keep one decimal (`30.0`)
pub fn format_km(km: f64) -> String {
    if km.fract() == 0.0 && km.abs() < 1e15 {
        format!("{:.1}", km)
    } else {
        km.to_string()
    }
}
