//! Core data types for pole-map

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Direction of travel a pole serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// `P` code
    P,
    /// `O` code
    O,
    /// Any other raw value, kept verbatim
    Other(String),
}

impl Orientation {
    /// Maps a raw `Posicion` cell to an orientation without normalizing it
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => Orientation::P,
            "O" => Orientation::O,
            other => Orientation::Other(other.to_string()),
        }
    }

    /// Returns the code as it appeared in the pole file
    pub fn code(&self) -> &str {
        match self {
            Orientation::P => "P",
            Orientation::O => "O",
            Orientation::Other(raw) => raw,
        }
    }
}

impl Serialize for Orientation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Orientation selector shown above the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrientationFilter {
    #[default]
    Ambos,
    P,
    O,
}

impl OrientationFilter {
    /// All selector options in display order
    pub const ALL: [OrientationFilter; 3] = [
        OrientationFilter::Ambos,
        OrientationFilter::P,
        OrientationFilter::O,
    ];

    /// Returns the selector label
    pub fn label(&self) -> &'static str {
        match self {
            OrientationFilter::Ambos => "Ambos",
            OrientationFilter::P => "P",
            OrientationFilter::O => "O",
        }
    }

    /// Whether a pole with this orientation is visible under the selector
    pub fn accepts(&self, orientation: &Orientation) -> bool {
        match self {
            OrientationFilter::Ambos => true,
            OrientationFilter::P => *orientation == Orientation::P,
            OrientationFilter::O => *orientation == Orientation::O,
        }
    }
}

impl From<String> for OrientationFilter {
    fn from(value: String) -> Self {
        match value.as_str() {
            "P" => OrientationFilter::P,
            "O" => OrientationFilter::O,
            _ => OrientationFilter::Ambos,
        }
    }
}

impl From<OrientationFilter> for String {
    fn from(value: OrientationFilter) -> Self {
        value.label().to_string()
    }
}

/// A pole with its interpolated position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoleRecord {
    pub pole_id: String,
    pub kilometer: f64,
    pub orientation: Orientation,
    pub estimated: Coordinate,
}

/// Emergency-phone service tied to a locality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SosContact {
    pub locality: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: String,
}

impl SosContact {
    /// Returns the contact's stored position
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Star rating in 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

const STAR_WORDS: [&str; 5] = ["one", "two", "three", "four", "five"];

impl Rating {
    /// Maps a 0-based star selection index to a rating
    pub fn from_index(index: usize) -> Result<Self> {
        if index < STAR_WORDS.len() {
            Ok(Rating(index as u8 + 1))
        } else {
            Err(Error::InvalidRating(index))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// English word for the number of stars, as shown in the thank-you note
    pub fn word(&self) -> &'static str {
        STAR_WORDS[(self.0 - 1) as usize]
    }
}

/// A user-submitted error report against one pole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub pole_id: String,
    pub error_text: String,
    pub rating: Option<Rating>,
}
