use serde::Serialize;

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude/longitude in degrees
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point halfway between two coordinates, component-wise
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new((self.lat + other.lat) / 2.0, (self.lon + other.lon) / 2.0)
    }

    /// Straight-line distance in degree space.
    ///
    /// This is not a geodesic distance; it treats latitude and longitude as
    /// plane axes.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        (dlat * dlat + dlon * dlon).sqrt()
    }
}
