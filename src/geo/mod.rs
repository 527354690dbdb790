//! Geographic helpers: coordinates, kilometer interpolation and nearest-SOS lookup

pub mod coordinate;
pub mod route;
pub mod nearest;

pub use coordinate::Coordinate;
pub use route::{KmRange, Route};
pub use nearest::nearest_sos;
