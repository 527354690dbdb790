//! pole-map - Utility poles along Ruta 5 Sur on an interactive map
//!
//! pole-map reads a pole table and an SOS contact table, estimates each pole's
//! position from its kilometer marker, and serves a single page that plots the
//! poles, names the nearest SOS locality for each one, and collects error
//! reports into an append-only CSV log.
//!
//! # Examples
//!
//! ## Estimating positions
//!
//! ```no_run
//! use pole_map::{Dataset, OrientationFilter, Route};
//!
//! let dataset = Dataset::load(
//!     "postes_con_coordenadas2.csv".as_ref(),
//!     "telefonos_sos.csv".as_ref(),
//!     Route::RUTA_5_SUR,
//! )?;
//!
//! for pole in dataset.visible(OrientationFilter::P) {
//!     println!("{} km {} -> {:?}", pole.pole_id, pole.kilometer, pole.estimated);
//! }
//! # Ok::<(), pole_map::Error>(())
//! ```
//!
//! ## Logging a report
//!
//! ```no_run
//! use pole_map::{ErrorReport, Rating, ReportLog};
//!
//! let log = ReportLog::new("reportes_postes.csv");
//! log.append(&ErrorReport {
//!     pole_id: "14".to_string(),
//!     error_text: "número ilegible".to_string(),
//!     rating: Some(Rating::from_index(4)?),
//! })?;
//! # Ok::<(), pole_map::Error>(())
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod geo;
pub mod data;
pub mod reports;
pub mod session;
pub mod render;
pub mod api;

pub use error::{Error, Result};
pub use types::{ErrorReport, Orientation, OrientationFilter, PoleRecord, Rating, SosContact};
pub use config::Config;
pub use geo::{Coordinate, KmRange, Route};
pub use data::Dataset;
pub use reports::{ReportHistory, ReportLog};
pub use session::{PoleMapSession, ReportFlow, ViewState};
