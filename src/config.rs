//! Runtime configuration: file locations, bind address and map zoom

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::geo::Route;

pub const POLES_VAR: &str = "POLE_MAP_POLES";
pub const SOS_VAR: &str = "POLE_MAP_SOS";
pub const REPORTS_VAR: &str = "POLE_MAP_REPORTS";
pub const BIND_VAR: &str = "POLE_MAP_BIND";
pub const ZOOM_VAR: &str = "POLE_MAP_ZOOM";

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Pole table (`N°Poste`, `kilometro`, `Posicion`)
    pub poles_path: PathBuf,
    /// SOS table (`localidad`, `telefono_sos`, `latitud`, `longitud`)
    pub sos_path: PathBuf,
    /// Report log, created on first submission
    pub reports_path: PathBuf,
    pub bind: SocketAddr,
    /// Initial Leaflet zoom level
    pub zoom: u8,
    pub route: Route,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poles_path: PathBuf::from("postes_con_coordenadas2.csv"),
            sos_path: PathBuf::from("telefonos_sos.csv"),
            reports_path: PathBuf::from("reportes_postes.csv"),
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            zoom: 8,
            route: Route::RUTA_5_SUR,
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source, falling back to
    /// the defaults for unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(POLES_VAR) {
            config.poles_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(SOS_VAR) {
            config.sos_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(REPORTS_VAR) {
            config.reports_path = PathBuf::from(path);
        }
        if let Some(bind) = lookup(BIND_VAR) {
            config.bind = bind
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a socket address: {}", BIND_VAR, bind)))?;
        }
        if let Some(zoom) = lookup(ZOOM_VAR) {
            config.zoom = zoom
                .parse::<u8>()
                .ok()
                .filter(|z| *z <= 19)
                .ok_or_else(|| Error::Config(format!("{} must be an integer in 0..=19: {}", ZOOM_VAR, zoom)))?;
        }

        Ok(config)
    }
}
