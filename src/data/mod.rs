//! Pole and SOS tables, loaded fresh for every interaction

pub mod loader;
pub mod number;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::geo::{KmRange, Route};
use crate::types::{OrientationFilter, PoleRecord, SosContact};

pub use loader::{load_poles, load_sos, RawPole};
pub use number::parse_locale_number;

/// Read-only inputs of one interaction: poles with estimated positions plus
/// the SOS reference table
#[derive(Debug, Clone)]
pub struct Dataset {
    pub poles: Vec<PoleRecord>,
    pub sos: Vec<SosContact>,
    pub range: KmRange,
    pub route: Route,
}

impl Dataset {
    /// Loads both files and interpolates every pole along `route`
    pub fn load(poles_path: &Path, sos_path: &Path, route: Route) -> Result<Self> {
        let raw = load_poles(poles_path)?;
        let sos = load_sos(sos_path)?;
        let dataset = Self::from_parts(raw, sos, route)?;

        info!(
            poles = dataset.poles.len(),
            sos = dataset.sos.len(),
            min_km = dataset.range.min,
            max_km = dataset.range.max,
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Interpolates raw poles over the range they span
    pub fn from_parts(raw: Vec<RawPole>, sos: Vec<SosContact>, route: Route) -> Result<Self> {
        let range = KmRange::from_kilometers(raw.iter().map(|pole| pole.kilometer))?;

        let poles = raw
            .into_iter()
            .map(|pole| PoleRecord {
                estimated: route.interpolate(&range, pole.kilometer),
                pole_id: pole.pole_id,
                kilometer: pole.kilometer,
                orientation: pole.orientation,
            })
            .collect();

        Ok(Self {
            poles,
            sos,
            range,
            route,
        })
    }

    /// Poles visible under an orientation selector, in file order
    pub fn visible(&self, filter: OrientationFilter) -> impl Iterator<Item = &PoleRecord> + '_ {
        self.poles
            .iter()
            .filter(move |pole| filter.accepts(&pole.orientation))
    }

    /// Pole ids in file order, as offered by the report form
    pub fn pole_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.poles.iter().map(|pole| pole.pole_id.as_str())
    }

    pub fn knows_pole(&self, pole_id: &str) -> bool {
        self.pole_ids().any(|id| id == pole_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Orientation;
    use std::fs;
    use tempfile::tempdir;

    fn raw(id: &str, km: f64, orientation: &str) -> RawPole {
        RawPole {
            pole_id: id.to_string(),
            kilometer: km,
            orientation: Orientation::from_code(orientation),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_parts(
            vec![
                raw("1", 10.0, "P"),
                raw("2", 30.0, "O"),
                raw("3", 50.0, "P"),
                raw("4", 20.0, "?"),
            ],
            Vec::new(),
            Route::RUTA_5_SUR,
        )
        .unwrap()
    }

    fn ids(dataset: &Dataset, filter: OrientationFilter) -> Vec<&str> {
        dataset.visible(filter).map(|p| p.pole_id.as_str()).collect()
    }

    #[test]
    fn test_estimates_computed_at_load() {
        let dataset = sample();
        assert_eq!(dataset.poles[0].estimated, Route::RUTA_5_SUR.start);
        assert_eq!(dataset.poles[2].estimated, Route::RUTA_5_SUR.end);
        assert!((dataset.poles[1].estimated.lat - -38.1028).abs() < 1e-9);
    }

    #[test]
    fn test_filter_partition() {
        let dataset = sample();

        let all = ids(&dataset, OrientationFilter::Ambos);
        let p = ids(&dataset, OrientationFilter::P);
        let o = ids(&dataset, OrientationFilter::O);

        assert_eq!(all, vec!["1", "2", "3", "4"]);
        assert_eq!(p, vec!["1", "3"]);
        assert_eq!(o, vec!["2"]);
        assert!(p.iter().all(|id| !o.contains(id)));
        assert!(p.iter().chain(o.iter()).all(|id| all.contains(id)));
    }

    #[test]
    fn test_known_poles() {
        let dataset = sample();
        assert!(dataset.knows_pole("3"));
        assert!(!dataset.knows_pole("14"));
    }

    #[test]
    fn test_single_kilometer_is_degenerate() {
        let result = Dataset::from_parts(
            vec![raw("1", 5.0, "P"), raw("2", 5.0, "O")],
            Vec::new(),
            Route::RUTA_5_SUR,
        );
        assert!(matches!(result, Err(Error::DegenerateRange { .. })));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempdir().unwrap();
        let poles = dir.path().join("postes.csv");
        let sos = dir.path().join("sos.csv");
        fs::write(&poles, "N°Poste,kilometro,Posicion\n1,\"10,0\",P\n2,50,O\n").unwrap();
        fs::write(&sos, "localidad,telefono_sos,latitud,longitud\nTemuco,600,-38.74,-72.59\n").unwrap();

        let dataset = Dataset::load(&poles, &sos, Route::RUTA_5_SUR).unwrap();
        assert_eq!(dataset.range.min, 10.0);
        assert_eq!(dataset.range.max, 50.0);
        assert_eq!(dataset.sos.len(), 1);
    }
}
