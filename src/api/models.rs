use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::render::MarkerColor;
use crate::reports::ReportHistory;
use crate::types::{Orientation, OrientationFilter};

#[derive(Debug, Default, Deserialize)]
pub struct PoleQuery {
    #[serde(default)]
    pub orientation: OrientationFilter,
}

#[derive(Debug, Serialize)]
pub struct PoleResponse {
    pub pole_id: String,
    pub kilometer: f64,
    pub orientation: Orientation,
    pub latitude: f64,
    pub longitude: f64,
    pub color: MarkerColor,
    pub nearest_sos: Option<NearestSos>,
}

#[derive(Debug, Serialize)]
pub struct NearestSos {
    pub locality: String,
    pub phone: String,
}

/// One logged report keyed by the log's own column names
pub type ReportEntry = BTreeMap<String, String>;

pub fn report_entries(history: Option<ReportHistory>) -> Vec<ReportEntry> {
    let Some(history) = history else {
        return Vec::new();
    };

    history
        .rows
        .into_iter()
        .map(|row| history.headers.iter().cloned().zip(row).collect())
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_entries() {
        assert!(report_entries(None).is_empty());

        let history = ReportHistory {
            headers: vec!["N°Poste".into(), "error".into(), "calificacion".into()],
            rows: vec![vec!["14".into(), "placa".into(), "".into()]],
        };
        let entries = report_entries(Some(history));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["N°Poste"], "14");
        assert_eq!(entries[0]["error"], "placa");
        assert_eq!(entries[0]["calificacion"], "");
    }
}
