use std::path::{Path, PathBuf};

use csv::{Reader, StringRecord};
use tracing::debug;

use crate::data::number::parse_locale_number;
use crate::error::{Error, Result};
use crate::types::{Orientation, SosContact};

pub const POLE_ID_COLUMN: &str = "N°Poste";
pub const KILOMETER_COLUMN: &str = "kilometro";
pub const ORIENTATION_COLUMN: &str = "Posicion";

pub const LOCALITY_COLUMN: &str = "localidad";
pub const PHONE_COLUMN: &str = "telefono_sos";
pub const LATITUDE_COLUMN: &str = "latitud";
pub const LONGITUDE_COLUMN: &str = "longitud";

/// A pole row before interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct RawPole {
    pub pole_id: String,
    pub kilometer: f64,
    pub orientation: Orientation,
}

/// Reads the pole file
pub fn load_poles(path: &Path) -> Result<Vec<RawPole>> {
    let mut table = CsvTable::open(path)?;
    let id = table.column(POLE_ID_COLUMN)?;
    let km = table.column(KILOMETER_COLUMN)?;
    let orientation = table.column(ORIENTATION_COLUMN)?;

    let mut poles = Vec::new();
    for (row, record) in table.rows() {
        let record = record?;
        poles.push(RawPole {
            pole_id: cell(&record, id).to_string(),
            kilometer: number_cell(&record, km, KILOMETER_COLUMN, row)?,
            orientation: Orientation::from_code(cell(&record, orientation)),
        });
    }

    debug!(path = %path.display(), count = poles.len(), "loaded pole table");
    Ok(poles)
}

/// Reads the SOS contact file, keeping file order
pub fn load_sos(path: &Path) -> Result<Vec<SosContact>> {
    let mut table = CsvTable::open(path)?;
    let locality = table.column(LOCALITY_COLUMN)?;
    let phone = table.column(PHONE_COLUMN)?;
    let lat = table.column(LATITUDE_COLUMN)?;
    let lon = table.column(LONGITUDE_COLUMN)?;

    let mut contacts = Vec::new();
    for (row, record) in table.rows() {
        let record = record?;
        contacts.push(SosContact {
            locality: cell(&record, locality).to_string(),
            latitude: number_cell(&record, lat, LATITUDE_COLUMN, row)?,
            longitude: number_cell(&record, lon, LONGITUDE_COLUMN, row)?,
            phone: cell(&record, phone).to_string(),
        });
    }

    debug!(path = %path.display(), count = contacts.len(), "loaded SOS table");
    Ok(contacts)
}

/// A CSV file with its header resolved
struct CsvTable {
    path: PathBuf,
    reader: Reader<std::fs::File>,
    headers: StringRecord,
}

impl CsvTable {
    fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }

        let mut reader = Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            headers,
        })
    }

    /// Index of a header, ignoring a UTF-8 byte order mark on the first one
    fn column(&self, name: &'static str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == name)
            .ok_or_else(|| Error::MissingColumn {
                file: self.path.clone(),
                column: name,
            })
    }

    /// Data records numbered from 1
    fn rows(&mut self) -> impl Iterator<Item = (usize, csv::Result<StringRecord>)> + '_ {
        self.reader
            .records()
            .enumerate()
            .map(|(index, record)| (index + 1, record))
    }
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn number_cell(record: &StringRecord, index: usize, column: &'static str, row: usize) -> Result<f64> {
    let raw = cell(record, index);
    parse_locale_number(raw).ok_or_else(|| Error::MalformedValue {
        column,
        row,
        value: raw.to_string(),
    })
}
