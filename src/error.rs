//! Error types for pole-map

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type for pole-map operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, rendering or reporting
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// CSV decoding or encoding error
    Csv(csv::Error),

    /// JSON encoding error
    Json(serde_json::Error),

    /// Required input file is absent
    MissingFile(PathBuf),

    /// Required column is absent from a CSV header
    MissingColumn { file: PathBuf, column: &'static str },

    /// A cell could not be parsed as a number
    MalformedValue {
        column: &'static str,
        row: usize,
        value: String,
    },

    /// Every pole shares the same kilometer, so interpolation has no range
    DegenerateRange { km: f64 },

    /// A table that must have rows is empty
    EmptyTable(&'static str),

    /// Report submitted against a pole id that is not in the pole table
    UnknownPole(String),

    /// Star selection index outside 0..=4
    InvalidRating(usize),

    /// Invalid configuration value
    Config(String),
}

impl Error {
    /// Whether the error was caused by the request rather than the server's data
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnknownPole(_) | Error::InvalidRating(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::MissingFile(path) => write!(f, "Missing required file: {}", path.display()),
            Error::MissingColumn { file, column } => {
                write!(f, "Missing column '{}' in {}", column, file.display())
            }
            Error::MalformedValue { column, row, value } => {
                write!(f, "Malformed value in column '{}' at row {}: {:?}", column, row, value)
            }
            Error::DegenerateRange { km } => {
                write!(f, "Degenerate kilometer range: every pole is at km {}", km)
            }
            Error::EmptyTable(name) => write!(f, "Table '{}' has no rows", name),
            Error::UnknownPole(id) => write!(f, "Unknown pole: {}", id),
            Error::InvalidRating(index) => write!(f, "Invalid rating selection: {}", index),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingFile(PathBuf::from("telefonos_sos.csv"));
        assert_eq!(err.to_string(), "Missing required file: telefonos_sos.csv");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_malformed_value() {
        let err = Error::MalformedValue {
            column: "kilometro",
            row: 3,
            value: "doce".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("kilometro"));
        assert!(text.contains("doce"));
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::UnknownPole("99".to_string()).is_client_error());
        assert!(Error::InvalidRating(7).is_client_error());
        assert!(!Error::DegenerateRange { km: 1.0 }.is_client_error());
    }
}
