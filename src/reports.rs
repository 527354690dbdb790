//! Append-only error report log

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::types::ErrorReport;

/// Header written when the log is created
pub const REPORT_HEADER: [&str; 3] = ["N°Poste", "error", "calificacion"];

/// Appends reports to a CSV file, creating it with a header on first write.
///
/// Appends from one process are serialized; separate processes sharing the
/// same file are not coordinated.
#[derive(Debug)]
pub struct ReportLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

/// Every row of the log as stored, header included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHistory {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Appends one report and flushes it to disk
    pub fn append(&self, report: &ErrorReport) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();
        let needs_header = len == 0;

        // a log saved without a trailing newline would glue the new row onto the last one
        if len > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::Start(len - 1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer.write_record(REPORT_HEADER)?;
        }

        let rating = report
            .rating
            .map(|rating| rating.value().to_string())
            .unwrap_or_default();
        writer.write_record([report.pole_id.as_str(), report.error_text.as_str(), rating.as_str()])?;

        let mut file = writer.into_inner().map_err(|e| e.into_error())?;
        file.flush()?;

        info!(
            pole = %report.pole_id,
            rating = ?report.rating.map(|r| r.value()),
            created = needs_header,
            "report appended"
        );
        Ok(())
    }

    /// Reads every row verbatim, or `None` when nothing has been logged yet
    pub fn history(&self) -> Result<Option<ReportHistory>> {
        if !self.path.is_file() {
            return Ok(None);
        }

        let mut reader = ReaderBuilder::new().flexible(true).from_path(&self.path)?;
        let headers = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        Ok(Some(ReportHistory { headers, rows }))
    }

    /// Raw file contents, or `None` when nothing has been logged yet
    pub fn raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
