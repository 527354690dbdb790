//! HTTP surface: the page routes and a small JSON API

pub mod handlers;
pub mod models;
pub mod routes;

use crate::config::Config;
use crate::reports::ReportLog;

pub use routes::create_router;

/// State shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub reports: ReportLog,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let reports = ReportLog::new(&config.reports_path);
        Self { config, reports }
    }
}
