use std::sync::Arc;

use pole_map::api::{create_router, AppState};
use pole_map::{Config, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_env() {
    if dotenvy::dotenv().is_err() {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_logging();

    let config = Config::from_env()?;
    let bind = config.bind;

    info!(
        poles = %config.poles_path.display(),
        sos = %config.sos_path.display(),
        reports = %config.reports_path.display(),
        "starting pole map"
    );

    let app = create_router(Arc::new(AppState::new(config)));
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("listening on http://{}", bind);
    info!("  GET  /                      map page");
    info!("  POST /report                report form");
    info!("  POST /report/rating         rating prompt");
    info!("  GET  /api/poles?orientation=<Ambos|P|O>");
    info!("  GET  /api/sos | /api/reports | /api/reports.csv");

    axum::serve(listener, app).await?;
    Ok(())
}
