use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::{error, warn};

use crate::data::Dataset;
use crate::geo::nearest_sos;
use crate::render::{error_page, MarkerColor, Page};
use crate::session::{PoleMapSession, RatingAnswer, ReportDraft, ViewState};
use crate::{Error, Result as PoleMapResult};

use super::models::*;
use super::AppState;

/// Error rendered as an HTML page
pub struct PageError(Error);

impl From<Error> for PageError {
    fn from(error: Error) -> Self {
        PageError(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        log_failure(status, &self.0);
        (status, Html(error_page(&self.0))).into_response()
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(error: Error) -> ApiError {
    let status = status_for(&error);
    log_failure(status, &error);
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn status_for(error: &Error) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn log_failure(status: StatusCode, error: &Error) {
    if status.is_server_error() {
        error!(%error, "request failed");
    } else {
        warn!(%error, "request rejected");
    }
}

fn load_dataset(state: &AppState) -> PoleMapResult<Dataset> {
    let config = &state.config;
    Dataset::load(&config.poles_path, &config.sos_path, config.route)
}

fn render(state: &AppState, dataset: &Dataset, session: &PoleMapSession) -> PoleMapResult<Html<String>> {
    let page = Page {
        session,
        dataset,
        zoom: state.config.zoom,
        history: session.history(&state.reports)?,
    };
    Ok(Html(page.render()?))
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(view): Query<ViewState>,
) -> Result<Html<String>, PageError> {
    let dataset = load_dataset(&state)?;
    let session = PoleMapSession::new(view);
    Ok(render(&state, &dataset, &session)?)
}

pub async fn submit_report(
    State(state): State<Arc<AppState>>,
    Query(view): Query<ViewState>,
    Form(draft): Form<ReportDraft>,
) -> Result<Html<String>, PageError> {
    let dataset = load_dataset(&state)?;
    let mut session = PoleMapSession::new(view);
    session.submit(&dataset, draft)?;
    Ok(render(&state, &dataset, &session)?)
}

pub async fn rate_report(
    State(state): State<Arc<AppState>>,
    Query(view): Query<ViewState>,
    Form(answer): Form<RatingAnswer>,
) -> Result<Html<String>, PageError> {
    let dataset = load_dataset(&state)?;
    let mut session = PoleMapSession::new(view);
    session.rate(&dataset, &state.reports, answer)?;
    Ok(render(&state, &dataset, &session)?)
}

pub async fn list_poles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PoleQuery>,
) -> Result<Json<Vec<PoleResponse>>, ApiError> {
    let dataset = load_dataset(&state).map_err(api_error)?;

    let poles = dataset
        .visible(query.orientation)
        .map(|pole| PoleResponse {
            pole_id: pole.pole_id.clone(),
            kilometer: pole.kilometer,
            orientation: pole.orientation.clone(),
            latitude: pole.estimated.lat,
            longitude: pole.estimated.lon,
            color: MarkerColor::for_pole(&pole.pole_id),
            nearest_sos: nearest_sos(&pole.estimated, &dataset.sos).map(|contact| NearestSos {
                locality: contact.locality.clone(),
                phone: contact.phone.clone(),
            }),
        })
        .collect();

    Ok(Json(poles))
}

pub async fn list_sos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<crate::types::SosContact>>, ApiError> {
    let sos = crate::data::load_sos(&state.config.sos_path).map_err(api_error)?;
    Ok(Json(sos))
}

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReportEntry>>, ApiError> {
    let history = state.reports.history().map_err(api_error)?;
    Ok(Json(report_entries(history)))
}

pub async fn download_reports(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    match state.reports.raw().map_err(api_error)? {
        Some(contents) => Ok((
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref()),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"reportes_postes.csv\""),
            ],
            contents,
        )
            .into_response()),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No reports yet".to_string(),
            }),
        )),
    }
}
