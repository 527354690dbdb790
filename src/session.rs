//! Per-interaction session state and the report flow

use serde::Deserialize;

use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::reports::{ReportHistory, ReportLog};
use crate::types::{ErrorReport, OrientationFilter, Rating};

/// View flags carried from one interaction to the next in the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub orientation: OrientationFilter,
    /// Pole table visible
    pub show_poles: bool,
    /// SOS service table visible
    pub show_sos: bool,
    /// User asked to go to the report form
    pub report: bool,
    /// Report history visible
    pub show_reports: bool,
}

/// A flag the page can toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Poles,
    Sos,
    Report,
    Reports,
}

impl ViewState {
    /// Copy of the state with one flag flipped
    pub fn toggled(&self, toggle: Toggle) -> Self {
        let mut next = *self;
        match toggle {
            Toggle::Poles => next.show_poles = !next.show_poles,
            Toggle::Sos => next.show_sos = !next.show_sos,
            Toggle::Report => next.report = !next.report,
            Toggle::Reports => next.show_reports = !next.show_reports,
        }
        next
    }

    pub fn with_orientation(&self, orientation: OrientationFilter) -> Self {
        Self { orientation, ..*self }
    }

    /// Encodes the state as a query string, omitting flags that are off
    pub fn query(&self) -> String {
        let mut parts = vec![format!("orientation={}", self.orientation.label())];
        for (name, on) in [
            ("show_poles", self.show_poles),
            ("show_sos", self.show_sos),
            ("report", self.report),
            ("show_reports", self.show_reports),
        ] {
            if on {
                parts.push(format!("{}=true", name));
            }
        }
        parts.join("&")
    }
}

/// Report form fields
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportDraft {
    #[serde(rename = "poste")]
    pub pole_id: String,
    #[serde(rename = "error", default)]
    pub error_text: String,
}

/// Rating prompt answer; `estrellas` is the 0-based star index, absent when
/// the user skips the prompt
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RatingAnswer {
    #[serde(rename = "poste")]
    pub pole_id: String,
    #[serde(rename = "error", default)]
    pub error_text: String,
    #[serde(rename = "estrellas", default)]
    pub star_index: Option<usize>,
}

impl RatingAnswer {
    pub fn new(draft: ReportDraft, star_index: Option<usize>) -> Self {
        Self {
            pole_id: draft.pole_id,
            error_text: draft.error_text,
            star_index,
        }
    }
}

/// Where the user is in the report flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportFlow {
    #[default]
    Idle,
    /// Report form shown
    AwaitingSubmission,
    /// Form submitted, rating prompt shown with the draft carried along
    AwaitingRating(ReportDraft),
}

/// Outcome message shown after a completed report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub rating: Option<Rating>,
}

/// State of one interaction: view flags, report flow and the last outcome
#[derive(Debug)]
pub struct PoleMapSession {
    pub view: ViewState,
    pub flow: ReportFlow,
    pub confirmation: Option<Confirmation>,
}

impl PoleMapSession {
    pub fn new(view: ViewState) -> Self {
        let flow = if view.report {
            ReportFlow::AwaitingSubmission
        } else {
            ReportFlow::Idle
        };

        Self {
            view,
            flow,
            confirmation: None,
        }
    }

    /// Accepts the report form and moves on to the rating prompt
    pub fn submit(&mut self, dataset: &Dataset, draft: ReportDraft) -> Result<()> {
        check_pole(dataset, &draft.pole_id)?;
        self.flow = ReportFlow::AwaitingRating(draft);
        Ok(())
    }

    /// Answers or skips the rating prompt, appending the report to the log
    pub fn rate(&mut self, dataset: &Dataset, log: &ReportLog, answer: RatingAnswer) -> Result<ErrorReport> {
        check_pole(dataset, &answer.pole_id)?;
        let rating = answer.star_index.map(Rating::from_index).transpose()?;

        let report = ErrorReport {
            pole_id: answer.pole_id,
            error_text: answer.error_text,
            rating,
        };
        log.append(&report)?;

        self.view.report = false;
        self.flow = ReportFlow::Idle;
        self.confirmation = Some(Confirmation { rating });
        Ok(report)
    }

    /// Report history when the user asked for it. The outer `Option` is
    /// `None` when the history is hidden, the inner one when no log exists.
    pub fn history(&self, log: &ReportLog) -> Result<Option<Option<ReportHistory>>> {
        if self.view.show_reports {
            log.history().map(Some)
        } else {
            Ok(None)
        }
    }
}

fn check_pole(dataset: &Dataset, pole_id: &str) -> Result<()> {
    if dataset.knows_pole(pole_id) {
        Ok(())
    } else {
        Err(Error::UnknownPole(pole_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawPole;
    use crate::geo::Route;
    use crate::types::Orientation;
    use tempfile::tempdir;

    fn dataset() -> Dataset {
        let poles = (10..=14)
            .map(|n| RawPole {
                pole_id: n.to_string(),
                kilometer: n as f64,
                orientation: if n % 2 == 0 { Orientation::P } else { Orientation::O },
            })
            .collect();
        Dataset::from_parts(poles, Vec::new(), Route::RUTA_5_SUR).unwrap()
    }

    fn draft(pole: &str, text: &str) -> ReportDraft {
        ReportDraft {
            pole_id: pole.to_string(),
            error_text: text.to_string(),
        }
    }

    #[test]
    fn test_flow_starts_from_view() {
        assert_eq!(PoleMapSession::new(ViewState::default()).flow, ReportFlow::Idle);

        let view = ViewState::default().toggled(Toggle::Report);
        assert_eq!(PoleMapSession::new(view).flow, ReportFlow::AwaitingSubmission);
    }

    #[test]
    fn test_submit_then_rate() {
        let dir = tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("reportes.csv"));
        let data = dataset();

        let mut session = PoleMapSession::new(ViewState::default().toggled(Toggle::Report));
        session.submit(&data, draft("12", "placa rota")).unwrap();
        assert_eq!(session.flow, ReportFlow::AwaitingRating(draft("12", "placa rota")));

        let report = session
            .rate(&data, &log, RatingAnswer::new(draft("12", "placa rota"), Some(3)))
            .unwrap();

        assert_eq!(report.rating.map(|r| r.value()), Some(4));
        assert_eq!(session.flow, ReportFlow::Idle);
        assert!(!session.view.report);
        assert_eq!(session.confirmation, Some(Confirmation { rating: report.rating }));

        let history = log.history().unwrap().unwrap();
        assert_eq!(history.rows, vec![vec!["12", "placa rota", "4"]]);
    }

    #[test]
    fn test_empty_text_without_rating() {
        let dir = tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("reportes.csv"));
        let data = dataset();

        let mut session = PoleMapSession::new(ViewState::default());
        session
            .rate(&data, &log, RatingAnswer::new(draft("14", ""), None))
            .unwrap();

        let history = log.history().unwrap().unwrap();
        assert_eq!(history.rows, vec![vec!["14", "", ""]]);
    }

    #[test]
    fn test_unknown_pole_rejected() {
        let dir = tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("reportes.csv"));
        let data = dataset();
        let mut session = PoleMapSession::new(ViewState::default());

        assert!(matches!(session.submit(&data, draft("99", "x")), Err(Error::UnknownPole(_))));
        assert!(matches!(
            session.rate(&data, &log, RatingAnswer::new(draft("99", "x"), None)),
            Err(Error::UnknownPole(_))
        ));
        assert_eq!(log.history().unwrap(), None);
    }

    #[test]
    fn test_invalid_star_index_rejected() {
        let dir = tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("reportes.csv"));
        let mut session = PoleMapSession::new(ViewState::default());

        let result = session.rate(&dataset(), &log, RatingAnswer::new(draft("10", "x"), Some(5)));
        assert!(matches!(result, Err(Error::InvalidRating(5))));
        assert_eq!(log.history().unwrap(), None);
    }

    #[test]
    fn test_history_visibility() {
        let dir = tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("reportes.csv"));

        let hidden = PoleMapSession::new(ViewState::default());
        assert_eq!(hidden.history(&log).unwrap(), None);

        let shown = PoleMapSession::new(ViewState::default().toggled(Toggle::Reports));
        assert_eq!(shown.history(&log).unwrap(), Some(None));
    }

    #[test]
    fn test_query_string() {
        let view = ViewState::default();
        assert_eq!(view.query(), "orientation=Ambos");

        let view = view.with_orientation(OrientationFilter::P).toggled(Toggle::Sos);
        assert_eq!(view.query(), "orientation=P&show_sos=true");
        assert_eq!(view.toggled(Toggle::Sos).query(), "orientation=P");
    }
}
