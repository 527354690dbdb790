//! The single interactive page

use std::fmt::Write;

use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::render::html::{escape, script_json, table};
use crate::render::map::{format_km, MapView, MarkerColor};
use crate::reports::ReportHistory;
use crate::session::{PoleMapSession, ReportDraft, ReportFlow, Toggle, ViewState};
use crate::types::OrientationFilter;

const TITLE: &str = "Mapa de Postes en la Ruta 5 Sur (Los Ángeles - Temuco)";
const NO_REPORTS: &str = "No hay reportes registrados todavía.";
const REPORT_SENT: &str = "¡Reporte enviado correctamente!";

const POLE_COLUMNS: [&str; 5] = [
    "N°Poste",
    "kilometro",
    "Posicion",
    "latitud_estimada",
    "longitud_estimada",
];
const SOS_COLUMNS: [&str; 2] = ["localidad", "telefono_sos"];

/// Inputs for rendering one page
pub struct Page<'a> {
    pub session: &'a PoleMapSession,
    pub dataset: &'a Dataset,
    pub zoom: u8,
    /// `None` when hidden, `Some(None)` when the log does not exist yet
    pub history: Option<Option<ReportHistory>>,
}

impl<'a> Page<'a> {
    pub fn render(&self) -> Result<String> {
        let view = &self.session.view;
        let map = MapView::build(self.dataset, view.orientation, self.zoom);
        let map_json = script_json(&map)?;

        let mut body = String::new();
        let _ = write!(body, "<h1>{}</h1>", escape(TITLE));

        self.confirmation(&mut body);
        self.pole_section(&mut body);
        orientation_selector(&mut body, view);

        body.push_str("<div class=\"columns\"><div class=\"main\">");
        body.push_str("<h2>Mapa de Postes Estimados</h2><div id=\"map\"></div>");
        toggle_link(&mut body, view, Toggle::Report, "Ir a generar reporte");
        body.push_str("</div><div class=\"side\">");
        self.sos_section(&mut body);
        body.push_str("</div></div>");

        match &self.session.flow {
            ReportFlow::Idle => {}
            ReportFlow::AwaitingSubmission => self.report_form(&mut body),
            ReportFlow::AwaitingRating(draft) => rating_prompt(&mut body, view, draft),
        }

        self.history_section(&mut body);

        Ok(document(TITLE, &body, Some(&map_json)))
    }

    fn confirmation(&self, out: &mut String) {
        let Some(confirmation) = self.session.confirmation else {
            return;
        };

        if let Some(rating) = confirmation.rating {
            let _ = write!(
                out,
                "<p class=\"info\">Seleccionaste {} estrella(s). ¡Gracias por tu feedback!</p>",
                rating.word()
            );
        }
        let _ = write!(out, "<p class=\"success\">{}</p>", REPORT_SENT);
    }

    fn pole_section(&self, out: &mut String) {
        let view = &self.session.view;
        out.push_str("<h2>Datos de los postes</h2>");
        toggle_link(out, view, Toggle::Poles, "Mostrar/Ocultar datos de postes");

        if view.show_poles {
            let rows = self.dataset.poles.iter().map(|pole| {
                [
                    pole.pole_id.clone(),
                    format_km(pole.kilometer),
                    pole.orientation.code().to_string(),
                    pole.estimated.lat.to_string(),
                    pole.estimated.lon.to_string(),
                ]
            });
            out.push_str(&table(POLE_COLUMNS, rows));
        }
    }

    fn sos_section(&self, out: &mut String) {
        let view = &self.session.view;
        out.push_str("<h2>Servicios Grúas por Localidad</h2>");
        toggle_link(out, view, Toggle::Sos, "Mostrar/Ocultar servicios grúas");

        if view.show_sos {
            let rows = self
                .dataset
                .sos
                .iter()
                .map(|contact| [contact.locality.as_str(), contact.phone.as_str()]);
            out.push_str(&table(SOS_COLUMNS, rows));
        }
    }

    fn report_form(&self, out: &mut String) {
        out.push_str("<h2>Reportar error en un poste</h2>");
        let _ = write!(
            out,
            "<form method=\"post\" action=\"/report?{}\">",
            escape(&self.session.view.query())
        );
        out.push_str("<label>Selecciona el poste <select name=\"poste\">");
        for id in self.dataset.pole_ids() {
            let id = escape(id);
            let _ = write!(out, "<option value=\"{}\">{}</option>", id, id);
        }
        out.push_str("</select></label>");
        out.push_str("<label>Describe el error encontrado <textarea name=\"error\"></textarea></label>");
        out.push_str("<button type=\"submit\">Enviar reporte</button></form>");
    }

    fn history_section(&self, out: &mut String) {
        let view = &self.session.view;
        out.push_str("<h2>Ver reportes enviados</h2>");
        toggle_link(out, view, Toggle::Reports, "Mostrar reportes de postes");

        match &self.history {
            None => {}
            Some(None) => {
                let _ = write!(out, "<p class=\"info\">{}</p>", NO_REPORTS);
            }
            Some(Some(history)) => out.push_str(&table(&history.headers, &history.rows)),
        }
    }
}

fn rating_prompt(out: &mut String, view: &ViewState, draft: &ReportDraft) {
    out.push_str("<h2>Califica la aplicación</h2>");
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/report/rating?{}\" class=\"stars\">",
        escape(&view.query())
    );
    let _ = write!(
        out,
        "<input type=\"hidden\" name=\"poste\" value=\"{}\"><input type=\"hidden\" name=\"error\" value=\"{}\">",
        escape(&draft.pole_id),
        escape(&draft.error_text)
    );
    for index in 0..5 {
        let _ = write!(
            out,
            "<button type=\"submit\" name=\"estrellas\" value=\"{}\">{}</button>",
            index,
            "★".repeat(index + 1)
        );
    }
    out.push_str("<button type=\"submit\">Enviar sin calificar</button></form>");
}

fn orientation_selector(out: &mut String, view: &ViewState) {
    out.push_str("<h2>Filtrar postes en el mapa por orientación</h2><p>Selecciona orientación: ");
    for option in OrientationFilter::ALL {
        let class = if option == view.orientation { "radio selected" } else { "radio" };
        let _ = write!(
            out,
            "<a class=\"{}\" href=\"/?{}\">{}</a> ",
            class,
            escape(&view.with_orientation(option).query()),
            option.label()
        );
    }
    out.push_str("</p>");
}

fn toggle_link(out: &mut String, view: &ViewState, toggle: Toggle, label: &str) {
    let _ = write!(
        out,
        "<p><a class=\"button\" href=\"/?{}\">{}</a></p>",
        escape(&view.toggled(toggle).query()),
        escape(label)
    );
}

/// Standalone page shown when a request fails
pub fn error_page(error: &Error) -> String {
    let body = format!(
        "<h1>Error</h1><p class=\"error\">{}</p><p><a class=\"button\" href=\"/\">Volver</a></p>",
        escape(&error.to_string())
    );
    document(TITLE, &body, None)
}

fn document(title: &str, body: &str, map_json: Option<&str>) -> String {
    let script = match map_json {
        Some(json) => format!(
            r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>
<script>
const view = {json};
const map = L.map("map").setView([view.center.lat, view.center.lon], view.zoom);
L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
const colors = {{ red: "{red}", blue: "{blue}" }};
for (const marker of view.markers) {{
  L.circleMarker([marker.position.lat, marker.position.lon], {{
    radius: 7,
    color: colors[marker.color],
    fillColor: colors[marker.color],
    fillOpacity: 0.85
  }}).bindPopup(marker.popup).addTo(map);
}}
</script>"#,
            json = json,
            red = MarkerColor::Red.css(),
            blue = MarkerColor::Blue.css(),
        ),
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous">
<style>
body {{ font-family: sans-serif; margin: 1.5rem; }}
.columns {{ display: flex; gap: 1.5rem; flex-wrap: wrap; }}
.main {{ flex: 2; min-width: 320px; }}
.side {{ flex: 1; min-width: 240px; }}
#map {{ height: 700px; max-width: 900px; }}
a.button, button {{ display: inline-block; padding: .4rem .8rem; border: 1px solid #999; border-radius: .3rem; background: #f5f5f5; color: #222; text-decoration: none; cursor: pointer; }}
a.radio {{ margin-right: .8rem; }}
a.radio.selected {{ font-weight: bold; }}
table.data {{ border-collapse: collapse; }}
table.data th, table.data td {{ border: 1px solid #ccc; padding: .2rem .5rem; }}
label {{ display: block; margin: .5rem 0; }}
textarea {{ display: block; width: 100%; max-width: 600px; min-height: 6rem; }}
.stars button {{ color: #f5a623; }}
.success {{ background: #e6f4ea; padding: .6rem; }}
.info {{ background: #e8f0fe; padding: .6rem; }}
.error {{ background: #fce8e6; padding: .6rem; }}
</style>
</head>
<body>
{body}
{script}
</body>
</html>
"#,
        title = escape(title),
        body = body,
        script = script,
    )
}
