//! Static HTML export.
//!
//! The exported document embeds the current criteria and the five chart
//! descriptors as JSON and draws them with Plotly on load; it never talks
//! back to this process.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::charts::{ChartId, Dashboard};
use crate::data::filter::Criteria;
use crate::data::model::Dataset;
use crate::view::View;

pub const DEFAULT_OUTPUT: &str = "dashboard.html";
pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const TITLE: &str = "Health and Activity Dashboard";
const PAYLOAD_OPEN: &str = r#"<script type="application/json" id="dashboard-data">"#;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("document has no embedded dashboard data")]
    MissingPayload,
    #[error("invalid dashboard data: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Where and how to write the export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub path: PathBuf,
    /// URL (or relative path) of the Plotly bundle the document loads.
    pub plotly_src: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            path: PathBuf::from(DEFAULT_OUTPUT),
            plotly_src: DEFAULT_PLOTLY_SRC.to_string(),
        }
    }
}

/// The data embedded in an exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub criteria: Criteria,
    /// Number of records behind the charts.
    pub records: usize,
    pub charts: Dashboard,
}

/// What a successful export wrote.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: usize,
}

/// Re-render the dashboard for `criteria` and write it to `options.path`,
/// overwriting any previous export.
pub fn export(
    dataset: &Dataset,
    criteria: &Criteria,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let view = View::compute(dataset, criteria);
    let document = build_document(&view, &options.plotly_src)?;
    write_document(&options.path, &document)?;

    log::info!(
        "Exported {} records to {}",
        view.indices.len(),
        options.path.display()
    );
    Ok(ExportSummary {
        path: options.path.clone(),
        records: view.indices.len(),
        bytes: document.len(),
    })
}

fn write_document(path: &Path, document: &str) -> Result<(), ExportError> {
    std::fs::write(path, document).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Document construction
// ---------------------------------------------------------------------------

/// Render `view` as a self-contained HTML document.
pub fn build_document(view: &View, plotly_src: &str) -> Result<String, ExportError> {
    let payload = ExportPayload {
        criteria: view.criteria.clone(),
        records: view.indices.len(),
        charts: view.charts.clone(),
    };
    let json = script_safe(&serde_json::to_string(&payload)?);
    let c = &view.criteria;

    let mut s = String::new();
    s.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(s, "<title>{TITLE}</title>");
    let _ = writeln!(s, "<script src=\"{}\"></script>", html_escape(plotly_src));
    s.push_str("</head>\n<body>\n");
    let _ = writeln!(s, "<h1>{TITLE}</h1>");

    s.push_str("<div>\n");
    field(&mut s, "Age", "number", c.age.map(|v| v.to_string()), Some((0, 120)));
    field(&mut s, "Gender", "text", c.gender.clone(), None);
    field(&mut s, "Height (cm)", "number", c.height.map(|v| v.to_string()), Some((0, 300)));
    field(&mut s, "Weight (kg)", "number", c.weight.map(|v| v.to_string()), Some((0, 500)));
    s.push_str("</div>\n");
    let _ = writeln!(s, "<p>{} matching records</p>", payload.records);

    for id in ChartId::ALL {
        let _ = writeln!(s, "<div id=\"{}\"></div>", id.element_id());
    }

    let _ = writeln!(s, "{PAYLOAD_OPEN}{json}</script>");
    s.push_str(concat!(
        "<script>\n",
        "var payload = JSON.parse(document.getElementById('dashboard-data').textContent);\n",
        "Object.keys(payload.charts).forEach(function (id) {\n",
        "  var fig = payload.charts[id];\n",
        "  Plotly.newPlot(id, fig.data, fig.layout);\n",
        "});\n",
        "</script>\n",
    ));
    s.push_str("</body>\n</html>\n");
    Ok(s)
}

/// One labelled input echoing a criteria value, blank when unset.
fn field(s: &mut String, label: &str, kind: &str, value: Option<String>, range: Option<(u32, u32)>) {
    let value = html_escape(value.as_deref().unwrap_or(""));
    let bounds = range
        .map(|(min, max)| format!(" min=\"{min}\" max=\"{max}\""))
        .unwrap_or_default();
    let _ = writeln!(
        s,
        "<label>{label}: <input type=\"{kind}\" value=\"{value}\"{bounds}></label>"
    );
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Make serialized JSON safe to inline in a `<script>` element. These
/// characters only occur inside JSON strings, where `\uXXXX` is equivalent.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

// ---------------------------------------------------------------------------
// Reading an export back
// ---------------------------------------------------------------------------

/// Extract the embedded payload from an exported document.
pub fn read_payload(document: &str) -> Result<ExportPayload, ExportError> {
    let start = document
        .find(PAYLOAD_OPEN)
        .ok_or(ExportError::MissingPayload)?
        + PAYLOAD_OPEN.len();
    let len = document[start..]
        .find("</script>")
        .ok_or(ExportError::MissingPayload)?;
    Ok(serde_json::from_str(&document[start..start + len])?)
}
