//! Chart descriptors.
//!
//! A [`Figure`] serializes to the `{data, layout}` JSON that
//! `Plotly.newPlot(id, data, layout)` accepts, and the native plots in the
//! UI draw from the very same values.  Nothing here knows about egui.

use serde::{Deserialize, Serialize};

/// One chart: its traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(title: &str) -> Self {
        Figure {
            data: Vec::new(),
            layout: Layout {
                title: Text::new(title),
                xaxis: None,
                yaxis: None,
            },
        }
    }

    pub fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.layout.xaxis = Some(Axis { title: Text::new(x) });
        self.layout.yaxis = Some(Axis { title: Text::new(y) });
        self
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Total number of plotted values across all traces.
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Text,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Text { text: text.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Histogram(HistogramTrace),
    Pie(PieTrace),
    Box(BoxTrace),
}

impl Trace {
    /// Number of data values this trace carries.
    pub fn len(&self) -> usize {
        match self {
            Trace::Scatter(t) => t.x.len(),
            Trace::Histogram(t) => t.x.len(),
            Trace::Pie(t) => t.values.iter().map(|&v| v as usize).sum(),
            Trace::Box(t) => t.y.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marker-only x/y scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker: Marker,
}

/// Frequency histogram over `x` with explicit binning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramTrace {
    pub name: String,
    pub x: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xbins: Option<Bins>,
    pub marker: Marker,
}

/// Half-open bins `[start + i*size, start + (i+1)*size)` up to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bins {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

impl Bins {
    pub fn count(&self) -> usize {
        ((self.end - self.start) / self.size).round() as usize
    }
}

/// Pre-aggregated proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub marker: PieMarker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

/// One box-and-whisker over `y`; the renderer computes the quartiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTrace {
    pub name: String,
    pub y: Vec<f64>,
    pub marker: Marker,
}
