use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::figure::{BoxTrace, Figure, HistogramTrace, Marker, PieMarker, PieTrace, ScatterTrace, Trace};
use super::stats::{self, auto_bins};
use crate::color::ColorMap;
use crate::data::model::Record;

const HISTOGRAM_COLOR: &str = "#636efa";
const RESTING_COLOR: &str = "#00cc96";
const NORMAL_COLOR: &str = "#ef553b";

// ---------------------------------------------------------------------------
// Chart identities
// ---------------------------------------------------------------------------

/// The five dashboard charts, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    StepsCalories,
    HeartRate,
    ActivityShare,
    DistanceByActivity,
    HeartComparison,
}

impl ChartId {
    pub const ALL: [ChartId; 5] = [
        ChartId::StepsCalories,
        ChartId::HeartRate,
        ChartId::ActivityShare,
        ChartId::DistanceByActivity,
        ChartId::HeartComparison,
    ];

    /// Element id of the chart's container, in the UI and in exports.
    pub fn element_id(self) -> &'static str {
        match self {
            ChartId::StepsCalories => "steps-calories-scatter",
            ChartId::HeartRate => "heart-rate-histogram",
            ChartId::ActivityShare => "activity-pie-chart",
            ChartId::DistanceByActivity => "distance-boxplot",
            ChartId::HeartComparison => "heart-rate-comparison",
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard: the five descriptors for one subset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(rename = "steps-calories-scatter")]
    pub steps_calories: Figure,
    #[serde(rename = "heart-rate-histogram")]
    pub heart_rate: Figure,
    #[serde(rename = "activity-pie-chart")]
    pub activity_share: Figure,
    #[serde(rename = "distance-boxplot")]
    pub distance_by_activity: Figure,
    #[serde(rename = "heart-rate-comparison")]
    pub heart_comparison: Figure,
}

impl Dashboard {
    pub fn get(&self, id: ChartId) -> &Figure {
        match id {
            ChartId::StepsCalories => &self.steps_calories,
            ChartId::HeartRate => &self.heart_rate,
            ChartId::ActivityShare => &self.activity_share,
            ChartId::DistanceByActivity => &self.distance_by_activity,
            ChartId::HeartComparison => &self.heart_comparison,
        }
    }

    /// All five figures in layout order.
    pub fn figures(&self) -> impl Iterator<Item = (ChartId, &Figure)> {
        ChartId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// Build the five chart descriptors for `subset`.
///
/// Pure: the same subset always yields the same dashboard. An empty subset
/// yields figures without data points.
pub fn render(subset: &[&Record]) -> Dashboard {
    let activities: BTreeSet<String> = subset.iter().map(|r| r.activity.clone()).collect();
    let colors = ColorMap::new(&activities);

    Dashboard {
        steps_calories: steps_vs_calories(subset, &colors),
        heart_rate: heart_rate_histogram(subset),
        activity_share: activity_pie(subset, &colors),
        distance_by_activity: distance_by_activity(subset, &colors),
        heart_comparison: heart_rate_comparison(subset),
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn steps_vs_calories(subset: &[&Record], colors: &ColorMap) -> Figure {
    let mut fig = Figure::new("Steps vs Calories Burned").with_axes("steps", "calories");
    let mut by_activity: std::collections::BTreeMap<&str, (Vec<f64>, Vec<f64>)> =
        Default::default();
    for r in subset {
        let (x, y) = by_activity.entry(r.activity.as_str()).or_default();
        x.push(r.steps as f64);
        y.push(r.calories);
    }
    fig.data = by_activity
        .into_iter()
        .map(|(activity, (x, y))| {
            Trace::Scatter(ScatterTrace {
                name: activity.to_string(),
                mode: "markers".to_string(),
                x,
                y,
                marker: Marker { color: colors.hex_for(activity) },
            })
        })
        .collect();
    fig
}

fn heart_rate_histogram(subset: &[&Record]) -> Figure {
    let mut fig = Figure::new("Distribution of Heart Rates").with_axes("heart_rate", "count");
    let x: Vec<f64> = subset.iter().map(|r| r.heart_rate).collect();
    let xbins = auto_bins(&x);
    fig.data.push(Trace::Histogram(HistogramTrace {
        name: "heart_rate".to_string(),
        x,
        xbins,
        marker: Marker { color: HISTOGRAM_COLOR.to_string() },
    }));
    fig
}

fn activity_pie(subset: &[&Record], colors: &ColorMap) -> Figure {
    let mut fig = Figure::new("Activity Distribution");
    let mut counts: std::collections::BTreeMap<&str, u64> = Default::default();
    for r in subset {
        *counts.entry(r.activity.as_str()).or_default() += 1;
    }
    let labels: Vec<String> = counts.keys().map(|s| s.to_string()).collect();
    let marker = PieMarker {
        colors: labels.iter().map(|l| colors.hex_for(l)).collect(),
    };
    fig.data.push(Trace::Pie(PieTrace {
        labels,
        values: counts.into_values().collect(),
        marker,
    }));
    fig
}

fn distance_by_activity(subset: &[&Record], colors: &ColorMap) -> Figure {
    let mut fig = Figure::new("Distance by Activity Type").with_axes("activity", "distance");
    fig.data = stats::group_by(subset, |r| r.activity.as_str(), |r| r.distance)
        .into_iter()
        .map(|(activity, y)| {
            Trace::Box(BoxTrace {
                name: activity.to_string(),
                y,
                marker: Marker { color: colors.hex_for(activity) },
            })
        })
        .collect();
    fig
}

fn heart_rate_comparison(subset: &[&Record]) -> Figure {
    let mut fig = Figure::new("Resting vs Normal Heart Rate Comparison");
    fig.data.push(Trace::Box(BoxTrace {
        name: "Resting Heart Rate".to_string(),
        y: subset.iter().map(|r| r.resting_heart).collect(),
        marker: Marker { color: RESTING_COLOR.to_string() },
    }));
    fig.data.push(Trace::Box(BoxTrace {
        name: "Normal Heart Rate".to_string(),
        y: subset.iter().map(|r| r.norm_heart).collect(),
        marker: Marker { color: NORMAL_COLOR.to_string() },
    }));
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures;

    #[test]
    fn empty_subset_renders_five_empty_charts() {
        let dash = render(&[]);
        let figures: Vec<_> = dash.figures().collect();
        assert_eq!(figures.len(), 5);
        for (id, fig) in figures {
            assert_eq!(fig.point_count(), 0, "{}", id.element_id());
        }
        // The comparison keeps its two (empty) boxes.
        assert_eq!(dash.heart_comparison.data.len(), 2);
        assert!(dash.steps_calories.data.is_empty());
        match &dash.heart_rate.data[0] {
            Trace::Histogram(h) => assert!(h.xbins.is_none()),
            other => panic!("unexpected trace {other:?}"),
        }
    }

    #[test]
    fn single_record_is_reflected_in_every_chart() {
        let record = fixtures::record(30, "M", "walk");
        let dash = render(&[&record]);

        match dash.steps_calories.data.as_slice() {
            [Trace::Scatter(s)] => {
                assert_eq!(s.name, "walk");
                assert_eq!((s.x.as_slice(), s.y.as_slice()), (&[1000.0][..], &[50.0][..]));
            }
            other => panic!("unexpected traces {other:?}"),
        }
        match dash.activity_share.data.as_slice() {
            [Trace::Pie(p)] => {
                assert_eq!(p.labels, vec!["walk"]);
                assert_eq!(p.values, vec![1]);
            }
            other => panic!("unexpected traces {other:?}"),
        }
        assert_eq!(dash.heart_rate.point_count(), 1);
        assert_eq!(dash.distance_by_activity.point_count(), 1);
        assert_eq!(dash.heart_comparison.point_count(), 2);
    }

    #[test]
    fn traces_are_grouped_by_activity() {
        let records = fixtures::sample();
        let subset: Vec<&Record> = records.iter().collect();
        let dash = render(&subset);

        let names: Vec<&str> = dash
            .distance_by_activity
            .data
            .iter()
            .map(|t| match t {
                Trace::Box(b) => b.name.as_str(),
                other => panic!("unexpected trace {other:?}"),
            })
            .collect();
        assert_eq!(names, ["cycling", "running", "walking"]);

        match dash.activity_share.data.as_slice() {
            [Trace::Pie(p)] => assert_eq!(p.values, vec![1, 2, 3]),
            other => panic!("unexpected traces {other:?}"),
        }
        assert_eq!(dash.steps_calories.point_count(), 6);
    }

    #[test]
    fn scatter_and_box_colours_agree_per_activity() {
        let records = fixtures::sample();
        let subset: Vec<&Record> = records.iter().collect();
        let dash = render(&subset);
        for (scatter, boxed) in dash.steps_calories.data.iter().zip(&dash.distance_by_activity.data) {
            match (scatter, boxed) {
                (Trace::Scatter(s), Trace::Box(b)) => {
                    assert_eq!(s.name, b.name);
                    assert_eq!(s.marker, b.marker);
                }
                other => panic!("unexpected traces {other:?}"),
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let records = fixtures::sample();
        let subset: Vec<&Record> = records.iter().collect();
        assert_eq!(render(&subset), render(&subset));
    }
}
