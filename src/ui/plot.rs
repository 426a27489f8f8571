use std::f64::consts::TAU;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, PlotUi,
    Points, Polygon, Text,
};

use crate::charts::figure::{BoxTrace, HistogramTrace, PieTrace, ScatterTrace};
use crate::charts::stats::{histogram_counts, BoxSummary};
use crate::charts::{ChartId, Figure, Trace};
use crate::color::parse_hex;

// ---------------------------------------------------------------------------
// Native rendering of chart descriptors (central panel)
// ---------------------------------------------------------------------------

/// Draw one dashboard chart with its title.
pub fn chart(ui: &mut Ui, id: ChartId, figure: &Figure, height: f32) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(figure.title()).strong());
        if figure.point_count() == 0 {
            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.weak("No matching records");
                });
            });
            return;
        }
        match id {
            ChartId::ActivityShare => pie_plot(ui, id, figure, height),
            _ => cartesian_plot(ui, id, figure, height),
        }
    });
}

fn color_of(hex: &str) -> Color32 {
    parse_hex(hex)
        .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
        .unwrap_or(Color32::GRAY)
}

fn axis_title(axis: &Option<crate::charts::figure::Axis>) -> String {
    axis.as_ref().map(|a| a.title.text.clone()).unwrap_or_default()
}

fn cartesian_plot(ui: &mut Ui, id: ChartId, figure: &Figure, height: f32) {
    // Box charts put one category per integer x position; empty traces
    // take no position.
    let categories: Vec<String> = figure
        .data
        .iter()
        .filter(|t| !t.is_empty())
        .filter_map(|t| match t {
            Trace::Box(b) => Some(b.name.clone()),
            _ => None,
        })
        .collect();
    let has_boxes = !categories.is_empty();

    let mut plot = Plot::new(id.element_id())
        .height(height)
        .legend(Legend::default())
        .x_axis_label(axis_title(&figure.layout.xaxis))
        .y_axis_label(axis_title(&figure.layout.yaxis))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);

    if has_boxes {
        plot = plot.x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < f64::EPSILON && idx >= 0.0 {
                categories.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        });
    }

    plot.show(ui, |plot_ui| {
        let mut box_slot = 0;
        for trace in figure.data.iter().filter(|t| !t.is_empty()) {
            match trace {
                Trace::Scatter(s) => scatter(plot_ui, s),
                Trace::Histogram(h) => histogram(plot_ui, h),
                Trace::Box(b) => {
                    box_and_whisker(plot_ui, b, box_slot as f64);
                    box_slot += 1;
                }
                Trace::Pie(_) => {}
            }
        }
    });
}

fn scatter(plot_ui: &mut PlotUi, trace: &ScatterTrace) {
    let points: PlotPoints = trace
        .x
        .iter()
        .zip(trace.y.iter())
        .map(|(&x, &y)| [x, y])
        .collect();
    plot_ui.points(
        Points::new(points)
            .name(&trace.name)
            .color(color_of(&trace.marker.color))
            .radius(3.0),
    );
}

fn histogram(plot_ui: &mut PlotUi, trace: &HistogramTrace) {
    let Some(bins) = trace.xbins else {
        return;
    };
    let bars: Vec<Bar> = histogram_counts(&trace.x, &bins)
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let center = bins.start + (i as f64 + 0.5) * bins.size;
            Bar::new(center, count as f64).width(bins.size)
        })
        .collect();
    plot_ui.bar_chart(
        BarChart::new(bars)
            .name(&trace.name)
            .color(color_of(&trace.marker.color)),
    );
}

fn box_and_whisker(plot_ui: &mut PlotUi, trace: &BoxTrace, slot: f64) {
    let Some(s) = BoxSummary::from_values(&trace.y) else {
        return;
    };
    let color = color_of(&trace.marker.color);
    let elem = BoxElem::new(
        slot,
        BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
    )
    .name(&trace.name)
    .box_width(0.5)
    .fill(color.gamma_multiply(0.3))
    .stroke(Stroke::new(1.5, color));
    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&trace.name));
}

// ---------------------------------------------------------------------------
// Pie chart: slices as polygons on an equal-aspect plot
// ---------------------------------------------------------------------------

/// Largest arc drawn as one polygon; keeps every polygon convex.
const MAX_WEDGE: f64 = TAU / 4.0;

fn pie_plot(ui: &mut Ui, id: ChartId, figure: &Figure, height: f32) {
    Plot::new(id.element_id())
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for trace in &figure.data {
                if let Trace::Pie(p) = trace {
                    pie(plot_ui, p);
                }
            }
        });
}

fn pie(plot_ui: &mut PlotUi, trace: &PieTrace) {
    let total: u64 = trace.values.iter().sum();
    if total == 0 {
        return;
    }

    // Start at twelve o'clock and go clockwise, like Plotly.
    let mut angle = TAU / 4.0;
    for (i, (label, &value)) in trace.labels.iter().zip(&trace.values).enumerate() {
        let share = value as f64 / total as f64;
        let sweep = share * TAU;
        let color = trace
            .marker
            .colors
            .get(i)
            .map(|c| color_of(c))
            .unwrap_or(Color32::GRAY);

        let wedges = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
        for w in 0..wedges {
            let from = angle - sweep * w as f64 / wedges as f64;
            let to = angle - sweep * (w + 1) as f64 / wedges as f64;
            plot_ui.polygon(
                Polygon::new(wedge(from, to))
                    .name(label)
                    .fill_color(color)
                    .stroke(Stroke::new(1.0, Color32::WHITE)),
            );
        }

        let mid = angle - sweep / 2.0;
        plot_ui.text(Text::new(
            PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
            format!("{:.1}%", share * 100.0),
        ));
        angle -= sweep;
    }
}

/// Unit-circle wedge between two angles, as a closed point list.
fn wedge(from: f64, to: f64) -> Vec<[f64; 2]> {
    const STEPS: usize = 24;
    let mut points = vec![[0.0, 0.0]];
    points.extend((0..=STEPS).map(|k| {
        let a = from + (to - from) * k as f64 / STEPS as f64;
        [a.cos(), a.sin()]
    }));
    points
}
