use eframe::egui;

use crate::charts::ChartId;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const TOP_ROW_HEIGHT: f32 = 320.0;
const BOTTOM_ROW_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HealthDashApp {
    pub state: AppState,
}

impl HealthDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HealthDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar + filters ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
            ui.separator();
            panels::filter_bar(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // ---- Central panel: the five charts, then the records ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let charts = &self.state.view.charts;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.columns(2, |cols| {
                        for (col, id) in cols.iter_mut().zip([ChartId::StepsCalories, ChartId::HeartRate]) {
                            plot::chart(col, id, charts.get(id), TOP_ROW_HEIGHT);
                        }
                    });
                    ui.add_space(8.0);
                    ui.columns(3, |cols| {
                        let bottom = [
                            ChartId::ActivityShare,
                            ChartId::DistanceByActivity,
                            ChartId::HeartComparison,
                        ];
                        for (col, id) in cols.iter_mut().zip(bottom) {
                            plot::chart(col, id, charts.get(id), BOTTOM_ROW_HEIGHT);
                        }
                    });
                    ui.add_space(8.0);

                    egui::CollapsingHeader::new("Matching records")
                        .default_open(false)
                        .show(ui, |ui| {
                            table::records_table(ui, &self.state);
                        });
                });
        });
    }
}
