use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 11] = [
    "age",
    "gender",
    "height",
    "weight",
    "steps",
    "calories",
    "activity",
    "distance",
    "heart_rate",
    "resting_heart",
    "norm_heart",
];

/// Scrollable table of the records behind the current charts.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.view.records(state.dataset());

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .columns(Column::auto().at_least(60.0), HEADERS.len())
        .header(20.0, |mut header| {
            for name in HEADERS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let r = records[row.index()];
                let cells = [
                    r.age.to_string(),
                    r.gender.clone(),
                    r.height.to_string(),
                    r.weight.to_string(),
                    r.steps.to_string(),
                    r.calories.to_string(),
                    r.activity.clone(),
                    r.distance.to_string(),
                    r.heart_rate.to_string(),
                    r.resting_heart.to_string(),
                    r.norm_heart.to_string(),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
