use eframe::egui::{self, Color32, RichText, TextEdit, Ui};

use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the toolbar: title, record counter, export actions.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export").clicked() {
                state.export();
                ui.close_menu();
            }
            if ui.button("Export As…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.heading("Health and Activity Dashboard");
        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset().len(),
            state.view.indices.len()
        ));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Generate Static HTML").clicked() {
                state.export();
            }
        });
    });

    match &state.status {
        Some(Status::Info(msg)) => {
            ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
        }
        Some(Status::Error(msg)) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Filter row: the four inputs
// ---------------------------------------------------------------------------

/// Render the four filter inputs and refresh the view on any change.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    let genders: Vec<String> = state.dataset().genders().iter().cloned().collect();
    let mut changed = false;

    ui.horizontal(|ui: &mut Ui| {
        changed |= number_input(ui, &mut state.inputs.age, "Enter Age");

        let before = state.inputs.gender.clone();
        let selected = if before.is_empty() { "Select Gender" } else { before.as_str() };
        egui::ComboBox::from_id_salt("gender-input")
            .selected_text(selected)
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut state.inputs.gender, String::new(), "Any");
                for g in &genders {
                    ui.selectable_value(&mut state.inputs.gender, g.clone(), g.as_str());
                }
            });
        changed |= state.inputs.gender != before;

        changed |= number_input(ui, &mut state.inputs.height, "Enter Height (cm)");
        changed |= number_input(ui, &mut state.inputs.weight, "Enter Weight (kg)");

        if ui.button("Clear filters").clicked() {
            state.clear_filters();
        }
    });

    if changed {
        state.refresh();
    }
}

fn number_input(ui: &mut Ui, text: &mut String, hint: &str) -> bool {
    ui.add(TextEdit::singleline(text).hint_text(hint).desired_width(130.0))
        .changed()
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard")
        .add_filter("HTML", &["html", "htm"])
        .set_file_name("dashboard.html")
        .save_file();

    if let Some(path) = file {
        state.export_to(path);
    }
}
