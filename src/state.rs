use std::path::PathBuf;

use crate::data::filter::{Criteria, FilterInputs};
use crate::data::model::Dataset;
use crate::export::{self, ExportOptions};
use crate::view::View;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Status line shown under the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    dataset: Dataset,

    /// Raw text of the four filter widgets.
    pub inputs: FilterInputs,

    /// Filter result and charts for the current inputs.
    pub view: View,

    /// Where the Export button writes.
    pub export_options: ExportOptions,

    pub status: Option<Status>,
}

impl AppState {
    pub fn new(dataset: Dataset, inputs: FilterInputs, export_options: ExportOptions) -> Self {
        let view = View::compute(&dataset, &Criteria::from_inputs(&inputs));
        Self {
            dataset,
            inputs,
            view,
            export_options,
            status: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Recompute the view after an input change.
    pub fn refresh(&mut self) {
        let criteria = Criteria::from_inputs(&self.inputs);
        self.view = View::compute(&self.dataset, &criteria);
    }

    pub fn clear_filters(&mut self) {
        self.inputs.clear();
        self.refresh();
    }

    /// Export the view on screen to the configured path.
    pub fn export(&mut self) {
        let options = self.export_options.clone();
        self.export_with(&options);
    }

    /// Export the view on screen to `path`, e.g. from a save dialog.
    pub fn export_to(&mut self, path: PathBuf) {
        let options = ExportOptions {
            path,
            ..self.export_options.clone()
        };
        self.export_with(&options);
    }

    /// Uses the criteria of the displayed view, not the widget text, so the
    /// file always matches what the user is looking at.
    fn export_with(&mut self, options: &ExportOptions) {
        self.status = Some(match export::export(&self.dataset, &self.view.criteria, options) {
            Ok(summary) => Status::Info(format!(
                "Exported {} records to {}",
                summary.records,
                summary.path.display()
            )),
            Err(e) => {
                log::error!("Export failed: {e}");
                Status::Error(format!("Export failed: {e}"))
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures;

    fn state(dir: &tempfile::TempDir) -> AppState {
        AppState::new(
            Dataset::from_records(fixtures::sample()),
            FilterInputs::default(),
            ExportOptions {
                path: dir.path().join("dashboard.html"),
                ..Default::default()
            },
        )
    }

    #[test]
    fn refresh_follows_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        assert_eq!(state.view.indices.len(), 6);

        state.inputs.gender = "F".into();
        state.refresh();
        assert_eq!(state.view.indices, vec![1, 3, 4]);

        state.inputs.age = "not a number".into();
        state.refresh();
        assert_eq!(state.view.indices, vec![1, 3, 4]);

        state.clear_filters();
        assert_eq!(state.view.indices.len(), 6);
    }

    #[test]
    fn export_uses_the_displayed_criteria() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        state.inputs.age = "45".into();
        state.refresh();
        // Typed after the last refresh; not on screen yet.
        state.inputs.age = "30".into();

        state.export();
        assert!(matches!(state.status, Some(Status::Info(_))));
        let html = std::fs::read_to_string(dir.path().join("dashboard.html")).unwrap();
        let payload = export::read_payload(&html).unwrap();
        assert_eq!(payload.criteria.age, Some(45));
        assert_eq!(payload.charts, state.view.charts);
    }

    #[test]
    fn export_failure_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(&dir);
        state.export_to(dir.path().join("no").join("such").join("dir.html"));
        assert!(matches!(state.status, Some(Status::Error(ref m)) if m.contains("Export failed")));
    }
}
