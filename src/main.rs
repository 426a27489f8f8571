mod app;
mod charts;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::HealthDashApp;
use config::Cli;
use data::filter::Criteria;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let dataset = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading dataset {}", cli.data.display()))?;
    log::info!(
        "Loaded {} records from {} ({} genders, {} activities)",
        dataset.len(),
        cli.data.display(),
        dataset.genders().len(),
        dataset.activities().len()
    );
    if dataset.is_empty() {
        log::warn!("{} has no usable records; every chart will be empty", cli.data.display());
    }

    if cli.headless {
        let criteria = Criteria::from_inputs(&cli.filter_inputs());
        let summary = export::export(&dataset, &criteria, &cli.export_options())?;
        println!(
            "Wrote {} ({} records, {} bytes)",
            summary.path.display(),
            summary.records,
            summary.bytes
        );
        return Ok(());
    }

    let state = AppState::new(dataset, cli.filter_inputs(), cli.export_options());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Health and Activity Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(HealthDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
