use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::FilterInputs;
use crate::export::{ExportOptions, DEFAULT_OUTPUT, DEFAULT_PLOTLY_SRC};

/// Health and activity dashboard.
///
/// Opens a window with five charts over the dataset, filtered by age, gender,
/// height and weight. With `--headless`, writes the HTML export for the given
/// filters and exits.
#[derive(Debug, Parser)]
#[command(name = "health-dash", version, about)]
pub struct Cli {
    /// Dataset to load (.csv, .json or .parquet).
    #[arg(long, env = "HEALTH_DASH_DATA", default_value = "Health_Dataset.csv")]
    pub data: PathBuf,

    /// Where the HTML export is written.
    #[arg(long, env = "HEALTH_DASH_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Plotly bundle referenced by the exported document.
    #[arg(long, env = "HEALTH_DASH_PLOTLY_SRC", default_value = DEFAULT_PLOTLY_SRC)]
    pub plotly_src: String,

    /// Initial age filter.
    #[arg(long, default_value = "")]
    pub age: String,

    /// Initial gender filter.
    #[arg(long, default_value = "")]
    pub gender: String,

    /// Initial height filter (cm).
    #[arg(long, default_value = "")]
    pub height: String,

    /// Initial weight filter (kg).
    #[arg(long, default_value = "")]
    pub weight: String,

    /// Write the export once and exit instead of opening a window.
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// The filter fields as typed on the command line. Parsed permissively
    /// later, like anything typed into the window.
    pub fn filter_inputs(&self) -> FilterInputs {
        FilterInputs {
            age: self.age.clone(),
            gender: self.gender.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            path: self.output.clone(),
            plotly_src: self.plotly_src.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Criteria;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["health-dash"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("dashboard.html"));
        assert!(!cli.headless);
        assert!(Criteria::from_inputs(&cli.filter_inputs()).is_unconstrained());
    }

    #[test]
    fn headless_export_flags() {
        let cli = Cli::try_parse_from([
            "health-dash",
            "--headless",
            "--data",
            "health.parquet",
            "--output",
            "out/view.html",
            "--age",
            "30",
            "--weight",
            "heavy",
        ])
        .unwrap();
        assert!(cli.headless);
        assert_eq!(cli.data, PathBuf::from("health.parquet"));
        assert_eq!(cli.export_options().path, PathBuf::from("out/view.html"));

        let criteria = Criteria::from_inputs(&cli.filter_inputs());
        assert_eq!(criteria.age, Some(30));
        assert_eq!(criteria.weight, None);
    }
}
