use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::load_settings;
use commands::{growth, history, list_countries, simulate};

#[derive(Parser)]
#[command(name = "vikalp")]
#[command(about = "Vikalp.ai economic scenario simulator")]
#[command(version)]
pub struct Cli {
    /// Base URL of the prediction service
    ///
    /// Overrides `api_base_url` from vikalp.toml and VIKALP_API_BASE_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the countries the service can simulate
    Countries,
    /// Show the historical GDP growth series of a country
    ///
    /// Falls back to an estimated series when the service cannot provide one.
    History {
        /// Country name, as listed by `countries`
        #[arg(short, long)]
        country: String,
    },
    /// Run a scenario simulation and optionally export the PDF report
    Simulate {
        /// Country name, as listed by `countries`
        #[arg(short, long)]
        country: String,

        /// Population growth rate (%)
        #[arg(long, allow_hyphen_values = true)]
        population: String,

        /// Exports growth rate (%)
        #[arg(long, allow_hyphen_values = true)]
        exports: String,

        /// Imports growth rate (%)
        #[arg(long, allow_hyphen_values = true)]
        imports: String,

        /// Investment growth rate (%)
        #[arg(long, allow_hyphen_values = true)]
        investment: String,

        /// Consumption growth rate (%)
        #[arg(long, allow_hyphen_values = true)]
        consumption: String,

        /// Government spending growth rate (%)
        #[arg(long, allow_hyphen_values = true)]
        government: String,

        /// Export the scenario report as PDF
        #[arg(long)]
        report: bool,

        /// Directory the report is written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Derive growth rates from previous-year and current-year values
    ///
    /// Examples:
    ///   vikalp growth --value population=1380:1395 --value exports=540:610
    Growth {
        /// NAME=PREVIOUS:CURRENT, NAME one of population, exports, imports,
        /// capitalFormation, consumption, government
        #[arg(short, long = "value", required = true)]
        values: Vec<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut settings = load_settings()?;

        match self.command {
            Commands::Countries => {
                settings.apply_overrides(self.api_url, None);
                list_countries(&settings)?;
            }
            Commands::History { country } => {
                settings.apply_overrides(self.api_url, None);
                history(&settings, &country)?;
            }
            Commands::Simulate {
                country,
                population,
                exports,
                imports,
                investment,
                consumption,
                government,
                report,
                output_dir,
            } => {
                settings.apply_overrides(self.api_url, output_dir);
                let rates = [population, exports, imports, investment, consumption, government];
                simulate(&settings, &country, rates, report)?;
            }
            Commands::Growth { values } => {
                growth(&values)?;
            }
        }
        Ok(())
    }
}
