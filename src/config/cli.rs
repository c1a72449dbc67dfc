pub use crate::app::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "bmkg-feed")]
#[command(about = "Latest earthquake, weather forecasts and regions from BMKG")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the most recent earthquake bulletin
    Earthquake {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show the forecast for a village/kelurahan code (adm4)
    Weather {
        /// Region code, e.g. 35.71.01.1001
        region_code: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the output to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the region catalog
    Regions {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only partitions declaring this code
        #[arg(long)]
        code: Option<String>,
    },
}
