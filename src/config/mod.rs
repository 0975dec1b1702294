pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "nachweis-etl")]
#[command(about = "Convert weekly training report spreadsheets to Markdown")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory with the report spreadsheets [default: input]
    #[arg(long)]
    pub input: Option<String>,

    /// Directory for the Markdown files and the archive [default: output]
    #[arg(long)]
    pub output: Option<String>,

    /// Year used when neither sheet nor filename names one [default: current year]
    #[arg(long)]
    pub default_year: Option<i32>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
