pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, settings::Settings};
pub use crate::core::{etl::BatchEngine, pipeline::ReportPipeline};
pub use utils::error::{ConvertError, Result};
