pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::DeliveryPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::etl::EtlEngine;
pub use domain::model::{FilterCriteria, Order, RunSummary, TimestampFormat};
pub use utils::error::{DeliveryError, Result};
