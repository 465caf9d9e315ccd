pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::AppConfig;
pub use crate::core::explorer::{DishExplorer, LiveExplorer};
pub use utils::error::{DishError, Result};
pub use web::create_router;
