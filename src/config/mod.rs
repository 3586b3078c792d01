//! Configuration loading for the flextime engine.
//!
//! This module loads rule sets from YAML files: engine settings, day plans
//! and monthly crediting rules.
//!
//! # Example
//!
//! ```no_run
//! use flextime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Relative rounding: {}", config.settings().rounding_relative_to_plan);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DayPlansConfig, EngineSettings, MonthlyRulesConfig, RuleSet};
