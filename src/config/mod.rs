//! Configuration module - window sizing settings
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - `SizingConfig` and its derived bounds
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_BROWSER_OPEN_HEIGHT, DEFAULT_MAX_HEIGHT_RATIO, DEFAULT_MIN_BASE_HEIGHT};

pub use types::SizingConfig;

pub use loader::{default_config_path, load_config, load_config_from};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
