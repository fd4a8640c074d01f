//! Planetary settings persisted as `config.ron`.
//!
//! Every section uses `#[serde(default)]`, so files written by older or newer
//! builds still load. Command-line flags are applied on top of the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, CameraConfig, Config, DebugConfig, PlanetConfig, WindowConfig};
pub use error::ConfigError;
