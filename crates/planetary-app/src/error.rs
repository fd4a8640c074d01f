use planetary_config::ConfigError;
use planetary_render::BackendError;
use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("render backend: {0}")]
    Backend(#[from] BackendError),
    #[error("logging setup failed: {0}")]
    Logging(String),
}
