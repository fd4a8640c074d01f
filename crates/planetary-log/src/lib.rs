//! Tracing subscriber setup for Planetary.
//!
//! Console output always; a JSON file in debug builds. `RUST_LOG` takes
//! precedence over the configured level. Records emitted through the `log`
//! facade are forwarded into the same subscriber.

use std::path::{Path, PathBuf};

use planetary_config::Config;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File written inside the log directory.
pub const LOG_FILE: &str = "planetary.log";

/// Used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// The filter directive implied by `config`, ignoring the environment.
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVE)
}

/// Installs the global subscriber for Planetary.
///
/// Sets up:
/// - console output with uptime, target and level
/// - a JSON file layer (`planetary.log`) in debug builds
/// - filtering from `RUST_LOG`, falling back to `debug.log_level`, then `info`
/// - forwarding of `log` facade records into the same subscriber
///
/// Returns the JSON log path when file logging was enabled. File logging is
/// skipped silently if the directory or file cannot be created. Fails only if
/// a global subscriber is already set.
///
/// # Arguments
///
/// * `log_dir` - Directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether to enable file logging
/// * `config` - Configuration whose `debug.log_level` is the fallback filter
///
/// # Examples
///
/// ```no_run
/// use planetary_config::Config;
/// use planetary_log::init_logging;
///
/// let config = Config::default();
/// let log_dir = std::path::Path::new("./logs");
/// match init_logging(Some(log_dir), cfg!(debug_assertions), Some(&config)) {
///     Ok(Some(path)) => tracing::info!("JSON log at {}", path.display()),
///     Ok(None) => tracing::info!("console logging only"),
///     Err(e) => eprintln!("logging already initialized: {e}"),
/// }
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<Option<PathBuf>, TryInitError> {
    let directive = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).try_init()?;
        return Ok(Some(log_dir.join(LOG_FILE)));
    }

    subscriber.try_init()?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_defaults_to_info() {
        assert_eq!(filter_directive(None), "info");
        let mut config = Config::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directive(Some(&config)), "info");
    }

    #[test]
    fn test_directive_from_config() {
        let mut config = Config::default();
        config.debug.log_level = "warn,planetary_mesh=debug".to_string();
        assert_eq!(filter_directive(Some(&config)), "warn,planetary_mesh=debug");
        assert!(EnvFilter::try_new(filter_directive(Some(&config))).is_ok());
    }

    #[test]
    fn test_default_filter_display() {
        assert!(default_env_filter().to_string().contains("info"));
    }

    #[test]
    fn test_subsystem_directives_parse() {
        for directive in [
            "debug",
            "info,planetary_render=trace",
            "warn,planetary_mesh=debug,planetary_app=info",
        ] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
    }

    // The only test that touches the global subscriber.
    #[test]
    fn test_init_writes_json_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_logging(Some(dir.path()), true, None).unwrap();
        assert_eq!(path.as_deref(), Some(dir.path().join(LOG_FILE).as_path()));

        tracing::error!(target: "planetary_log", "json smoke test");
        let contents = std::fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        let line = contents
            .lines()
            .find(|l| l.contains("json smoke test"))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "ERROR");
        assert_eq!(value["fields"]["message"], "json smoke test");

        assert!(init_logging(None, false, None).is_err());
    }
}
