//! Headless Planetary runner: loads the config, builds the planet scene and
//! drives it for the configured number of frames against the recording backend.

use std::process::ExitCode;

use clap::Parser;
use planetary_app::{AppError, Engine, HeadlessPlatform, PlatformDirs};
use planetary_config::{CliArgs, Config};
use planetary_render::RecordingBackend;
use tracing::{error, info};

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);

    let log_path = planetary_log::init_logging(
        Some(&dirs.log_dir),
        cfg!(debug_assertions),
        Some(&config),
    )
    .map_err(|e| AppError::Logging(e.to_string()))?;
    if let Some(path) = log_path {
        info!("Writing JSON log to {}", path.display());
    }
    info!("Config directory: {}", dirs.config_dir.display());

    let platform = HeadlessPlatform::new(
        config.window.width,
        config.window.height,
        config.debug.frames,
    );
    let mut engine = Engine::new(platform, RecordingBackend::new(), config);
    let mut scene = engine.load_scene()?;

    let frames = engine.run(&mut scene)?;
    let stats = scene.stats();
    info!(
        "Rendered {} frames of {} triangles; camera ended at {}",
        frames,
        stats.triangles,
        scene.camera.transform.position
    );

    scene.unload(engine.backend_mut())?;
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("planetary: {err}");
            ExitCode::FAILURE
        }
    }
}
