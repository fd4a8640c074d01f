use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line flags. Each one, when given, replaces the value from `config.ron`.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "planetary", about = "Procedural icosphere planet viewer")]
pub struct CliArgs {
    /// Framebuffer width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Framebuffer height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Icosphere subdivision rounds.
    #[arg(long, short = 's')]
    pub subdivisions: Option<u32>,

    /// Radial noise amplitude (may be negative).
    #[arg(long, allow_hyphen_values = true)]
    pub amplitude: Option<f32>,

    /// Log filter (error, warn, info, debug, trace, or a full EnvFilter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Frames to run before exiting.
    #[arg(long, short = 'n')]
    pub frames: Option<u32>,

    /// Config directory (defaults to the platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(n) = args.subdivisions {
            self.planet.subdivisions = n;
        }
        if let Some(a) = args.amplitude {
            self.planet.amplitude = a;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(frames) = args.frames {
            self.debug.frames = frames;
        }
        self.clamp_to_limits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            subdivisions: Some(4),
            amplitude: Some(0.3),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.planet.subdivisions, 4);
        assert_eq!(config.planet.amplitude, 0.3);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.debug.frames, 120);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_subdivisions_are_clamped() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs {
            subdivisions: Some(30),
            ..CliArgs::default()
        });
        assert_eq!(config.planet.subdivisions, 9);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "planetary",
            "--subdivisions",
            "3",
            "--amplitude",
            "-0.05",
            "-n",
            "10",
            "--config",
            "/tmp/planetary",
        ])
        .unwrap();
        assert_eq!(args.subdivisions, Some(3));
        assert_eq!(args.amplitude, Some(-0.05));
        assert_eq!(args.frames, Some(10));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/planetary")));
        assert_eq!(args.width, None);
    }
}
