//! Platform services: directory layout, and the window/event source the
//! engine drives frames from.

use std::io;
use std::path::{Path, PathBuf};

use planetary_input::{InputState, RawKeyEvent};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

const APP_NAME: &str = "planetary";

/// Where Planetary keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds `planetary.log` in debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// OS conventions: XDG on Linux, Known Folders on Windows, Library on macOS.
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_dir = base.join(APP_NAME);
        let log_dir = dirs::state_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| app_dir.join("logs"));
        Ok(Self {
            config_dir: app_dir,
            log_dir,
        })
    }

    /// Everything under `root`, for tests and `--config` overrides.
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

/// The window and event loop the engine runs against.
pub trait Platform {
    /// Framebuffer width over height.
    fn aspect_ratio(&self) -> f32;

    fn is_running(&self) -> bool;

    fn request_stop(&mut self);

    /// Pumps pending events into `input`. Called once per frame.
    fn poll_events(&mut self, input: &mut InputState);
}

/// Input the headless platform replays at a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedEvent {
    Key(RawKeyEvent),
    /// Raw pointer motion in pixels.
    MouseMotion { dx: f64, dy: f64 },
}

/// Windowless platform that runs a fixed number of frames with a fixed
/// framebuffer size, replaying scripted input.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    width: u32,
    height: u32,
    frames_left: u32,
    frame: u32,
    running: bool,
    script: Vec<(u32, ScriptedEvent)>,
}

impl HeadlessPlatform {
    pub fn new(width: u32, height: u32, frames: u32) -> Self {
        Self {
            width,
            height,
            frames_left: frames,
            frame: 0,
            running: frames > 0,
            script: Vec::new(),
        }
    }

    /// Queues `event` for delivery during poll number `frame` (zero-based).
    pub fn schedule(&mut self, frame: u32, event: ScriptedEvent) {
        self.script.push((frame, event));
    }

    pub fn frames_polled(&self) -> u32 {
        self.frame
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Platform for HeadlessPlatform {
    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn request_stop(&mut self) {
        debug!("headless platform stop requested at frame {}", self.frame);
        self.running = false;
    }

    fn poll_events(&mut self, input: &mut InputState) {
        if !self.running {
            return;
        }
        // Captured mouse: motion arrives as raw device deltas.
        input.mouse.set_captured(true);

        let frame = self.frame;
        for (_, event) in self.script.iter().filter(|(at, _)| *at == frame) {
            match *event {
                ScriptedEvent::Key(key) => input.keyboard.process_raw(key),
                ScriptedEvent::MouseMotion { dx, dy } => input.mouse.on_raw_motion(dx, dy),
            }
        }

        self.frame += 1;
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetary_input::{InputSource, Key};

    #[test]
    fn test_platform_dirs_resolve() {
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.is_absolute());
            assert!(dirs.config_dir.ends_with("planetary"));
            assert!(dirs.log_dir.is_absolute());
        }
    }

    #[test]
    fn test_dirs_with_root_are_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_root(&tmp.path().join("planetary"));
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        assert!(dirs.log_dir.starts_with(&dirs.config_dir));
    }

    #[test]
    fn test_headless_runs_requested_frames() {
        let mut platform = HeadlessPlatform::new(854, 480, 3);
        let mut input = InputState::new();
        let mut polls = 0;
        while platform.is_running() {
            platform.poll_events(&mut input);
            polls += 1;
        }
        assert_eq!(polls, 3);
        assert_eq!(platform.frames_polled(), 3);
        assert!((platform.aspect_ratio() - 854.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_frames_never_runs() {
        assert!(!HeadlessPlatform::new(1, 1, 0).is_running());
    }

    #[test]
    fn test_request_stop() {
        let mut platform = HeadlessPlatform::new(16, 9, 100);
        platform.request_stop();
        assert!(!platform.is_running());
    }

    #[test]
    fn test_scripted_events_arrive_on_their_frame() {
        let mut platform = HeadlessPlatform::new(16, 9, 5);
        platform.schedule(1, ScriptedEvent::Key(RawKeyEvent::press(Key::W.physical())));
        platform.schedule(1, ScriptedEvent::MouseMotion { dx: 3.0, dy: -1.0 });

        let mut input = InputState::new();
        platform.poll_events(&mut input);
        input.begin_frame();
        assert!(!input.key_held(Key::W));

        platform.poll_events(&mut input);
        input.begin_frame();
        assert!(input.key_held(Key::W));
        assert_eq!(input.mouse_delta(), planetary_math::Vec2::new(3.0, -1.0));
    }
}
