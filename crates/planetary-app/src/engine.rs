//! Frame loop driving a [`Scene`] against a [`Platform`] and a [`RenderBackend`].
//!
//! Simulation advances in fixed steps of [`FIXED_DT`] with an accumulator, so
//! camera speed does not depend on how long a frame took. Drawing happens once
//! per frame after the steps.

use planetary_config::Config;
use planetary_input::InputState;
use planetary_render::{BackendError, RenderBackend};
use tracing::{debug, info, warn};

use crate::platform::Platform;
use crate::scene::Scene;

/// Simulation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time fed to the accumulator; slower frames run in slow motion.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulates frame time and hands it out in [`FIXED_DT`] steps.
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f64,
    total_sim_time: f64,
    steps: u64,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `frame_time` seconds and returns how many fixed steps are due.
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        let mut due = 0;
        // Small tolerance so an exact FIXED_DT frame always yields one step.
        while self.accumulator >= FIXED_DT - 1e-9 {
            self.accumulator -= FIXED_DT;
            self.total_sim_time += FIXED_DT;
            self.steps += 1;
            due += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        due
    }

    /// Fraction of a step left in the accumulator, in [0, 1).
    pub fn alpha(&self) -> f64 {
        self.accumulator / FIXED_DT
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

pub struct Engine<P: Platform, B: RenderBackend> {
    platform: P,
    backend: B,
    input: InputState,
    config: Config,
    timestep: FixedTimestep,
    frames: u64,
}

impl<P: Platform, B: RenderBackend> Engine<P, B> {
    pub fn new(platform: P, backend: B, config: Config) -> Self {
        Self {
            platform,
            backend,
            input: InputState::new(),
            config,
            timestep: FixedTimestep::new(),
            frames: 0,
        }
    }

    /// Builds the scene described by the engine's config on its backend.
    pub fn load_scene(&mut self) -> Result<Scene, BackendError> {
        Scene::load(&self.config, &mut self.backend)
    }

    /// Runs one frame of `frame_time` seconds: poll input, apply mouse look,
    /// step the simulation, refresh the camera, draw.
    pub fn step(&mut self, scene: &mut Scene, frame_time: f64) -> Result<(), BackendError> {
        self.platform.poll_events(&mut self.input);
        self.input.begin_frame();

        scene.look(&self.input);
        for _ in 0..self.timestep.advance(frame_time) {
            scene.update(&self.input, FIXED_DT as f32);
        }

        scene.camera.update(self.platform.aspect_ratio());
        scene.draw(&mut self.backend)?;

        self.input.end_frame();
        self.frames += 1;
        Ok(())
    }

    /// Steps at [`FIXED_DT`] until the platform stops. A draw failure stops
    /// the platform and is returned.
    pub fn run(&mut self, scene: &mut Scene) -> Result<u64, BackendError> {
        info!("Entering frame loop");
        while self.platform.is_running() {
            if let Err(err) = self.step(scene, FIXED_DT) {
                self.platform.request_stop();
                return Err(err);
            }
            if self.frames % 60 == 0 {
                debug!(
                    "frame {}: {} steps, {:.2}s simulated",
                    self.frames,
                    self.timestep.steps(),
                    self.timestep.total_sim_time()
                );
            }
        }
        info!("Frame loop finished after {} frames", self.frames);
        Ok(self.frames)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessPlatform, ScriptedEvent};
    use planetary_input::{Key, RawKeyEvent};
    use planetary_math::Vec3;
    use planetary_render::{BackendCall, RecordingBackend};

    fn config() -> Config {
        let mut config = Config::default();
        config.planet.subdivisions = 1;
        config
    }

    #[test]
    fn test_exact_frames_give_one_step_each() {
        let mut timestep = FixedTimestep::new();
        for _ in 0..120 {
            assert_eq!(timestep.advance(FIXED_DT), 1);
        }
        assert_eq!(timestep.steps(), 120);
        assert!((timestep.total_sim_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_slow_frame_catches_up() {
        let mut timestep = FixedTimestep::new();
        assert_eq!(timestep.advance(FIXED_DT * 3.5), 3);
        assert!((timestep.alpha() - 0.5).abs() < 1e-6);
        assert_eq!(timestep.advance(FIXED_DT * 0.5), 1);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut timestep = FixedTimestep::new();
        assert_eq!(timestep.advance(10.0), 15);
        assert_eq!(timestep.advance(-1.0), 0);
    }

    #[test]
    fn test_run_draws_every_frame() {
        let mut engine = Engine::new(
            HeadlessPlatform::new(854, 480, 4),
            RecordingBackend::new(),
            config(),
        );
        let mut scene = engine.load_scene().unwrap();
        engine.backend_mut().clear_calls();

        assert_eq!(engine.run(&mut scene).unwrap(), 4);
        let draws = engine
            .backend()
            .calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::Draw { .. }))
            .count();
        assert_eq!(draws, 8);
        assert_eq!(engine.timestep().steps(), 4);
        assert!(!engine.platform().is_running());
    }

    #[test]
    fn test_scripted_key_moves_camera() {
        let mut platform = HeadlessPlatform::new(854, 480, 60);
        platform.schedule(0, ScriptedEvent::Key(RawKeyEvent::press(Key::W.physical())));
        platform.schedule(30, ScriptedEvent::Key(RawKeyEvent::release(Key::W.physical())));

        let mut engine = Engine::new(platform, RecordingBackend::new(), config());
        let mut scene = engine.load_scene().unwrap();
        engine.run(&mut scene).unwrap();

        // 30 held frames at one unit per second.
        let position = scene.camera.transform.position;
        assert!(position.approx_eq(Vec3::new(0.0, 0.0, -2.5)), "{position}");
    }

    #[test]
    fn test_draw_error_stops_platform() {
        let mut engine = Engine::new(
            HeadlessPlatform::new(854, 480, 10),
            RecordingBackend::new(),
            config(),
        );
        let mut scene = engine.load_scene().unwrap();
        engine.step(&mut scene, FIXED_DT).unwrap();

        let planet = scene.planet.handle;
        engine.backend_mut().release_mesh(planet).unwrap();
        assert!(engine.run(&mut scene).is_err());
        assert!(!engine.platform().is_running());
        assert_eq!(engine.frames(), 1);
    }

    fn yaw_after_frame(frame_time: f64, followups: u32) -> f32 {
        let mut platform = HeadlessPlatform::new(854, 480, 10);
        platform.schedule(0, ScriptedEvent::MouseMotion { dx: 100.0, dy: 0.0 });
        let mut engine = Engine::new(platform, RecordingBackend::new(), config());
        let mut scene = engine.load_scene().unwrap();

        engine.step(&mut scene, frame_time).unwrap();
        for _ in 0..followups {
            engine.step(&mut scene, FIXED_DT).unwrap();
        }
        let forward = scene.camera.transform.forward();
        forward.x.atan2(forward.z)
    }

    #[test]
    fn test_mouse_look_applies_once_per_frame() {
        // 100 px at the default 0.002 rad/px.
        let one_step = yaw_after_frame(FIXED_DT, 0);
        assert!((one_step - 0.2).abs() < 1e-4, "{one_step}");

        let three_steps = yaw_after_frame(FIXED_DT * 3.0, 0);
        assert!((three_steps - 0.2).abs() < 1e-4, "{three_steps}");
    }

    #[test]
    fn test_mouse_look_survives_frame_without_steps() {
        let yaw = yaw_after_frame(FIXED_DT * 0.5, 1);
        assert!((yaw - 0.2).abs() < 1e-4, "{yaw}");
    }
}
