//! The planet scene: one camera, the planet, and an optional atmosphere shell.

use planetary_config::{CameraConfig, Config};
use planetary_input::InputSource;
use planetary_math::scalar::deg_to_rad;
use planetary_math::{Quat, Vec3};
use planetary_mesh::{IcosphereParams, Mesh, Winding, build_icosphere};
use planetary_render::{BackendError, Camera, MeshHandle, Projection, RenderBackend, Transform};
use tracing::{debug, info, warn};

use crate::fly::FreeFlyController;

/// A drawable mesh placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub transform: Transform,
    pub handle: MeshHandle,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

impl SceneObject {
    fn upload(
        backend: &mut impl RenderBackend,
        mesh: &Mesh,
        transform: Transform,
    ) -> Result<Self, BackendError> {
        let handle = backend.upload_mesh(mesh)?;
        Ok(Self {
            transform,
            handle,
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
        })
    }
}

/// Totals across every object in a [`Scene`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub objects: usize,
    pub vertices: usize,
    pub triangles: usize,
}

#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub planet: SceneObject,
    pub atmosphere: Option<SceneObject>,
    pub controller: FreeFlyController,
    spin_speed: f32,
    trace_camera: bool,
}

fn projection_for(config: &CameraConfig) -> Projection {
    if config.orthographic {
        Projection::default_orthographic()
    } else {
        Projection::Perspective {
            fov_y: deg_to_rad(config.fov_degrees),
            near: config.near,
            far: config.far,
        }
    }
}

/// The planet surface with no displacement, wound so it is visible from inside.
fn atmosphere_params(surface: &IcosphereParams) -> IcosphereParams {
    IcosphereParams {
        amplitude: 0.0,
        winding: Winding::Clockwise,
        ..*surface
    }
}

impl Scene {
    /// Generates the meshes described by `config` and uploads them.
    pub fn load(config: &Config, backend: &mut impl RenderBackend) -> Result<Self, BackendError> {
        let surface = config.planet.surface_params();
        let planet_mesh = build_icosphere(&surface);
        let planet = SceneObject::upload(backend, &planet_mesh, Transform::default())?;

        let atmosphere = if config.planet.atmosphere {
            let shell = build_icosphere(&atmosphere_params(&surface));
            let transform = Transform {
                scale: Vec3::ONE * config.planet.atmosphere_scale,
                ..Transform::default()
            };
            // Planet is already on the backend; free it if the shell fails.
            match SceneObject::upload(backend, &shell, transform) {
                Ok(object) => Some(object),
                Err(err) => {
                    if let Err(release_err) = backend.release_mesh(planet.handle) {
                        warn!("Could not release planet mesh after failed load: {release_err}");
                    }
                    return Err(err);
                }
            }
        } else {
            None
        };

        let mut camera = Camera::new(projection_for(&config.camera));
        camera.transform.position = config.camera.start_position;
        camera.update(config.window.aspect_ratio());

        let scene = Self {
            camera,
            planet,
            atmosphere,
            controller: FreeFlyController::from_config(&config.camera),
            spin_speed: config.planet.spin_speed,
            trace_camera: config.debug.trace_camera,
        };
        let stats = scene.stats();
        info!(
            "Scene loaded: {} objects, {} vertices, {} triangles",
            stats.objects, stats.vertices, stats.triangles
        );
        Ok(scene)
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.planet).chain(self.atmosphere.as_ref())
    }

    pub fn stats(&self) -> SceneStats {
        self.objects().fold(SceneStats::default(), |acc, object| SceneStats {
            objects: acc.objects + 1,
            vertices: acc.vertices + object.vertex_count,
            triangles: acc.triangles + object.triangle_count,
        })
    }

    /// Applies this frame's mouse motion to the camera. Once per frame.
    pub fn look(&mut self, input: &impl InputSource) {
        if self.controller.look(input, &mut self.camera.transform) && self.trace_camera {
            debug!("camera facing {}", self.camera.transform.forward());
        }
    }

    /// Advances camera movement and planet spin by one step of `dt` seconds.
    pub fn update(&mut self, input: &impl InputSource, dt: f32) {
        let moved = self.controller.apply(input, dt, &mut self.camera.transform);
        if moved && self.trace_camera {
            debug!(
                "camera at {} facing {}",
                self.camera.transform.position,
                self.camera.transform.forward()
            );
        }

        if self.spin_speed != 0.0 {
            let spin = Quat::from_angle_axis(self.spin_speed * dt, Vec3::up(1.0));
            self.planet.transform.rotation = (self.planet.transform.rotation * spin).normalized();
        }
    }

    /// Sets the camera matrix, then draws every object with its model matrix.
    /// [`Camera::update`] must have run this frame.
    pub fn draw(&self, backend: &mut impl RenderBackend) -> Result<(), BackendError> {
        backend.set_camera_matrix(&self.camera.view_projection());
        for object in self.objects() {
            backend.draw(object.handle, &object.transform.model_matrix())?;
        }
        Ok(())
    }

    /// Releases every mesh this scene uploaded. Every release is attempted;
    /// the first failure is returned.
    pub fn unload(self, backend: &mut impl RenderBackend) -> Result<(), BackendError> {
        let mut first_err = None;
        for object in self.objects() {
            if let Err(err) = backend.release_mesh(object.handle) {
                warn!("Failed to release mesh {:?}: {err}", object.handle);
                first_err = first_err.or(Some(err));
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetary_input::Key;
    use planetary_math::{Mat4, Vec2};
    use planetary_mesh::{MeshError, expected_triangle_count};
    use planetary_render::{BackendCall, RecordingBackend};

    struct Holding(Option<Key>);

    impl InputSource for Holding {
        fn key_held(&self, key: Key) -> bool {
            self.0 == Some(key)
        }

        fn mouse_delta(&self) -> Vec2 {
            Vec2::ZERO
        }
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.planet.subdivisions = 1;
        config
    }

    #[test]
    fn test_load_uploads_planet_and_atmosphere() {
        let mut backend = RecordingBackend::new();
        let scene = Scene::load(&small_config(), &mut backend).unwrap();
        assert_eq!(backend.live_meshes(), 2);

        let stats = scene.stats();
        assert_eq!(stats.objects, 2);
        assert_eq!(stats.triangles, 2 * expected_triangle_count(1));

        let shell = scene.atmosphere.as_ref().unwrap();
        assert_eq!(shell.transform.scale, Vec3::ONE * 1.25);
        assert!(backend.mesh(shell.handle).unwrap().clockwise);
        assert!(!backend.mesh(scene.planet.handle).unwrap().clockwise);
    }

    #[test]
    fn test_atmosphere_is_an_undisplaced_sphere() {
        let params = atmosphere_params(&IcosphereParams::default());
        let shell = build_icosphere(&params);
        for p in &shell.positions {
            assert!((p.magnitude() - 1.0).abs() < 1e-5);
        }
        assert_eq!(shell.winding, Winding::Clockwise);
    }

    #[test]
    fn test_atmosphere_can_be_disabled() {
        let mut config = small_config();
        config.planet.atmosphere = false;
        let mut backend = RecordingBackend::new();
        let scene = Scene::load(&config, &mut backend).unwrap();
        assert!(scene.atmosphere.is_none());
        assert_eq!(scene.stats().objects, 1);
        assert_eq!(backend.live_meshes(), 1);
    }

    #[test]
    fn test_camera_starts_at_configured_position() {
        let mut config = small_config();
        config.camera.start_position = Vec3::new(1.0, 2.0, -5.0);
        let scene = Scene::load(&config, &mut RecordingBackend::new()).unwrap();
        assert_eq!(scene.camera.transform.position, Vec3::new(1.0, 2.0, -5.0));
        assert_ne!(scene.camera.view_projection(), Mat4::IDENTITY);
    }

    #[test]
    fn test_orthographic_camera_config() {
        let mut config = small_config();
        config.camera.orthographic = true;
        let scene = Scene::load(&config, &mut RecordingBackend::new()).unwrap();
        assert_eq!(scene.camera.projection, Projection::default_orthographic());
    }

    #[test]
    fn test_draw_sets_camera_then_draws_each_object() {
        let mut backend = RecordingBackend::new();
        let scene = Scene::load(&small_config(), &mut backend).unwrap();
        backend.clear_calls();

        scene.draw(&mut backend).unwrap();
        let calls = backend.calls();
        let (camera, model) = (
            scene.camera.view_projection(),
            scene.planet.transform.model_matrix(),
        );
        let planet = scene.planet.handle;
        // Camera uniform, then a model uniform and a draw per object.
        assert_eq!(calls.len(), 5);
        assert!(matches!(calls[0], BackendCall::SetUniform { matrix, .. } if matrix == camera));
        assert!(matches!(calls[1], BackendCall::SetUniform { matrix, .. } if matrix == model));
        assert!(matches!(calls[2], BackendCall::Draw { handle, .. } if handle == planet));
        assert_eq!(backend.frame_draws(), 2);
    }

    #[test]
    fn test_update_moves_camera_forward() {
        let mut scene = Scene::load(&small_config(), &mut RecordingBackend::new()).unwrap();
        scene.update(&Holding(Some(Key::W)), 1.0);
        assert!(scene.camera.transform.position.approx_eq(Vec3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn test_planet_spins() {
        let mut config = small_config();
        config.planet.spin_speed = std::f32::consts::FRAC_PI_2;
        let mut scene = Scene::load(&config, &mut RecordingBackend::new()).unwrap();
        scene.update(&Holding(None), 1.0);
        let forward = scene.planet.transform.forward();
        assert!(forward.approx_eq(Vec3::right(1.0)), "{forward}");
        assert_eq!(scene.camera.transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_unload_releases_meshes() {
        let mut backend = RecordingBackend::new();
        let scene = Scene::load(&small_config(), &mut backend).unwrap();
        scene.unload(&mut backend).unwrap();
        assert_eq!(backend.live_meshes(), 0);
    }

    #[test]
    fn test_unload_releases_remaining_meshes_after_failure() {
        let mut backend = RecordingBackend::new();
        let scene = Scene::load(&small_config(), &mut backend).unwrap();
        backend.release_mesh(scene.planet.handle).unwrap();

        let err = scene.unload(&mut backend).unwrap_err();
        assert!(matches!(err, BackendError::UnknownHandle(_)));
        assert_eq!(backend.live_meshes(), 0);
    }

    /// Rejects every upload after the first, and optionally every release.
    #[derive(Default)]
    struct OneUploadBackend {
        inner: RecordingBackend,
        uploads: usize,
        fail_release: bool,
    }

    impl RenderBackend for OneUploadBackend {
        fn upload_mesh(&mut self, mesh: &Mesh) -> Result<MeshHandle, BackendError> {
            self.uploads += 1;
            if self.uploads > 1 {
                return Err(BackendError::InvalidMesh(MeshError::PartialTriangle(1)));
            }
            self.inner.upload_mesh(mesh)
        }

        fn release_mesh(&mut self, handle: MeshHandle) -> Result<(), BackendError> {
            if self.fail_release {
                return Err(BackendError::UnknownHandle(handle));
            }
            self.inner.release_mesh(handle)
        }

        fn set_camera_matrix(&mut self, matrix: &Mat4) {
            self.inner.set_camera_matrix(matrix);
        }

        fn draw(&mut self, handle: MeshHandle, model: &Mat4) -> Result<(), BackendError> {
            self.inner.draw(handle, model)
        }
    }

    #[test]
    fn test_failed_shell_upload_frees_planet() {
        let mut backend = OneUploadBackend::default();
        let err = Scene::load(&small_config(), &mut backend).unwrap_err();
        assert!(matches!(err, BackendError::InvalidMesh(_)));
        assert_eq!(backend.inner.live_meshes(), 0);
    }

    #[test]
    fn test_failed_shell_upload_reports_upload_error() {
        let mut backend = OneUploadBackend {
            fail_release: true,
            ..OneUploadBackend::default()
        };
        let err = Scene::load(&small_config(), &mut backend).unwrap_err();
        assert!(matches!(err, BackendError::InvalidMesh(_)), "{err}");
    }
}
