//! Planetary application: platform services, the free-fly camera, the planet
//! scene and the frame loop that ties them to a render backend.

pub mod engine;
pub mod error;
pub mod fly;
pub mod platform;
pub mod scene;

pub use engine::{Engine, FIXED_DT, FixedTimestep, MAX_FRAME_TIME};
pub use error::AppError;
pub use fly::FreeFlyController;
pub use platform::{HeadlessPlatform, Platform, PlatformDirs, PlatformError, ScriptedEvent};
pub use scene::{Scene, SceneObject, SceneStats};
