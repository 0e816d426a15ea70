use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::DemoError;
use crate::lighting::LightingConfig;
use crate::texture::TextureEnvMode;

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner size in physical pixels.
    pub size: (u32, u32),
    /// Initial outer position in physical pixels.
    pub position: (i32, i32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("OpenCV with OpenGL"),
            size: (400, 400),
            position: (100, 100),
        }
    }
}

/// Perspective projection parameters, applied on every viewport change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 100.0,
        }
    }
}

/// Camera dolly parameters. The camera offset is a translation along the view
/// axis, so both bounds are negative and `far_bound < near_bound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DollyConfig {
    pub start: f32,
    pub near_bound: f32,
    pub far_bound: f32,
    /// Per-frame step, including its initial sign.
    pub step: f32,
}

impl Default for DollyConfig {
    fn default() -> Self {
        Self {
            start: -5.0,
            near_bound: -5.0,
            far_bound: -10.0,
            step: -0.003125,
        }
    }
}

/// Everything the demo needs to start. Only the image path comes from the
/// command line; the rest are fixed defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub image_path: PathBuf,
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    pub dolly: DollyConfig,
    pub lighting: LightingConfig,
    pub texture_env: TextureEnvMode,
    /// Present with vsync. Off by default so redraws run as fast as the host
    /// schedules them.
    pub vsync: bool,
}

impl DemoConfig {
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            window: WindowConfig::default(),
            projection: ProjectionConfig::default(),
            dolly: DollyConfig::default(),
            lighting: LightingConfig::default(),
            texture_env: TextureEnvMode::default(),
            vsync: false,
        }
    }

    /// Builds the config from process arguments, program name first. The first
    /// positional argument is the image path; anything after it is ignored.
    pub fn from_args<I>(args: I) -> Result<Self, DemoError>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let image_path: OsString = args
            .into_iter()
            .nth(1)
            .map(Into::into)
            .ok_or(DemoError::MissingImageArgument)?;

        Ok(Self::new(image_path))
    }
}
