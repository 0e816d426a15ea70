pub use wgpu;

mod app;
mod camera;
mod config;
mod error;
mod geometry;
mod image_loader;
mod input;
mod lighting;
mod pipeline;
mod projection;
mod renderer;
mod texture;
mod vertex;

pub use app::run;
pub use camera::CameraDolly;
pub use config::{DemoConfig, DollyConfig, ProjectionConfig, WindowConfig};
pub use error::{DemoError, ImageLoadError, RendererError};
pub use geometry::{build_backdrop, build_gem, BACKDROP_INDICES, GEM_TRIANGLE_COUNT};
pub use image_loader::{load_rgb_image, SourceImage};
pub use input::{action_for_key, KeyAction};
pub use lighting::{DirectionalLight, LightingConfig, Material};
pub use projection::{
    camera_view, clamp_viewport, perspective, view_projection, ClipSpace, EyeSpace,
    ProjectionTransform, ViewProjection, ViewTransform, WorldSpace,
};
pub use renderer::Renderer;
pub use texture::TextureEnvMode;
pub use vertex::{LitVertex, TexturedVertex};
