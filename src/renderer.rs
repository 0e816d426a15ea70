use wgpu::util::DeviceExt;
use wgpu::{CompositeAlphaMode, InstanceDescriptor, SurfaceTarget};

use crate::config::{DemoConfig, ProjectionConfig};
use crate::error::RendererError;
use crate::geometry::{build_backdrop, build_gem, BACKDROP_INDICES};
use crate::image_loader::SourceImage;
use crate::lighting::LightingUniforms;
use crate::pipeline::{
    create_backdrop_bind_group_layout, create_depth_texture, create_lighting_bind_group_layout,
    create_offscreen_color_texture, create_pipeline, create_scene_bind_group_layout,
    create_scene_pass, PipelineType, SceneUniforms, TextureEnvUniforms,
};
use crate::projection::{clamp_viewport, perspective, view_projection, ProjectionTransform};
use crate::texture::SceneTexture;

mod construction;
mod readback;
mod rendering;
mod surface;

/// Owns the GPU context and everything built once at startup: the backdrop
/// texture, both vertex buffers, both pipelines and the lighting uniforms.
/// Per frame only the scene uniforms change.
pub struct Renderer<'a> {
    /// None when rendering headless
    surface: Option<wgpu::Surface<'a>>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Size of the drawable area as last reported by the host
    physical_size: (u32, u32),

    projection_config: ProjectionConfig,
    projection: ProjectionTransform,

    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    lighting_bind_group: wgpu::BindGroup,

    backdrop_pipeline: wgpu::RenderPipeline,
    gem_pipeline: wgpu::RenderPipeline,

    backdrop_vertex_buffer: wgpu::Buffer,
    backdrop_index_buffer: wgpu::Buffer,
    gem_vertex_buffer: wgpu::Buffer,
    gem_vertex_count: u32,

    texture: SceneTexture,

    depth_texture_view: wgpu::TextureView,
}
