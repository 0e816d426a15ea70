use crate::projection::ViewProjection;
use crate::texture::TextureEnvMode;
use crate::vertex::{LitVertex, TexturedVertex};
use wgpu::{BindGroupLayout, Device, RenderPass, RenderPipeline, StoreOp, Texture, TextureView};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Per-frame camera state. Rewritten every frame before the pass is encoded.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    /// Column-major, as WGSL expects.
    pub view_proj: [f32; 16],
}

impl SceneUniforms {
    pub fn new(view_proj: &ViewProjection) -> Self {
        // euclid multiplies row vectors, so its row-major array is the
        // column-major form of the column-vector matrix the shader uses.
        Self {
            view_proj: view_proj.to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TextureEnvUniforms {
    pub mode: u32,
    _padding: [u32; 3],
}

impl TextureEnvUniforms {
    pub fn new(mode: TextureEnvMode) -> Self {
        Self {
            mode: mode.shader_code(),
            _padding: [0; 3],
        }
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Group 0 of both pipelines: the scene uniforms.
pub fn create_scene_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bind_group_layout"),
        entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    })
}

/// Group 1 of the backdrop pipeline: texture, sampler and texture environment.
pub fn create_backdrop_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("backdrop_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
        ],
    })
}

/// Group 1 of the gem pipeline: light and material.
pub fn create_lighting_bind_group_layout(device: &Device) -> BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lighting_bind_group_layout"),
        entries: &[uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
    })
}

/// Nearer fragments win. No stencil.
pub fn create_depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub enum PipelineType {
    /// Texturing on, lighting off.
    Backdrop,
    /// Lighting on, texturing off.
    Gem,
}

pub fn create_pipeline(
    device: &Device,
    color_format: wgpu::TextureFormat,
    scene_layout: &BindGroupLayout,
    material_layout: &BindGroupLayout,
    pipeline_type: PipelineType,
) -> RenderPipeline {
    let (label, source, buffers) = match pipeline_type {
        PipelineType::Backdrop => (
            "backdrop",
            include_str!("./backdrop.wgsl"),
            TexturedVertex::desc(),
        ),
        PipelineType::Gem => ("gem", include_str!("./gem.wgsl"), LitVertex::desc()),
    };

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[scene_layout, material_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&render_pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[buffers],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            // Both sides are drawn
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(create_depth_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Clears colour to transparent black and depth to the far plane.
pub fn create_scene_pass<'a>(
    encoder: &'a mut wgpu::CommandEncoder,
    output_texture_view: &TextureView,
    depth_texture_view: &TextureView,
) -> RenderPass<'a> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Scene Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: output_texture_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_texture_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0), // Clear to maximum depth
                store: StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

pub fn create_depth_texture(device: &Device, size: (u32, u32)) -> Texture {
    let size = wgpu::Extent3d {
        width: size.0,
        height: size.1,
        depth_or_array_layers: 1,
    };

    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

/// Colour target for rendering without a window. Copyable so it can be read back.
pub fn create_offscreen_color_texture(
    device: &Device,
    size: (u32, u32),
    format: wgpu::TextureFormat,
) -> Texture {
    let size = wgpu::Extent3d {
        width: size.0,
        height: size.1,
        depth_or_array_layers: 1,
    };

    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectionConfig;
    use crate::projection::{perspective, view_projection};
    use euclid::Point3D;

    #[test]
    fn uniforms_are_column_major() {
        let projection = perspective(&ProjectionConfig::default(), (400, 400));
        let transform = view_projection(-5.0, &projection);
        let uniforms = SceneUniforms::new(&transform);
        let m = uniforms.view_proj;

        // Column-vector multiply as the shader does it.
        let v = [0.5f32, -0.25, 1.0, 1.0];
        let column_major: Vec<f32> = (0..4)
            .map(|row| (0..4).map(|col| m[col * 4 + row] * v[col]).sum())
            .collect();

        let expected = transform.transform_point3d_homogeneous(Point3D::new(0.5, -0.25, 1.0));
        assert!((column_major[0] - expected.x).abs() < 1e-5);
        assert!((column_major[1] - expected.y).abs() < 1e-5);
        assert!((column_major[2] - expected.z).abs() < 1e-5);
        assert!((column_major[3] - expected.w).abs() < 1e-5);
    }

    #[test]
    fn uniform_sizes_are_sixteen_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 64);
        assert_eq!(std::mem::size_of::<TextureEnvUniforms>(), 16);
    }
}
