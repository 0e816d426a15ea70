use crate::image_loader::SourceImage;

/// How the backdrop texel combines with the fragment's base colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureEnvMode {
    /// Texel colour replaces the base colour where the texel is opaque.
    #[default]
    Decal,
    /// Texel colour and alpha replace the base colour.
    Replace,
    /// Texel colour multiplies the base colour.
    Modulate,
}

impl TextureEnvMode {
    /// Value of `TextureEnv.mode` in `backdrop.wgsl`.
    pub fn shader_code(self) -> u32 {
        match self {
            TextureEnvMode::Decal => 0,
            TextureEnvMode::Replace => 1,
            TextureEnvMode::Modulate => 2,
        }
    }
}

/// The backdrop image on the GPU, with its sampler and bind group. Created once
/// and kept until the renderer is dropped.
pub struct SceneTexture {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    dimensions: (u32, u32),
    bind_group: wgpu::BindGroup,
}

impl SceneTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Uploads `image` and binds it with the sampler described by `layout`
    /// (texture at binding 0, sampler at binding 1, env uniform at binding 2).
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        env_buffer: &wgpu::Buffer,
        image: &SourceImage,
    ) -> Self {
        let dimensions = image.dimensions();
        let texture_extent = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("backdrop_texture"),
            size: texture_extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Linear, so image bytes reach the screen unchanged
            format: Self::FORMAT,
            // TEXTURE_BINDING to use texture in the shader, COPY_DST to copy data to the texture
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let rgba = rgb_to_rgba(image.pixels());
        queue.write_texture(
            // Tells wgpu where to copy the pixel data
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            // The actual pixel data
            &rgba,
            // The layout of the texture
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            texture_extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: env_buffer.as_entire_binding(),
                },
            ],
            label: Some("backdrop_bind_group"),
        });

        tracing::info!(
            "Uploaded {}x{} backdrop texture",
            dimensions.0,
            dimensions.1
        );

        Self {
            _texture: texture,
            dimensions,
            bind_group,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Nearest-neighbour in both directions, no mipmaps, clamped at the edges.
fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("backdrop_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

/// Expands packed RGB8 to RGBA8 with opaque alpha. wgpu has no three-channel
/// texture format.
pub fn rgb_to_rgba(pixels: &[u8]) -> Vec<u8> {
    debug_assert!(
        pixels.len() % 3 == 0,
        "RGB8 data length must be multiple of 3"
    );
    let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
    for px in pixels.chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], u8::MAX]);
    }
    rgba
}
