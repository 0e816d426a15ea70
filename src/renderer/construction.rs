use super::*;

impl<'a> Renderer<'a> {
    /// Creates a renderer drawing into `window`. The image is uploaded and all
    /// geometry, lighting and pipeline state is built here, once.
    pub async fn new(
        window: impl Into<SurfaceTarget<'a>>,
        physical_size: (u32, u32),
        image: &SourceImage,
        demo_config: &DemoConfig,
    ) -> Result<Self, RendererError> {
        let instance = wgpu::Instance::new(&InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        tracing::info!("Using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Lighting output and image bytes are written as-is, without sRGB encoding.
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RendererError::NoSurfaceFormat)?;
        tracing::info!("Using surface format {:?}", format);

        let (width, height) = clamp_viewport(physical_size);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: if demo_config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self::build_from_device(
            Some(surface),
            device,
            queue,
            config,
            physical_size,
            image,
            demo_config,
        ))
    }

    /// Creates a renderer without a window surface, or `None` when no GPU
    /// adapter is available. Use [`Renderer::render_to_buffer`] to read frames.
    pub async fn try_new_headless(
        physical_size: (u32, u32),
        image: &SourceImage,
        demo_config: &DemoConfig,
    ) -> Option<Self> {
        let instance = wgpu::Instance::new(&InstanceDescriptor::default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .ok()?;

        let (width, height) = clamp_viewport(physical_size);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            format: Self::HEADLESS_FORMAT,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: CompositeAlphaMode::Opaque,
            view_formats: vec![],
        };

        Some(Self::build_from_device(
            None,
            device,
            queue,
            config,
            physical_size,
            image,
            demo_config,
        ))
    }

    /// Shared constructor: takes the wgpu primitives produced by `new()` or
    /// `try_new_headless()` and builds the scene resources.
    fn build_from_device(
        surface: Option<wgpu::Surface<'a>>,
        device: wgpu::Device,
        queue: wgpu::Queue,
        config: wgpu::SurfaceConfiguration,
        physical_size: (u32, u32),
        image: &SourceImage,
        demo_config: &DemoConfig,
    ) -> Self {
        let projection = perspective(&demo_config.projection, physical_size);

        let scene_layout = create_scene_bind_group_layout(&device);
        let backdrop_layout = create_backdrop_bind_group_layout(&device);
        let lighting_layout = create_lighting_bind_group_layout(&device);

        let scene_uniforms = SceneUniforms::new(&view_projection(demo_config.dolly.start, &projection));
        let scene_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[scene_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });

        let lighting_uniforms = LightingUniforms::from(&demo_config.lighting);
        let lighting_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Uniform Buffer"),
            contents: bytemuck::cast_slice(&[lighting_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let lighting_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &lighting_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lighting_buffer.as_entire_binding(),
            }],
            label: Some("lighting_bind_group"),
        });

        let texture_env_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Texture Env Uniform Buffer"),
            contents: bytemuck::cast_slice(&[TextureEnvUniforms::new(demo_config.texture_env)]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let max_side = device.limits().max_texture_dimension_2d;
        let downscaled = image.fit_within(max_side);
        if let Some(downscaled) = &downscaled {
            tracing::warn!(
                "Image is {}x{}, larger than the {} texel limit; using {}x{}",
                image.width(),
                image.height(),
                max_side,
                downscaled.width(),
                downscaled.height()
            );
        }
        let texture = SceneTexture::upload(
            &device,
            &queue,
            &backdrop_layout,
            &texture_env_buffer,
            downscaled.as_ref().unwrap_or(image),
        );

        let backdrop_pipeline = create_pipeline(
            &device,
            config.format,
            &scene_layout,
            &backdrop_layout,
            PipelineType::Backdrop,
        );
        let gem_pipeline = create_pipeline(
            &device,
            config.format,
            &scene_layout,
            &lighting_layout,
            PipelineType::Gem,
        );

        let backdrop_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Backdrop Vertex Buffer"),
            contents: bytemuck::cast_slice(&build_backdrop()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let backdrop_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Backdrop Index Buffer"),
            contents: bytemuck::cast_slice(&BACKDROP_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let gem = build_gem();
        let gem_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Gem Vertex Buffer"),
            contents: bytemuck::cast_slice(&gem),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = create_depth_texture(&device, clamp_viewport(physical_size));
        let depth_texture_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            surface,
            device,
            queue,
            config,
            physical_size,
            projection_config: demo_config.projection,
            projection,
            scene_uniform_buffer,
            scene_bind_group,
            lighting_bind_group,
            backdrop_pipeline,
            gem_pipeline,
            backdrop_vertex_buffer,
            backdrop_index_buffer,
            gem_vertex_buffer,
            gem_vertex_count: gem.len() as u32,
            texture,
            depth_texture_view,
        }
    }
}
