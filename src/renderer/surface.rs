use super::*;

impl<'a> Renderer<'a> {
    pub fn size(&self) -> (u32, u32) {
        self.physical_size
    }

    pub fn texture_dimensions(&self) -> (u32, u32) {
        self.texture.dimensions()
    }

    /// Called when the window is created and on every resize: the projection is
    /// rebuilt for the new aspect ratio and the frame targets follow the new
    /// size. A zero-sized window keeps its previous targets and renders nothing.
    pub fn resize(&mut self, new_physical_size: (u32, u32)) {
        self.physical_size = new_physical_size;
        self.projection = perspective(&self.projection_config, new_physical_size);

        if !self.has_drawable_area() {
            tracing::warn!(
                "Viewport is {}x{}, skipping surface reconfiguration",
                new_physical_size.0,
                new_physical_size.1
            );
            return;
        }
        tracing::debug!(
            "Viewport resized to {}x{}",
            new_physical_size.0,
            new_physical_size.1
        );

        self.config.width = new_physical_size.0;
        self.config.height = new_physical_size.1;
        if let Some(surface) = &self.surface {
            surface.configure(&self.device, &self.config);
        }
        self.recreate_depth_texture();
    }

    pub(super) fn has_drawable_area(&self) -> bool {
        self.physical_size.0 > 0 && self.physical_size.1 > 0
    }

    fn recreate_depth_texture(&mut self) {
        let texture = create_depth_texture(&self.device, self.physical_size);
        self.depth_texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    }
}
