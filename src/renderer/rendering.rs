use super::*;

impl<'a> Renderer<'a> {
    /// Renders one frame to the window with the camera translated by
    /// `camera_offset` along the view axis, and presents it.
    pub fn render(&mut self, camera_offset: f32) -> Result<(), wgpu::SurfaceError> {
        if !self.has_drawable_area() {
            return Ok(());
        }
        let Some(surface) = &self.surface else {
            tracing::warn!("render() called on a headless renderer; use render_to_buffer()");
            return Ok(());
        };

        let output = surface.get_current_texture()?;
        let output_texture_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        self.encode_scene(&mut encoder, &output_texture_view, camera_offset);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Writes this frame's camera into the scene uniforms and records the pass:
    /// the backdrop first with texturing and no lighting, then the gem with
    /// lighting and no texturing.
    pub(super) fn encode_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        output_texture_view: &wgpu::TextureView,
        camera_offset: f32,
    ) {
        let uniforms = SceneUniforms::new(&view_projection(camera_offset, &self.projection));
        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniforms]),
        );

        let mut render_pass =
            create_scene_pass(encoder, output_texture_view, &self.depth_texture_view);

        render_pass.set_pipeline(&self.backdrop_pipeline);
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
        render_pass.set_bind_group(1, self.texture.bind_group(), &[]);
        render_pass.set_vertex_buffer(0, self.backdrop_vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.backdrop_index_buffer.slice(..),
            wgpu::IndexFormat::Uint16,
        );
        render_pass.draw_indexed(0..BACKDROP_INDICES.len() as u32, 0, 0..1);

        render_pass.set_pipeline(&self.gem_pipeline);
        render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
        render_pass.set_bind_group(1, &self.lighting_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.gem_vertex_buffer.slice(..));
        render_pass.draw(0..self.gem_vertex_count, 0..1);
    }
}
