use super::*;

/// Copies must start every row at a multiple of this many bytes.
const COPY_BYTES_PER_ROW_ALIGNMENT: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

fn compute_padded_bytes_per_row(width: u32, bytes_per_pixel: u32) -> (u32, u32) {
    let unpadded_bytes_per_row = width * bytes_per_pixel;
    let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(COPY_BYTES_PER_ROW_ALIGNMENT)
        * COPY_BYTES_PER_ROW_ALIGNMENT;
    (unpadded_bytes_per_row, padded_bytes_per_row)
}

fn copy_padded_readback_rows(
    data: &[u8],
    height: u32,
    unpadded_bytes_per_row: u32,
    padded_bytes_per_row: u32,
    output: &mut Vec<u8>,
) {
    let output_size = (unpadded_bytes_per_row * height) as usize;
    output.resize(output_size, 0);

    if padded_bytes_per_row == unpadded_bytes_per_row {
        output.copy_from_slice(&data[..output_size]);
        return;
    }

    for row in 0..height {
        let padded_offset = (row * padded_bytes_per_row) as usize;
        let unpadded_offset = (row * unpadded_bytes_per_row) as usize;
        let row_data = &data[padded_offset..padded_offset + unpadded_bytes_per_row as usize];
        output[unpadded_offset..unpadded_offset + unpadded_bytes_per_row as usize]
            .copy_from_slice(row_data);
    }
}

impl<'a> Renderer<'a> {
    /// Colour format of headless frames, and so of `render_to_buffer` output.
    pub const HEADLESS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

    fn map_readback_buffer_into(
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
        mapped_bytes: &mut Vec<u8>,
    ) {
        mapped_bytes.clear();

        let buffer_slice = buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            if sender.send(result).is_err() {
                tracing::warn!("Failed to send map_async result from callback");
            }
        });

        let _ = device.poll(wgpu::MaintainBase::Wait);

        let map_result = match receiver.recv() {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!("Failed to receive mapped buffer result: {}", error);
                return;
            }
        };

        if let Err(error) = map_result {
            tracing::warn!("Failed to map readback buffer: {:?}", error);
            return;
        }

        let mapped_range = buffer_slice.get_mapped_range();
        mapped_bytes.extend_from_slice(&mapped_range);
        drop(mapped_range);
        buffer.unmap();
    }

    /// Renders one frame offscreen and writes it into `buffer` as tightly packed
    /// rows of 4 bytes per pixel, top row first, in the renderer's colour
    /// format (BGRA8 for headless renderers). Leaves `buffer` empty if the
    /// frame could not be read back.
    pub fn render_to_buffer(&mut self, camera_offset: f32, buffer: &mut Vec<u8>) {
        buffer.clear();
        if !self.has_drawable_area() {
            return;
        }

        let (width, height) = self.physical_size;
        let output_texture =
            create_offscreen_color_texture(&self.device, (width, height), self.config.format);
        let output_texture_view =
            output_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let (unpadded_bytes_per_row, padded_bytes_per_row) = compute_padded_bytes_per_row(width, 4);
        let readback_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_buffer"),
            size: (padded_bytes_per_row as u64) * (height as u64),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("readback_encoder"),
            });
        self.encode_scene(&mut encoder, &output_texture_view, camera_offset);

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &output_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let mut readback_bytes = Vec::new();
        Self::map_readback_buffer_into(&self.device, &readback_buffer, &mut readback_bytes);
        let required_readback_len = (height as usize) * (padded_bytes_per_row as usize);
        if readback_bytes.len() < required_readback_len {
            return;
        }

        copy_padded_readback_rows(
            &readback_bytes,
            height,
            unpadded_bytes_per_row,
            padded_bytes_per_row,
            buffer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_padded_bytes_per_row, copy_padded_readback_rows};

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(compute_padded_bytes_per_row(64, 4), (256, 256));
        assert_eq!(compute_padded_bytes_per_row(65, 4), (260, 512));
        assert_eq!(compute_padded_bytes_per_row(400, 4), (1600, 1792));
    }

    #[test]
    fn padding_is_stripped_from_each_row() {
        // Two rows of 2 bytes, padded to 4.
        let data = [1, 2, 0, 0, 3, 4, 0, 0];
        let mut output = Vec::new();
        copy_padded_readback_rows(&data, 2, 2, 4, &mut output);
        assert_eq!(output, vec![1, 2, 3, 4]);
    }

    #[test]
    fn unpadded_rows_are_copied_whole() {
        let data = [1, 2, 3, 4];
        let mut output = vec![9; 10];
        copy_padded_readback_rows(&data, 2, 2, 2, &mut output);
        assert_eq!(output, vec![1, 2, 3, 4]);
    }
}
