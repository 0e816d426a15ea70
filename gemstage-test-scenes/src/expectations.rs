//! Checks a headless frame against colours derived from what the scene was
//! built from: the backdrop image and the gem's lighting.

use gemstage::{LightingConfig, SourceImage};

/// An 8-bit RGBA colour as it appears in a frame.
pub type Rgba = [u8; 4];

/// Per-channel slack between the colour computed here and the GPU's
/// float-to-unorm conversion.
const TOLERANCE: i16 = 2;

/// What a pixel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// The backdrop, sampled at this texel of the source image.
    Texel { column: u32, row: u32 },
    /// The gem's flat top, which faces the viewer.
    GemTable,
    /// Nothing drawn: the transparent black clear colour.
    Cleared,
}

#[derive(Debug, Clone, Copy)]
pub struct PixelExpectation {
    pub x: u32,
    pub y: u32,
    pub expected: Expected,
    pub label: &'static str,
}

impl PixelExpectation {
    pub fn new(x: u32, y: u32, expected: Expected, label: &'static str) -> Self {
        Self {
            x,
            y,
            expected,
            label,
        }
    }
}

/// A frame read back by `Renderer::render_to_buffer`: tightly packed BGRA8
/// rows, top row first.
pub struct Frame<'a> {
    bgra: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    /// `None` unless `bgra` holds exactly `width * height` pixels.
    pub fn new(bgra: &'a [u8], width: u32, height: u32) -> Option<Self> {
        (bgra.len() == width as usize * height as usize * 4).then_some(Self {
            bgra,
            width,
            height,
        })
    }

    pub fn rgba_at(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let [b, g, r, a] = [
            self.bgra[offset],
            self.bgra[offset + 1],
            self.bgra[offset + 2],
            self.bgra[offset + 3],
        ];
        Some([r, g, b, a])
    }
}

/// Inputs the frame was rendered from, used to resolve [`Expected`] colours.
pub struct SceneInputs<'a> {
    pub image: &'a SourceImage,
    pub lighting: &'a LightingConfig,
}

impl SceneInputs<'_> {
    pub fn colour_of(&self, expected: Expected) -> Option<Rgba> {
        match expected {
            Expected::Texel { column, row } => {
                let (width, height) = self.image.dimensions();
                if column >= width || row >= height {
                    return None;
                }
                let offset = (row as usize * width as usize + column as usize) * 3;
                let texel = &self.image.pixels()[offset..offset + 3];
                Some([texel[0], texel[1], texel[2], u8::MAX])
            }
            Expected::GemTable => Some(facing_shade(self.lighting)),
            Expected::Cleared => Some([0, 0, 0, 0]),
        }
    }
}

/// Shade of a face whose normal points at the viewer, under the same light
/// equation the gem shader evaluates.
pub fn facing_shade(lighting: &LightingConfig) -> Rgba {
    let [x, y, z] = lighting.light.direction;
    let length = (x * x + y * y + z * z).sqrt();
    let light = [x / length, y / length, z / length];
    let n_dot_l = light[2].max(0.0);

    let half = [light[0], light[1], light[2] + 1.0];
    let half_length = (half[0] * half[0] + half[1] * half[1] + half[2] * half[2]).sqrt();
    let n_dot_h = (half[2] / half_length).max(0.0);
    let specular_weight = if n_dot_l > 0.0 {
        n_dot_h.powf(lighting.material.shininess)
    } else {
        0.0
    };

    let channel = |i: usize| {
        let ambient =
            (lighting.model_ambient[i] + lighting.light.ambient[i]) * lighting.material.ambient[i];
        let diffuse = lighting.light.diffuse[i] * lighting.material.diffuse[i] * n_dot_l;
        let specular =
            lighting.light.specular[i] * lighting.material.specular[i] * specular_weight;
        to_unorm(ambient + diffuse + specular)
    };

    [
        channel(0),
        channel(1),
        channel(2),
        to_unorm(lighting.material.diffuse[3]),
    ]
}

fn to_unorm(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Returns one message per expectation the frame doesn't meet; empty when
/// all of them hold.
pub fn check_frame(
    frame: &Frame,
    inputs: &SceneInputs,
    expectations: &[PixelExpectation],
) -> Vec<String> {
    expectations
        .iter()
        .filter_map(|expectation| {
            let Some(wanted) = inputs.colour_of(expectation.expected) else {
                return Some(format!(
                    "[{}] {:?} is not part of the scene inputs",
                    expectation.label, expectation.expected
                ));
            };
            let Some(actual) = frame.rgba_at(expectation.x, expectation.y) else {
                return Some(format!(
                    "[{}] pixel ({},{}) is outside the {}x{} frame",
                    expectation.label, expectation.x, expectation.y, frame.width, frame.height
                ));
            };

            let close = wanted
                .iter()
                .zip(actual.iter())
                .all(|(&w, &a)| (w as i16 - a as i16).abs() <= TOLERANCE);
            (!close).then(|| {
                format!(
                    "[{}] pixel ({},{}) should show {:?} as rgba{:?}, got rgba{:?}",
                    expectation.label,
                    expectation.x,
                    expectation.y,
                    expectation.expected,
                    wanted,
                    actual
                )
            })
        })
        .collect()
}
