//! The reference frame used by the visual regression tests: the demo scene
//! over a 2×2 image whose quadrants are red, green, blue and white.
//!
//! Pixel coordinates below follow from a 45° vertical field of view on a
//! square canvas. At camera offset -5 the backdrop (z = 0) spans pixels
//! 7..393 and the gem's table (z = 2) spans 96..304 around the centre. At -10
//! the backdrop shrinks to 103..297.

use gemstage::SourceImage;

use crate::expectations::{Expected, PixelExpectation};

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 400;

/// Where the dolly starts.
pub const NEAR_CAMERA_OFFSET: f32 = -5.0;
/// Where the dolly turns back.
pub const FAR_CAMERA_OFFSET: f32 = -10.0;

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const WHITE: [u8; 3] = [255, 255, 255];

const TOP_LEFT: Expected = Expected::Texel { column: 0, row: 0 };
const TOP_RIGHT: Expected = Expected::Texel { column: 1, row: 0 };
const BOTTOM_LEFT: Expected = Expected::Texel { column: 0, row: 1 };
const BOTTOM_RIGHT: Expected = Expected::Texel { column: 1, row: 1 };

/// Red top-left, green top-right, blue bottom-left, white bottom-right.
pub fn quadrant_image() -> SourceImage {
    let pixels = [RED, GREEN, BLUE, WHITE].concat();
    SourceImage::from_rgb8(2, 2, pixels).expect("2x2 RGB image has 12 bytes")
}

/// The gem's table faces the viewer, so its shade doesn't depend on the
/// camera offset.
pub fn near_camera_expectations() -> Vec<PixelExpectation> {
    vec![
        PixelExpectation::new(200, 200, Expected::GemTable, "gem_table_centre"),
        PixelExpectation::new(180, 220, Expected::GemTable, "gem_table_off_centre"),
        PixelExpectation::new(20, 20, TOP_LEFT, "backdrop_top_left"),
        PixelExpectation::new(380, 20, TOP_RIGHT, "backdrop_top_right"),
        PixelExpectation::new(20, 380, BOTTOM_LEFT, "backdrop_bottom_left"),
        PixelExpectation::new(380, 380, BOTTOM_RIGHT, "backdrop_bottom_right"),
        PixelExpectation::new(1, 1, Expected::Cleared, "outside_backdrop_top_left"),
        PixelExpectation::new(398, 398, Expected::Cleared, "outside_backdrop_bottom_right"),
    ]
}

pub fn far_camera_expectations() -> Vec<PixelExpectation> {
    vec![
        PixelExpectation::new(200, 200, Expected::GemTable, "gem_table_centre"),
        PixelExpectation::new(120, 120, TOP_LEFT, "backdrop_top_left"),
        PixelExpectation::new(280, 120, TOP_RIGHT, "backdrop_top_right"),
        PixelExpectation::new(120, 280, BOTTOM_LEFT, "backdrop_bottom_left"),
        PixelExpectation::new(280, 280, BOTTOM_RIGHT, "backdrop_bottom_right"),
        PixelExpectation::new(20, 20, Expected::Cleared, "backdrop_moved_away"),
        PixelExpectation::new(380, 380, Expected::Cleared, "backdrop_moved_away_bottom_right"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expectations::SceneInputs;
    use gemstage::LightingConfig;

    #[test]
    fn quadrant_image_is_tightly_packed_rgb() {
        let image = quadrant_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.pixels().len(), 12);
        assert_eq!(&image.pixels()[3..6], &GREEN);
    }

    #[test]
    fn every_expectation_resolves_inside_the_canvas() {
        let image = quadrant_image();
        let lighting = LightingConfig::default();
        let inputs = SceneInputs {
            image: &image,
            lighting: &lighting,
        };

        for expectation in near_camera_expectations()
            .iter()
            .chain(far_camera_expectations().iter())
        {
            assert!(expectation.x < CANVAS_WIDTH, "{}", expectation.label);
            assert!(expectation.y < CANVAS_HEIGHT, "{}", expectation.label);
            assert!(
                inputs.colour_of(expectation.expected).is_some(),
                "{}",
                expectation.label
            );
        }
        assert_eq!(inputs.colour_of(BOTTOM_LEFT), Some([0, 0, 255, 255]));
    }
}
