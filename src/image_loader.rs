use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbImage};

use crate::error::ImageLoadError;

/// A decoded image: tightly packed RGB8 rows, top row first. Never empty, and
/// the pixel buffer always holds exactly `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    rgb: RgbImage,
}

impl SourceImage {
    /// Wraps raw RGB8 rows. `None` when either side is zero or `pixels` is not
    /// exactly `width * height * 3` bytes long.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let rgb = RgbImage::from_raw(width, height, pixels)?;
        if rgb.as_raw().len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Self { rgb })
    }

    /// Converts any decoded image to RGB8, dropping alpha. Zero-sized images are
    /// rejected since they can't back a texture.
    pub fn from_dynamic(path: &Path, image: DynamicImage) -> Result<Self, ImageLoadError> {
        let rgb = image.into_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(ImageLoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { rgb })
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rgb.dimensions()
    }

    pub fn pixels(&self) -> &[u8] {
        self.rgb.as_raw()
    }

    /// Returns a nearest-neighbour downscaled copy, keeping the aspect ratio,
    /// when either side is longer than `max_side`. `None` if it already fits.
    pub fn fit_within(&self, max_side: u32) -> Option<SourceImage> {
        let (width, height) = self.dimensions();
        if width <= max_side && height <= max_side {
            return None;
        }

        let scale = max_side as f64 / width.max(height) as f64;
        let fitted_width = ((width as f64 * scale) as u32).clamp(1, max_side);
        let fitted_height = ((height as f64 * scale) as u32).clamp(1, max_side);

        Some(SourceImage {
            rgb: imageops::resize(&self.rgb, fitted_width, fitted_height, FilterType::Nearest),
        })
    }
}

/// Decodes the image at `path`, guessing the format from its contents.
pub fn load_rgb_image(path: &Path) -> Result<SourceImage, ImageLoadError> {
    let decode_error = |source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|err| decode_error(image::ImageError::IoError(err)))?
        .with_guessed_format()
        .map_err(|err| decode_error(image::ImageError::IoError(err)))?
        .decode()
        .map_err(decode_error)?;

    let image = SourceImage::from_dynamic(path, image)?;
    tracing::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gemstage-{}-{name}", std::process::id()))
    }

    #[test]
    fn loads_png_as_rgb_rows() {
        let path = temp_path("loads_png.png");
        let mut source = RgbImage::new(2, 1);
        source.put_pixel(0, 0, Rgb([10, 20, 30]));
        source.put_pixel(1, 0, Rgb([40, 50, 60]));
        source.save(&path).unwrap();

        let image = load_rgb_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.pixels(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn alpha_is_dropped() {
        let mut source = RgbaImage::new(1, 1);
        source.put_pixel(0, 0, Rgba([1, 2, 3, 4]));

        let image =
            SourceImage::from_dynamic(Path::new("mem"), DynamicImage::ImageRgba8(source)).unwrap();
        assert_eq!(image.pixels(), &[1, 2, 3]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = temp_path("does-not-exist.png");
        let err = load_rgb_image(&path).unwrap_err();

        assert!(matches!(err, ImageLoadError::Decode { .. }));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let path = temp_path("corrupt.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load_rgb_image(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ImageLoadError::Decode { .. }));
    }

    #[test]
    fn oversized_image_is_scaled_to_fit() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 10, Rgb([9, 8, 7])));
        let image = SourceImage::from_dynamic(Path::new("wide.png"), source).unwrap();

        assert!(image.fit_within(40).is_none());

        let fitted = image.fit_within(20).unwrap();
        assert_eq!(fitted.dimensions(), (20, 5));
        assert_eq!(fitted.pixels().len(), 20 * 5 * 3);
        assert_eq!(&fitted.pixels()[..3], &[9, 8, 7]);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let err = SourceImage::from_dynamic(Path::new("empty.png"), empty).unwrap_err();

        assert!(matches!(err, ImageLoadError::Empty { .. }));
        assert_eq!(err.to_string(), "Unable to read image: empty.png");
    }

    #[test]
    fn raw_rows_must_match_dimensions() {
        assert!(SourceImage::from_rgb8(2, 2, vec![0; 12]).is_some());
        assert!(SourceImage::from_rgb8(2, 2, vec![0; 11]).is_none());
        assert!(SourceImage::from_rgb8(2, 2, vec![0; 13]).is_none());
        assert!(SourceImage::from_rgb8(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn oversized_raw_image_always_downscales() {
        let image = SourceImage::from_rgb8(64, 8, vec![200; 64 * 8 * 3]).unwrap();

        let fitted = image.fit_within(16).unwrap();
        assert_eq!(fitted.dimensions(), (16, 2));
        assert_eq!(fitted.pixels().len(), 16 * 2 * 3);
    }
}
