//! CPU-side image export of a rendered [`Raster`].
//!
//! This module is feature-gated behind `export` (default on) so display-only
//! consumers can depend on the registry without pulling in the `image` crate.
//! The byte conversion itself lives in [`crate::pixel`] (always available).

use fractal_lab_core::error::FractalError;
use fractal_lab_core::raster::Raster;
use fractal_lab_core::Fractal;
use image::imageops::FilterType;
use std::path::Path;

use crate::pixel::raster_to_rgb8;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
    Bmp,
    Gif,
}

impl ImageFormat {
    /// Parses a file extension (without the dot, case insensitive).
    pub fn from_extension(ext: &str) -> Result<Self, FractalError> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            _ => Err(FractalError::invalid_parameter(
                "format",
                format!("unsupported image format '{ext}' (expected png, jpg, bmp, or gif)"),
            )),
        }
    }

    /// Derives the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, FractalError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                FractalError::invalid_parameter("format", "output path has no file extension")
            })?;
        Self::from_extension(ext)
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

/// Converts a raster to an `image` buffer.
fn to_image(raster: &Raster) -> Result<image::RgbImage, FractalError> {
    let w = u32::try_from(raster.width()).map_err(|_| FractalError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FractalError::InvalidDimensions)?;
    image::RgbImage::from_raw(w, h, raster_to_rgb8(raster))
        .ok_or_else(|| FractalError::Io("RGB buffer size mismatch".into()))
}

/// Writes a raster to `path`, deriving the format from the file extension.
pub fn write_image(raster: &Raster, path: &Path) -> Result<(), FractalError> {
    let format = ImageFormat::from_path(path)?;
    to_image(raster)?
        .save_with_format(path, format.into())
        .map_err(|e| FractalError::Io(e.to_string()))
}

/// Renders `fractal` and writes it to `path` as a `target`-pixel square.
///
/// The rendered raster is resampled to the exact target size with a Lanczos
/// filter when it does not already match. For best quality, refit the
/// generator's parameters to the target first (`FractalKind::fitted_to`) so
/// the resample step only smooths, never upscales heavily. On failure the
/// in-memory state is untouched; no partial file cleanup is attempted.
pub fn export(fractal: &dyn Fractal, target: u32, path: &Path) -> Result<(), FractalError> {
    if target == 0 {
        return Err(FractalError::invalid_parameter(
            "size",
            "must be positive",
        ));
    }
    let format = ImageFormat::from_path(path)?;
    let raster = fractal.render()?;
    let mut img = to_image(&raster)?;
    if img.width() != target || img.height() != target {
        img = image::imageops::resize(&img, target, target, FilterType::Lanczos3);
    }
    img.save_with_format(path, format.into())
        .map_err(|e| FractalError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FractalKind;
    use fractal_lab_core::Rgb;
    use serde_json::json;

    #[test]
    fn from_extension_accepts_all_supported_formats() {
        assert_eq!(ImageFormat::from_extension("png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("JPG").unwrap(), ImageFormat::Jpg);
        assert_eq!(ImageFormat::from_extension("jpeg").unwrap(), ImageFormat::Jpg);
        assert_eq!(ImageFormat::from_extension("bmp").unwrap(), ImageFormat::Bmp);
        assert_eq!(ImageFormat::from_extension("gif").unwrap(), ImageFormat::Gif);
    }

    #[test]
    fn from_extension_rejects_unknown_format() {
        assert!(ImageFormat::from_extension("tiff").is_err());
    }

    #[test]
    fn from_path_rejects_missing_extension() {
        assert!(ImageFormat::from_path(Path::new("image")).is_err());
    }

    #[test]
    fn write_image_png_round_trip() {
        let raster = Raster::new(16, 16, Rgb::new(10, 200, 30)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");

        write_image(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(0, 0).0, [10, 200, 30]);
    }

    #[test]
    fn write_image_bmp_round_trip() {
        let raster = Raster::new(8, 8, Rgb::new(1, 2, 3)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.bmp");

        write_image(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), 8);
    }

    #[test]
    fn export_resizes_to_target_square() {
        let kind =
            FractalKind::from_name("pythagoras", &json!({"depth": 1, "image_size": 32})).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.png");

        export(&kind, 64, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 64);
    }

    #[test]
    fn export_rejects_zero_target() {
        let kind = FractalKind::from_name("pythagoras", &json!({"depth": 0})).unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(export(&kind, 0, &dir.path().join("x.png")).is_err());
    }

    #[test]
    fn export_unwritable_path_surfaces_io_error() {
        let kind = FractalKind::from_name("pythagoras", &json!({"depth": 0})).unwrap();
        let result = export(&kind, 32, Path::new("/nonexistent-dir/out.png"));
        assert!(matches!(result, Err(FractalError::Io(_))));
    }
}
