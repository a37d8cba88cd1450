//! Pure-computation byte buffer conversion from a [`Raster`].
//!
//! This module is always available (no feature gate) so that both the image
//! export path and an RGBA display surface can share the same conversion.

use fractal_lab_core::raster::Raster;

/// Flattens a raster to packed RGB8 bytes, three per pixel.
pub fn raster_to_rgb8(raster: &Raster) -> Vec<u8> {
    raster
        .data()
        .iter()
        .flat_map(|p| [p.r, p.g, p.b])
        .collect()
}

/// Flattens a raster to packed RGBA8 bytes with full opacity, four per pixel.
pub fn raster_to_rgba8(raster: &Raster) -> Vec<u8> {
    raster
        .data()
        .iter()
        .flat_map(|p| [p.r, p.g, p.b, 255u8])
        .collect()
}
