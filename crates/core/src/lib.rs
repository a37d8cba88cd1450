#![deny(unsafe_code)]
//! Core types for the fractal-lab renderers.
//!
//! Provides the object-safe `Fractal` trait, the `Rgb` color type and
//! two-stop `Gradient`, the `Raster` pixel buffer with its thick-line and
//! polygon primitives, 2D geometry helpers, and JSON parameter extraction.

pub mod color;
pub mod error;
pub mod fractal;
pub mod geom;
pub mod gradient;
pub mod params;
pub mod raster;

pub use color::Rgb;
pub use error::FractalError;
pub use fractal::Fractal;
pub use gradient::Gradient;
pub use raster::Raster;
