#![deny(unsafe_code)]
//! Fractal registry: maps fractal names to renderers and provides pixel
//! buffer conversion plus image export.
//!
//! This crate sits between `fractal-lab-core` (which defines the `Fractal`
//! trait) and the individual generator crates. The CLI and any presentation
//! adapter depend on this crate to avoid duplicating dispatch logic.

pub mod pixel;

#[cfg(feature = "export")]
pub mod snapshot;

use fractal_lab_core::error::FractalError;
use fractal_lab_core::raster::Raster;
use fractal_lab_core::{Fractal, Rgb};
use fractal_lab_hilbert::HilbertCurve;
use fractal_lab_pythagoras::PythagorasTree;
use serde_json::Value;

/// All available fractal names.
const FRACTAL_NAMES: &[&str] = &["hilbert", "pythagoras"];

/// Enumeration of all available fractal renderers.
///
/// Wraps each implementation and delegates `Fractal` trait methods.
/// Use [`FractalKind::from_name`] for string-based construction (CLI, UI).
pub enum FractalKind {
    /// Hilbert space-filling curve.
    Hilbert(HilbertCurve),
    /// Pythagoras tree.
    Pythagoras(PythagorasTree),
}

impl FractalKind {
    /// Constructs a renderer by name from a JSON params object.
    ///
    /// Returns `FractalError::UnknownFractal` if the name is not recognized,
    /// or a validation error from the generator for out-of-range parameters.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, FractalError> {
        match name {
            "hilbert" => Ok(FractalKind::Hilbert(HilbertCurve::from_json(params)?)),
            "pythagoras" => Ok(FractalKind::Pythagoras(PythagorasTree::from_json(params)?)),
            _ => Err(FractalError::UnknownFractal(name.to_string())),
        }
    }

    /// Returns a slice of all recognized fractal names.
    pub fn list_fractals() -> &'static [&'static str] {
        FRACTAL_NAMES
    }

    /// Returns a copy of this renderer with its size-dependent parameters
    /// refitted so the rendered image is close to `target` pixels on a side.
    ///
    /// The curve recomputes its unit size and stroke; the tree rescales its
    /// offsets and image size.
    pub fn fitted_to(&self, target: u32) -> Result<Self, FractalError> {
        match self {
            FractalKind::Hilbert(curve) => Ok(FractalKind::Hilbert(HilbertCurve::new(
                curve.params_ref().fitted_to(target),
            )?)),
            FractalKind::Pythagoras(tree) => Ok(FractalKind::Pythagoras(PythagorasTree::new(
                tree.params_ref().fitted_to(target as usize),
            )?)),
        }
    }
}

impl Fractal for FractalKind {
    fn render(&self) -> Result<Raster, FractalError> {
        match self {
            FractalKind::Hilbert(f) => f.render(),
            FractalKind::Pythagoras(f) => f.render(),
        }
    }

    fn params(&self) -> Value {
        match self {
            FractalKind::Hilbert(f) => f.params(),
            FractalKind::Pythagoras(f) => f.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            FractalKind::Hilbert(f) => f.param_schema(),
            FractalKind::Pythagoras(f) => f.param_schema(),
        }
    }

    fn background(&self) -> Rgb {
        match self {
            FractalKind::Hilbert(f) => f.background(),
            FractalKind::Pythagoras(f) => f.background(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_name_hilbert_succeeds() {
        assert!(FractalKind::from_name("hilbert", &json!({})).is_ok());
    }

    #[test]
    fn from_name_pythagoras_succeeds() {
        assert!(FractalKind::from_name("pythagoras", &json!({})).is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = FractalKind::from_name("mandelbrot", &json!({}));
        assert!(matches!(result, Err(FractalError::UnknownFractal(_))));
    }

    #[test]
    fn from_name_propagates_validation_errors() {
        let result = FractalKind::from_name("hilbert", &json!({"order": 99}));
        assert!(matches!(
            result,
            Err(FractalError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn list_fractals_names_both_generators() {
        let names = FractalKind::list_fractals();
        assert!(names.contains(&"hilbert"));
        assert!(names.contains(&"pythagoras"));
    }

    #[test]
    fn trait_delegation_render_and_background() {
        let kind =
            FractalKind::from_name("pythagoras", &json!({"depth": 2, "image_size": 64})).unwrap();
        let raster = kind.render().unwrap();
        assert_eq!(raster.width(), 64);
        assert_eq!(kind.background(), Rgb::BLACK);
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let kind = FractalKind::from_name("hilbert", &json!({})).unwrap();
        assert!(kind.params().get("order").is_some());
        assert!(kind.param_schema().get("stroke_width").is_some());
    }

    #[test]
    fn determinism_across_instances() {
        let params = json!({"order": 3, "unit_size": 8, "stroke_width": 4});
        let a = FractalKind::from_name("hilbert", &params).unwrap();
        let b = FractalKind::from_name("hilbert", &params).unwrap();
        assert_eq!(a.render().unwrap().data(), b.render().unwrap().data());
    }

    #[test]
    fn fitted_to_keeps_parameters_valid() {
        let kind = FractalKind::from_name("hilbert", &json!({"order": 4})).unwrap();
        let fitted = kind.fitted_to(500).unwrap();
        assert!(fitted.render().is_ok());

        let kind = FractalKind::from_name("pythagoras", &json!({"depth": 2})).unwrap();
        let fitted = kind.fitted_to(500).unwrap();
        assert_eq!(fitted.render().unwrap().width(), 500);
    }

    #[test]
    fn object_safety() {
        let kind = FractalKind::from_name("hilbert", &json!({"order": 1})).unwrap();
        let boxed: Box<dyn Fractal> = Box::new(kind);
        assert!(boxed.render().is_ok());
    }
}
