//! The core `Fractal` trait implemented by every generator.
//!
//! The trait is object-safe so a presentation adapter or CLI can hold a
//! `Box<dyn Fractal>` and switch generators at runtime.

use crate::color::Rgb;
use crate::error::FractalError;
use crate::raster::Raster;
use serde_json::Value;

/// A deterministic fractal renderer.
///
/// Implementations regenerate their geometry from scratch and rasterize it on
/// every [`render`](Fractal::render) call; there is no incremental state, so
/// identical parameters always produce identical pixels.
pub trait Fractal {
    /// Generates the geometry and rasterizes it into a fresh [`Raster`].
    ///
    /// Degenerate-but-legal inputs (e.g. a zero-order curve with no segments)
    /// render the background only; invalid parameters fail with a
    /// `FractalError` before any drawing happens.
    fn render(&self) -> Result<Raster, FractalError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// The background color the raster is cleared to.
    fn background(&self) -> Rgb;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal implementation used to verify trait object safety.
    struct MockFractal {
        background: Rgb,
    }

    impl Fractal for MockFractal {
        fn render(&self) -> Result<Raster, FractalError> {
            Raster::new(4, 4, self.background)
        }

        fn params(&self) -> Value {
            json!({"background": self.background})
        }

        fn param_schema(&self) -> Value {
            json!({
                "background": {
                    "type": "color",
                    "default": "#000000",
                    "description": "Background color"
                }
            })
        }

        fn background(&self) -> Rgb {
            self.background
        }
    }

    #[test]
    fn fractal_trait_is_object_safe() {
        let fractal: Box<dyn Fractal> = Box::new(MockFractal {
            background: Rgb::new(1, 2, 3),
        });
        let raster = fractal.render().unwrap();
        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 4);
    }

    #[test]
    fn render_clears_to_background() {
        let fractal = MockFractal {
            background: Rgb::new(40, 50, 60),
        };
        let raster = fractal.render().unwrap();
        assert!(raster.data().iter().all(|&p| p == fractal.background()));
    }

    #[test]
    fn params_serialize_colors_as_hex() {
        let fractal = MockFractal {
            background: Rgb::new(255, 0, 0),
        };
        assert_eq!(fractal.params()["background"], "#ff0000");
    }

    #[test]
    fn dyn_fractal_reference_works() {
        let fractal = MockFractal {
            background: Rgb::BLACK,
        };
        let fractal_ref: &dyn Fractal = &fractal;
        assert!(fractal_ref.param_schema().get("background").is_some());
        assert_eq!(fractal_ref.background(), Rgb::BLACK);
    }
}
