#![deny(unsafe_code)]
//! Hilbert space-filling curve renderer.
//!
//! A quadrant-rotation recursion walks the curve as an ordered polyline of
//! `4^order` points; the stroke is rasterized in concentric passes whose
//! colors blend from an edge color at the rim to a line color at the center,
//! while both fade along the curve from their start values to their end
//! values. The whole image can be rotated by choosing the starting heading;
//! the start corner moves with the rotation quadrant so the curve always
//! lands inside the image.

use fractal_lab_core::error::FractalError;
use fractal_lab_core::geom::advance;
use fractal_lab_core::gradient::Gradient;
use fractal_lab_core::params::{param_color, param_f64, param_u32};
use fractal_lab_core::raster::Raster;
use fractal_lab_core::{Fractal, Rgb};
use glam::DVec2;
use serde_json::{json, Value};

/// Default recursion depth.
const DEFAULT_ORDER: u32 = 4;
/// Highest accepted recursion depth.
const MAX_ORDER: u32 = 7;
/// Default rotation of the whole image, degrees.
const DEFAULT_ROTATION: f64 = 0.0;
/// Default length of one curve segment, pixels.
const DEFAULT_UNIT_SIZE: f64 = 100.0;
/// Default stroke width, pixels (even).
const DEFAULT_STROKE_WIDTH: u32 = 26;
/// Default line center color.
const DEFAULT_LINE_COLOR: Rgb = Rgb::WHITE;
/// Default line edge color.
const DEFAULT_EDGE_COLOR: Rgb = Rgb::BLACK;
/// Default background color.
const DEFAULT_BACKGROUND: Rgb = Rgb::new(0, 255, 0);

/// Parameters for the Hilbert curve renderer.
///
/// Use [`Default`] for the classic green-background white-line rendition.
#[derive(Debug, Clone, Copy)]
pub struct CurveParams {
    /// Recursion depth in [0, 7]. Order 0 yields a single point and renders
    /// the background only.
    pub order: u32,
    /// Rotation of the whole curve in degrees, [0, 360].
    pub rotation: f64,
    /// Length of one segment in pixels.
    pub unit_size: f64,
    /// Stroke width in pixels; must be even and at least 2.
    pub stroke_width: u32,
    /// Line center color at the start of the curve.
    pub line_color: Rgb,
    /// Line edge color at the start of the curve.
    pub edge_color: Rgb,
    /// Line center color at the end of the curve.
    pub end_line_color: Rgb,
    /// Line edge color at the end of the curve.
    pub end_edge_color: Rgb,
    /// Image background color.
    pub background: Rgb,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            rotation: DEFAULT_ROTATION,
            unit_size: DEFAULT_UNIT_SIZE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            line_color: DEFAULT_LINE_COLOR,
            edge_color: DEFAULT_EDGE_COLOR,
            end_line_color: DEFAULT_LINE_COLOR,
            end_edge_color: DEFAULT_EDGE_COLOR,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl CurveParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            order: param_u32(params, "order", defaults.order),
            rotation: param_f64(params, "rotation", defaults.rotation),
            unit_size: param_f64(params, "unit_size", defaults.unit_size),
            stroke_width: param_u32(params, "stroke_width", defaults.stroke_width),
            line_color: param_color(params, "line_color", defaults.line_color),
            edge_color: param_color(params, "edge_color", defaults.edge_color),
            end_line_color: param_color(params, "end_line_color", defaults.end_line_color),
            end_edge_color: param_color(params, "end_edge_color", defaults.end_edge_color),
            background: param_color(params, "background", defaults.background),
        }
    }

    /// Validates all ranges, so generation never has to.
    pub fn validate(&self) -> Result<(), FractalError> {
        if self.order > MAX_ORDER {
            return Err(FractalError::invalid_parameter(
                "order",
                format!("must be at most {MAX_ORDER}"),
            ));
        }
        if !self.rotation.is_finite() || !(0.0..=360.0).contains(&self.rotation) {
            return Err(FractalError::invalid_parameter(
                "rotation",
                "must be between 0 and 360 degrees",
            ));
        }
        if !self.unit_size.is_finite() || self.unit_size <= 0.0 {
            return Err(FractalError::invalid_parameter(
                "unit_size",
                "must be positive",
            ));
        }
        if self.stroke_width < 2 || self.stroke_width % 2 != 0 {
            return Err(FractalError::invalid_parameter(
                "stroke_width",
                "must be an even number of at least 2",
            ));
        }
        Ok(())
    }

    /// Rescales unit size and stroke width so the rendered image is close to
    /// `target` pixels on a side, for export at a requested resolution.
    ///
    /// The stroke scales with the unit size and stays even and at least 2.
    pub fn fitted_to(&self, target: u32) -> Self {
        let cells = 2f64.powi(self.order as i32);
        let unit = (f64::from(target) / cells).ceil().max(1.0);
        let stroke =
            ((f64::from(self.stroke_width) * unit / (2.0 * self.unit_size)).floor() as u32) * 2;
        Self {
            unit_size: unit,
            stroke_width: stroke.max(2),
            ..*self
        }
    }
}

/// Hilbert curve renderer.
///
/// Holds validated parameters; [`Fractal::render`] regenerates the polyline
/// and rasterizes it from scratch on every call.
pub struct HilbertCurve {
    params: CurveParams,
}

impl HilbertCurve {
    /// Creates a renderer after validating `params`.
    pub fn new(params: CurveParams) -> Result<Self, FractalError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Creates a renderer from a JSON params object.
    pub fn from_json(json_params: &Value) -> Result<Self, FractalError> {
        Self::new(CurveParams::from_json(json_params))
    }

    /// Read-only access to the parameters.
    pub fn params_ref(&self) -> &CurveParams {
        &self.params
    }

    /// Image side length and curve start position for the current rotation.
    ///
    /// The bounding square of the curve has side `(2^order - 1) * unit`; the
    /// image adds one unit of margin all round and grows to hold the rotated
    /// square. The start corner is picked per rotation quadrant so the curve
    /// stays inside the image after rotation.
    fn layout(&self) -> (usize, DVec2) {
        let side = (2f64.powi(self.params.order as i32) - 1.0) * self.params.unit_size;
        let margin = self.params.unit_size;
        let angle = self.params.rotation.rem_euclid(360.0);
        let (sin, cos) = angle.rem_euclid(90.0).to_radians().sin_cos();
        let image_size = ((cos + sin) * side + 2.0 * margin).ceil() as usize;
        let (x, y) = if angle < 90.0 {
            (0.0, cos)
        } else if angle < 180.0 {
            (sin, 0.0)
        } else if angle < 270.0 {
            (cos + sin, sin)
        } else {
            (cos, cos + sin)
        };
        let start = DVec2::new(margin + x * side, margin + y * side);
        (image_size, start)
    }

    /// Rasterizes the polyline in concentric passes, widest first.
    ///
    /// Pass `i` (stepping by 2 from 0) draws at width `stroke - i` in the
    /// color `i + 1` steps of the way from the segment's edge color to its
    /// line color, so narrower passes land on top and form the radial
    /// gradient across the stroke.
    fn draw_curve(&self, raster: &mut Raster, path: &[DVec2]) {
        if path.len() < 2 {
            return;
        }
        let segments = path.len() - 1;
        let line = Gradient::new(self.params.line_color, self.params.end_line_color);
        let edge = Gradient::new(self.params.edge_color, self.params.end_edge_color);
        let stroke = self.params.stroke_width;

        for pass in (0..stroke).step_by(2) {
            let width = f64::from(stroke - pass);
            let radial_t = f64::from(pass + 1) / f64::from(stroke);
            for seg in 0..segments {
                let line_color = line.sample_indexed(seg, segments);
                let edge_color = edge.sample_indexed(seg, segments);
                let color = edge_color.lerp(line_color, radial_t);
                raster.draw_thick_line(path[seg], path[seg + 1], width, color);
            }
        }
    }
}

impl Fractal for HilbertCurve {
    fn render(&self) -> Result<Raster, FractalError> {
        let (image_size, start) = self.layout();
        let mut raster = Raster::new(image_size, image_size, self.params.background)?;
        let path = generate(
            self.params.order,
            self.params.rotation,
            start,
            self.params.unit_size,
        );
        self.draw_curve(&mut raster, &path);
        Ok(raster)
    }

    fn params(&self) -> Value {
        json!({
            "order": self.params.order,
            "rotation": self.params.rotation,
            "unit_size": self.params.unit_size,
            "stroke_width": self.params.stroke_width,
            "line_color": self.params.line_color,
            "edge_color": self.params.edge_color,
            "end_line_color": self.params.end_line_color,
            "end_edge_color": self.params.end_edge_color,
            "background": self.params.background,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "order": {
                "type": "integer",
                "default": DEFAULT_ORDER,
                "min": 0,
                "max": MAX_ORDER,
                "description": "Recursion depth; the curve has 4^order points"
            },
            "rotation": {
                "type": "number",
                "default": DEFAULT_ROTATION,
                "min": 0.0,
                "max": 360.0,
                "description": "Rotation of the whole curve in degrees"
            },
            "unit_size": {
                "type": "number",
                "default": DEFAULT_UNIT_SIZE,
                "min": 1.0,
                "description": "Length of one segment in pixels"
            },
            "stroke_width": {
                "type": "integer",
                "default": DEFAULT_STROKE_WIDTH,
                "min": 2,
                "description": "Stroke width in pixels; even"
            },
            "line_color": {
                "type": "color",
                "default": DEFAULT_LINE_COLOR,
                "description": "Line center color at the start of the curve"
            },
            "edge_color": {
                "type": "color",
                "default": DEFAULT_EDGE_COLOR,
                "description": "Line edge color at the start of the curve"
            },
            "end_line_color": {
                "type": "color",
                "default": DEFAULT_LINE_COLOR,
                "description": "Line center color at the end of the curve"
            },
            "end_edge_color": {
                "type": "color",
                "default": DEFAULT_EDGE_COLOR,
                "description": "Line edge color at the end of the curve"
            },
            "background": {
                "type": "color",
                "default": DEFAULT_BACKGROUND,
                "description": "Background color"
            }
        })
    }

    fn background(&self) -> Rgb {
        self.params.background
    }
}

/// Walker state threaded explicitly through the recursion.
struct Walker {
    heading: f64,
    position: DVec2,
    unit: f64,
}

impl Walker {
    fn turn(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    fn advance(&mut self) {
        self.position = advance(self.position, self.heading, self.unit);
    }
}

/// Generates the ordered polyline of a Hilbert curve.
///
/// `heading` is the starting direction in degrees; `unit` the segment length.
/// The result has exactly `4^order` points in draw order, and is fully
/// deterministic.
pub fn generate(order: u32, heading: f64, start: DVec2, unit: f64) -> Vec<DVec2> {
    let mut path = Vec::with_capacity(4usize.pow(order));
    let mut walker = Walker {
        heading,
        position: start,
        unit,
    };
    trace(order, 1.0, &mut walker, &mut path);
    path
}

/// One level of the quadrant-rotation recursion.
///
/// The turn/advance interleaving and the sign flips of `factor` are exactly
/// what gives the curve its locality; reordering any of the four branches
/// changes the figure.
fn trace(depth: u32, factor: f64, walker: &mut Walker, path: &mut Vec<DVec2>) {
    if depth == 0 {
        path.push(walker.position);
        return;
    }

    walker.turn(-factor * 90.0);
    trace(depth - 1, -factor, walker, path);
    walker.advance();

    walker.turn(factor * 90.0);
    trace(depth - 1, factor, walker, path);
    walker.advance();

    trace(depth - 1, factor, walker, path);
    walker.turn(factor * 90.0);
    walker.advance();

    trace(depth - 1, -factor, walker, path);
    walker.turn(-factor * 90.0);
}
