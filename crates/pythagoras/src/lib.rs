#![deny(unsafe_code)]
//! Pythagoras tree renderer.
//!
//! A root square grows two child squares on its top edge; their sides follow
//! from the law of sines applied to the right triangle spanned by the two
//! branch angles, and each child is rotated about the corner it shares with
//! the parent. Squares are collected as a flat list tagged with depth, and
//! rendering bands them by depth: every square at depth `d` is filled with
//! the same color interpolated from the root color to the leaf color.

use fractal_lab_core::error::FractalError;
use fractal_lab_core::geom::rotate_about;
use fractal_lab_core::gradient::Gradient;
use fractal_lab_core::params::{param_color, param_f64, param_opt_color, param_u32, param_usize};
use fractal_lab_core::raster::Raster;
use fractal_lab_core::{Fractal, Rgb};
use glam::DVec2;
use serde_json::{json, Value};

/// Default number of branching iterations.
const DEFAULT_DEPTH: u32 = 10;
/// Highest accepted iteration count.
const MAX_DEPTH: u32 = 14;
/// Default branch angle for both sides, degrees.
const DEFAULT_BRANCH_ANGLE: f64 = 45.0;
/// Default root square scale (1 = one eighth of the image width).
const DEFAULT_SCALE: f64 = 1.0;
/// Default root color.
const DEFAULT_ROOT_COLOR: Rgb = Rgb::new(0, 255, 0);
/// Default leaf color.
const DEFAULT_LEAF_COLOR: Rgb = Rgb::BLACK;
/// Default outline color.
const DEFAULT_OUTLINE: Rgb = Rgb::WHITE;
/// Default background color.
const DEFAULT_BACKGROUND: Rgb = Rgb::BLACK;
/// Default square image side, pixels.
const DEFAULT_IMAGE_SIZE: usize = 250;
/// Root square side as a fraction of the image width at scale 1.
const ROOT_FRACTION: f64 = 1.0 / 8.0;
/// Root square baseline as a fraction of the image height.
const BASELINE_FRACTION: f64 = 8.0 / 10.0;

/// One square of the tree, immutable once constructed.
///
/// Corners run counter-clockwise (in y-down screen coordinates) from the base
/// corner: lower-left, lower-right, upper-right, upper-left for an unrotated
/// square. Child placement and rotation pivoting rely on this order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    corners: [DVec2; 4],
    depth: u32,
    rotation: f64,
}

impl Square {
    /// Creates an unrotated square from its corner points.
    pub fn new(corners: [DVec2; 4], depth: u32) -> Self {
        Self {
            corners,
            depth,
            rotation: 0.0,
        }
    }

    /// The corner points, in construction order.
    pub fn corners(&self) -> &[DVec2; 4] {
        &self.corners
    }

    /// Distance from the root square (root = 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Cumulative rotation in radians relative to the root's orientation.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Side length, derived from the first two corners.
    pub fn side(&self) -> f64 {
        (self.corners[1] - self.corners[0]).length()
    }

    /// Returns this square rotated about one of its corners.
    ///
    /// `angle` (radians) becomes the square's cumulative rotation, so callers
    /// pass the accumulated parent rotation plus the branch angle, not a
    /// delta from the current state.
    fn rotated_about_corner(&self, pivot: usize, angle: f64) -> Square {
        let pivot_point = self.corners[pivot];
        let corners = self
            .corners
            .map(|corner| rotate_about(corner, pivot_point, angle));
        Square {
            corners,
            depth: self.depth,
            rotation: angle,
        }
    }
}

/// Parameters for the Pythagoras tree renderer.
///
/// Use [`Default`] for the classic green-to-black tree on black.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    /// Branching iterations in [0, 14]; 0 draws only the root square.
    pub depth: u32,
    /// Rotation of the left child relative to its parent, degrees in [0, 90].
    pub left_angle: f64,
    /// Rotation of the right child relative to its parent, degrees in [0, 90].
    pub right_angle: f64,
    /// Root square scale; 1 makes its side one eighth of the image width.
    pub scale: f64,
    /// Fill color of the root square.
    pub root_color: Rgb,
    /// Fill color of the deepest squares.
    pub leaf_color: Rgb,
    /// Outline color, or `None` for no outlines.
    pub outline: Option<Rgb>,
    /// Image background color.
    pub background: Rgb,
    /// Horizontal offset of the tree, pixels.
    pub offset_x: f64,
    /// Vertical offset of the tree, pixels.
    pub offset_y: f64,
    /// Square image side, pixels.
    pub image_size: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            left_angle: DEFAULT_BRANCH_ANGLE,
            right_angle: DEFAULT_BRANCH_ANGLE,
            scale: DEFAULT_SCALE,
            root_color: DEFAULT_ROOT_COLOR,
            leaf_color: DEFAULT_LEAF_COLOR,
            outline: Some(DEFAULT_OUTLINE),
            background: DEFAULT_BACKGROUND,
            offset_x: 0.0,
            offset_y: 0.0,
            image_size: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl TreeParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// `outline` distinguishes an absent key (keep the default outline) from
    /// an explicit `null` (no outline).
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            depth: param_u32(params, "depth", defaults.depth),
            left_angle: param_f64(params, "left_angle", defaults.left_angle),
            right_angle: param_f64(params, "right_angle", defaults.right_angle),
            scale: param_f64(params, "scale", defaults.scale),
            root_color: param_color(params, "root_color", defaults.root_color),
            leaf_color: param_color(params, "leaf_color", defaults.leaf_color),
            outline: param_opt_color(params, "outline", defaults.outline),
            background: param_color(params, "background", defaults.background),
            offset_x: param_f64(params, "offset_x", defaults.offset_x),
            offset_y: param_f64(params, "offset_y", defaults.offset_y),
            image_size: param_usize(params, "image_size", defaults.image_size),
        }
    }

    /// Validates all ranges, so generation never divides by zero.
    pub fn validate(&self) -> Result<(), FractalError> {
        if self.depth > MAX_DEPTH {
            return Err(FractalError::invalid_parameter(
                "depth",
                format!("must be at most {MAX_DEPTH}"),
            ));
        }
        for (name, angle) in [("left_angle", self.left_angle), ("right_angle", self.right_angle)] {
            if !angle.is_finite() || !(0.0..=90.0).contains(&angle) {
                return Err(FractalError::invalid_parameter(
                    name,
                    "must be between 0 and 90 degrees",
                ));
            }
        }
        // Strict bound: the child sides divide by sin(180 - left - right).
        if self.left_angle + self.right_angle >= 180.0 {
            return Err(FractalError::DegenerateGeometry(format!(
                "branch angles sum to {}, must stay below 180",
                self.left_angle + self.right_angle
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(FractalError::invalid_parameter("scale", "must be positive"));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(FractalError::invalid_parameter(
                "offset",
                "must be finite",
            ));
        }
        if self.image_size == 0 {
            return Err(FractalError::invalid_parameter(
                "image_size",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// Rescales the offsets for export at `target` pixels on a side.
    pub fn fitted_to(&self, target: usize) -> Self {
        let ratio = target as f64 / self.image_size as f64;
        Self {
            image_size: target,
            offset_x: self.offset_x * ratio,
            offset_y: self.offset_y * ratio,
            ..*self
        }
    }
}

/// Pythagoras tree renderer.
///
/// Holds validated parameters; [`Fractal::render`] regenerates the square
/// collection and rasterizes it from scratch on every call.
pub struct PythagorasTree {
    params: TreeParams,
}

impl PythagorasTree {
    /// Creates a renderer after validating `params`.
    pub fn new(params: TreeParams) -> Result<Self, FractalError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Creates a renderer from a JSON params object.
    pub fn from_json(json_params: &Value) -> Result<Self, FractalError> {
        Self::new(TreeParams::from_json(json_params))
    }

    /// Read-only access to the parameters.
    pub fn params_ref(&self) -> &TreeParams {
        &self.params
    }

    /// The axis-aligned root square: sides `image_width/8 * scale`, centered
    /// horizontally, anchored at 8/10 of the image height, shifted by the
    /// offsets.
    pub fn root_square(&self) -> Square {
        let size = self.params.image_size as f64;
        let side = size * ROOT_FRACTION * self.params.scale;
        let x1 = size / 2.0 - side / 2.0 + self.params.offset_x;
        let x2 = x1 + side;
        let y1 = BASELINE_FRACTION * size + self.params.offset_y;
        let y2 = y1 - side;
        Square::new(
            [
                DVec2::new(x1, y1),
                DVec2::new(x2, y1),
                DVec2::new(x2, y2),
                DVec2::new(x1, y2),
            ],
            0,
        )
    }

    /// Draws the squares grouped by depth so each band gets one fill color.
    fn draw_tree(&self, raster: &mut Raster, squares: &[Square]) {
        let gradient = Gradient::new(self.params.root_color, self.params.leaf_color);
        let bands = self.params.depth as usize + 1;
        for depth in 0..self.params.depth + 1 {
            let fill = gradient.sample_indexed(depth as usize, bands);
            for square in squares.iter().filter(|s| s.depth() == depth) {
                raster.fill_polygon(square.corners(), self.params.outline, fill);
            }
        }
    }
}

impl Fractal for PythagorasTree {
    fn render(&self) -> Result<Raster, FractalError> {
        let mut raster = Raster::new(
            self.params.image_size,
            self.params.image_size,
            self.params.background,
        )?;
        let squares = generate(
            self.root_square(),
            self.params.left_angle,
            self.params.right_angle,
            self.params.depth,
        );
        self.draw_tree(&mut raster, &squares);
        Ok(raster)
    }

    fn params(&self) -> Value {
        json!({
            "depth": self.params.depth,
            "left_angle": self.params.left_angle,
            "right_angle": self.params.right_angle,
            "scale": self.params.scale,
            "root_color": self.params.root_color,
            "leaf_color": self.params.leaf_color,
            "outline": self.params.outline,
            "background": self.params.background,
            "offset_x": self.params.offset_x,
            "offset_y": self.params.offset_y,
            "image_size": self.params.image_size,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "depth": {
                "type": "integer",
                "default": DEFAULT_DEPTH,
                "min": 0,
                "max": MAX_DEPTH,
                "description": "Branching iterations; the tree has 2^(depth+1) - 1 squares"
            },
            "left_angle": {
                "type": "number",
                "default": DEFAULT_BRANCH_ANGLE,
                "min": 0.0,
                "max": 90.0,
                "description": "Left branch rotation relative to the parent, degrees"
            },
            "right_angle": {
                "type": "number",
                "default": DEFAULT_BRANCH_ANGLE,
                "min": 0.0,
                "max": 90.0,
                "description": "Right branch rotation relative to the parent, degrees"
            },
            "scale": {
                "type": "number",
                "default": DEFAULT_SCALE,
                "min": 0.1,
                "description": "Root square scale; 1 = one eighth of the image width"
            },
            "root_color": {
                "type": "color",
                "default": DEFAULT_ROOT_COLOR,
                "description": "Fill color of the root square"
            },
            "leaf_color": {
                "type": "color",
                "default": DEFAULT_LEAF_COLOR,
                "description": "Fill color of the deepest squares"
            },
            "outline": {
                "type": "color",
                "default": DEFAULT_OUTLINE,
                "nullable": true,
                "description": "Outline color, or null for no outlines"
            },
            "background": {
                "type": "color",
                "default": DEFAULT_BACKGROUND,
                "description": "Background color"
            },
            "offset_x": {
                "type": "number",
                "default": 0.0,
                "description": "Horizontal offset of the tree, pixels"
            },
            "offset_y": {
                "type": "number",
                "default": 0.0,
                "description": "Vertical offset of the tree, pixels"
            },
            "image_size": {
                "type": "integer",
                "default": DEFAULT_IMAGE_SIZE,
                "min": 1,
                "description": "Square image side, pixels"
            }
        })
    }

    fn background(&self) -> Rgb {
        self.params.background
    }
}

/// Generates the full binary tree of squares below `root`.
///
/// Returns the root followed by all descendants; each parent's two children
/// are appended (left, then right) before either child's subtree expands.
/// The result always holds `2^(max_depth + 1) - 1` squares.
pub fn generate(root: Square, left_angle: f64, right_angle: f64, max_depth: u32) -> Vec<Square> {
    let mut squares = Vec::with_capacity(2usize.pow(max_depth + 1) - 1);
    squares.push(root);
    expand(&root, left_angle, right_angle, max_depth, &mut squares);
    squares
}

/// Constructs both children of `parent` and recurses until `max_depth`.
///
/// Child sides follow from the law of sines: the two children and the right
/// triangle between them span exactly the parent's top edge. Each child is
/// built axis-aligned at its anchor corner, then rotated in place about that
/// corner by the accumulated rotation.
fn expand(
    parent: &Square,
    left_angle: f64,
    right_angle: f64,
    max_depth: u32,
    squares: &mut Vec<Square>,
) {
    if parent.depth() == max_depth {
        return;
    }
    let denominator = (180.0 - (left_angle + right_angle)).to_radians().sin();
    let left_side = parent.side() * right_angle.to_radians().sin() / denominator;
    let right_side = parent.side() * left_angle.to_radians().sin() / denominator;
    let corners = parent.corners();
    let child_depth = parent.depth() + 1;

    // Left child sits on the parent's top-left corner and pivots there.
    let anchor = corners[3];
    let left_child = Square::new(
        [
            anchor,
            anchor + DVec2::new(left_side, 0.0),
            anchor + DVec2::new(left_side, -left_side),
            anchor + DVec2::new(0.0, -left_side),
        ],
        child_depth,
    )
    .rotated_about_corner(0, parent.rotation() - left_angle.to_radians());

    // Right child sits on the parent's top-right corner and pivots there.
    let anchor = corners[2];
    let right_child = Square::new(
        [
            anchor + DVec2::new(-right_side, 0.0),
            anchor,
            anchor + DVec2::new(0.0, -right_side),
            anchor + DVec2::new(-right_side, -right_side),
        ],
        child_depth,
    )
    .rotated_about_corner(1, parent.rotation() + right_angle.to_radians());

    squares.push(left_child);
    squares.push(right_child);
    expand(&left_child, left_angle, right_angle, max_depth, squares);
    expand(&right_child, left_angle, right_angle, max_depth, squares);
}
