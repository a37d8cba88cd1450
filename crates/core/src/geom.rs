//! 2D geometry helpers shared by both generators.
//!
//! All coordinates are y-down screen coordinates in `f64` (`glam::DVec2`).
//! Headings are degrees measured the same way the raster is laid out, so a
//! heading of 0 points right and 90 points down.

use glam::DVec2;

/// Unit vector for a heading given in degrees.
pub fn heading_vector(degrees: f64) -> DVec2 {
    let rad = degrees.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

/// Advances `position` by one `step` along `heading` (degrees).
///
/// When the heading is an exact multiple of 90 the deltas are rounded to
/// integers, so axis-aligned runs land on the pixel grid without accumulating
/// trigonometric residue. Any other heading uses the full floating-point
/// deltas.
pub fn advance(position: DVec2, heading: f64, step: f64) -> DVec2 {
    let delta = heading_vector(heading) * step;
    if heading.rem_euclid(90.0) == 0.0 {
        position + DVec2::new(delta.x.round(), delta.y.round())
    } else {
        position + delta
    }
}

/// Rotates `point` about `pivot` by `angle` radians, returning the new point.
pub fn rotate_about(point: DVec2, pivot: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(point - pivot) + pivot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn heading_vector_cardinal_directions() {
        assert!(approx_eq(heading_vector(0.0), DVec2::new(1.0, 0.0)));
        assert!(approx_eq(heading_vector(90.0), DVec2::new(0.0, 1.0)));
        assert!(approx_eq(heading_vector(180.0), DVec2::new(-1.0, 0.0)));
        assert!(approx_eq(heading_vector(270.0), DVec2::new(0.0, -1.0)));
    }

    #[test]
    fn advance_axis_aligned_lands_on_grid() {
        let p = advance(DVec2::ZERO, 90.0, 100.0);
        assert_eq!(p, DVec2::new(0.0, 100.0));
        let p = advance(DVec2::new(5.0, 5.0), 180.0, 37.0);
        assert_eq!(p, DVec2::new(-32.0, 5.0));
    }

    #[test]
    fn advance_negative_heading_lands_on_grid() {
        // -90 mod 90 == 0, so this must round to the exact grid step.
        let p = advance(DVec2::ZERO, -90.0, 100.0);
        assert_eq!(p, DVec2::new(0.0, -100.0));
    }

    #[test]
    fn advance_diagonal_uses_full_trig() {
        let p = advance(DVec2::ZERO, 45.0, 2.0_f64.sqrt());
        assert!(approx_eq(p, DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn rotate_about_origin_quarter_turn() {
        let p = rotate_about(DVec2::new(1.0, 0.0), DVec2::ZERO, FRAC_PI_2);
        assert!(approx_eq(p, DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn rotate_about_pivot_keeps_pivot_fixed() {
        let pivot = DVec2::new(3.0, -2.0);
        let p = rotate_about(pivot, pivot, 1.234);
        assert!(approx_eq(p, pivot));
    }

    #[test]
    fn rotate_about_preserves_distance_to_pivot() {
        let pivot = DVec2::new(10.0, 20.0);
        let point = DVec2::new(17.0, 24.0);
        let rotated = rotate_about(point, pivot, 0.7);
        let before = (point - pivot).length();
        let after = (rotated - pivot).length();
        assert!((before - after).abs() < EPSILON);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rotate_about_is_an_isometry(
                px in -100.0f64..100.0, py in -100.0f64..100.0,
                qx in -100.0f64..100.0, qy in -100.0f64..100.0,
                cx in -100.0f64..100.0, cy in -100.0f64..100.0,
                angle in -10.0f64..10.0,
            ) {
                let pivot = DVec2::new(cx, cy);
                let p = DVec2::new(px, py);
                let q = DVec2::new(qx, qy);
                let d0 = (p - q).length();
                let d1 = (rotate_about(p, pivot, angle) - rotate_about(q, pivot, angle)).length();
                prop_assert!((d0 - d1).abs() < 1e-7, "{d0} vs {d1}");
            }

            #[test]
            fn advance_moves_by_step_length(
                heading in 0.0f64..360.0,
                step in 1.0f64..100.0,
            ) {
                let p = advance(DVec2::ZERO, heading, step);
                // Axis-aligned rounding perturbs by less than a pixel.
                prop_assert!((p.length() - step).abs() < 1.0);
            }
        }
    }
}
