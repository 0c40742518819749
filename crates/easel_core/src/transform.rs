//! Transform helpers for mapping input points into node-local space
//!
//! The scene graph supports exactly two per-node transform components:
//! a componentwise scale (applied to a node's children) and a rotation in
//! degrees about the node's center. Undoing those two components is all the
//! hit-test pipeline needs, so this module provides just that: no skew, no
//! full matrix stack.
//!
//! Angles are degrees, clockwise-positive in screen coordinates (y-down),
//! matching how rotation is stored on nodes. Callers pass a negated angle to
//! invert a rotation.

use glam::Vec2;

/// Rotates an offset vector by the given angle in degrees.
///
/// For `rotate(d, theta)` with `theta` in degrees:
/// `x' = d.x * cos(t) - d.y * sin(t)`, `y' = d.x * sin(t) + d.y * cos(t)`.
/// Inverting a node's stored rotation is `rotate(d, -node.rotation)`.
pub fn rotate(offset: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(offset)
}

/// Undoes a componentwise scale, mapping a scaled point back to the
/// unscaled space.
///
/// A zero scale component produces non-finite coordinates; callers own the
/// non-zero-scale contract.
pub fn inverse_scale(point: Vec2, scale: Vec2) -> Vec2 {
    point / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let offset = Vec2::new(13.0, -7.0);
        assert_eq!(rotate(offset, 0.0), offset);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        // 90 degrees in y-down screen space: +x maps to +y
        let rotated = rotate(Vec2::new(1.0, 0.0), 90.0);
        assert!(approx_eq(rotated, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_rotate_round_trip() {
        // Inverting with the negated angle must reconstruct the offset
        // within floating-point tolerance, for arbitrary angles.
        for degrees in [15.0_f32, 45.0, 123.0, 360.0, 735.0, -30.0] {
            let offset = Vec2::new(42.0, -17.5);
            let there = rotate(offset, -degrees);
            let back = rotate(there, degrees);
            assert!(approx_eq(back, offset), "failed at {degrees} degrees");
        }
    }

    #[test]
    fn test_inverse_scale() {
        let point = Vec2::new(10.0, 21.0);
        assert_eq!(inverse_scale(point, Vec2::new(2.0, 3.0)), Vec2::new(5.0, 7.0));
        // Identity scale leaves the point untouched.
        assert_eq!(inverse_scale(point, Vec2::ONE), point);
    }
}
