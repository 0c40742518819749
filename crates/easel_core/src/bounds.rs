//! Axis-aligned bounding box implementation using glam
//!
//! This module provides a simple AABB (Axis-Aligned Bounding Box) used for
//! node geometry and for the final containment check of the hit-test
//! pipeline. Bounds are always axis-aligned: rotation is undone by the
//! hit-test math *before* a point is tested against a node's bounds, so the
//! box itself never rotates.

use glam::Vec2;

/// An axis-aligned bounding box represented by minimum and maximum points
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum point (top-left in screen coordinates)
    pub min: Vec2,
    /// The maximum point (bottom-right in screen coordinates)
    pub max: Vec2,
}

impl Bounds {
    /// Creates a new bounds from minimum and maximum points
    ///
    /// Note: This doesn't validate that min is actually less than max.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates bounds from an origin point and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Returns the origin (minimum point) of the bounds
    pub fn origin(&self) -> Vec2 {
        self.min
    }

    /// Returns the size of the bounds
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Tests if a point is contained within the bounds
    ///
    /// Points on the boundary are considered contained
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_origin_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(bounds.min, Vec2::new(10.0, 20.0));
        assert_eq!(bounds.max, Vec2::new(110.0, 70.0));
        assert_eq!(bounds.origin(), Vec2::new(10.0, 20.0));
        assert_eq!(bounds.size(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::from_origin_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));

        assert!(bounds.contains_point(Vec2::new(50.0, 40.0)));
        assert!(bounds.contains_point(Vec2::new(10.0, 20.0))); // edge case: minimum point
        assert!(bounds.contains_point(Vec2::new(110.0, 70.0))); // edge case: maximum point
        assert!(!bounds.contains_point(Vec2::new(5.0, 40.0)));
        assert!(!bounds.contains_point(Vec2::new(120.0, 40.0)));
    }
}
