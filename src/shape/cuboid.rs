//! Cuboid
//!
//! Axis-aligned box between two sanitized corners.

use std::collections::BTreeSet;

use super::{Corners, Volume};
use crate::core::point::BlockPos;
use crate::core::vec3::{Direction, Vec3};

/// Axis-aligned box. After sanitizing, the first corner is the minimum and
/// the second the maximum on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cuboid;

impl Volume for Cuboid {
    fn sanitize(&self, corners: &mut Corners) {
        let (low, high) = (corners.low(), corners.high());
        corners.set(low, high);
    }

    fn center(&self, corners: &Corners) -> Vec3 {
        corners.low().midpoint(corners.high())
    }

    fn min_extent(&self, corners: &Corners) -> Vec3 {
        corners.low()
    }

    fn max_extent(&self, corners: &Corners) -> Vec3 {
        corners.high()
    }

    fn contains(&self, corners: &Corners, p: Vec3) -> bool {
        p.within(corners.low(), corners.high())
    }

    fn boundary_check_points(&self, corners: &Corners) -> Vec<Vec3> {
        let (lo, hi) = (corners.low(), corners.high());
        let mut points = Vec::with_capacity(8);
        for x in [lo.x, hi.x] {
            for y in [lo.y, hi.y] {
                for z in [lo.z, hi.z] {
                    points.push(Vec3::new(x, y, z));
                }
            }
        }
        points
    }

    fn extend(&self, corners: &mut Corners, direction: Direction, amount: i32) {
        extend_face(corners, direction, amount);
    }

    fn has_volume(&self, corners: &Corners) -> bool {
        let (lo, hi) = (corners.low(), corners.high());
        hi.x > lo.x && hi.y > lo.y && hi.z > lo.z
    }

    fn border_cells(&self, corners: &Corners) -> BTreeSet<BlockPos> {
        let lo = BlockPos::containing(corners.low());
        let hi = BlockPos::containing(corners.high());
        let mut cells = BTreeSet::new();

        // 12 edges: 4 along each axis
        for x in lo.x..=hi.x {
            for (y, z) in [(lo.y, lo.z), (lo.y, hi.z), (hi.y, lo.z), (hi.y, hi.z)] {
                cells.insert(BlockPos::new(x, y, z));
            }
        }
        for y in lo.y..=hi.y {
            for (x, z) in [(lo.x, lo.z), (lo.x, hi.z), (hi.x, lo.z), (hi.x, hi.z)] {
                cells.insert(BlockPos::new(x, y, z));
            }
        }
        for z in lo.z..=hi.z {
            for (x, y) in [(lo.x, lo.y), (lo.x, hi.y), (hi.x, lo.y), (hi.x, hi.y)] {
                cells.insert(BlockPos::new(x, y, z));
            }
        }
        cells
    }
}

/// Move the face the direction points at. Positive amounts grow outward,
/// negative amounts pull the face back in.
pub(crate) fn extend_face(corners: &mut Corners, direction: Direction, amount: i32) {
    let offset = direction.vector().scale(amount as f64);
    let (mut lo, mut hi) = (corners.low(), corners.high());
    if direction.is_positive() {
        hi = hi + offset;
    } else {
        lo = lo + offset;
    }
    corners.set(lo, hi);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::shape::tests::{at, sanitized};
    use proptest::prelude::*;

    #[test]
    fn test_cuboid_contains_inclusive() {
        let c = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        assert!(Shape::Cuboid.contains(&c, &at(0.0, 0.0, 0.0)));
        assert!(Shape::Cuboid.contains(&c, &at(10.0, 10.0, 10.0)));
        assert!(Shape::Cuboid.contains(&c, &at(5.0, 5.0, 5.0)));
        assert!(!Shape::Cuboid.contains(&c, &at(10.5, 5.0, 5.0)));
        assert!(!Shape::Cuboid.contains(&c, &at(5.0, -0.1, 5.0)));
    }

    #[test]
    fn test_cuboid_sanitize_orders_corners() {
        let c = sanitized(Shape::Cuboid, (5.0, 5.0, 5.0), (1.0, 1.0, 1.0));
        assert_eq!(c.first().vector(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(c.second().vector(), Vec3::new(5.0, 5.0, 5.0));
        assert!(Shape::Cuboid.contains(&c, &at(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_cuboid_sanitize_mixed_axes() {
        let c = sanitized(Shape::Cuboid, (5.0, 1.0, 5.0), (1.0, 5.0, 1.0));
        assert_eq!(c.first().vector(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(c.second().vector(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_cuboid_extents_and_center() {
        let c = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 4.0, 2.0));
        assert_eq!(Shape::Cuboid.center(&c).vector(), Vec3::new(5.0, 2.0, 1.0));
        assert_eq!(Shape::Cuboid.min_extent(&c).vector(), Vec3::ZERO);
        assert_eq!(Shape::Cuboid.max_extent(&c).vector(), Vec3::new(10.0, 4.0, 2.0));
    }

    #[test]
    fn test_cuboid_boundary_points_are_corners() {
        let c = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (1.0, 2.0, 3.0));
        let points = Cuboid.boundary_check_points(&c);
        assert_eq!(points.len(), 8);
        assert!(points.contains(&Vec3::new(0.0, 0.0, 0.0)));
        assert!(points.contains(&Vec3::new(1.0, 2.0, 3.0)));
        assert!(points.contains(&Vec3::new(1.0, 0.0, 3.0)));
    }

    #[test]
    fn test_cuboid_extend_single_axis() {
        let mut c = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        Shape::Cuboid.extend(&mut c, Direction::Up, 5);
        assert_eq!(c.second().vector(), Vec3::new(10.0, 15.0, 10.0));
        assert_eq!(c.first().vector(), Vec3::ZERO);

        Shape::Cuboid.extend(&mut c, Direction::North, 2);
        assert_eq!(c.first().vector(), Vec3::new(0.0, 0.0, -2.0));

        // Negative amount pulls the face back
        Shape::Cuboid.extend(&mut c, Direction::East, -4);
        assert_eq!(c.second().vector(), Vec3::new(6.0, 15.0, 10.0));
    }

    #[test]
    fn test_cuboid_has_volume() {
        let flat = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 0.0, 10.0));
        assert!(!Shape::Cuboid.has_volume(&flat));
        let solid = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 1.0, 10.0));
        assert!(Shape::Cuboid.has_volume(&solid));
    }

    #[test]
    fn test_cuboid_border_cells() {
        let c = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (2.0, 2.0, 2.0));
        let cells = Shape::Cuboid.border_cells(&c);
        // 3x3x3 cube minus the face centers and the body center
        assert_eq!(cells.len(), 20);
        assert!(cells.contains(&BlockPos::new(0, 0, 0)));
        assert!(cells.contains(&BlockPos::new(1, 2, 2)));
        assert!(!cells.contains(&BlockPos::new(1, 1, 1)));
        assert!(!cells.contains(&BlockPos::new(1, 1, 0)));

        // Enumeration is deterministic
        assert_eq!(cells, Shape::Cuboid.border_cells(&c));
    }

    proptest! {
        #[test]
        fn prop_cuboid_contains_iff_within_range(
            x in -5.0f64..15.0,
            y in -5.0f64..15.0,
            z in -5.0f64..15.0,
        ) {
            let c = sanitized(Shape::Cuboid, (10.0, 0.0, 10.0), (0.0, 10.0, 0.0));
            let inside = (0.0..=10.0).contains(&x)
                && (0.0..=10.0).contains(&y)
                && (0.0..=10.0).contains(&z);
            prop_assert_eq!(Shape::Cuboid.contains(&c, &at(x, y, z)), inside);
        }
    }
}
