//! Cylinder
//!
//! Vertical cylinder. The radius is half the X span between the corners, or
//! half the Z span when the X span is zero. Height is the Y span.

use std::collections::BTreeSet;

use super::{ring_cells, Corners, Volume};
use crate::core::point::BlockPos;
use crate::core::vec3::{Direction, Vec3};

/// Vertical cylinder with an axis-aligned circular cross-section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cylinder;

impl Cylinder {
    /// Radius derived from the corner spans.
    pub fn radius(corners: &Corners) -> f64 {
        let (a, b) = (corners.first().vector(), corners.second().vector());
        let dx = (a.x - b.x).abs();
        if dx != 0.0 {
            dx / 2.0
        } else {
            (a.z - b.z).abs() / 2.0
        }
    }

    /// Vertical range `(min_y, max_y)`.
    pub fn y_range(corners: &Corners) -> (f64, f64) {
        (corners.low().y, corners.high().y)
    }

    /// Height of the cylinder.
    pub fn height(corners: &Corners) -> f64 {
        let (min_y, max_y) = Self::y_range(corners);
        max_y - min_y
    }
}

impl Volume for Cylinder {
    fn sanitize(&self, corners: &mut Corners) {
        // Only the lower corner goes first; X/Z order is left alone
        if corners.first().y > corners.second().y {
            corners.swap();
        }
    }

    fn center(&self, corners: &Corners) -> Vec3 {
        corners.first().vector().midpoint(corners.second().vector())
    }

    fn min_extent(&self, corners: &Corners) -> Vec3 {
        let c = self.center(corners);
        let r = Self::radius(corners);
        Vec3::new(c.x - r, Self::y_range(corners).0, c.z - r)
    }

    fn max_extent(&self, corners: &Corners) -> Vec3 {
        let c = self.center(corners);
        let r = Self::radius(corners);
        Vec3::new(c.x + r, Self::y_range(corners).1, c.z + r)
    }

    fn contains(&self, corners: &Corners, p: Vec3) -> bool {
        let (min_y, max_y) = Self::y_range(corners);
        if p.y < min_y || p.y > max_y {
            return false;
        }
        let r = Self::radius(corners);
        self.center(corners).horizontal_distance_squared(p) <= r * r
    }

    fn boundary_check_points(&self, corners: &Corners) -> Vec<Vec3> {
        let c = self.center(corners);
        let r = Self::radius(corners);
        let (min_y, max_y) = Self::y_range(corners);
        let mut points = Vec::with_capacity(8);
        for y in [min_y, max_y] {
            points.push(Vec3::new(c.x + r, y, c.z));
            points.push(Vec3::new(c.x - r, y, c.z));
            points.push(Vec3::new(c.x, y, c.z + r));
            points.push(Vec3::new(c.x, y, c.z - r));
        }
        points
    }

    fn extend(&self, corners: &mut Corners, direction: Direction, amount: i32) {
        let amount = amount as f64;
        if direction.is_vertical() {
            let (mut low, mut high) = (corners.first().vector(), corners.second().vector());
            if direction.is_positive() {
                high.y += amount;
            } else {
                low.y -= amount;
            }
            corners.set(low, high);
            return;
        }

        // Horizontal: grow the radius on every axis that carries it
        let (a, b) = (corners.first().vector(), corners.second().vector());
        let span_x = a.x != b.x;
        let span_z = a.z != b.z;
        let grow_x = span_x || !span_z;
        let grow_z = span_z || !span_x;
        corners.grow(Vec3::new(
            if grow_x { amount } else { 0.0 },
            0.0,
            if grow_z { amount } else { 0.0 },
        ));
    }

    fn has_volume(&self, corners: &Corners) -> bool {
        Self::radius(corners) > 1.0 && Self::height(corners) > 0.0
    }

    fn border_cells(&self, corners: &Corners) -> BTreeSet<BlockPos> {
        let c = self.center(corners);
        let r = Self::radius(corners);
        let (min_y, max_y) = Self::y_range(corners);
        let (bottom, top) = (min_y.floor() as i32, max_y.floor() as i32);
        let mut cells = BTreeSet::new();

        for (x, z) in ring_cells(c.x, c.z, r) {
            cells.insert(BlockPos::new(x, bottom, z));
            cells.insert(BlockPos::new(x, top, z));
        }

        // Four posts joining the rings
        let posts = [
            (c.x + r, c.z),
            (c.x - r, c.z),
            (c.x, c.z + r),
            (c.x, c.z - r),
        ];
        for (x, z) in posts {
            for y in bottom..=top {
                cells.insert(BlockPos::new(x.floor() as i32, y, z.floor() as i32));
            }
        }
        cells
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::shape::tests::{at, corners, sanitized};

    #[test]
    fn test_cylinder_radius_from_x_span() {
        let c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        assert_eq!(Cylinder::radius(&c), 5.0);
        assert_eq!(Cylinder::y_range(&c), (0.0, 10.0));
    }

    #[test]
    fn test_cylinder_radius_falls_back_to_z_span() {
        let c = sanitized(Shape::Cylinder, (3.0, 0.0, 0.0), (3.0, 4.0, 8.0));
        assert_eq!(Cylinder::radius(&c), 4.0);
    }

    #[test]
    fn test_cylinder_contains() {
        let c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        assert!(Shape::Cylinder.contains(&c, &at(5.0, 5.0, 0.1)));
        assert!(Shape::Cylinder.contains(&c, &at(5.0, 0.0, 5.0)));
        assert!(!Shape::Cylinder.contains(&c, &at(5.0, 15.0, 5.0)));
        // Box corner is outside the circle
        assert!(!Shape::Cylinder.contains(&c, &at(0.5, 5.0, 0.5)));
    }

    #[test]
    fn test_cylinder_sanitize_only_swaps() {
        let c = sanitized(Shape::Cylinder, (10.0, 8.0, 0.0), (0.0, 2.0, 10.0));
        assert_eq!(c.first().vector(), Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(c.second().vector(), Vec3::new(10.0, 8.0, 0.0));

        // Already lower-first: untouched, even with reversed X/Z
        let raw = corners((10.0, 0.0, 10.0), (0.0, 5.0, 0.0));
        let mut c = raw.clone();
        Shape::Cylinder.sanitize(&mut c);
        assert_eq!(c, raw);
    }

    #[test]
    fn test_cylinder_extents() {
        let c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 6.0, 10.0));
        assert_eq!(Shape::Cylinder.center(&c).vector(), Vec3::new(5.0, 3.0, 5.0));
        assert_eq!(Shape::Cylinder.min_extent(&c).vector(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(Shape::Cylinder.max_extent(&c).vector(), Vec3::new(10.0, 6.0, 10.0));
    }

    #[test]
    fn test_cylinder_extend_horizontal_grows_radius() {
        let mut c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        Shape::Cylinder.extend(&mut c, Direction::East, 2);
        assert_eq!(Cylinder::radius(&c), 7.0);
        assert_eq!(Shape::Cylinder.center(&c).vector(), Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(Cylinder::y_range(&c), (0.0, 10.0));
    }

    #[test]
    fn test_cylinder_extend_vertical_grows_one_side() {
        let mut c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        Shape::Cylinder.extend(&mut c, Direction::Up, 3);
        assert_eq!(Cylinder::y_range(&c), (0.0, 13.0));
        Shape::Cylinder.extend(&mut c, Direction::Down, 2);
        assert_eq!(Cylinder::y_range(&c), (-2.0, 13.0));
        assert_eq!(Cylinder::radius(&c), 5.0);
    }

    #[test]
    fn test_cylinder_has_volume() {
        let thin = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (2.0, 10.0, 2.0));
        assert!(!Shape::Cylinder.has_volume(&thin));
        let flat = sanitized(Shape::Cylinder, (0.0, 5.0, 0.0), (10.0, 5.0, 10.0));
        assert!(!Shape::Cylinder.has_volume(&flat));
        let ok = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (4.0, 1.0, 4.0));
        assert!(Shape::Cylinder.has_volume(&ok));
    }

    #[test]
    fn test_cylinder_boundary_points_on_rim() {
        let c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let points = Cylinder.boundary_check_points(&c);
        assert_eq!(points.len(), 8);
        for p in points {
            assert!(Cylinder.contains(&c, p), "{:?} should lie on the rim", p);
        }
    }

    #[test]
    fn test_cylinder_border_has_both_rings() {
        let c = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 4.0, 10.0));
        let cells = Shape::Cylinder.border_cells(&c);
        assert!(cells.contains(&BlockPos::new(10, 0, 5)));
        assert!(cells.contains(&BlockPos::new(10, 4, 5)));
        assert!(cells.contains(&BlockPos::new(10, 2, 5)));
        assert!(!cells.contains(&BlockPos::new(5, 2, 5)));
    }
}
