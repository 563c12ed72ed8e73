//! Sphere
//!
//! Centered on the corner midpoint, radius half the corner distance.

use std::collections::BTreeSet;

use super::cuboid::extend_face;
use super::{ring_cells, Corners, Volume};
use crate::core::point::BlockPos;
use crate::core::vec3::{Direction, Vec3};

/// Sphere spanned by two opposite points of its surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sphere;

impl Sphere {
    /// Radius: half the distance between the corners.
    pub fn radius(corners: &Corners) -> f64 {
        corners.first().vector().distance(corners.second().vector()) / 2.0
    }
}

impl Volume for Sphere {
    fn sanitize(&self, corners: &mut Corners) {
        let (low, high) = (corners.low(), corners.high());
        corners.set(low, high);
    }

    fn center(&self, corners: &Corners) -> Vec3 {
        corners.first().vector().midpoint(corners.second().vector())
    }

    fn min_extent(&self, corners: &Corners) -> Vec3 {
        self.center(corners) - Vec3::splat(Self::radius(corners))
    }

    fn max_extent(&self, corners: &Corners) -> Vec3 {
        self.center(corners) + Vec3::splat(Self::radius(corners))
    }

    fn contains(&self, corners: &Corners, p: Vec3) -> bool {
        let r = Self::radius(corners);
        self.center(corners).distance_squared(p) <= r * r
    }

    fn boundary_check_points(&self, corners: &Corners) -> Vec<Vec3> {
        let c = self.center(corners);
        let r = Self::radius(corners);
        vec![
            c + Vec3::new(r, 0.0, 0.0),
            c - Vec3::new(r, 0.0, 0.0),
            c + Vec3::new(0.0, r, 0.0),
            c - Vec3::new(0.0, r, 0.0),
            c + Vec3::new(0.0, 0.0, r),
            c - Vec3::new(0.0, 0.0, r),
        ]
    }

    fn extend(&self, corners: &mut Corners, direction: Direction, amount: i32) {
        extend_face(corners, direction, amount);
    }

    fn has_volume(&self, corners: &Corners) -> bool {
        Self::radius(corners) > 1.0
    }

    fn border_cells(&self, corners: &Corners) -> BTreeSet<BlockPos> {
        let c = self.center(corners);
        let r = Self::radius(corners);
        let mut cells = BTreeSet::new();

        // Three great circles, one per axis plane
        for (x, z) in ring_cells(c.x, c.z, r) {
            cells.insert(BlockPos::new(x, c.y.floor() as i32, z));
        }
        for (x, y) in ring_cells(c.x, c.y, r) {
            cells.insert(BlockPos::new(x, y, c.z.floor() as i32));
        }
        for (y, z) in ring_cells(c.y, c.z, r) {
            cells.insert(BlockPos::new(c.x.floor() as i32, y, z));
        }
        cells
    }
}

// =============================================================================
// TESTS
// =============================================================================
