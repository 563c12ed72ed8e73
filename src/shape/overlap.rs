//! Cross-Kind Overlap
//!
//! Pairwise overlap dispatch between shape kinds.
//!
//! Box/Box is an exact separating-axis test. Every pair involving a round
//! shape uses the step-and-test approximation: if the host shape contains
//! the guest's center they overlap, otherwise step from the guest's center
//! toward the host's center by the guest's radius and test that point. The
//! step is clamped to the center distance so it never overshoots. Pairs that
//! involve a cylinder reject disjoint vertical ranges first, and
//! Cylinder/Cylinder falls back to an exact sum-of-radii test.
//!
//! Results near tangency are best-effort.

use super::{Corners, Cylinder, Shape, Sphere, Volume};
use crate::core::vec3::Vec3;

/// Overlap test between two shapes. False across worlds.
pub fn overlaps(a: Shape, a_corners: &Corners, b: Shape, b_corners: &Corners) -> bool {
    if a_corners.world() != b_corners.world() {
        return false;
    }

    match (a, b) {
        (Shape::Cuboid, Shape::Cuboid) => boxes_overlap(a_corners, b_corners),

        (Shape::Cuboid, Shape::Sphere) => round_into(Shape::Cuboid, a_corners, Shape::Sphere, b_corners),
        (Shape::Sphere, Shape::Cuboid) => round_into(Shape::Cuboid, b_corners, Shape::Sphere, a_corners),

        (Shape::Cuboid, Shape::Cylinder) => {
            vertical_ranges_overlap(a, a_corners, b, b_corners)
                && round_into(Shape::Cuboid, a_corners, Shape::Cylinder, b_corners)
        }
        (Shape::Cylinder, Shape::Cuboid) => {
            vertical_ranges_overlap(a, a_corners, b, b_corners)
                && round_into(Shape::Cuboid, b_corners, Shape::Cylinder, a_corners)
        }

        (Shape::Sphere, Shape::Sphere) => round_into(Shape::Sphere, a_corners, Shape::Sphere, b_corners),

        (Shape::Sphere, Shape::Cylinder) => {
            vertical_ranges_overlap(a, a_corners, b, b_corners)
                && round_into(Shape::Sphere, a_corners, Shape::Cylinder, b_corners)
        }
        (Shape::Cylinder, Shape::Sphere) => {
            vertical_ranges_overlap(a, a_corners, b, b_corners)
                && round_into(Shape::Cylinder, a_corners, Shape::Sphere, b_corners)
        }

        (Shape::Cylinder, Shape::Cylinder) => {
            if !vertical_ranges_overlap(a, a_corners, b, b_corners) {
                return false;
            }
            if round_into(Shape::Cylinder, a_corners, Shape::Cylinder, b_corners) {
                return true;
            }
            let reach = Cylinder::radius(a_corners) + Cylinder::radius(b_corners);
            let center_a = Cylinder.center(a_corners);
            let center_b = Cylinder.center(b_corners);
            center_a.horizontal_distance_squared(center_b) <= reach * reach
        }
    }
}

fn boxes_overlap(a: &Corners, b: &Corners) -> bool {
    let (a_lo, a_hi) = (a.low(), a.high());
    let (b_lo, b_hi) = (b.low(), b.high());
    a_lo.x <= b_hi.x
        && a_hi.x >= b_lo.x
        && a_lo.y <= b_hi.y
        && a_hi.y >= b_lo.y
        && a_lo.z <= b_hi.z
        && a_hi.z >= b_lo.z
}

fn vertical_ranges_overlap(a: Shape, a_corners: &Corners, b: Shape, b_corners: &Corners) -> bool {
    let (a_lo, a_hi) = (a.min_extent(a_corners).y, a.max_extent(a_corners).y);
    let (b_lo, b_hi) = (b.min_extent(b_corners).y, b.max_extent(b_corners).y);
    a_lo <= b_hi && b_lo <= a_hi
}

/// Radius of a round shape; boxes never act as the guest.
fn guest_radius(shape: Shape, corners: &Corners) -> f64 {
    match shape {
        Shape::Sphere => Sphere::radius(corners),
        Shape::Cylinder => Cylinder::radius(corners),
        Shape::Cuboid => 0.0,
    }
}

/// Step-and-test: does `host` contain the guest's center, or the point one
/// guest radius from that center toward the host's center?
fn round_into(host: Shape, host_corners: &Corners, guest: Shape, guest_corners: &Corners) -> bool {
    let host_volume = host.volume();
    let guest_center = guest.volume().center(guest_corners);
    if host_volume.contains(host_corners, guest_center) {
        return true;
    }

    let host_center = host_volume.center(host_corners);
    let reach = guest_radius(guest, guest_corners).min(guest_center.distance(host_center));
    let stepped: Vec3 = guest_center.step_toward(host_center, reach);
    host_volume.contains(host_corners, stepped)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::{Point, WorldId};
    use crate::shape::tests::sanitized;
    use proptest::prelude::*;

    #[test]
    fn test_boxes_overlap_and_touch() {
        let a = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let b = sanitized(Shape::Cuboid, (5.0, 5.0, 5.0), (15.0, 15.0, 15.0));
        let touching = sanitized(Shape::Cuboid, (10.0, 0.0, 0.0), (20.0, 10.0, 10.0));
        let apart = sanitized(Shape::Cuboid, (11.0, 0.0, 0.0), (20.0, 10.0, 10.0));
        assert!(overlaps(Shape::Cuboid, &a, Shape::Cuboid, &b));
        assert!(overlaps(Shape::Cuboid, &a, Shape::Cuboid, &touching));
        assert!(!overlaps(Shape::Cuboid, &a, Shape::Cuboid, &apart));
    }

    #[test]
    fn test_overlap_false_across_worlds() {
        let a = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let other_world = WorldId::new("lobby");
        let b = Corners::new(
            Point::new(other_world.clone(), 0.0, 0.0, 0.0),
            Point::new(other_world, 10.0, 10.0, 10.0),
        )
        .unwrap();
        for x in Shape::ALL {
            for y in Shape::ALL {
                assert!(!overlaps(x, &a, y, &b));
            }
        }
    }

    #[test]
    fn test_box_sphere_step_test() {
        let bx = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        // Center (13,5,5), radius 4: stepped point (9,5,5) is inside
        let near = sanitized(Shape::Sphere, (9.0, 5.0, 5.0), (17.0, 5.0, 5.0));
        // Center (16,5,5), radius 4: stepped point (12,5,5) is outside
        let far = sanitized(Shape::Sphere, (12.0, 5.0, 5.0), (20.0, 5.0, 5.0));
        assert!(overlaps(Shape::Cuboid, &bx, Shape::Sphere, &near));
        assert!(overlaps(Shape::Sphere, &near, Shape::Cuboid, &bx));
        assert!(!overlaps(Shape::Cuboid, &bx, Shape::Sphere, &far));
        assert!(!overlaps(Shape::Sphere, &far, Shape::Cuboid, &bx));
    }

    #[test]
    fn test_box_sphere_center_inside() {
        let bx = sanitized(Shape::Cuboid, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let inner = sanitized(Shape::Sphere, (4.0, 5.0, 5.0), (6.0, 5.0, 5.0));
        assert!(overlaps(Shape::Cuboid, &bx, Shape::Sphere, &inner));
    }

    #[test]
    fn test_spheres_overlap() {
        let a = sanitized(Shape::Sphere, (0.0, 0.0, 0.0), (10.0, 0.0, 0.0));
        let b = sanitized(Shape::Sphere, (9.0, 0.0, 0.0), (19.0, 0.0, 0.0));
        let c = sanitized(Shape::Sphere, (11.0, 0.0, 0.0), (21.0, 0.0, 0.0));
        assert!(overlaps(Shape::Sphere, &a, Shape::Sphere, &b));
        assert!(!overlaps(Shape::Sphere, &a, Shape::Sphere, &c));
    }

    #[test]
    fn test_large_sphere_swallowing_small_sphere() {
        let small = sanitized(Shape::Sphere, (-1.5, 0.0, 0.0), (1.5, 0.0, 0.0));
        let large = sanitized(Shape::Sphere, (-15.0, 0.0, 0.0), (25.0, 0.0, 0.0));
        assert!(overlaps(Shape::Sphere, &small, Shape::Sphere, &large));
        assert!(overlaps(Shape::Sphere, &large, Shape::Sphere, &small));
    }

    #[test]
    fn test_cylinder_vertical_rejection() {
        let low = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 5.0, 10.0));
        let high = sanitized(Shape::Cylinder, (0.0, 6.0, 0.0), (10.0, 12.0, 10.0));
        let bx_high = sanitized(Shape::Cuboid, (0.0, 6.0, 0.0), (10.0, 12.0, 10.0));
        assert!(!overlaps(Shape::Cylinder, &low, Shape::Cylinder, &high));
        assert!(!overlaps(Shape::Cylinder, &low, Shape::Cuboid, &bx_high));
        assert!(!overlaps(Shape::Cuboid, &bx_high, Shape::Cylinder, &low));
    }

    #[test]
    fn test_cylinders_sum_of_radii() {
        let a = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        // Centers 9 apart horizontally, radii 5 + 5
        let b = sanitized(Shape::Cylinder, (9.0, 2.0, 0.0), (19.0, 20.0, 10.0));
        let c = sanitized(Shape::Cylinder, (11.0, 2.0, 0.0), (21.0, 20.0, 10.0));
        assert!(overlaps(Shape::Cylinder, &a, Shape::Cylinder, &b));
        assert!(overlaps(Shape::Cylinder, &b, Shape::Cylinder, &a));
        assert!(!overlaps(Shape::Cylinder, &a, Shape::Cylinder, &c));
    }

    #[test]
    fn test_cylinder_sphere() {
        let cyl = sanitized(Shape::Cylinder, (0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let sphere = sanitized(Shape::Sphere, (9.0, 5.0, 5.0), (13.0, 5.0, 5.0));
        let far = sanitized(Shape::Sphere, (20.0, 5.0, 5.0), (24.0, 5.0, 5.0));
        assert!(overlaps(Shape::Cylinder, &cyl, Shape::Sphere, &sphere));
        assert!(overlaps(Shape::Sphere, &sphere, Shape::Cylinder, &cyl));
        assert!(!overlaps(Shape::Cylinder, &cyl, Shape::Sphere, &far));
    }

    proptest! {
        #[test]
        fn prop_box_overlap_is_symmetric(
            ax in -20i32..20, ay in -20i32..20, az in -20i32..20,
            aw in 1i32..15, ah in 1i32..15, ad in 1i32..15,
            bx in -20i32..20, by in -20i32..20, bz in -20i32..20,
            bw in 1i32..15, bh in 1i32..15, bd in 1i32..15,
        ) {
            let a = sanitized(
                Shape::Cuboid,
                (ax as f64, ay as f64, az as f64),
                ((ax + aw) as f64, (ay + ah) as f64, (az + ad) as f64),
            );
            let b = sanitized(
                Shape::Cuboid,
                ((bx + bw) as f64, by as f64, (bz + bd) as f64),
                (bx as f64, (by + bh) as f64, bz as f64),
            );
            prop_assert_eq!(
                overlaps(Shape::Cuboid, &a, Shape::Cuboid, &b),
                overlaps(Shape::Cuboid, &b, Shape::Cuboid, &a)
            );
        }
    }
}
