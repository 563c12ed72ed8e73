//! Shape Geometry
//!
//! A shape is a lens over a region's two corner points: the corners are the
//! source of truth for extent, the shape decides how to read them.
//!
//! ## Module Structure
//!
//! - `cuboid`: axis-aligned box
//! - `cylinder`: vertical cylinder, radius from the X (or Z) span
//! - `sphere`: sphere, radius is half the corner distance
//! - `overlap`: pairwise overlap dispatch across kinds
//! - `border`: border cell enumeration and scoped display tokens

pub mod cuboid;
pub mod cylinder;
pub mod sphere;
pub mod overlap;
pub mod border;

use std::collections::BTreeSet;
use std::fmt;
use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::core::point::{BlockPos, Point, WorldId};
use crate::core::vec3::{Direction, Vec3};
use crate::error::{CrossWorldError, RegionError};

pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use sphere::Sphere;
pub use border::{BorderDisplay, BorderMarker, BorderToken};

// =============================================================================
// CORNERS
// =============================================================================

/// The two defining corner points of a region. Both share one world.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corners([Point; 2]);

impl Corners {
    /// Pair two points. Fails if they are in different worlds.
    pub fn new(first: Point, second: Point) -> Result<Self, CrossWorldError> {
        if !first.same_world(&second) {
            return Err(CrossWorldError {
                from: first.world,
                to: second.world,
            });
        }
        Ok(Self([first, second]))
    }

    /// First corner (`locs[0]`).
    #[inline]
    pub fn first(&self) -> &Point {
        &self.0[0]
    }

    /// Second corner (`locs[1]`).
    #[inline]
    pub fn second(&self) -> &Point {
        &self.0[1]
    }

    /// Both corners in order.
    #[inline]
    pub fn as_array(&self) -> &[Point; 2] {
        &self.0
    }

    /// World both corners live in.
    #[inline]
    pub fn world(&self) -> &WorldId {
        &self.0[0].world
    }

    /// Component-wise minimum of the corners, regardless of order.
    pub fn low(&self) -> Vec3 {
        self.0[0].vector().min(self.0[1].vector())
    }

    /// Component-wise maximum of the corners, regardless of order.
    pub fn high(&self) -> Vec3 {
        self.0[0].vector().max(self.0[1].vector())
    }

    /// Replace both corner coordinates, keeping world and facing.
    pub(crate) fn set(&mut self, first: Vec3, second: Vec3) {
        self.0[0] = self.0[0].with_vector(first);
        self.0[1] = self.0[1].with_vector(second);
    }

    /// Swap the corners.
    pub(crate) fn swap(&mut self) {
        self.0.swap(0, 1);
    }

    /// Rigidly translate both corners.
    pub fn translate(&mut self, offset: Vec3) {
        let first = self.0[0].vector() + offset;
        let second = self.0[1].vector() + offset;
        self.set(first, second);
    }

    /// Grow every axis outward by the given amount on both sides.
    ///
    /// The lower corner component moves down and the higher one up, so the
    /// result does not depend on corner order. Negative amounts shrink.
    pub fn grow(&mut self, amount: Vec3) {
        let mut first = self.0[0].vector();
        let mut second = self.0[1].vector();
        grow_axis(&mut first.x, &mut second.x, amount.x);
        grow_axis(&mut first.y, &mut second.y, amount.y);
        grow_axis(&mut first.z, &mut second.z, amount.z);
        self.set(first, second);
    }

    /// True if some axis that had extent in `before` now runs the other way,
    /// i.e. a shrink pushed one corner past the other.
    pub(crate) fn crossed_since(&self, before: &Corners) -> bool {
        let old = before.second().vector() - before.first().vector();
        let new = self.second().vector() - self.first().vector();
        [(old.x, new.x), (old.y, new.y), (old.z, new.z)]
            .into_iter()
            .any(|(o, n)| o * n < 0.0)
    }
}

fn grow_axis(a: &mut f64, b: &mut f64, amount: f64) {
    if *a <= *b {
        *a -= amount;
        *b += amount;
    } else {
        *a += amount;
        *b -= amount;
    }
}

// =============================================================================
// VOLUME CONTRACT
// =============================================================================

/// Geometry contract every shape kind implements.
///
/// All methods read world-less coordinates; world checks live on [`Shape`].
pub trait Volume {
    /// Normalize corner order after construction or mutation.
    fn sanitize(&self, corners: &mut Corners);

    /// Geometric center.
    fn center(&self, corners: &Corners) -> Vec3;

    /// Lowest coordinate on every axis.
    fn min_extent(&self, corners: &Corners) -> Vec3;

    /// Highest coordinate on every axis.
    fn max_extent(&self, corners: &Corners) -> Vec3;

    /// Containment test (boundary inclusive).
    fn contains(&self, corners: &Corners, p: Vec3) -> bool;

    /// Extremal points that prove full containment of this shape.
    fn boundary_check_points(&self, corners: &Corners) -> Vec<Vec3>;

    /// Grow (positive amount) or shrink the extent through one face.
    fn extend(&self, corners: &mut Corners, direction: Direction, amount: i32);

    /// False for degenerate shapes.
    fn has_volume(&self, corners: &Corners) -> bool;

    /// Block cells outlining the shape, in sorted order.
    fn border_cells(&self, corners: &Corners) -> BTreeSet<BlockPos>;
}

// =============================================================================
// SHAPE KIND
// =============================================================================

/// Shape kind owned by a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned box
    Cuboid,
    /// Vertical cylinder
    Cylinder,
    /// Sphere
    Sphere,
}

impl Shape {
    /// All built-in kinds.
    pub const ALL: [Shape; 3] = [Shape::Cuboid, Shape::Cylinder, Shape::Sphere];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Shape::Cuboid => "cuboid",
            Shape::Cylinder => "cylinder",
            Shape::Sphere => "sphere",
        }
    }

    /// Parse a shape kind name, accepting the legacy aliases.
    pub fn from_name(name: &str) -> Result<Self, RegionError> {
        match name.to_ascii_lowercase().as_str() {
            "cuboid" | "cube" | "box" => Ok(Shape::Cuboid),
            "cylinder" | "cylindric" => Ok(Shape::Cylinder),
            "sphere" | "spheric" => Ok(Shape::Sphere),
            _ => {
                warn!("Unsupported shape kind '{}'", name);
                Err(RegionError::UnsupportedShapeKind(name.to_string()))
            }
        }
    }

    fn volume(self) -> &'static dyn Volume {
        match self {
            Shape::Cuboid => &Cuboid,
            Shape::Cylinder => &Cylinder,
            Shape::Sphere => &Sphere,
        }
    }

    /// Normalize corner order for this kind.
    pub fn sanitize(self, corners: &mut Corners) {
        self.volume().sanitize(corners);
    }

    /// Center point in the corners' world.
    pub fn center(self, corners: &Corners) -> Point {
        corners.first().with_vector(self.volume().center(corners))
    }

    /// Minimum extent point.
    pub fn min_extent(self, corners: &Corners) -> Point {
        corners.first().with_vector(self.volume().min_extent(corners))
    }

    /// Maximum extent point.
    pub fn max_extent(self, corners: &Corners) -> Point {
        corners.first().with_vector(self.volume().max_extent(corners))
    }

    /// Containment test. A point in another world is simply not contained.
    pub fn contains(self, corners: &Corners, p: &Point) -> bool {
        if p.world != *corners.world() {
            return false;
        }
        self.volume().contains(corners, p.vector())
    }

    /// Representative extremal points of this shape.
    pub fn boundary_check_points(self, corners: &Corners) -> Vec<Point> {
        self.volume()
            .boundary_check_points(corners)
            .into_iter()
            .map(|v| corners.first().with_vector(v))
            .collect()
    }

    /// True iff every boundary check point of `other` lies inside `self`.
    pub fn contains_fully(self, corners: &Corners, other: Shape, other_corners: &Corners) -> bool {
        if corners.world() != other_corners.world() {
            return false;
        }
        let volume = self.volume();
        other
            .volume()
            .boundary_check_points(other_corners)
            .into_iter()
            .all(|p| volume.contains(corners, p))
    }

    /// Overlap test against another shape. False across worlds.
    pub fn overlaps_with(self, corners: &Corners, other: Shape, other_corners: &Corners) -> bool {
        overlap::overlaps(self, corners, other, other_corners)
    }

    /// True if the shape is farther than `range` from `p`.
    ///
    /// Steps `range` units from `p` toward the center and checks whether the
    /// stepped point is still outside.
    pub fn too_far_away(self, corners: &Corners, range: i32, p: &Point) -> bool {
        let center = self.center(corners);
        let stepped = p.point_to(&center, range as f64);
        !self.contains(corners, &stepped)
    }

    /// Rigidly translate the corners.
    pub fn move_by(self, corners: &mut Corners, direction: Direction, amount: i32) {
        corners.translate(direction.vector().scale(amount as f64));
    }

    /// Grow or shrink along one axis.
    pub fn extend(self, corners: &mut Corners, direction: Direction, amount: i32) {
        self.volume().extend(corners, direction, amount);
    }

    /// Grow the radius (half-extent for boxes) by `amount` in every direction
    /// the shape is round or wide in.
    pub fn expand(self, corners: &mut Corners, amount: i32) {
        match self {
            Shape::Cuboid => corners.grow(Vec3::splat(amount as f64)),
            Shape::Cylinder => Cylinder.extend(corners, Direction::East, amount),
            Shape::Sphere => {
                let center = Sphere.center(corners);
                let reach = Sphere::radius(corners) + amount as f64;
                let first = center.step_toward(corners.first().vector(), reach);
                let second = center.step_toward(corners.second().vector(), reach);
                corners.set(first, second);
            }
        }
    }

    /// False for degenerate shapes.
    pub fn has_volume(self, corners: &Corners) -> bool {
        self.volume().has_volume(corners)
    }

    /// Block cells outlining the shape.
    pub fn border_cells(self, corners: &Corners) -> BTreeSet<BlockPos> {
        self.volume().border_cells(corners)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cells approximating a horizontal-plane circle, returned as `(a, b)` pairs.
///
/// Both axes are swept so the ring has no gaps on steep segments.
pub(crate) fn ring_cells(center_a: f64, center_b: f64, radius: f64) -> BTreeSet<(i32, i32)> {
    let mut cells = BTreeSet::new();
    if radius <= 0.0 {
        return cells;
    }
    let steps = radius.floor() as i32;
    let r_sq = radius * radius;
    for i in -steps..=steps {
        let offset = i as f64;
        let span = (r_sq - offset * offset).max(0.0).sqrt();
        for sign in [-1.0, 1.0] {
            cells.insert((
                (center_a + offset).floor() as i32,
                (center_b + sign * span).floor() as i32,
            ));
            cells.insert((
                (center_a + sign * span).floor() as i32,
                (center_b + offset).floor() as i32,
            ));
        }
    }
    cells
}

// =============================================================================
// TESTS
// =============================================================================
