//! World-Bound Points
//!
//! A `Point` is a position inside a named world. Equality and hashing are
//! bit-exact on the floating components, and distance operations refuse to
//! compare points from different worlds.

use std::fmt;
use std::hash::{Hash, Hasher};
use serde::{Serialize, Deserialize};

use super::vec3::Vec3;
use crate::error::CrossWorldError;

// =============================================================================
// WORLD ID
// =============================================================================

/// Identifier of a world (dimension) on the host server.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldId(pub String);

impl WorldId {
    /// Create from a world name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// World name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// BLOCK POSITION
// =============================================================================

/// Integer block cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// Block X
    pub x: i32,
    /// Block Y
    pub y: i32,
    /// Block Z
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Block containing the given vector.
    pub fn containing(v: Vec3) -> Self {
        Self {
            x: v.x.floor() as i32,
            y: v.y.floor() as i32,
            z: v.z.floor() as i32,
        }
    }

    /// Corner of the block as a vector.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

// =============================================================================
// POINT
// =============================================================================

/// A position in a world, with an optional facing used by spawn-style points.
#[derive(Clone, Serialize, Deserialize)]
pub struct Point {
    /// World the point lives in
    pub world: WorldId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Facing yaw in degrees
    #[serde(default)]
    pub yaw: f32,
    /// Facing pitch in degrees
    #[serde(default)]
    pub pitch: f32,
}

impl Point {
    /// Create a point without facing.
    pub fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self { world, x, y, z, yaw: 0.0, pitch: 0.0 }
    }

    /// Set the facing.
    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Coordinates as a vector.
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Same world and facing, new coordinates.
    pub fn with_vector(&self, v: Vec3) -> Self {
        Self {
            world: self.world.clone(),
            x: v.x,
            y: v.y,
            z: v.z,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// New point offset by the given deltas, same world.
    pub fn add(&self, dx: f64, dy: f64, dz: f64) -> Self {
        self.with_vector(self.vector() + Vec3::new(dx, dy, dz))
    }

    /// True if both points share a world.
    #[inline]
    pub fn same_world(&self, other: &Point) -> bool {
        self.world == other.world
    }

    fn check_world(&self, other: &Point) -> Result<(), CrossWorldError> {
        if self.same_world(other) {
            Ok(())
        } else {
            Err(CrossWorldError {
                from: self.world.clone(),
                to: other.world.clone(),
            })
        }
    }

    /// Squared distance to another point in the same world.
    pub fn distance_squared(&self, other: &Point) -> Result<f64, CrossWorldError> {
        self.check_world(other)?;
        Ok(self.vector().distance_squared(other.vector()))
    }

    /// Distance to another point in the same world.
    pub fn distance(&self, other: &Point) -> Result<f64, CrossWorldError> {
        self.distance_squared(other).map(f64::sqrt)
    }

    /// Block X (floor, so negative coordinates round toward -inf).
    #[inline]
    pub fn floor_x(&self) -> i32 {
        self.x.floor() as i32
    }

    /// Block Y.
    #[inline]
    pub fn floor_y(&self) -> i32 {
        self.y.floor() as i32
    }

    /// Block Z.
    #[inline]
    pub fn floor_z(&self) -> i32 {
        self.z.floor() as i32
    }

    /// Block cell containing this point.
    pub fn block(&self) -> BlockPos {
        BlockPos::new(self.floor_x(), self.floor_y(), self.floor_z())
    }

    /// This point rounded down to block granularity, facing dropped.
    pub fn block_point(&self) -> Point {
        Point::new(
            self.world.clone(),
            self.floor_x() as f64,
            self.floor_y() as f64,
            self.floor_z() as f64,
        )
    }

    /// Midpoint between two points, in this point's world.
    pub fn midpoint(&self, other: &Point) -> Point {
        self.with_vector(self.vector().midpoint(other.vector()))
    }

    /// Point reached by stepping `distance` units from `self` toward `target`.
    ///
    /// When both points coincide the direction is the zero vector and `self`
    /// is returned unchanged.
    pub fn point_to(&self, target: &Point, distance: f64) -> Point {
        self.with_vector(self.vector().step_toward(target.vector(), distance))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.world == other.world
            && self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
            && self.yaw.to_bits() == other.yaw.to_bits()
            && self.pitch.to_bits() == other.pitch.to_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.world.hash(state);
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
        self.yaw.to_bits().hash(state);
        self.pitch.to_bits().hash(state);
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}: {:.3}, {:.3}, {:.3})", self.world, self.x, self.y, self.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:.1},{:.1},{:.1}", self.world, self.x, self.y, self.z)
    }
}

// =============================================================================
// TESTS
// =============================================================================
