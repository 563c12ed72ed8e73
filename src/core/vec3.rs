//! 3D Vector
//!
//! Plain `f64` vector math used by the shape geometry, plus the six
//! axis-aligned directions accepted by move/extend operations.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 3D vector with `f64` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component (east is positive)
    pub x: f64,
    /// Y component (up is positive)
    pub y: f64,
    /// Z component (south is positive)
    pub z: f64,
}

impl Vec3 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with the same value on every axis.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length (magnitude). Prefer `length_squared` when possible.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance ignoring the Y axis.
    #[inline]
    pub fn horizontal_distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// Normalize to unit length.
    /// Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Midpoint between two vectors.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        (self + other).scale(0.5)
    }

    /// Point reached by moving `distance` from `self` toward `target`.
    ///
    /// Returns `self` when both positions coincide.
    #[inline]
    pub fn step_toward(self, target: Self, distance: f64) -> Self {
        self + (target - self).normalize().scale(distance)
    }

    /// True if every component lies within `[min, max]` inclusive.
    #[inline]
    pub fn within(self, min: Self, max: Self) -> bool {
        self.x >= min.x
            && self.x <= max.x
            && self.y >= min.y
            && self.y <= max.y
            && self.z >= min.z
            && self.z <= max.z
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

// =============================================================================
// DIRECTION
// =============================================================================

/// Axis-aligned unit direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
    /// +Y
    Up,
    /// -Y
    Down,
}

impl Direction {
    /// All directions.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector for this direction.
    pub const fn vector(self) -> Vec3 {
        match self {
            Direction::North => Vec3::new(0.0, 0.0, -1.0),
            Direction::South => Vec3::new(0.0, 0.0, 1.0),
            Direction::East => Vec3::new(1.0, 0.0, 0.0),
            Direction::West => Vec3::new(-1.0, 0.0, 0.0),
            Direction::Up => Vec3::new(0.0, 1.0, 0.0),
            Direction::Down => Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// True for Up and Down.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True if the direction points along a positive axis.
    pub const fn is_positive(self) -> bool {
        matches!(self, Direction::South | Direction::East | Direction::Up)
    }

    /// Parse a direction name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vec3_length() {
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(v.length_squared(), 49.0);
        assert_eq!(v.length(), 7.0);
    }

    #[test]
    fn test_vec3_normalize_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        let n = Vec3::new(0.0, 0.0, 4.0).normalize();
        assert_eq!(n, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_vec3_step_toward() {
        let from = Vec3::new(0.0, 0.0, 0.0);
        let to = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(from.step_toward(to, 3.0), Vec3::new(3.0, 0.0, 0.0));
        // Degenerate direction stays put
        assert_eq!(from.step_toward(from, 3.0), from);
    }

    #[test]
    fn test_vec3_within_inclusive() {
        let min = Vec3::ZERO;
        let max = Vec3::splat(10.0);
        assert!(Vec3::new(10.0, 0.0, 5.0).within(min, max));
        assert!(!Vec3::new(10.5, 5.0, 5.0).within(min, max));
    }

    #[test]
    fn test_direction_vectors_are_unit() {
        for dir in Direction::ALL {
            assert_eq!(dir.vector().length(), 1.0);
            let v = dir.vector();
            let positive = v.x + v.y + v.z > 0.0;
            assert_eq!(dir.is_positive(), positive, "{:?}", dir);
        }
    }

    #[test]
    fn test_direction_from_name() {
        assert_eq!(Direction::from_name("UP"), Some(Direction::Up));
        assert_eq!(Direction::from_name("w"), Some(Direction::West));
        assert_eq!(Direction::from_name("sideways"), None);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_unit_or_zero(x in -1e3f64..1e3, y in -1e3f64..1e3, z in -1e3f64..1e3) {
            let v = Vec3::new(x, y, z);
            let n = v.normalize();
            if v.length() == 0.0 {
                prop_assert_eq!(n, Vec3::ZERO);
            } else {
                prop_assert!((n.length() - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_step_toward_covers_distance(
            x in -1e3f64..1e3,
            z in -1e3f64..1e3,
            tx in -1e3f64..1e3,
            tz in -1e3f64..1e3,
            d in 0.0f64..100.0,
        ) {
            let from = Vec3::new(x, 0.0, z);
            let target = Vec3::new(tx, 0.0, tz);
            prop_assume!(from.distance(target) > 1e-6);
            let d = d.min(from.distance(target));
            let stepped = from.step_toward(target, d);
            prop_assert!((from.distance(stepped) - d).abs() < 1e-6);
            prop_assert!((stepped.distance(target) - (from.distance(target) - d)).abs() < 1e-6);
        }
    }
}
