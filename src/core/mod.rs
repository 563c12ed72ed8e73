//! Core spatial primitives.
//!
//! Value types shared by every other module. Nothing in here performs
//! side effects or talks to the host server.

pub mod vec3;
pub mod point;
pub mod hash;

// Re-export core types
pub use vec3::{Direction, Vec3};
pub use point::{BlockPos, Point, WorldId};
pub use hash::{Fingerprint, LayoutHasher};
