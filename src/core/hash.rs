//! Layout Fingerprints
//!
//! Deterministic hashing of region layouts for:
//! - Detecting changed snapshots before persisting
//! - Comparing an arena's region set across reloads

use sha2::{Sha256, Digest};
use super::point::Point;

/// Hash output type (256 bits / 32 bytes)
pub type Fingerprint = [u8; 32];

/// Deterministic hasher for region data.
///
/// Wraps SHA-256 with helpers for points and strings.
/// Order of updates is critical for determinism.
pub struct LayoutHasher {
    hasher: Sha256,
}

impl LayoutHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for a single region snapshot.
    pub fn for_region() -> Self {
        Self::new(b"ARENA_REGION_V1")
    }

    /// Create hasher for a whole arena layout.
    pub fn for_arena() -> Self {
        Self::new(b"ARENA_LAYOUT_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 value (bit pattern, little-endian).
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.hasher.update(value.as_bytes());
    }

    /// Update with a point (world, coordinates, facing).
    pub fn update_point(&mut self, point: &Point) {
        self.update_str(point.world.as_str());
        self.update_f64(point.x);
        self.update_f64(point.y);
        self.update_f64(point.z);
        self.hasher.update(point.yaw.to_bits().to_le_bytes());
        self.hasher.update(point.pitch.to_bits().to_le_bytes());
    }

    /// Update with a nested fingerprint.
    #[inline]
    pub fn update_fingerprint(&mut self, value: &Fingerprint) {
        self.hasher.update(value);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Fingerprint {
        self.hasher.finalize().into()
    }
}

// =============================================================================
// TESTS
// =============================================================================
