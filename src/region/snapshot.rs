//! Region Snapshots
//!
//! Serializable view of a region for persistence: ordered corner locations,
//! shape kind, type, and named flag/protection sets. Encodes to JSON or to a
//! compact bincode form, and fingerprints with SHA-256.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use tracing::debug;

use super::kind::{pack, RegionFlag, RegionProtection, RegionType};
use super::state::Region;
use crate::core::hash::{Fingerprint, LayoutHasher};
use crate::core::point::Point;
use crate::error::{RegionError, SnapshotError};
use crate::shape::Shape;

/// Persisted state of a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    /// Region name
    pub name: String,
    /// Region type
    pub region_type: RegionType,
    /// Shape kind
    pub shape: Shape,
    /// Sanitized corners, in order
    pub locations: [Point; 2],
    /// Flags by name
    pub flags: BTreeSet<RegionFlag>,
    /// Protections by name
    pub protections: BTreeSet<RegionProtection>,
}

impl RegionSnapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from compact binary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Flags as a stable bitmask.
    pub fn flag_bits(&self) -> u32 {
        pack(&self.flags)
    }

    /// Protections as a stable bitmask.
    pub fn protection_bits(&self) -> u32 {
        pack(&self.protections)
    }

    /// SHA-256 over every persisted field.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = LayoutHasher::for_region();
        hasher.update_str(&self.name);
        hasher.update_str(self.region_type.name());
        hasher.update_str(self.shape.name());
        for location in &self.locations {
            hasher.update_point(location);
        }
        hasher.update_u32(self.flag_bits());
        hasher.update_u32(self.protection_bits());
        hasher.finalize()
    }

    /// Fingerprint as hex, for logs.
    pub fn fingerprint_hex(&self) -> String {
        hex::encode(self.fingerprint())
    }
}

impl Region {
    /// Capture the persisted state.
    pub fn snapshot(&self) -> RegionSnapshot {
        RegionSnapshot {
            name: self.name.clone(),
            region_type: self.region_type,
            shape: self.shape,
            locations: self.corners.as_array().clone(),
            flags: self.flags.clone(),
            protections: self.protections.clone(),
        }
    }

    /// Rebuild a region from a snapshot. Geometry is re-validated; the stored
    /// type overrides the one guessed from the name.
    pub fn from_snapshot(arena: impl Into<String>, snapshot: RegionSnapshot) -> Result<Self, RegionError> {
        let [first, second] = snapshot.locations;
        let mut region = Region::new(arena, snapshot.name, snapshot.shape, first, second)?;
        region.region_type = snapshot.region_type;
        region.flags = snapshot.flags;
        region.protections = snapshot.protections;
        debug!("Restored region '{}'", region.name);
        Ok(region)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::WorldId;

    fn region() -> Region {
        let world = WorldId::new("arena");
        let mut r = Region::new(
            "arena1",
            "spawn",
            Shape::Cylinder,
            Point::new(world.clone(), 0.0, 64.0, 0.0),
            Point::new(world, 10.0, 70.0, 10.0).with_rotation(90.0, 0.0),
        )
        .unwrap();
        r.add_flag(RegionFlag::NoCamp);
        r.add_flag(RegionFlag::NoDamage);
        r.add_protection(RegionProtection::Break);
        r.set_region_type(RegionType::Battle);
        r
    }

    #[test]
    fn test_snapshot_json_restores_region() {
        let original = region();
        let json = original.snapshot().to_json().unwrap();
        assert!(json.contains("\"NOCAMP\""));
        assert!(json.contains("\"cylinder\""));

        let restored = Region::from_snapshot("arena1", RegionSnapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored.region_type(), RegionType::Battle);
        assert_eq!(restored.corners(), original.corners());
        assert_eq!(restored.flags(), original.flags());
        assert_eq!(restored.protections(), original.protections());
    }

    #[test]
    fn test_snapshot_bytes_roundtrip() {
        let snapshot = region().snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(RegionSnapshot::from_bytes(&bytes).unwrap(), snapshot);
        assert!(RegionSnapshot::from_bytes(&bytes[..4]).is_err());
    }

    #[test]
    fn test_snapshot_bitmasks() {
        let snapshot = region().snapshot();
        assert_eq!(snapshot.flag_bits(), 0b10001);
        assert_eq!(snapshot.protection_bits(), 0b1);
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let mut r = region();
        let before = r.snapshot().fingerprint();
        assert_eq!(before, r.snapshot().fingerprint());
        assert_eq!(r.snapshot().fingerprint_hex().len(), 64);

        r.add_flag(RegionFlag::Death);
        assert_ne!(before, r.snapshot().fingerprint());
    }

    #[test]
    fn test_from_snapshot_rejects_degenerate() {
        let mut snapshot = region().snapshot();
        snapshot.locations[1] = snapshot.locations[0].clone();
        assert!(matches!(
            Region::from_snapshot("arena1", snapshot),
            Err(RegionError::DegenerateShape { .. })
        ));
    }
}
