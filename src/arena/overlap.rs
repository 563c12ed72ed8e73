//! Overlap Pre-Check
//!
//! Validation run when regions are created: arenas must not share
//! battlefield space.

use tracing::warn;

use super::regions::ArenaRegions;
use crate::error::RegionError;
use crate::region::kind::RegionType;
use crate::region::state::Region;

/// True if the two regions overlap.
pub fn regions_overlap(a: &Region, b: &Region) -> bool {
    a.overlaps(b)
}

/// True if `outer` fully contains `inner`.
pub fn region_contains_region(outer: &Region, inner: &Region) -> bool {
    outer.contains_region(inner)
}

/// True if any BATTLE region of `a` overlaps any BATTLE region of `b`.
pub fn battlefields_overlap(a: &ArenaRegions, b: &ArenaRegions) -> bool {
    a.of_type(RegionType::Battle)
        .any(|ra| b.of_type(RegionType::Battle).any(|rb| regions_overlap(ra, rb)))
}

/// Reject a BATTLE region that overlaps a BATTLE region of another arena.
///
/// Regions of other types, and the candidate's own arena, are not checked.
pub fn check_placement<'a, I>(candidate: &Region, arenas: I) -> Result<(), RegionError>
where
    I: IntoIterator<Item = &'a ArenaRegions>,
{
    if candidate.region_type() != RegionType::Battle {
        return Ok(());
    }
    for arena in arenas {
        if arena.arena() == candidate.arena() {
            continue;
        }
        if let Some(other) = arena.of_type(RegionType::Battle).find(|r| regions_overlap(candidate, r)) {
            warn!(
                "Region '{}' of '{}' overlaps '{}' of '{}'",
                candidate.name(),
                candidate.arena(),
                other.name(),
                arena.arena()
            );
            return Err(RegionError::Overlap {
                region: candidate.name().to_string(),
                arena: arena.arena().to_string(),
                other: other.name().to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
