//! Region State
//!
//! A named, typed volume inside an arena. The region owns its two corner
//! points and its shape kind; every geometric query passes the corners to the
//! shape explicitly.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use super::kind::{BitFlag, RegionFlag, RegionProtection, RegionType};
use super::timer::RegionTimer;
use crate::arena::host::ParticipantId;
use crate::core::point::{BlockPos, Point};
use crate::core::vec3::Direction;
use crate::error::RegionError;
use crate::shape::{Corners, Shape};

// =============================================================================
// REGION
// =============================================================================

/// A region of an arena.
#[derive(Debug)]
pub struct Region {
    pub(crate) arena: String,
    pub(crate) name: String,
    pub(crate) region_type: RegionType,
    pub(crate) shape: Shape,
    pub(crate) corners: Corners,
    pub(crate) flags: BTreeSet<RegionFlag>,
    pub(crate) protections: BTreeSet<RegionProtection>,
    /// Last block position of participants inside a NOCAMP region
    pub(crate) camp_positions: BTreeMap<ParticipantId, Point>,
    pub(crate) timer: RegionTimer,
}

impl Region {
    /// Create a region from two corners and a shape kind.
    ///
    /// The type is guessed from the name. The corners are sanitized for the
    /// shape and a shape without volume is rejected.
    pub fn new(
        arena: impl Into<String>,
        name: impl Into<String>,
        shape: Shape,
        first: Point,
        second: Point,
    ) -> Result<Self, RegionError> {
        let name = name.into();
        let mut corners = Corners::new(first, second)?;
        shape.sanitize(&mut corners);
        if !shape.has_volume(&corners) {
            warn!("Rejected region '{}': {} has no volume", name, shape);
            return Err(RegionError::DegenerateShape {
                region: name,
                shape: shape.name(),
            });
        }

        let region_type = RegionType::guess_from_name(&name);
        debug!("Created {} region '{}' as {}", region_type, name, shape);
        Ok(Self {
            arena: arena.into(),
            name,
            region_type,
            shape,
            corners,
            flags: BTreeSet::new(),
            protections: BTreeSet::new(),
            camp_positions: BTreeMap::new(),
            timer: RegionTimer::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Owning arena name.
    pub fn arena(&self) -> &str {
        &self.arena
    }

    /// Region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region type.
    pub fn region_type(&self) -> RegionType {
        self.region_type
    }

    /// Change the type. The caller re-arms the timer.
    pub fn set_region_type(&mut self, ty: RegionType) {
        self.region_type = ty;
    }

    /// Shape kind.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Sanitized corners.
    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    /// Timer handle.
    pub fn timer(&self) -> &RegionTimer {
        &self.timer
    }

    /// Timer handle, mutably.
    pub fn timer_mut(&mut self) -> &mut RegionTimer {
        &mut self.timer
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// True if the region contains `p`. False across worlds.
    pub fn contains(&self, p: &Point) -> bool {
        self.shape.contains(&self.corners, p)
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.shape.center(&self.corners)
    }

    /// Minimum extent.
    pub fn min_extent(&self) -> Point {
        self.shape.min_extent(&self.corners)
    }

    /// Maximum extent.
    pub fn max_extent(&self) -> Point {
        self.shape.max_extent(&self.corners)
    }

    /// Overlap with another region.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.shape.overlaps_with(&self.corners, other.shape, &other.corners)
    }

    /// True if every boundary check point of `other` lies inside this region.
    pub fn contains_region(&self, other: &Region) -> bool {
        self.shape.contains_fully(&self.corners, other.shape, &other.corners)
    }

    /// True if the region is farther than `range` from `p`.
    pub fn too_far_away(&self, range: i32, p: &Point) -> bool {
        self.shape.too_far_away(&self.corners, range, p)
    }

    /// Block cells outlining the region.
    pub fn border_cells(&self) -> BTreeSet<BlockPos> {
        self.shape.border_cells(&self.corners)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Apply a corner mutation, re-sanitize, and roll back if the result has
    /// no volume.
    fn mutate_corners<F>(&mut self, shape: Shape, f: F) -> Result<(), RegionError>
    where
        F: FnOnce(Shape, &mut Corners),
    {
        let mut candidate = self.corners.clone();
        f(shape, &mut candidate);
        let crossed = candidate.crossed_since(&self.corners);
        shape.sanitize(&mut candidate);
        if crossed || !shape.has_volume(&candidate) {
            warn!("Rejected change to region '{}': {} would have no volume", self.name, shape);
            return Err(RegionError::DegenerateShape {
                region: self.name.clone(),
                shape: shape.name(),
            });
        }
        self.shape = shape;
        self.corners = candidate;
        Ok(())
    }

    /// Rigidly translate the region.
    pub fn move_by(&mut self, direction: Direction, amount: i32) {
        self.shape.move_by(&mut self.corners, direction, amount);
    }

    /// Grow or shrink through one face.
    pub fn extend(&mut self, direction: Direction, amount: i32) -> Result<(), RegionError> {
        self.mutate_corners(self.shape, |shape, c| shape.extend(c, direction, amount))
    }

    /// Switch to another shape kind over the same corners.
    pub fn set_shape(&mut self, shape: Shape) -> Result<(), RegionError> {
        self.mutate_corners(shape, |_, _| {})?;
        info!("Region '{}' is now a {}", self.name, shape);
        Ok(())
    }

    /// Keyed resize.
    ///
    /// - `height N`: raise the top by N blocks
    /// - `radius N`: grow the radius by N blocks
    /// - `position`: accepted, not implemented (no message)
    ///
    /// Returns the message to show the operator.
    pub fn update(&mut self, key: &str, value: &str) -> Result<Option<String>, RegionError> {
        match key.to_ascii_lowercase().as_str() {
            "height" => {
                let amount = parse_amount(key, value)?;
                self.mutate_corners(self.shape, |shape, c| shape.extend(c, Direction::Up, amount))?;
                Ok(Some(format!("{} height changed by {}", self.name, amount)))
            }
            "radius" => {
                let amount = parse_amount(key, value)?;
                self.mutate_corners(self.shape, |shape, c| shape.expand(c, amount))?;
                Ok(Some(format!("{} radius changed by {}", self.name, amount)))
            }
            "position" => Ok(None),
            _ => Err(RegionError::UnknownUpdateKey(key.to_string())),
        }
    }

    // -------------------------------------------------------------------------
    // Flags and protections
    // -------------------------------------------------------------------------

    /// True if the flag is set.
    pub fn has_flag(&self, flag: RegionFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Set flags, in sorted order.
    pub fn flags(&self) -> &BTreeSet<RegionFlag> {
        &self.flags
    }

    /// Set a flag. Returns false if it was already set.
    pub fn add_flag(&mut self, flag: RegionFlag) -> bool {
        self.flags.insert(flag)
    }

    /// Clear a flag. Returns false if it was not set.
    pub fn remove_flag(&mut self, flag: RegionFlag) -> bool {
        self.flags.remove(&flag)
    }

    /// Flip a flag. Returns the new state.
    pub fn toggle_flag(&mut self, flag: RegionFlag) -> bool {
        if self.flags.remove(&flag) {
            false
        } else {
            self.flags.insert(flag);
            true
        }
    }

    /// Replace every flag.
    pub fn set_flags(&mut self, flags: BTreeSet<RegionFlag>) {
        self.flags = flags;
    }

    /// True if the protection is set.
    pub fn has_protection(&self, protection: RegionProtection) -> bool {
        self.protections.contains(&protection)
    }

    /// Set protections, in sorted order.
    pub fn protections(&self) -> &BTreeSet<RegionProtection> {
        &self.protections
    }

    /// Set a protection. Returns false if it was already set.
    pub fn add_protection(&mut self, protection: RegionProtection) -> bool {
        self.protections.insert(protection)
    }

    /// Clear a protection. Returns false if it was not set.
    pub fn remove_protection(&mut self, protection: RegionProtection) -> bool {
        self.protections.remove(&protection)
    }

    /// Flip a protection. Returns the new state.
    pub fn toggle_protection(&mut self, protection: RegionProtection) -> bool {
        if self.protections.remove(&protection) {
            false
        } else {
            self.protections.insert(protection);
            true
        }
    }

    /// Set or clear every protection at once.
    pub fn set_all_protections(&mut self, enabled: bool) {
        self.protections = if enabled {
            RegionProtection::VARIANTS.iter().copied().collect()
        } else {
            BTreeSet::new()
        };
    }

    // -------------------------------------------------------------------------
    // Camp cache
    // -------------------------------------------------------------------------

    /// Cached block position of a participant camping inside the region.
    pub fn camp_position(&self, id: ParticipantId) -> Option<&Point> {
        self.camp_positions.get(&id)
    }

    /// Drop every cached camp position.
    pub fn clear_camp_positions(&mut self) {
        self.camp_positions.clear();
    }
}

fn parse_amount(key: &str, value: &str) -> Result<i32, RegionError> {
    value.trim().parse::<i32>().map_err(|_| RegionError::MalformedValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::WorldId;
    use crate::core::vec3::Vec3;

    fn at(x: f64, y: f64, z: f64) -> Point {
        Point::new(WorldId::new("arena"), x, y, z)
    }

    fn cube(name: &str) -> Region {
        Region::new("arena1", name, Shape::Cuboid, at(0.0, 0.0, 0.0), at(10.0, 10.0, 10.0)).unwrap()
    }

    #[test]
    fn test_region_new_guesses_type() {
        assert_eq!(cube("red-join").region_type(), RegionType::Join);
        assert_eq!(cube("battle").region_type(), RegionType::Battle);
        assert_eq!(cube("center").region_type(), RegionType::Custom);
    }

    #[test]
    fn test_region_new_sanitizes() {
        let r = Region::new("arena1", "box", Shape::Cuboid, at(5.0, 5.0, 5.0), at(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(r.min_extent().vector(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(r.max_extent().vector(), Vec3::new(5.0, 5.0, 5.0));
        assert!(r.contains(&at(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_region_new_rejects_degenerate() {
        let err = Region::new("arena1", "flat", Shape::Cuboid, at(0.0, 5.0, 0.0), at(10.0, 5.0, 10.0))
            .unwrap_err();
        assert_eq!(
            err,
            RegionError::DegenerateShape { region: "flat".into(), shape: "cuboid" }
        );
        assert!(Region::new("arena1", "dot", Shape::Sphere, at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_region_new_rejects_cross_world() {
        let other = Point::new(WorldId::new("lobby"), 1.0, 1.0, 1.0);
        let err = Region::new("arena1", "box", Shape::Cuboid, at(0.0, 0.0, 0.0), other).unwrap_err();
        assert!(matches!(err, RegionError::CrossWorld(_)));
    }

    #[test]
    fn test_update_height_and_radius() {
        let mut r = cube("box");
        assert_eq!(r.update("height", "5").unwrap(), Some("box height changed by 5".into()));
        assert_eq!(r.max_extent().vector(), Vec3::new(10.0, 15.0, 10.0));

        r.update("radius", "1").unwrap();
        assert_eq!(r.min_extent().vector(), Vec3::splat(-1.0));
        assert_eq!(r.max_extent().vector(), Vec3::new(11.0, 16.0, 11.0));
    }

    #[test]
    fn test_update_malformed_value_keeps_state() {
        let mut r = cube("box");
        let before = r.corners().clone();
        assert_eq!(
            r.update("radius", "wide"),
            Err(RegionError::MalformedValue { key: "radius".into(), value: "wide".into() })
        );
        assert_eq!(r.corners(), &before);
    }

    #[test]
    fn test_update_position_and_unknown_key() {
        let mut r = cube("box");
        assert_eq!(r.update("position", "0"), Ok(None));
        assert_eq!(r.update("colour", "red"), Err(RegionError::UnknownUpdateKey("colour".into())));
    }

    #[test]
    fn test_degenerate_resize_rolls_back() {
        let mut r = cube("box");
        let before = r.corners().clone();
        assert!(r.update("height", "-10").is_err());
        assert_eq!(r.corners(), &before);
        assert!(r.extend(Direction::East, -10).is_err());
        assert_eq!(r.corners(), &before);
    }

    #[test]
    fn test_overshrink_is_rejected_not_flipped() {
        let mut boxed = cube("box");
        let before = boxed.corners().clone();
        assert!(matches!(
            boxed.extend(Direction::East, -15),
            Err(RegionError::DegenerateShape { .. })
        ));
        assert!(boxed.update("height", "-25").is_err());
        assert!(boxed.update("radius", "-10").is_err());
        assert_eq!(boxed.corners(), &before);

        let mut ball = Region::new("arena1", "ball", Shape::Sphere, at(0.0, 5.0, 5.0), at(10.0, 5.0, 5.0)).unwrap();
        let before = ball.corners().clone();
        assert!(matches!(
            ball.update("radius", "-10"),
            Err(RegionError::DegenerateShape { .. })
        ));
        assert_eq!(ball.corners(), &before);
        assert_eq!(crate::shape::Sphere::radius(ball.corners()), 5.0);

        let mut drum = Region::new("arena1", "drum", Shape::Cylinder, at(0.0, 0.0, 0.0), at(10.0, 10.0, 10.0)).unwrap();
        let before = drum.corners().clone();
        assert!(matches!(
            drum.update("radius", "-10"),
            Err(RegionError::DegenerateShape { .. })
        ));
        assert!(drum.extend(Direction::Down, -20).is_err());
        assert_eq!(drum.corners(), &before);
        assert_eq!(crate::shape::Cylinder::radius(drum.corners()), 5.0);

        // A shrink that stays valid still applies
        assert!(drum.update("radius", "-2").is_ok());
        assert_eq!(crate::shape::Cylinder::radius(drum.corners()), 3.0);
    }

    #[test]
    fn test_set_shape_revalidates() {
        let mut r = cube("box");
        r.set_shape(Shape::Sphere).unwrap();
        assert_eq!(r.shape(), Shape::Sphere);
        // Sphere circumscribes the old box
        assert!(r.contains(&at(5.0, 5.0, 13.0)));
        assert!(!r.contains(&at(5.0, 5.0, 14.0)));

        let mut thin = Region::new("arena1", "thin", Shape::Cuboid, at(0.0, 0.0, 0.0), at(1.0, 10.0, 1.0))
            .unwrap();
        assert!(thin.set_shape(Shape::Cylinder).is_err());
        assert_eq!(thin.shape(), Shape::Cuboid);
    }

    #[test]
    fn test_move_by() {
        let mut r = cube("box");
        r.move_by(Direction::South, 5);
        assert_eq!(r.min_extent().vector(), Vec3::new(0.0, 0.0, 5.0));
        assert!(!r.contains(&at(5.0, 5.0, 1.0)));
    }

    #[test]
    fn test_flag_toggles() {
        let mut r = cube("box");
        assert!(r.add_flag(RegionFlag::Death));
        assert!(!r.add_flag(RegionFlag::Death));
        assert!(!r.toggle_flag(RegionFlag::Death));
        assert!(!r.has_flag(RegionFlag::Death));
        assert!(r.toggle_flag(RegionFlag::NoCamp));
        assert!(r.remove_flag(RegionFlag::NoCamp));
        assert!(!r.remove_flag(RegionFlag::NoCamp));
    }

    #[test]
    fn test_protection_set_all() {
        let mut r = cube("box");
        r.set_all_protections(true);
        assert_eq!(r.protections().len(), 14);
        assert!(!r.toggle_protection(RegionProtection::Tnt));
        assert!(!r.has_protection(RegionProtection::Tnt));
        r.set_all_protections(false);
        assert!(r.protections().is_empty());
    }

    #[test]
    fn test_contains_region() {
        let outer = cube("outer");
        let inner = Region::new("arena1", "inner", Shape::Sphere, at(3.0, 5.0, 5.0), at(7.0, 5.0, 5.0)).unwrap();
        let poking = Region::new("arena1", "poke", Shape::Sphere, at(6.0, 5.0, 5.0), at(12.0, 5.0, 5.0)).unwrap();
        assert!(outer.contains_region(&inner));
        assert!(!outer.contains_region(&poking));
        assert!(outer.overlaps(&poking));
    }
}
