//! Arena Regions
//!
//! The regions of one arena, kept sorted by name. Name order is the
//! per-sweep evaluation order, so two runs over the same inputs apply the
//! same effects in the same sequence.

use tracing::{debug, info};

use super::host::MatchHost;
use crate::core::hash::{Fingerprint, LayoutHasher};
use crate::core::point::Point;
use crate::error::RegionError;
use crate::region::kind::{RegionProtection, RegionType};
use crate::region::state::Region;
use crate::region::tick::{tick, Peers, RegionLookup, TickResult};
use crate::region::timer::{should_evaluate, Scheduler, TaskId};

/// Name-ordered regions of one arena.
#[derive(Debug, Default)]
pub struct ArenaRegions {
    arena: String,
    regions: Vec<Region>,
}

impl ArenaRegions {
    /// Empty set for an arena.
    pub fn new(arena: impl Into<String>) -> Self {
        Self {
            arena: arena.into(),
            regions: Vec::new(),
        }
    }

    /// Arena name.
    pub fn arena(&self) -> &str {
        &self.arena
    }

    fn index_of(&self, name: &str) -> Result<usize, usize> {
        self.regions.binary_search_by(|r| r.name().cmp(name))
    }

    /// Add a region. Names are unique within the arena.
    pub fn insert(&mut self, region: Region) -> Result<(), RegionError> {
        match self.index_of(region.name()) {
            Ok(_) => Err(RegionError::DuplicateRegion(region.name().to_string())),
            Err(index) => {
                debug!("Arena '{}' gained region '{}'", self.arena, region.name());
                self.regions.insert(index, region);
                Ok(())
            }
        }
    }

    /// Remove a region and stop its timer.
    pub fn remove(&mut self, name: &str, scheduler: &mut Scheduler) -> Result<Region, RegionError> {
        let index = self
            .index_of(name)
            .map_err(|_| RegionError::UnknownRegion(name.to_string()))?;
        let mut region = self.regions.remove(index);
        region.timer_mut().cancel(scheduler);
        info!("Arena '{}' removed region '{}'", self.arena, name);
        Ok(region)
    }

    /// Region by name.
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.index_of(name).ok().map(|i| &self.regions[i])
    }

    /// Region by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Region> {
        match self.index_of(name) {
            Ok(i) => Some(&mut self.regions[i]),
            Err(_) => None,
        }
    }

    /// Regions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Regions of one type, in name order.
    pub fn of_type(&self, ty: RegionType) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.region_type() == ty)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// True if any region containing `p` carries the protection.
    pub fn protection_at(&self, p: &Point, protection: RegionProtection) -> bool {
        self.regions
            .iter()
            .any(|r| r.has_protection(protection) && r.contains(p))
    }

    /// Change a region's type and re-arm its timer.
    pub fn set_region_type(
        &mut self,
        name: &str,
        ty: RegionType,
        scheduler: &mut Scheduler,
        interval: u32,
    ) -> Result<(), RegionError> {
        let region = self
            .get_mut(name)
            .ok_or_else(|| RegionError::UnknownRegion(name.to_string()))?;
        region.set_region_type(ty);
        let owner = region.name().to_string();
        region.timer_mut().init(scheduler, &owner, ty, interval);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// Arm every region's timer.
    pub fn init_timers(&mut self, scheduler: &mut Scheduler, interval: u32) {
        for region in &mut self.regions {
            let owner = region.name().to_string();
            let ty = region.region_type();
            region.timer_mut().init(scheduler, &owner, ty, interval);
        }
    }

    /// Stop timers and drop every camp cache. A reset keeps JOIN/WATCH/LOUNGE
    /// timers running unless `include_persistent` is set.
    pub fn stop_timers(&mut self, scheduler: &mut Scheduler, include_persistent: bool) {
        for region in &mut self.regions {
            region.clear_camp_positions();
            if include_persistent || !region.region_type().is_persistent() {
                region.timer_mut().cancel(scheduler);
            }
        }
    }

    /// Evaluate every region whose task fired, in name order.
    ///
    /// Each region is gated by its type and the match state. A region that
    /// asks for its timer to stop is cancelled here.
    pub fn run_due(
        &mut self,
        due: &[TaskId],
        scheduler: &mut Scheduler,
        host: &mut dyn MatchHost,
    ) -> Vec<(String, TickResult)> {
        let mut results = Vec::new();
        for index in 0..self.regions.len() {
            let fired = self.regions[index]
                .timer()
                .handle()
                .is_some_and(|id| due.contains(&id));
            if !fired {
                continue;
            }

            let ty = self.regions[index].region_type();
            if !should_evaluate(ty, host.is_fight_in_progress(), host.goal_allows_mid_battle_join()) {
                continue;
            }

            let (before, rest) = self.regions.split_at_mut(index);
            let Some((region, after)) = rest.split_first_mut() else {
                continue;
            };
            let peers = Peers { before, after };
            let result = tick(region, &peers, host);
            if result.stop_timer {
                debug!("Stopping timer of '{}'", region.name());
                region.timer_mut().cancel(scheduler);
            }
            results.push((region.name().to_string(), result));
        }
        results
    }

    /// Fingerprint of every region snapshot, in name order.
    pub fn layout_hash(&self) -> Fingerprint {
        let mut hasher = LayoutHasher::for_arena();
        hasher.update_str(&self.arena);
        hasher.update_u32(self.regions.len() as u32);
        for region in &self.regions {
            hasher.update_fingerprint(&region.snapshot().fingerprint());
        }
        hasher.finalize()
    }
}

impl RegionLookup for ArenaRegions {
    fn any_contains(&self, ty: RegionType, p: &Point) -> bool {
        self.regions.any_contains(ty, p)
    }
}

// =============================================================================
// TESTS
// =============================================================================
