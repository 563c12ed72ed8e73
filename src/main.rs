//! Arena Regions Demo
//!
//! Builds a small arena in memory and drives its region timers against a
//! sandbox match, logging every effect the rules apply.

use std::sync::Arc;
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arena_regions::{
    ArenaConfig, ArenaRegions, BlockPos, Point, Region, RegionFlag, RegionProtection, Scheduler,
    Shape, WorldId, TICK_RATE, VERSION,
    arena::{host::ParticipantStatus, overlap::check_placement, SandboxMatch},
    region::SelectionStore,
    shape::{BorderDisplay, BorderMarker},
};

/// Border marker that only logs.
struct LogMarker;

impl BorderMarker for LogMarker {
    fn mark(&self, world: &WorldId, cells: &[BlockPos]) {
        info!("Marking {} border cells in {}", cells.len(), world);
    }

    fn revert(&self, world: &WorldId, cells: &[BlockPos]) {
        info!("Reverting {} border cells in {}", cells.len(), world);
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Arena Regions v{}", VERSION);
    info!("Host tick rate: {} Hz", TICK_RATE);

    demo_arena()
}

fn demo_arena() -> anyhow::Result<()> {
    info!("=== Building Demo Arena ===");

    let world = WorldId::new("arena");
    let at = |x: f64, y: f64, z: f64| Point::new(world.clone(), x, y, z);

    let config = ArenaConfig::from_json(r#"{"force_join": true, "tick_interval": 5}"#)?;
    let mut host = SandboxMatch::new("demo");
    host.config = config.clone();

    // Operator selects the battlefield corners
    let operator = host.add_online("operator", at(0.0, 64.0, 0.0));
    let mut selections = SelectionStore::new();
    selections.set_pos(operator, at(0.0, 60.0, 0.0), true);
    selections.set_pos(operator, at(40.0, 80.0, 40.0), false);
    let (first, second) = selections.take(operator)?;

    let mut regions = ArenaRegions::new("demo");
    let battle = Region::new("demo", "battle", Shape::Cuboid, first, second)?;
    check_placement(&battle, std::iter::empty::<&ArenaRegions>())?;
    regions.insert(battle)?;

    let mut pit = Region::new("demo", "pit", Shape::Cylinder, at(15.0, 60.0, 15.0), at(25.0, 62.0, 25.0))?;
    pit.add_flag(RegionFlag::Death);
    regions.insert(pit)?;

    let mut spawn = Region::new("demo", "spawn", Shape::Sphere, at(0.0, 64.0, 0.0), at(6.0, 64.0, 0.0))?;
    spawn.add_flag(RegionFlag::NoCamp);
    spawn.add_protection(RegionProtection::Break);
    regions.insert(spawn)?;

    regions.insert(Region::new("demo", "red-join", Shape::Cuboid, at(-20.0, 60.0, -20.0), at(-10.0, 70.0, -10.0))?)?;

    for region in regions.iter() {
        info!(
            "Region '{}' ({}, {}) from {} to {}",
            region.name(),
            region.region_type(),
            region.shape(),
            region.min_extent(),
            region.max_extent()
        );
    }

    // Show the pit's outline for a while
    let mut borders = BorderDisplay::new();
    let pit = regions.get("pit").context("pit region missing")?;
    borders.show(
        pit.name(),
        world.clone(),
        pit.border_cells().into_iter().collect(),
        Arc::new(LogMarker),
        0,
        config.border_display_ticks,
    );

    // Players
    let alice = host.add_participant("alice", Some("red"), ParticipantStatus::Fight, Some(at(2.0, 64.0, 1.0)));
    let bob = host.add_participant("bob", Some("blue"), ParticipantStatus::Fight, Some(at(30.0, 64.0, 30.0)));
    host.add_online("carol", at(-15.0, 64.0, -15.0));

    let mut scheduler = Scheduler::new();
    regions.init_timers(&mut scheduler, config.tick_interval);

    info!("=== Running Lobby Phase ===");
    run_ticks(&mut regions, &mut scheduler, &mut host, &mut borders, 10);

    info!("=== Running Fight Phase ===");
    host.fight = true;
    run_ticks(&mut regions, &mut scheduler, &mut host, &mut borders, 40);
    host.move_to(bob, at(20.0, 61.0, 20.0));
    run_ticks(&mut regions, &mut scheduler, &mut host, &mut borders, 20);
    host.move_to(alice, at(100.0, 64.0, 100.0));
    run_ticks(&mut regions, &mut scheduler, &mut host, &mut borders, 60);

    info!("=== Results ===");
    for effect in &host.effects {
        info!("Effect: {:?}", effect);
    }
    info!("Break protected at spawn: {}", regions.protection_at(&at(1.0, 64.0, 0.0), RegionProtection::Break));

    let snapshot = regions.get("spawn").context("spawn region missing")?.snapshot();
    info!("Spawn snapshot: {}", snapshot.to_json()?);
    info!("Spawn fingerprint: {}", snapshot.fingerprint_hex());
    info!("Layout hash: {}", hex::encode(regions.layout_hash()));

    regions.stop_timers(&mut scheduler, true);
    info!("Active timers after shutdown: {}", scheduler.active_count());
    Ok(())
}

fn run_ticks(
    regions: &mut ArenaRegions,
    scheduler: &mut Scheduler,
    host: &mut SandboxMatch,
    borders: &mut BorderDisplay,
    ticks: u32,
) {
    for _ in 0..ticks {
        let due = scheduler.advance();
        for (name, result) in regions.run_due(&due, scheduler, host) {
            for event in &result.events {
                info!("[tick {}] {}: {:?}", scheduler.now(), name, event);
            }
        }
        let expired = borders.expire(scheduler.now());
        if expired > 0 {
            info!("[tick {}] {} borders expired", scheduler.now(), expired);
        }
    }
}
