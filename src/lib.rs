//! # Arena Regions
//!
//! Region and shape geometry engine for arena game servers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ARENA REGIONS                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Spatial primitives                        │
//! │  ├── vec3.rs     - 3D vector math and axis directions        │
//! │  ├── point.rs    - World-bound points and block cells        │
//! │  └── hash.rs     - Layout fingerprints                       │
//! │                                                              │
//! │  shape/          - Geometry                                  │
//! │  ├── cuboid.rs   - Axis-aligned box                          │
//! │  ├── cylinder.rs - Vertical cylinder                         │
//! │  ├── sphere.rs   - Sphere                                    │
//! │  ├── overlap.rs  - Cross-kind overlap dispatch               │
//! │  └── border.rs   - Border cells and scoped display tokens    │
//! │                                                              │
//! │  region/         - Region entity                             │
//! │  ├── kind.rs     - Types, flags, protections                 │
//! │  ├── state.rs    - Region state and mutation                 │
//! │  ├── tick.rs     - Rule evaluator                            │
//! │  ├── timer.rs    - Scheduler and per-region timers           │
//! │  ├── snapshot.rs - Persistence snapshot                      │
//! │  └── selection.rs- Two-corner operator selections            │
//! │                                                              │
//! │  arena/          - Match collaborator seam                   │
//! │  ├── host.rs     - MatchHost trait and participant types     │
//! │  ├── config.rs   - Per-arena settings                        │
//! │  ├── regions.rs  - Ordered region set and sweeps             │
//! │  ├── overlap.rs  - Arena-level overlap pre-check             │
//! │  └── sandbox.rs  - In-memory host                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! All region sweeps run on a single cooperative tick thread:
//! - Regions are evaluated in name order
//! - Participants are evaluated in the order the host reports them
//! - Camp caches and timers use BTreeMap for sorted iteration
//! - The scheduler is driven by host ticks, never by wall-clock time

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod shape;
pub mod region;
pub mod arena;

// Re-export commonly used types
pub use crate::core::point::{BlockPos, Point, WorldId};
pub use crate::core::vec3::{Direction, Vec3};
pub use error::{CrossWorldError, HostError, RegionError};
pub use shape::{Corners, Shape};
pub use region::{Region, RegionFlag, RegionProtection, RegionType};
pub use region::timer::{RegionTimer, Scheduler, TaskId};
pub use arena::{ArenaConfig, ArenaRegions, MatchHost, ParticipantId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host server tick rate (Hz)
pub const TICK_RATE: u32 = 20;
