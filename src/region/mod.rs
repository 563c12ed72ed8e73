//! Regions
//!
//! A region is a named volume of an arena with a type, behavioral flags and
//! protections. This module owns the rule evaluator and the timers that
//! drive it.
//!
//! ## Module Structure
//!
//! - `kind`: region types, flags, protections, bit packing
//! - `state`: the region entity and its mutations
//! - `tick`: the per-tick rule evaluator
//! - `timer`: host-tick scheduler and per-region timer
//! - `snapshot`: persistence snapshot
//! - `selection`: operator two-corner selections

pub mod kind;
pub mod state;
pub mod tick;
pub mod timer;
pub mod snapshot;
pub mod selection;

// Re-export region types
pub use kind::{RegionFlag, RegionProtection, RegionType};
pub use state::Region;
pub use tick::{tick, RegionEvent, RegionLookup, TickResult};
pub use snapshot::RegionSnapshot;
pub use selection::SelectionStore;
