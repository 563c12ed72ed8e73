//! Arena
//!
//! The seam to the owning match, and the per-arena region collection.
//!
//! ## Module Structure
//!
//! - `host`: `MatchHost` trait and participant types
//! - `config`: per-arena settings
//! - `regions`: name-ordered region set, timer sweeps, protection lookup
//! - `overlap`: region-creation overlap pre-check
//! - `sandbox`: in-memory host

pub mod host;
pub mod config;
pub mod regions;
pub mod overlap;
pub mod sandbox;

// Re-export arena types
pub use config::ArenaConfig;
pub use host::{MatchHost, ParticipantId, ParticipantStatus};
pub use regions::ArenaRegions;
pub use sandbox::SandboxMatch;
