//! Error Types
//!
//! Every condition here is local and recoverable. Tick evaluation logs and
//! continues; mutations reject the change and keep the previous state.

use thiserror::Error;

use crate::core::point::WorldId;
use crate::arena::host::ParticipantId;

/// A distance was requested between points of two different worlds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot measure between world '{from}' and world '{to}'")]
pub struct CrossWorldError {
    /// World of the point the call was made on.
    pub from: WorldId,
    /// World of the other point.
    pub to: WorldId,
}

/// Region creation and mutation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// Shape has no volume (zero extent or radius <= 1).
    #[error("region '{region}' would have no volume as a {shape}")]
    DegenerateShape {
        /// Region name.
        region: String,
        /// Shape kind name.
        shape: &'static str,
    },

    /// Shape kind name not recognized.
    #[error("unsupported shape kind: {0}")]
    UnsupportedShapeKind(String),

    /// Non-numeric or out-of-range value passed to `update`.
    #[error("invalid value '{value}' for {key}: expected a whole number")]
    MalformedValue {
        /// Update key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// Unknown `update` key.
    #[error("unknown key: {0}")]
    UnknownUpdateKey(String),

    /// Corner points are in different worlds.
    #[error(transparent)]
    CrossWorld(#[from] CrossWorldError),

    /// A region with this name already exists in the arena.
    #[error("region '{0}' already exists")]
    DuplicateRegion(String),

    /// No region with this name.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// A selection is missing one of its corners.
    #[error("selection is incomplete: set both corners first")]
    IncompleteSelection,

    /// Region overlaps a region of another arena.
    #[error("region '{region}' overlaps region '{other}' of arena '{arena}'")]
    Overlap {
        /// Candidate region.
        region: String,
        /// Arena owning the conflicting region.
        arena: String,
        /// Conflicting region.
        other: String,
    },
}

/// Failure reported by the match host while applying an effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Participant is no longer known to the host.
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),

    /// Host refused the effect.
    #[error("effect rejected: {0}")]
    Rejected(String),
}

/// Arena configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON.
    #[error("invalid arena config: {0}")]
    Json(#[from] serde_json::Error),

    /// Semantically invalid value.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Config key.
        key: &'static str,
        /// Reason.
        reason: String,
    },
}

/// Snapshot encoding errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// JSON encoding failed.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary encoding failed.
    #[error("snapshot binary error: {0}")]
    Binary(#[from] bincode::Error),
}
