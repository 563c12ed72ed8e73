//! Match Host Seam
//!
//! Everything the region engine needs from the surrounding match: reads of
//! match state and participants, and the effects a tick applies. The engine
//! never owns participants; it only asks the host to act on them.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::arena::config::ArenaConfig;
use crate::core::point::Point;
use crate::error::HostError;

// =============================================================================
// PARTICIPANT ID
// =============================================================================

/// Unique participant identifier (UUID as bytes).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub struct ParticipantId(pub [u8; 16]);

impl ParticipantId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Fresh random identifier.
    pub fn random() -> Self {
        Self(*uuid::Uuid::new_v4().as_bytes())
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s)
            .ok()
            .map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uuid_string())
    }
}

// =============================================================================
// PARTICIPANTS
// =============================================================================

/// Participant status within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum ParticipantStatus {
    /// Not part of the match lifecycle yet
    #[default]
    Null,
    /// Warming up before joining
    Warm,
    /// Waiting in the lounge
    Lounge,
    /// Ready to start
    Ready,
    /// Actively fighting
    Fight,
    /// Spectating
    Watch,
    /// Dead, awaiting respawn or exit
    Dead,
    /// Eliminated
    Lost,
}

/// Snapshot of one match participant as the host sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    /// Identifier
    pub id: ParticipantId,
    /// Display name
    pub name: String,
    /// Team name, if the match uses teams
    pub team: Option<String>,
    /// Current status
    pub status: ParticipantStatus,
    /// Last known position, if the participant is in a world
    pub position: Option<Point>,
}

impl Participant {
    /// True while the participant is actively fighting.
    pub fn is_fighting(&self) -> bool {
        self.status == ParticipantStatus::Fight
    }
}

/// An online player that is not assigned to any match.
#[derive(Clone, Debug, PartialEq)]
pub struct OnlinePlayer {
    /// Identifier
    pub id: ParticipantId,
    /// Display name
    pub name: String,
    /// Current position
    pub position: Point,
}

// =============================================================================
// EFFECT TAGS
// =============================================================================

/// Why a participant was eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Entered a DEATH region
    DeathZone,
    /// Another side entered a WIN region
    WinZone,
    /// Own side entered a LOSE region
    LoseZone,
    /// Left every BATTLE region with leave-on-escape enabled
    Escaped,
}

/// Why a participant was forced out of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitReason {
    /// Left every region of the required type
    Escaped,
}

/// Message keys sent to participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// Entered a DEATH region
    DeathZone,
    /// Left the required region
    Escaped,
}

/// Non-fatal damage sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// Standing still inside a NOCAMP region
    SpawnCamp,
}

// =============================================================================
// HOST TRAIT
// =============================================================================

/// The match a region belongs to, as seen by the tick rules.
///
/// Effect calls are synchronous and may fail; a failure never stops a tick.
pub trait MatchHost {
    /// Name of the arena.
    fn arena_name(&self) -> &str;

    /// Per-arena settings.
    fn config(&self) -> &ArenaConfig;

    /// True while a fight is running.
    fn is_fight_in_progress(&self) -> bool;

    /// True if the arena refuses new joins.
    fn is_locked(&self) -> bool;

    /// True if the match has no teams.
    fn is_free_for_all(&self) -> bool;

    /// Current participants, in the host's evaluation order.
    fn participant_ids(&self) -> Vec<ParticipantId>;

    /// Live view of a participant.
    fn participant(&self, id: ParticipantId) -> Option<Participant>;

    /// Members of a team, in the host's order.
    fn team_members(&self, team: &str) -> Vec<ParticipantId>;

    /// Team names, in the host's order.
    fn teams(&self) -> Vec<String>;

    /// Online players not assigned to any match.
    fn online_unassigned(&self) -> Vec<OnlinePlayer>;

    /// True if the active goal allows joining mid-battle.
    fn goal_allows_mid_battle_join(&self) -> bool;

    /// Adjust the active goal's life counter for a player or team name.
    /// Returns false if the goal does not track that name.
    fn adjust_life_counter(&mut self, name: &str, delta: i32) -> bool;

    /// Send a message to a participant.
    fn notify(&mut self, id: ParticipantId, notice: Notice);

    /// Apply non-fatal damage.
    fn damage(&mut self, id: ParticipantId, amount: f64, cause: DamageCause) -> Result<(), HostError>;

    /// Eliminate a participant.
    fn eliminate(&mut self, id: ParticipantId, cause: EliminationCause) -> Result<(), HostError>;

    /// Force a participant out through the exit path.
    fn force_leave(&mut self, id: ParticipantId, reason: ExitReason) -> Result<(), HostError>;

    /// Run the join path for an unassigned player toward a team or shortcut.
    fn trigger_join(&mut self, target: &str, player: ParticipantId) -> Result<(), HostError>;
}

// =============================================================================
// TESTS
// =============================================================================
