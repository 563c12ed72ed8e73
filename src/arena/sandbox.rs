//! Sandbox Match
//!
//! In-memory [`MatchHost`] that records every effect it is asked to apply.
//! Drives the demo binary and the tick tests.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::config::ArenaConfig;
use super::host::{
    DamageCause, EliminationCause, ExitReason, MatchHost, Notice, OnlinePlayer, Participant,
    ParticipantId, ParticipantStatus,
};
use crate::core::point::Point;
use crate::error::HostError;

/// An effect applied by the tick rules.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Message sent
    Notify(ParticipantId, Notice),
    /// Non-fatal damage
    Damage(ParticipantId, f64, DamageCause),
    /// Elimination
    Eliminate(ParticipantId, EliminationCause),
    /// Forced exit
    ForceLeave(ParticipantId, ExitReason),
    /// Join path triggered toward a team or shortcut
    Join(String, ParticipantId),
}

/// A match held entirely in memory.
#[derive(Debug)]
pub struct SandboxMatch {
    /// Arena name
    pub arena: String,
    /// Arena settings
    pub config: ArenaConfig,
    /// Fight in progress
    pub fight: bool,
    /// Arena refuses joins
    pub locked: bool,
    /// No teams
    pub free_for_all: bool,
    /// Goal allows joining mid-battle
    pub mid_battle_join: bool,
    /// Participants in evaluation order
    pub participants: Vec<Participant>,
    /// Online players outside any match
    pub online: Vec<OnlinePlayer>,
    /// Goal life counters by player or team name
    pub life_counters: BTreeMap<String, i32>,
    /// Effects applied so far
    pub effects: Vec<Effect>,
    rejected: BTreeSet<ParticipantId>,
    next_id: u128,
}

impl SandboxMatch {
    /// Empty match with default settings.
    pub fn new(arena: impl Into<String>) -> Self {
        Self {
            arena: arena.into(),
            config: ArenaConfig::default(),
            fight: false,
            locked: false,
            free_for_all: false,
            mid_battle_join: false,
            participants: Vec::new(),
            online: Vec::new(),
            life_counters: BTreeMap::new(),
            effects: Vec::new(),
            rejected: BTreeSet::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ParticipantId {
        let id = ParticipantId::new(self.next_id.to_be_bytes());
        self.next_id += 1;
        id
    }

    /// Add a participant. Ids are sequential, so they sort in insertion order.
    pub fn add_participant(
        &mut self,
        name: &str,
        team: Option<&str>,
        status: ParticipantStatus,
        position: Option<Point>,
    ) -> ParticipantId {
        let id = self.allocate_id();
        self.participants.push(Participant {
            id,
            name: name.to_string(),
            team: team.map(str::to_string),
            status,
            position,
        });
        id
    }

    /// Add an online player outside the match.
    pub fn add_online(&mut self, name: &str, position: Point) -> ParticipantId {
        let id = self.allocate_id();
        self.online.push(OnlinePlayer {
            id,
            name: name.to_string(),
            position,
        });
        id
    }

    /// Move a participant.
    pub fn move_to(&mut self, id: ParticipantId, position: Point) {
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.position = Some(position);
        }
    }

    /// Set a participant's status.
    pub fn set_status(&mut self, id: ParticipantId, status: ParticipantStatus) {
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.status = status;
        }
    }

    /// Make every fallible effect on `id` fail.
    pub fn reject(&mut self, id: ParticipantId) {
        self.rejected.insert(id);
    }

    /// True if the participant was eliminated.
    pub fn is_eliminated(&self, id: ParticipantId) -> bool {
        self.participants
            .iter()
            .any(|p| p.id == id && p.status == ParticipantStatus::Lost)
    }

    fn check(&self, id: ParticipantId) -> Result<usize, HostError> {
        if self.rejected.contains(&id) {
            return Err(HostError::Rejected(format!("{} is protected", id)));
        }
        self.participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(HostError::UnknownParticipant(id))
    }
}

impl MatchHost for SandboxMatch {
    fn arena_name(&self) -> &str {
        &self.arena
    }

    fn config(&self) -> &ArenaConfig {
        &self.config
    }

    fn is_fight_in_progress(&self) -> bool {
        self.fight
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn is_free_for_all(&self) -> bool {
        self.free_for_all
    }

    fn participant_ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    fn participant(&self, id: ParticipantId) -> Option<Participant> {
        self.participants.iter().find(|p| p.id == id).cloned()
    }

    fn team_members(&self, team: &str) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|p| p.team.as_deref() == Some(team))
            .map(|p| p.id)
            .collect()
    }

    fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = Vec::new();
        for team in self.participants.iter().filter_map(|p| p.team.as_ref()) {
            if !teams.contains(team) {
                teams.push(team.clone());
            }
        }
        teams
    }

    fn online_unassigned(&self) -> Vec<OnlinePlayer> {
        self.online.clone()
    }

    fn goal_allows_mid_battle_join(&self) -> bool {
        self.mid_battle_join
    }

    fn adjust_life_counter(&mut self, name: &str, delta: i32) -> bool {
        match self.life_counters.get_mut(name) {
            Some(lives) => {
                *lives += delta;
                true
            }
            None => false,
        }
    }

    fn notify(&mut self, id: ParticipantId, notice: Notice) {
        self.effects.push(Effect::Notify(id, notice));
    }

    fn damage(&mut self, id: ParticipantId, amount: f64, cause: DamageCause) -> Result<(), HostError> {
        self.check(id)?;
        self.effects.push(Effect::Damage(id, amount, cause));
        Ok(())
    }

    fn eliminate(&mut self, id: ParticipantId, cause: EliminationCause) -> Result<(), HostError> {
        let index = self.check(id)?;
        self.participants[index].status = ParticipantStatus::Lost;
        self.effects.push(Effect::Eliminate(id, cause));
        debug!("{} eliminated ({:?})", self.participants[index].name, cause);
        Ok(())
    }

    fn force_leave(&mut self, id: ParticipantId, reason: ExitReason) -> Result<(), HostError> {
        let index = self.check(id)?;
        let participant = self.participants.remove(index);
        self.effects.push(Effect::ForceLeave(id, reason));
        debug!("{} left the match ({:?})", participant.name, reason);
        Ok(())
    }

    fn trigger_join(&mut self, target: &str, player: ParticipantId) -> Result<(), HostError> {
        if self.rejected.contains(&player) {
            return Err(HostError::Rejected(format!("{} cannot join", player)));
        }
        let index = self
            .online
            .iter()
            .position(|p| p.id == player)
            .ok_or(HostError::UnknownParticipant(player))?;
        let joined = self.online.remove(index);
        self.participants.push(Participant {
            id: joined.id,
            name: joined.name,
            team: Some(target.to_string()),
            status: ParticipantStatus::Lounge,
            position: Some(joined.position),
        });
        self.effects.push(Effect::Join(target.to_string(), player));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
