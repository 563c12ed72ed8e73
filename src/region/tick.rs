//! Region Tick
//!
//! One evaluation of a region's rules against every current participant.
//!
//! Per participant, in the host's order, flags run DEATH → WIN → LOSE →
//! NOCAMP, then the type rule (BATTLE, WATCH, LOUNGE). JOIN runs once after
//! the participant loop. Effects go through the [`MatchHost`]; a failed
//! effect is logged and recorded, and evaluation continues.

use tracing::{debug, warn};
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use super::kind::{RegionFlag, RegionType};
use super::state::Region;
use crate::arena::host::{
    DamageCause, EliminationCause, ExitReason, MatchHost, Notice, Participant,
    ParticipantId, ParticipantStatus,
};
use crate::core::point::Point;
use crate::error::HostError;

/// Minimum movement (blocks) that resets the camp timer.
pub const CAMP_DISTANCE: f64 = 3.0;

// =============================================================================
// PEERS
// =============================================================================

/// The other regions of the same arena, for "inside any region of type" rules.
pub trait RegionLookup {
    /// True if any region of type `ty` contains `p`.
    fn any_contains(&self, ty: RegionType, p: &Point) -> bool;
}

impl RegionLookup for [Region] {
    fn any_contains(&self, ty: RegionType, p: &Point) -> bool {
        self.iter().any(|r| r.region_type == ty && r.contains(p))
    }
}

/// Regions on either side of the one being ticked.
pub struct Peers<'a> {
    /// Regions ordered before
    pub before: &'a [Region],
    /// Regions ordered after
    pub after: &'a [Region],
}

impl RegionLookup for Peers<'_> {
    fn any_contains(&self, ty: RegionType, p: &Point) -> bool {
        self.before.any_contains(ty, p) || self.after.any_contains(ty, p)
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Something a tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionEvent {
    /// Participant entered a DEATH region and was eliminated.
    DeathZone {
        /// Participant
        participant: ParticipantId,
        /// True if a life counter was compensated first
        life_adjusted: bool,
    },
    /// Participant entered a WIN region.
    Won {
        /// Participant
        participant: ParticipantId,
        /// Opponents eliminated
        eliminated: Vec<ParticipantId>,
    },
    /// Participant entered a LOSE region.
    Lost {
        /// Participant
        participant: ParticipantId,
        /// Participants eliminated (self, or own team)
        eliminated: Vec<ParticipantId>,
    },
    /// Spawn-camp damage applied.
    CampDamage {
        /// Participant
        participant: ParticipantId,
        /// Damage amount
        amount: f64,
    },
    /// Participant left every region of the required type.
    Escaped {
        /// Participant
        participant: ParticipantId,
        /// Required region type
        region_type: RegionType,
        /// True if eliminated rather than forced out
        eliminated: bool,
    },
    /// An unassigned player was pulled in through a JOIN region.
    ForcedJoin {
        /// Player
        player: ParticipantId,
        /// Team or shortcut targeted
        target: String,
    },
    /// The host failed to apply an effect.
    EffectFailed {
        /// Participant
        participant: ParticipantId,
        /// Host error
        error: HostError,
    },
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<RegionEvent>,
    /// The region's timer should be stopped (JOIN without forced join)
    pub stop_timer: bool,
}

impl TickResult {
    fn record(&mut self, id: ParticipantId, effect: &str, result: Result<(), HostError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                warn!("Failed to apply {} to {}: {}", effect, id, error);
                self.events.push(RegionEvent::EffectFailed { participant: id, error });
                false
            }
        }
    }
}

// =============================================================================
// TICK
// =============================================================================

/// Run one tick of the region's rules.
///
/// # Determinism
///
/// Participants are visited in the order the host reports them and every
/// status check is re-read from the host, so effects applied earlier in the
/// same tick are visible to later rules.
pub fn tick<L>(region: &mut Region, peers: &L, host: &mut dyn MatchHost) -> TickResult
where
    L: RegionLookup + ?Sized,
{
    let mut result = TickResult::default();
    let mut win_resolved = false;
    let mut lose_resolved = false;

    let ids = host.participant_ids();
    region.camp_positions.retain(|id, _| ids.contains(id));

    for id in ids {
        let Some(participant) = host.participant(id) else {
            continue;
        };
        let Some(position) = participant.position.clone() else {
            continue;
        };
        let inside = region.contains(&position);

        #[cfg(feature = "debug-tracing")]
        trace!(
            "Region '{}': {} at {} inside={} status={:?}",
            region.name, participant.name, position, inside, participant.status
        );

        if inside && participant.is_fighting() && region.has_flag(RegionFlag::Death) {
            apply_death(&participant, host, &mut result);
            continue;
        }

        if inside && !win_resolved && region.has_flag(RegionFlag::Win) && is_fighting(host, id) {
            win_resolved = true;
            apply_win(&participant, host, &mut result);
        }

        if inside && !lose_resolved && region.has_flag(RegionFlag::Lose) && is_fighting(host, id) {
            lose_resolved = apply_lose(&participant, host, &mut result);
        }

        if region.has_flag(RegionFlag::NoCamp) {
            check_camping(region, id, &position, inside && is_fighting(host, id), host, &mut result);
        }

        let required = match region.region_type {
            RegionType::Battle => is_fighting(host, id).then_some(RegionType::Battle),
            RegionType::Watch => {
                has_status(host, id, &[ParticipantStatus::Watch]).then_some(RegionType::Watch)
            }
            RegionType::Lounge => {
                has_status(host, id, &[ParticipantStatus::Ready, ParticipantStatus::Lounge])
                    .then_some(RegionType::Lounge)
            }
            _ => None,
        };
        if let Some(ty) = required {
            let inside_any = inside || peers.any_contains(ty, &position);
            if !inside_any {
                apply_escape(id, ty, host, &mut result);
            }
        }
    }

    if region.region_type == RegionType::Join {
        run_join(region, host, &mut result);
    }

    result
}

fn is_fighting(host: &dyn MatchHost, id: ParticipantId) -> bool {
    host.participant(id).is_some_and(|p| p.is_fighting())
}

fn has_status(host: &dyn MatchHost, id: ParticipantId, statuses: &[ParticipantStatus]) -> bool {
    host.participant(id).is_some_and(|p| statuses.contains(&p.status))
}

fn apply_death(participant: &Participant, host: &mut dyn MatchHost, result: &mut TickResult) {
    let id = participant.id;
    host.notify(id, Notice::DeathZone);

    // The goal will count the elimination as a lost life; give it back first
    let mut life_adjusted = host.adjust_life_counter(&participant.name, 1);
    if !life_adjusted {
        if let Some(team) = &participant.team {
            life_adjusted = host.adjust_life_counter(team, 1);
        }
    }

    let eliminated = host.eliminate(id, EliminationCause::DeathZone);
    if result.record(id, "death zone elimination", eliminated) {
        debug!("{} entered a death zone", participant.name);
        result.events.push(RegionEvent::DeathZone { participant: id, life_adjusted });
    }
}

fn apply_win(participant: &Participant, host: &mut dyn MatchHost, result: &mut TickResult) {
    let winner = participant.id;
    let opponents: Vec<ParticipantId> = match (&participant.team, host.is_free_for_all()) {
        (Some(team), false) => host
            .teams()
            .into_iter()
            .filter(|t| t != team)
            .flat_map(|t| host.team_members(&t))
            .collect(),
        _ => host.participant_ids().into_iter().filter(|&other| other != winner).collect(),
    };

    let mut eliminated = Vec::new();
    for other in opponents {
        if is_fighting(host, other) {
            let outcome = host.eliminate(other, EliminationCause::WinZone);
            if result.record(other, "win zone elimination", outcome) {
                eliminated.push(other);
            }
        }
    }
    debug!("{} reached a win zone, {} eliminated", participant.name, eliminated.len());
    result.events.push(RegionEvent::Won { participant: winner, eliminated });
}

/// Returns true when the rule is resolved for the rest of the tick.
fn apply_lose(participant: &Participant, host: &mut dyn MatchHost, result: &mut TickResult) -> bool {
    let loser = participant.id;
    let (members, resolved) = match (&participant.team, host.is_free_for_all()) {
        (Some(team), false) => (host.team_members(team), true),
        _ => (vec![loser], false),
    };

    let mut eliminated = Vec::new();
    for member in members {
        if is_fighting(host, member) {
            let outcome = host.eliminate(member, EliminationCause::LoseZone);
            if result.record(member, "lose zone elimination", outcome) {
                eliminated.push(member);
            }
        }
    }
    debug!("{} reached a lose zone, {} eliminated", participant.name, eliminated.len());
    result.events.push(RegionEvent::Lost { participant: loser, eliminated });
    resolved
}

fn check_camping(
    region: &mut Region,
    id: ParticipantId,
    position: &Point,
    camping: bool,
    host: &mut dyn MatchHost,
    result: &mut TickResult,
) {
    if !camping {
        region.camp_positions.remove(&id);
        return;
    }

    if let Some(previous) = region.camp_positions.get(&id) {
        match previous.distance(position) {
            Ok(moved) if moved < CAMP_DISTANCE => {
                let amount = host.config().spawn_camp_damage;
                let outcome = host.damage(id, amount, DamageCause::SpawnCamp);
                if result.record(id, "spawn camp damage", outcome) {
                    result.events.push(RegionEvent::CampDamage { participant: id, amount });
                }
            }
            Ok(_) => {}
            Err(e) => debug!("Camp cache for {} reset: {}", id, e),
        }
    }
    region.camp_positions.insert(id, position.block_point());
}

fn apply_escape(id: ParticipantId, ty: RegionType, host: &mut dyn MatchHost, result: &mut TickResult) {
    host.notify(id, Notice::Escaped);
    let eliminate = ty == RegionType::Battle && host.config().leave_death;
    let outcome = if eliminate {
        host.eliminate(id, EliminationCause::Escaped)
    } else {
        host.force_leave(id, ExitReason::Escaped)
    };
    if result.record(id, "escape", outcome) {
        result.events.push(RegionEvent::Escaped {
            participant: id,
            region_type: ty,
            eliminated: eliminate,
        });
    }
}

fn run_join(region: &Region, host: &mut dyn MatchHost, result: &mut TickResult) {
    if !host.config().force_join {
        result.stop_timer = true;
        return;
    }
    if host.is_fight_in_progress() || host.is_locked() {
        return;
    }

    let target = join_target(&region.name);
    for player in host.online_unassigned() {
        if !region.contains(&player.position) {
            continue;
        }
        let outcome = host.trigger_join(target, player.id);
        if result.record(player.id, "forced join", outcome) {
            debug!("{} forced into '{}'", player.name, target);
            result.events.push(RegionEvent::ForcedJoin {
                player: player.id,
                target: target.to_string(),
            });
        }
    }
}

/// Region name with a trailing "-join" (any case) removed.
pub fn join_target(name: &str) -> &str {
    const SUFFIX: &str = "-join";
    name.len()
        .checked_sub(SUFFIX.len())
        .and_then(|split| {
            let tail = name.get(split..)?;
            tail.eq_ignore_ascii_case(SUFFIX).then(|| &name[..split])
        })
        .unwrap_or(name)
}

// =============================================================================
// TESTS
// =============================================================================
