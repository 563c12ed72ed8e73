//! Region Timers
//!
//! A deterministic scheduler driven by host ticks, and the per-region timer
//! that is the only code allowed to start or stop a region's task.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use tracing::{debug, trace};

use super::kind::RegionType;

/// Handle of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

#[derive(Clone, Debug)]
struct Task {
    owner: String,
    interval: u64,
    next_due: u64,
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// Repeating tasks keyed by id, fired by [`Scheduler::advance`].
#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    tasks: BTreeMap<TaskId, Task>,
}

impl Scheduler {
    /// Empty scheduler at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current host tick.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule a repeating task. The interval is both the initial delay and
    /// the period; zero is treated as one.
    pub fn schedule_repeating(&mut self, owner: &str, interval: u64) -> TaskId {
        let interval = interval.max(1);
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            Task {
                owner: owner.to_string(),
                interval,
                next_due: self.now + interval,
            },
        );
        debug!("Scheduled task {} for '{}' every {} ticks", id.0, owner, interval);
        id
    }

    /// Cancel a task. Cancelling an unknown or cancelled task is a no-op
    /// returning false.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.remove(&id) {
            Some(task) => {
                debug!("Cancelled task {} for '{}'", id.0, task.owner);
                true
            }
            None => false,
        }
    }

    /// True if the task is scheduled.
    pub fn is_active(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Owner name of an active task.
    pub fn owner(&self, id: TaskId) -> Option<&str> {
        self.tasks.get(&id).map(|t| t.owner.as_str())
    }

    /// Number of scheduled tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance one host tick and return the tasks due, in id order.
    pub fn advance(&mut self) -> Vec<TaskId> {
        self.now += 1;
        let now = self.now;
        let mut due = Vec::new();
        for (id, task) in self.tasks.iter_mut() {
            if task.next_due <= now {
                task.next_due = now + task.interval;
                due.push(*id);
            }
        }
        if !due.is_empty() {
            trace!("Tick {}: {} tasks due", now, due.len());
        }
        due
    }
}

// =============================================================================
// REGION TIMER
// =============================================================================

/// A region's periodic task handle. At most one task is active at a time.
#[derive(Debug, Default)]
pub struct RegionTimer {
    handle: Option<TaskId>,
}

impl RegionTimer {
    /// Unarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current task, if any.
    pub fn handle(&self) -> Option<TaskId> {
        self.handle
    }

    /// True if the timer's task is still scheduled.
    pub fn is_armed(&self, scheduler: &Scheduler) -> bool {
        self.handle.is_some_and(|id| scheduler.is_active(id))
    }

    /// Arm the timer.
    ///
    /// A running JOIN/WATCH/LOUNGE task is kept alive. Any other running task
    /// is cancelled and replaced.
    pub fn init(&mut self, scheduler: &mut Scheduler, owner: &str, ty: RegionType, interval: u32) -> TaskId {
        if let Some(id) = self.handle {
            if scheduler.is_active(id) {
                if ty.is_persistent() {
                    return id;
                }
                scheduler.cancel(id);
            }
        }
        let id = scheduler.schedule_repeating(owner, interval as u64);
        self.handle = Some(id);
        id
    }

    /// Stop the timer. Idempotent.
    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.handle.take() {
            scheduler.cancel(id);
        }
    }

    /// True if `id` is this timer's task.
    pub fn owns(&self, id: TaskId) -> bool {
        self.handle == Some(id)
    }
}

/// Gate applied each time a region's task fires.
///
/// JOIN runs when no fight is in progress, or mid-fight if the goal allows
/// joining. WATCH and LOUNGE always run. Everything else needs a fight.
pub fn should_evaluate(ty: RegionType, fight_in_progress: bool, goal_allows_join: bool) -> bool {
    match ty {
        RegionType::Join => (fight_in_progress && goal_allows_join) || !fight_in_progress,
        RegionType::Watch | RegionType::Lounge => true,
        _ => fight_in_progress,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_interval_is_delay_and_period() {
        let mut s = Scheduler::new();
        let id = s.schedule_repeating("battle", 3);
        assert!(s.advance().is_empty());
        assert!(s.advance().is_empty());
        assert_eq!(s.advance(), vec![id]);
        assert!(s.advance().is_empty());
        assert!(s.advance().is_empty());
        assert_eq!(s.advance(), vec![id]);
    }

    #[test]
    fn test_scheduler_zero_interval() {
        let mut s = Scheduler::new();
        let id = s.schedule_repeating("battle", 0);
        assert_eq!(s.advance(), vec![id]);
        assert_eq!(s.advance(), vec![id]);
    }

    #[test]
    fn test_due_tasks_in_id_order() {
        let mut s = Scheduler::new();
        let a = s.schedule_repeating("a", 1);
        let b = s.schedule_repeating("b", 1);
        assert_eq!(s.advance(), vec![a, b]);
        assert_eq!(s.owner(b), Some("b"));
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let mut s = Scheduler::new();
        let mut timer = RegionTimer::new();
        timer.init(&mut s, "battle", RegionType::Battle, 10);
        assert_eq!(s.active_count(), 1);

        timer.cancel(&mut s);
        assert_eq!(s.active_count(), 0);
        assert_eq!(timer.handle(), None);

        timer.cancel(&mut s);
        assert_eq!(s.active_count(), 0);
        assert_eq!(timer.handle(), None);
        assert!(!s.cancel(TaskId(0)));
    }

    #[test]
    fn test_init_replaces_non_persistent_task() {
        let mut s = Scheduler::new();
        let mut timer = RegionTimer::new();
        let first = timer.init(&mut s, "battle", RegionType::Battle, 10);
        let second = timer.init(&mut s, "battle", RegionType::Battle, 10);
        assert_ne!(first, second);
        assert!(!s.is_active(first));
        assert_eq!(s.active_count(), 1);
    }

    #[test]
    fn test_init_keeps_persistent_task() {
        let mut s = Scheduler::new();
        let mut timer = RegionTimer::new();
        let first = timer.init(&mut s, "red-join", RegionType::Join, 10);
        let second = timer.init(&mut s, "red-join", RegionType::Join, 10);
        assert_eq!(first, second);
        assert_eq!(s.active_count(), 1);

        // Re-armed if the task was cancelled elsewhere
        s.cancel(first);
        let third = timer.init(&mut s, "red-join", RegionType::Join, 10);
        assert_ne!(first, third);
        assert!(timer.is_armed(&s));
    }

    #[test]
    fn test_should_evaluate_gate() {
        assert!(should_evaluate(RegionType::Join, false, false));
        assert!(should_evaluate(RegionType::Join, true, true));
        assert!(!should_evaluate(RegionType::Join, true, false));
        assert!(should_evaluate(RegionType::Watch, false, false));
        assert!(should_evaluate(RegionType::Lounge, true, false));
        assert!(should_evaluate(RegionType::Battle, true, false));
        assert!(!should_evaluate(RegionType::Battle, false, true));
        assert!(!should_evaluate(RegionType::Custom, false, false));
    }
}
