//! Arena Configuration
//!
//! Per-arena settings read by the region engine.

use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Settings the tick rules and timers read from the owning arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Region timer period in host ticks (initial delay and repeat)
    pub tick_interval: u32,
    /// Damage per tick for standing still in a NOCAMP region
    pub spawn_camp_damage: f64,
    /// Escaping the battlefield eliminates instead of forcing a leave
    pub leave_death: bool,
    /// JOIN regions pull unassigned players into the match
    pub force_join: bool,
    /// How long a shown border stays marked, in host ticks
    pub border_display_ticks: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_interval: 10,
            spawn_camp_damage: 1.0,
            leave_death: false,
            force_join: false,
            border_display_ticks: 100, // 5 seconds at 20 Hz
        }
    }
}

impl ArenaConfig {
    /// Parse from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval == 0 {
            return Err(ConfigError::Invalid {
                key: "tick_interval",
                reason: "must be at least 1".into(),
            });
        }
        if !self.spawn_camp_damage.is_finite() || self.spawn_camp_damage < 0.0 {
            return Err(ConfigError::Invalid {
                key: "spawn_camp_damage",
                reason: format!("{} is not a non-negative number", self.spawn_camp_damage),
            });
        }
        Ok(())
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.get(key).cloned())
    }

    /// Integer setting by key.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.lookup(key).and_then(|v| v.as_i64())
    }

    /// Boolean setting by key.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.lookup(key).and_then(|v| v.as_bool())
    }

    /// Setting by key rendered as a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
