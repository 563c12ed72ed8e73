//! Region Tags
//!
//! Region types, behavioral flags and protection tags.
//!
//! Flags and protections pack into bitmasks for compact persistence. Each
//! variant owns an explicit, stable bit: reordering the enums never changes
//! a stored mask.

use std::collections::BTreeSet;
use std::fmt;
use serde::{Serialize, Deserialize};

// =============================================================================
// REGION TYPE
// =============================================================================

/// Semantic role of a region within its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionType {
    /// No built-in behavior
    Custom,
    /// Spectator area
    Watch,
    /// Pre-match waiting area
    Lounge,
    /// Fighting area
    Battle,
    /// Forced-join area
    Join,
    /// Spawn area
    Spawn,
    /// Inventory blacklist area
    BlInv,
    /// Inventory whitelist area
    WlInv,
}

impl RegionType {
    /// All types, in name-guessing order.
    pub const ALL: [RegionType; 8] = [
        RegionType::Custom,
        RegionType::Watch,
        RegionType::Lounge,
        RegionType::Battle,
        RegionType::Join,
        RegionType::Spawn,
        RegionType::BlInv,
        RegionType::WlInv,
    ];

    /// Upper-case tag name.
    pub const fn name(self) -> &'static str {
        match self {
            RegionType::Custom => "CUSTOM",
            RegionType::Watch => "WATCH",
            RegionType::Lounge => "LOUNGE",
            RegionType::Battle => "BATTLE",
            RegionType::Join => "JOIN",
            RegionType::Spawn => "SPAWN",
            RegionType::BlInv => "BL_INV",
            RegionType::WlInv => "WL_INV",
        }
    }

    /// Parse an exact tag name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::ALL.into_iter().find(|ty| ty.name() == upper)
    }

    /// Infer the type from a region name: the first type whose tag is a
    /// prefix or suffix of the upper-cased name. Defaults to CUSTOM.
    pub fn guess_from_name(region_name: &str) -> Self {
        let upper = region_name.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|ty| upper.starts_with(ty.name()) || upper.ends_with(ty.name()))
            .unwrap_or(RegionType::Custom)
    }

    /// JOIN, WATCH and LOUNGE timers survive re-arming and match resets.
    pub const fn is_persistent(self) -> bool {
        matches!(self, RegionType::Join | RegionType::Watch | RegionType::Lounge)
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// BIT PACKING
// =============================================================================

/// A tag with a stable bit position.
pub trait BitFlag: Copy + Ord + 'static {
    /// Every variant.
    const VARIANTS: &'static [Self];

    /// Stable bit index.
    fn bit(self) -> u32;

    /// Mask with this tag's bit set.
    fn mask(self) -> u32 {
        1 << self.bit()
    }
}

/// Pack a tag set into a bitmask.
pub fn pack<T: BitFlag>(set: &BTreeSet<T>) -> u32 {
    set.iter().fold(0, |acc, tag| acc | tag.mask())
}

/// Unpack a bitmask. Unknown bits are ignored.
pub fn unpack<T: BitFlag>(bits: u32) -> BTreeSet<T> {
    T::VARIANTS
        .iter()
        .copied()
        .filter(|tag| bits & tag.mask() != 0)
        .collect()
}

// =============================================================================
// FLAGS
// =============================================================================

/// Behavioral flag evaluated by the tick rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionFlag {
    /// Damage participants who stay in place
    NoCamp,
    /// Eliminate participants who enter
    Death,
    /// Entering wins the match for the participant's side
    Win,
    /// Entering loses the match for the participant's side
    Lose,
    /// Participants inside take no damage (read by the event layer)
    NoDamage,
}

impl BitFlag for RegionFlag {
    const VARIANTS: &'static [Self] = &[
        RegionFlag::NoCamp,
        RegionFlag::Death,
        RegionFlag::Win,
        RegionFlag::Lose,
        RegionFlag::NoDamage,
    ];

    fn bit(self) -> u32 {
        match self {
            RegionFlag::NoCamp => 0,
            RegionFlag::Death => 1,
            RegionFlag::Win => 2,
            RegionFlag::Lose => 3,
            RegionFlag::NoDamage => 4,
        }
    }
}

impl RegionFlag {
    /// Upper-case tag name.
    pub const fn name(self) -> &'static str {
        match self {
            RegionFlag::NoCamp => "NOCAMP",
            RegionFlag::Death => "DEATH",
            RegionFlag::Win => "WIN",
            RegionFlag::Lose => "LOSE",
            RegionFlag::NoDamage => "NODAMAGE",
        }
    }

    /// Parse a tag name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::VARIANTS.iter().copied().find(|f| f.name() == upper)
    }
}

// =============================================================================
// PROTECTIONS
// =============================================================================

/// World-mutation permission tag. Read by the host's event layer, never by
/// the tick rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionProtection {
    /// Block breaking
    Break,
    /// Fire spread and ignition
    Fire,
    /// Mob spawning
    Mobs,
    /// Natural growth and decay
    Nature,
    /// Painting and item frame changes
    Painting,
    /// Piston movement
    Piston,
    /// Block placing
    Place,
    /// TNT ignition
    Tnt,
    /// Block damage from TNT
    TntBreak,
    /// Item dropping
    Drop,
    /// Container access
    Inventory,
    /// Item pickup
    Pickup,
    /// Crafting
    Craft,
    /// Teleporting in or out
    Teleport,
}

impl BitFlag for RegionProtection {
    const VARIANTS: &'static [Self] = &[
        RegionProtection::Break,
        RegionProtection::Fire,
        RegionProtection::Mobs,
        RegionProtection::Nature,
        RegionProtection::Painting,
        RegionProtection::Piston,
        RegionProtection::Place,
        RegionProtection::Tnt,
        RegionProtection::TntBreak,
        RegionProtection::Drop,
        RegionProtection::Inventory,
        RegionProtection::Pickup,
        RegionProtection::Craft,
        RegionProtection::Teleport,
    ];

    fn bit(self) -> u32 {
        match self {
            RegionProtection::Break => 0,
            RegionProtection::Fire => 1,
            RegionProtection::Mobs => 2,
            RegionProtection::Nature => 3,
            RegionProtection::Painting => 4,
            RegionProtection::Piston => 5,
            RegionProtection::Place => 6,
            RegionProtection::Tnt => 7,
            RegionProtection::TntBreak => 8,
            RegionProtection::Drop => 9,
            RegionProtection::Inventory => 10,
            RegionProtection::Pickup => 11,
            RegionProtection::Craft => 12,
            RegionProtection::Teleport => 13,
        }
    }
}

impl RegionProtection {
    /// Upper-case tag name.
    pub const fn name(self) -> &'static str {
        match self {
            RegionProtection::Break => "BREAK",
            RegionProtection::Fire => "FIRE",
            RegionProtection::Mobs => "MOBS",
            RegionProtection::Nature => "NATURE",
            RegionProtection::Painting => "PAINTING",
            RegionProtection::Piston => "PISTON",
            RegionProtection::Place => "PLACE",
            RegionProtection::Tnt => "TNT",
            RegionProtection::TntBreak => "TNTBREAK",
            RegionProtection::Drop => "DROP",
            RegionProtection::Inventory => "INVENTORY",
            RegionProtection::Pickup => "PICKUP",
            RegionProtection::Craft => "CRAFT",
            RegionProtection::Teleport => "TELEPORT",
        }
    }

    /// Parse a tag name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::VARIANTS.iter().copied().find(|p| p.name() == upper)
    }
}

// =============================================================================
// TESTS
// =============================================================================
