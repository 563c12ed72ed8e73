//! Border Display
//!
//! Temporary marking of a region's outline. Marking hands out a
//! [`BorderToken`]; the cells are reverted exactly once, when the token is
//! released, dropped, or expired by [`BorderDisplay::expire`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::core::point::{BlockPos, WorldId};

/// Renders and reverts marked cells. Implemented by the host's visual layer.
pub trait BorderMarker: Send + Sync {
    /// Temporarily mark the cells.
    fn mark(&self, world: &WorldId, cells: &[BlockPos]);

    /// Restore the cells to their real state.
    fn revert(&self, world: &WorldId, cells: &[BlockPos]);
}

// =============================================================================
// TOKEN
// =============================================================================

/// Scoped guard over a set of marked cells.
pub struct BorderToken {
    world: WorldId,
    cells: Vec<BlockPos>,
    marker: Arc<dyn BorderMarker>,
    released: bool,
}

impl BorderToken {
    /// Mark `cells` and return the guard that reverts them.
    pub fn acquire(world: WorldId, cells: Vec<BlockPos>, marker: Arc<dyn BorderMarker>) -> Self {
        marker.mark(&world, &cells);
        Self {
            world,
            cells,
            marker,
            released: false,
        }
    }

    /// Marked cells.
    pub fn cells(&self) -> &[BlockPos] {
        &self.cells
    }

    /// World the cells live in.
    pub fn world(&self) -> &WorldId {
        &self.world
    }

    /// Revert now.
    pub fn release(mut self) {
        self.revert_once();
    }

    fn revert_once(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.marker.revert(&self.world, &self.cells);
    }
}

impl Drop for BorderToken {
    fn drop(&mut self) {
        self.revert_once();
    }
}

impl fmt::Debug for BorderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorderToken")
            .field("world", &self.world)
            .field("cells", &self.cells.len())
            .field("released", &self.released)
            .finish()
    }
}

// =============================================================================
// DISPLAY
// =============================================================================

/// Active border displays keyed by region name, each with an expiry tick.
#[derive(Debug, Default)]
pub struct BorderDisplay {
    active: BTreeMap<String, (BorderToken, u64)>,
}

impl BorderDisplay {
    /// Empty display set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a region's border until `now + ttl`.
    ///
    /// A border already shown for the region is reverted first.
    pub fn show(
        &mut self,
        region: &str,
        world: WorldId,
        cells: Vec<BlockPos>,
        marker: Arc<dyn BorderMarker>,
        now: u64,
        ttl: u64,
    ) {
        if let Some((old, _)) = self.active.remove(region) {
            old.release();
        }
        debug!("Showing border of '{}' ({} cells) until tick {}", region, cells.len(), now + ttl);
        let token = BorderToken::acquire(world, cells, marker);
        self.active.insert(region.to_string(), (token, now + ttl));
    }

    /// Revert a region's border early. Returns false if none was shown.
    pub fn hide(&mut self, region: &str) -> bool {
        match self.active.remove(region) {
            Some((token, _)) => {
                token.release();
                true
            }
            None => false,
        }
    }

    /// Revert every border whose expiry tick has passed. Returns the number reverted.
    pub fn expire(&mut self, now: u64) -> usize {
        let expired: Vec<String> = self
            .active
            .iter()
            .filter(|(_, (_, until))| *until <= now)
            .map(|(name, _)| name.clone())
            .collect();
        for name in &expired {
            if let Some((token, _)) = self.active.remove(name) {
                token.release();
            }
        }
        expired.len()
    }

    /// True if a border is currently shown for the region.
    pub fn is_shown(&self, region: &str) -> bool {
        self.active.contains_key(region)
    }

    /// Number of active displays.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True if nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMarker {
        marked: Mutex<usize>,
        reverted: Mutex<usize>,
    }

    impl BorderMarker for RecordingMarker {
        fn mark(&self, _world: &WorldId, cells: &[BlockPos]) {
            *self.marked.lock().unwrap() += cells.len();
        }

        fn revert(&self, _world: &WorldId, cells: &[BlockPos]) {
            *self.reverted.lock().unwrap() += cells.len();
        }
    }

    fn cells() -> Vec<BlockPos> {
        vec![BlockPos::new(0, 64, 0), BlockPos::new(1, 64, 0)]
    }

    #[test]
    fn test_token_reverts_once_on_release() {
        let marker = Arc::new(RecordingMarker::default());
        let token = BorderToken::acquire(WorldId::new("arena"), cells(), marker.clone());
        assert_eq!(*marker.marked.lock().unwrap(), 2);
        token.release();
        assert_eq!(*marker.reverted.lock().unwrap(), 2);
    }

    #[test]
    fn test_token_reverts_on_drop() {
        let marker = Arc::new(RecordingMarker::default());
        {
            let _token = BorderToken::acquire(WorldId::new("arena"), cells(), marker.clone());
        }
        assert_eq!(*marker.reverted.lock().unwrap(), 2);
    }

    #[test]
    fn test_display_replaces_and_expires() {
        let marker = Arc::new(RecordingMarker::default());
        let mut display = BorderDisplay::new();
        display.show("red-join", WorldId::new("arena"), cells(), marker.clone(), 0, 100);
        display.show("red-join", WorldId::new("arena"), cells(), marker.clone(), 10, 100);
        assert_eq!(display.len(), 1);
        // First display reverted on replace
        assert_eq!(*marker.reverted.lock().unwrap(), 2);

        assert_eq!(display.expire(50), 0);
        assert_eq!(display.expire(110), 1);
        assert!(display.is_empty());
        assert_eq!(*marker.reverted.lock().unwrap(), 4);
    }

    #[test]
    fn test_display_hide() {
        let marker = Arc::new(RecordingMarker::default());
        let mut display = BorderDisplay::new();
        display.show("battle", WorldId::new("arena"), cells(), marker.clone(), 0, 100);
        assert!(display.is_shown("battle"));
        assert!(display.hide("battle"));
        assert!(!display.hide("battle"));
        assert_eq!(*marker.reverted.lock().unwrap(), 2);
    }
}
