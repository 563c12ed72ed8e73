//! Operator selections: per-participant first/second corner used to define
//! new regions.

use std::collections::BTreeMap;

use crate::arena::host::ParticipantId;
use crate::core::point::{Point, WorldId};
use crate::error::RegionError;

#[derive(Clone, Debug)]
struct Selection {
    world: WorldId,
    first: Option<Point>,
    second: Option<Point>,
}

/// Per-participant two-corner selection, reset when the world changes.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selections: BTreeMap<ParticipantId, Selection>,
}

impl SelectionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first or second corner. Selecting in another world discards
    /// the other corner.
    pub fn set_pos(&mut self, id: ParticipantId, point: Point, is_first: bool) {
        let entry = self.selections.entry(id).or_insert_with(|| Selection {
            world: point.world.clone(),
            first: None,
            second: None,
        });
        if entry.world != point.world {
            *entry = Selection {
                world: point.world.clone(),
                first: None,
                second: None,
            };
        }
        if is_first {
            entry.first = Some(point);
        } else {
            entry.second = Some(point);
        }
    }

    /// Both corners, if set.
    pub fn get(&self, id: ParticipantId) -> Option<(Point, Point)> {
        let selection = self.selections.get(&id)?;
        let first = selection.first.clone()?;
        let second = selection.second.clone()?;
        Some((first, second))
    }

    /// Remove and return a complete selection.
    pub fn take(&mut self, id: ParticipantId) -> Result<(Point, Point), RegionError> {
        let corners = self.get(id).ok_or(RegionError::IncompleteSelection)?;
        self.selections.remove(&id);
        Ok(corners)
    }

    /// Forget a participant's selection.
    pub fn clear(&mut self, id: ParticipantId) {
        self.selections.remove(&id);
    }
}
