//! Reconciliation of hinted rectangles with positions measured by a host UI
//!
//! Flexible-box layout in the host may move cards a few pixels away from
//! the hinted rectangles. After a render pass the host reports what it
//! actually measured, and connectors are drawn against those positions.

use std::collections::HashMap;

use crate::record::MatchId;

use super::columns::RectMap;
use super::types::BoundingBox;

/// Card rectangles measured by the rendering layer, keyed by match id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedRects {
    rects: HashMap<MatchId, BoundingBox>,
}

impl ObservedRects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the measured rectangle of a card, replacing any earlier one
    pub fn record(&mut self, id: MatchId, rect: BoundingBox) {
        self.rects.insert(id, rect);
    }

    pub fn with(mut self, id: MatchId, rect: BoundingBox) -> Self {
        self.record(id, rect);
        self
    }

    pub fn get(&self, id: MatchId) -> Option<&BoundingBox> {
        self.rects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl FromIterator<(MatchId, BoundingBox)> for ObservedRects {
    fn from_iter<T: IntoIterator<Item = (MatchId, BoundingBox)>>(iter: T) -> Self {
        Self {
            rects: iter.into_iter().collect(),
        }
    }
}

/// Prefer observed rectangles over hinted ones
///
/// Only matches present in `hinted` are kept. Observed rectangles with a
/// non-finite component are discarded.
pub fn reconcile(hinted: &RectMap, observed: &ObservedRects) -> RectMap {
    for id in observed.rects.keys() {
        if !hinted.contains_key(id) {
            log::debug!("ignoring observed rect for match {} outside the layout", id);
        }
    }

    hinted
        .iter()
        .map(|(id, hint)| {
            let rect = match observed.get(*id) {
                Some(seen) if seen.is_finite() => *seen,
                Some(seen) => {
                    log::warn!("discarding non-finite observed rect {:?} for match {}", seen, id);
                    *hint
                }
                None => *hint,
            };
            (*id, rect)
        })
        .collect()
}
