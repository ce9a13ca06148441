//! Vertical slot assignment
//!
//! Slots are assigned bottom-up one stage at a time. A leaf takes its index
//! within its group; every later match is centered on the midpoint of its
//! two children's centers. A card spans one slot unit, so
//! `center(x) = slot(x) + 0.5`.

use std::collections::HashMap;

use crate::record::{MatchId, Stage};

use super::partition::{Group, OrganizedBracket};
use super::topology::Topology;
use super::types::Slot;

/// Vertical extent of one card in slot units
pub const CARD_EXTENT: f64 = 1.0;

/// Center of a card placed at `slot`
pub fn center(slot: f64) -> f64 {
    slot + CARD_EXTENT / 2.0
}

/// Slot of a parent centered between two children
pub fn centered_between(a: f64, b: f64) -> f64 {
    (center(a) + center(b)) / 2.0 - CARD_EXTENT / 2.0
}

/// Assign a slot to every node of the organized bracket
///
/// A node whose two children are not both present and positioned gets
/// [`Slot::Placeholder`]: a best-effort default for a round that is not
/// decided yet, not a real position.
pub fn assign_slots(organized: &mut OrganizedBracket, topology: &Topology) {
    let mut assigned: HashMap<MatchId, Slot> = HashMap::new();

    for stage in Stage::ALL {
        for group in Group::ALL.into_iter().filter(|g| g.stage() == stage) {
            for (index, node) in organized.group_mut(group).iter_mut().enumerate() {
                node.slot = match topology.children(node.id()) {
                    Ok(None) => Slot::Positioned(index as f64),
                    Ok(Some([a, b])) => {
                        let a = assigned.get(&a).and_then(Slot::position);
                        let b = assigned.get(&b).and_then(Slot::position);
                        match (a, b) {
                            (Some(a), Some(b)) => Slot::Positioned(centered_between(a, b)),
                            _ => Slot::Placeholder,
                        }
                    }
                    Err(_) => Slot::Placeholder,
                };
                assigned.insert(node.id(), node.slot);
            }
        }
    }

    let placeholders = organized.nodes().filter(|n| n.slot.is_placeholder()).count();
    if placeholders > 0 {
        log::debug!("{} matches pinned to the placeholder slot", placeholders);
    }
}
