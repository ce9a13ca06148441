//! Layout engine for knockout brackets
//!
//! This module takes a flat list of match records and a bracket template and
//! produces an organized, positioned bracket: topology resolution, stage
//! partitioning, slot assignment, then pixel rectangles and connectors.

pub mod columns;
pub mod config;
pub mod error;
pub mod lint;
pub mod observed;
pub mod partition;
pub mod routing;
pub mod slots;
pub mod topology;
pub mod types;

pub use columns::{hinted_rects, position, RectMap, VisualColumns};
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use observed::{reconcile, ObservedRects};
pub use partition::{partition, Bracket, Group, OrganizedBracket};
pub use routing::{connectors, Connector, Segment};
pub use slots::assign_slots;
pub use topology::Topology;
pub use types::*;

use serde::Serialize;

use crate::record::{MatchId, MatchRecord, RecordError, SideSlot, Stage};
use crate::template::BracketTemplate;

/// Resolve topology, partition and assign slots
///
/// Never fails as a whole: matches that cannot be placed are reported in
/// [`Bracket::issues`] and the rest of the bracket is still organized.
pub fn organize(records: &[MatchRecord], template: &BracketTemplate) -> Bracket {
    let topology = Topology::new(template);
    let mut bracket = partition(records, &topology);
    assign_slots(&mut bracket.organized, &topology);
    bracket
}

/// A positioned match card ready for a rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: MatchId,
    pub stage: Stage,
    pub half: Option<Half>,
    pub parent: Option<MatchId>,
    pub column: Column,
    pub visual_column: usize,
    pub slot: Slot,
    pub rect: BoundingBox,
    pub side1: String,
    pub side2: String,
    pub winner: Option<SideSlot>,
}

/// Complete layout output: cards, connectors and the issues met on the way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketLayout {
    /// Cards in column order, left to right, then group order
    pub cards: Vec<Card>,
    pub connectors: Vec<Connector>,
    /// Smallest box containing every card
    pub bounds: BoundingBox,
    /// Number of visual columns after compaction
    pub columns: usize,
    pub issues: Vec<LayoutError>,
    /// Records rejected at the input boundary
    pub rejected: Vec<RecordError>,
}

impl BracketLayout {
    pub fn card(&self, id: MatchId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// Compute hinted rectangles and connectors for an organized bracket
pub fn compute(bracket: &Bracket, config: &LayoutConfig) -> BracketLayout {
    compute_observed(bracket, config, &ObservedRects::default())
}

/// Like [`compute`], but with rectangles measured by the host UI taking
/// precedence over the hinted ones
pub fn compute_observed(
    bracket: &Bracket,
    config: &LayoutConfig,
    observed: &ObservedRects,
) -> BracketLayout {
    let organized = &bracket.organized;
    let hinted = hinted_rects(organized, config);
    let rects = if observed.is_empty() {
        hinted
    } else {
        reconcile(&hinted, observed)
    };
    let visual = VisualColumns::compute(organized);

    let mut cards = Vec::with_capacity(organized.len());
    for column in Column::ALL {
        let Some(visual_column) = visual.index(column) else {
            continue;
        };
        for node in organized.column(column) {
            let Some(rect) = rects.get(&node.id()) else {
                continue;
            };
            cards.push(Card {
                id: node.id(),
                stage: node.stage(),
                half: node.half,
                parent: node.parent,
                column,
                visual_column,
                slot: node.slot,
                rect: *rect,
                side1: node.record.side1.display_name().to_string(),
                side2: node.record.side2.display_name().to_string(),
                winner: node.record.winner_side(),
            });
        }
    }

    let bounds = cards
        .iter()
        .map(|c| c.rect)
        .reduce(|acc, r| acc.union(&r))
        .unwrap_or_default();

    BracketLayout {
        connectors: connectors(organized, &rects),
        cards,
        bounds,
        columns: visual.count(),
        issues: bracket.issues.clone(),
        rejected: Vec::new(),
    }
}
