//! Column compaction and hinted card rectangles

use std::collections::BTreeMap;

use crate::record::MatchId;

use super::config::LayoutConfig;
use super::partition::OrganizedBracket;
use super::types::{BoundingBox, BracketNode, Column};

/// Card rectangles keyed by match id
pub type RectMap = BTreeMap<MatchId, BoundingBox>;

/// Visual positions of the nine logical columns after empty ones are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualColumns {
    indices: [Option<usize>; 9],
    count: usize,
}

impl VisualColumns {
    /// Number the non-empty columns left to right
    pub fn compute(organized: &OrganizedBracket) -> Self {
        let mut indices = [None; 9];
        let mut count = 0;
        for column in Column::ALL {
            if organized.column(column).next().is_some() {
                indices[column.index()] = Some(count);
                count += 1;
            }
        }
        Self { indices, count }
    }

    /// Visual index of a column; `None` when the column holds no matches
    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices[column.index()]
    }

    /// Number of columns actually drawn
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Idealized rectangle of a card in the given visual column
pub fn hinted_rect(visual_column: usize, slot: f64, config: &LayoutConfig) -> BoundingBox {
    BoundingBox::new(
        visual_column as f64 * config.column_stride() + config.column_width / 2.0
            - config.card_width / 2.0,
        slot * config.vertical_spacing,
        config.card_width,
        config.card_height,
    )
}

fn node_rect(node: &BracketNode, columns: &VisualColumns, config: &LayoutConfig) -> Option<BoundingBox> {
    let visual = columns.index(node.column()?)?;
    Some(hinted_rect(visual, node.slot.value(), config))
}

/// Hinted rectangles for every node, without touching the bracket
///
/// The same organized bracket can be laid out again at a different spacing
/// without resolving its topology.
pub fn hinted_rects(organized: &OrganizedBracket, config: &LayoutConfig) -> RectMap {
    let columns = VisualColumns::compute(organized);
    organized
        .nodes()
        .filter_map(|node| node_rect(node, &columns, config).map(|rect| (node.id(), rect)))
        .collect()
}

/// Store hinted rectangles on the nodes themselves
pub fn position(organized: &mut OrganizedBracket, config: &LayoutConfig) {
    let columns = VisualColumns::compute(organized);
    for node in organized.nodes_mut() {
        node.rect = node_rect(node, &columns, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Half, Slot};
    use crate::record::{MatchRecord, Stage};

    fn node(id: u32, stage: Stage, half: Option<Half>, slot: f64) -> BracketNode {
        let mut node = BracketNode::new(MatchRecord::new(id, stage), half, None);
        node.slot = Slot::Positioned(slot);
        node
    }

    #[test]
    fn test_compaction_without_later_rounds() {
        let organized = OrganizedBracket {
            round32_left: vec![node(74, Stage::Round32, Some(Half::Left), 0.0)],
            round32_right: vec![node(76, Stage::Round32, Some(Half::Right), 0.0)],
            ..Default::default()
        };
        let columns = VisualColumns::compute(&organized);
        assert_eq!(columns.index(Column::Round32Left), Some(0));
        assert_eq!(columns.index(Column::Round32Right), Some(1));
        assert_eq!(columns.index(Column::Final), None);
        assert_eq!(columns.count(), 2);
    }

    #[test]
    fn test_hinted_rect_formula() {
        let config = LayoutConfig::new()
            .with_card_size(100.0, 40.0)
            .with_column_width(120.0)
            .with_gutter(20.0)
            .with_vertical_spacing(50.0);
        let rect = hinted_rect(2, 1.5, &config);
        assert_eq!(rect, BoundingBox::new(2.0 * 140.0 + 60.0 - 50.0, 75.0, 100.0, 40.0));
    }

    #[test]
    fn test_position_matches_hinted_rects() {
        let mut organized = OrganizedBracket {
            semi: vec![
                node(101, Stage::Semi, Some(Half::Left), 3.5),
                node(102, Stage::Semi, Some(Half::Right), 3.5),
            ],
            finals: vec![node(104, Stage::Final, None, 3.5)],
            ..Default::default()
        };
        let config = LayoutConfig::default();
        let rects = hinted_rects(&organized, &config);
        position(&mut organized, &config);

        for n in organized.nodes() {
            assert_eq!(n.rect.as_ref(), rects.get(&n.id()));
        }
        // semi-left, final, semi-right occupy visual columns 0, 1, 2
        assert!(rects[&MatchId(101)].x < rects[&MatchId(104)].x);
        assert!(rects[&MatchId(104)].x < rects[&MatchId(102)].x);
        assert_eq!(rects[&MatchId(104)].x, config.column_stride() + 20.0);
    }
}
