//! Geometry and bracket node types shared by the layout passes

use std::fmt;

use serde::Serialize;

use crate::record::{MatchId, MatchRecord, Stage};

/// Pixel position, origin at the top-left of the bracket
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Pixel rectangle of a match card
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        BoundingBox { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Interiors overlap; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let apart_x = self.right() <= other.x || other.right() <= self.x;
        let apart_y = self.bottom() <= other.y || other.bottom() <= self.y;
        !(apart_x || apart_y)
    }

    /// Smallest box covering both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        BoundingBox::new(
            left,
            top,
            self.right().max(other.right()) - left,
            self.bottom().max(other.bottom()) - top,
        )
    }

    /// No NaN or infinite component, as measured rects may carry
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Half of the draw a match belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    Left,
    Right,
}

impl Half {
    pub fn as_str(&self) -> &'static str {
        match self {
            Half::Left => "left",
            Half::Right => "right",
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical rank of a match before pixel conversion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Slot {
    /// Leaf index or midpoint of the two children
    Positioned(f64),
    /// Children not known yet; pinned to the top of the column
    #[default]
    Placeholder,
}

impl Slot {
    /// Numeric slot; placeholders resolve to 0
    pub fn value(&self) -> f64 {
        match self {
            Slot::Positioned(v) => *v,
            Slot::Placeholder => 0.0,
        }
    }

    pub fn position(&self) -> Option<f64> {
        match self {
            Slot::Positioned(v) => Some(*v),
            Slot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

/// One of the nine logical bracket columns, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Round32Left,
    Round16Left,
    QuarterLeft,
    SemiLeft,
    Final,
    SemiRight,
    QuarterRight,
    Round16Right,
    Round32Right,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Round32Left,
        Column::Round16Left,
        Column::QuarterLeft,
        Column::SemiLeft,
        Column::Final,
        Column::SemiRight,
        Column::QuarterRight,
        Column::Round16Right,
        Column::Round32Right,
    ];

    /// Column a match is drawn in; `None` for a non-final match without a half
    pub fn of(stage: Stage, half: Option<Half>) -> Option<Column> {
        let column = match (stage, half) {
            (Stage::Final, _) => Column::Final,
            (_, None) => return None,
            (Stage::Round32, Some(Half::Left)) => Column::Round32Left,
            (Stage::Round16, Some(Half::Left)) => Column::Round16Left,
            (Stage::Quarter, Some(Half::Left)) => Column::QuarterLeft,
            (Stage::Semi, Some(Half::Left)) => Column::SemiLeft,
            (Stage::Semi, Some(Half::Right)) => Column::SemiRight,
            (Stage::Quarter, Some(Half::Right)) => Column::QuarterRight,
            (Stage::Round16, Some(Half::Right)) => Column::Round16Right,
            (Stage::Round32, Some(Half::Right)) => Column::Round32Right,
        };
        Some(column)
    }

    /// Position in the left-to-right order
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Round32Left => "round32_left",
            Column::Round16Left => "round16_left",
            Column::QuarterLeft => "quarter_left",
            Column::SemiLeft => "semi_left",
            Column::Final => "final",
            Column::SemiRight => "semi_right",
            Column::QuarterRight => "quarter_right",
            Column::Round16Right => "round16_right",
            Column::Round32Right => "round32_right",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A match placed in the bracket tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketNode {
    #[serde(flatten)]
    pub record: MatchRecord,
    /// `None` only for the final
    pub half: Option<Half>,
    /// Match the winner advances to; `None` for the final
    pub parent: Option<MatchId>,
    pub slot: Slot,
    /// Hinted pixel rectangle, filled in by [`super::position`]
    pub rect: Option<BoundingBox>,
}

impl BracketNode {
    pub fn new(record: MatchRecord, half: Option<Half>, parent: Option<MatchId>) -> Self {
        Self {
            record,
            half,
            parent,
            slot: Slot::Placeholder,
            rect: None,
        }
    }

    pub fn id(&self) -> MatchId {
        self.record.id
    }

    pub fn stage(&self) -> Stage {
        self.record.stage
    }

    pub fn column(&self) -> Option<Column> {
        Column::of(self.record.stage, self.half)
    }
}
