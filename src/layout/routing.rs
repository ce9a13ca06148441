//! Connector geometry between matches and the match they feed

use std::collections::HashMap;

use serde::Serialize;

use crate::record::MatchId;

use super::columns::RectMap;
use super::partition::OrganizedBracket;
use super::types::{BoundingBox, BracketNode, Half, Point};

/// A straight line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }

    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}

/// Lines joining a parent match to the matches that feed it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Connector {
    /// Two children of the same half joined on a shared vertical midline
    ///
    /// ```text
    ///  child a ──┐
    ///            ├── parent
    ///  child b ──┘
    /// ```
    Elbow {
        parent: MatchId,
        children: [MatchId; 2],
        half: Half,
        stubs: [Segment; 2],
        spine: Segment,
        feed: Segment,
    },
    /// A semifinal feeding the central final from its own side
    Direct {
        parent: MatchId,
        child: MatchId,
        half: Half,
        segment: Segment,
    },
}

impl Connector {
    pub fn parent(&self) -> MatchId {
        match self {
            Connector::Elbow { parent, .. } | Connector::Direct { parent, .. } => *parent,
        }
    }

    pub fn half(&self) -> Half {
        match self {
            Connector::Elbow { half, .. } | Connector::Direct { half, .. } => *half,
        }
    }

    /// All segments in drawing order
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Connector::Elbow {
                stubs, spine, feed, ..
            } => vec![stubs[0], stubs[1], *spine, *feed],
            Connector::Direct { segment, .. } => vec![*segment],
        }
    }
}

/// Edge of a card facing the center of the bracket
fn forward_edge(rect: &BoundingBox, half: Half) -> f64 {
    match half {
        Half::Left => rect.right(),
        Half::Right => rect.x,
    }
}

/// Edge of a card facing the outside of the bracket
fn backward_edge(rect: &BoundingBox, half: Half) -> f64 {
    match half {
        Half::Left => rect.x,
        Half::Right => rect.right(),
    }
}

/// Elbow from two same-half children into their parent
///
/// The vertical midline sits halfway between the parent's backward edge and
/// the forward edge of whichever child is farther from it.
pub fn elbow(
    parent: (MatchId, &BoundingBox),
    a: (MatchId, &BoundingBox),
    b: (MatchId, &BoundingBox),
    half: Half,
) -> Connector {
    let (parent_id, parent_rect) = parent;
    let target_x = backward_edge(parent_rect, half);
    let a_x = forward_edge(a.1, half);
    let b_x = forward_edge(b.1, half);
    let farther_x = if (target_x - a_x).abs() >= (target_x - b_x).abs() {
        a_x
    } else {
        b_x
    };
    let mid_x = (target_x + farther_x) / 2.0;

    let a_y = a.1.center().y;
    let b_y = b.1.center().y;
    let parent_y = parent_rect.center().y;

    Connector::Elbow {
        parent: parent_id,
        children: [a.0, b.0],
        half,
        stubs: [
            Segment::new(Point::new(a_x, a_y), Point::new(mid_x, a_y)),
            Segment::new(Point::new(b_x, b_y), Point::new(mid_x, b_y)),
        ],
        spine: Segment::new(Point::new(mid_x, a_y), Point::new(mid_x, b_y)),
        feed: Segment::new(Point::new(mid_x, parent_y), Point::new(target_x, parent_y)),
    }
}

/// Straight feed from a semifinal into the side of the final that faces it
pub fn direct(
    parent: (MatchId, &BoundingBox),
    child: (MatchId, &BoundingBox),
    half: Half,
) -> Connector {
    let from = Point::new(forward_edge(child.1, half), child.1.center().y);
    let to = Point::new(backward_edge(parent.1, half), parent.1.center().y);
    Connector::Direct {
        parent: parent.0,
        child: child.0,
        half,
        segment: Segment::new(from, to),
    }
}

/// Connectors for every parent whose children both have a rectangle
///
/// Direction always comes from each child's half. Parents with only one
/// known child get no connector.
pub fn connectors(organized: &OrganizedBracket, rects: &RectMap) -> Vec<Connector> {
    let mut children_of: HashMap<MatchId, Vec<&BracketNode>> = HashMap::new();
    for node in organized.nodes() {
        if let Some(parent) = node.parent {
            children_of.entry(parent).or_default().push(node);
        }
    }

    let mut result = Vec::new();
    for parent in organized.nodes() {
        let Some(parent_rect) = rects.get(&parent.id()) else {
            continue;
        };
        let Some([a, b]) = children_of.get(&parent.id()).map(Vec::as_slice) else {
            continue;
        };
        let (Some(a_rect), Some(b_rect)) = (rects.get(&a.id()), rects.get(&b.id())) else {
            continue;
        };
        let (Some(a_half), Some(b_half)) = (a.half, b.half) else {
            continue;
        };

        let target = (parent.id(), parent_rect);
        if a_half == b_half {
            result.push(elbow(target, (a.id(), a_rect), (b.id(), b_rect), a_half));
        } else {
            result.push(direct(target, (a.id(), a_rect), a_half));
            result.push(direct(target, (b.id(), b_rect), b_half));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_elbow_points_right() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 40.0);
        let b = BoundingBox::new(0.0, 100.0, 100.0, 40.0);
        let p = BoundingBox::new(200.0, 50.0, 100.0, 40.0);
        let connector = elbow((MatchId(3), &p), (MatchId(1), &a), (MatchId(2), &b), Half::Left);

        let Connector::Elbow {
            stubs, spine, feed, ..
        } = connector
        else {
            panic!("expected an elbow");
        };
        assert_eq!(stubs[0], Segment::new(Point::new(100.0, 20.0), Point::new(150.0, 20.0)));
        assert_eq!(stubs[1], Segment::new(Point::new(100.0, 120.0), Point::new(150.0, 120.0)));
        assert_eq!(spine, Segment::new(Point::new(150.0, 20.0), Point::new(150.0, 120.0)));
        assert_eq!(feed, Segment::new(Point::new(150.0, 70.0), Point::new(200.0, 70.0)));
    }

    #[test]
    fn test_right_elbow_points_left() {
        let a = BoundingBox::new(400.0, 0.0, 100.0, 40.0);
        let b = BoundingBox::new(400.0, 100.0, 100.0, 40.0);
        let p = BoundingBox::new(200.0, 50.0, 100.0, 40.0);
        let connector = elbow((MatchId(3), &p), (MatchId(1), &a), (MatchId(2), &b), Half::Right);

        let segments = connector.segments();
        assert_eq!(segments[0].from, Point::new(400.0, 20.0));
        assert_eq!(segments[0].to, Point::new(350.0, 20.0));
        assert_eq!(segments[3].to, Point::new(300.0, 70.0));
        assert!(segments[2].is_vertical());
        assert!(segments.iter().all(|s| s.is_horizontal() || s.is_vertical()));
    }

    #[test]
    fn test_midline_uses_farther_child() {
        // Observed positions may shift one child slightly toward the parent
        let a = BoundingBox::new(0.0, 0.0, 100.0, 40.0);
        let b = BoundingBox::new(20.0, 100.0, 100.0, 40.0);
        let p = BoundingBox::new(200.0, 50.0, 100.0, 40.0);
        let connector = elbow((MatchId(3), &p), (MatchId(1), &a), (MatchId(2), &b), Half::Left);
        let Connector::Elbow { spine, .. } = connector else {
            panic!("expected an elbow");
        };
        assert_eq!(spine.from.x, 150.0);
    }

    #[test]
    fn test_direct_feed_into_final() {
        let semi = BoundingBox::new(400.0, 100.0, 100.0, 40.0);
        let fin = BoundingBox::new(200.0, 100.0, 100.0, 40.0);
        let connector = direct((MatchId(104), &fin), (MatchId(102), &semi), Half::Right);
        assert_eq!(connector.parent(), MatchId(104));
        assert_eq!(connector.half(), Half::Right);
        assert_eq!(
            connector.segments(),
            vec![Segment::new(Point::new(400.0, 120.0), Point::new(300.0, 120.0))]
        );
    }
}
