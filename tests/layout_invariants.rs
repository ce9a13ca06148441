//! Structural properties of computed layouts

use bracket_layout::layout::{
    self, compute, compute_observed, hinted_rects, BoundingBox, Column, Connector, LayoutConfig,
    ObservedRects, Topology,
};
use bracket_layout::{BracketTemplate, Half, MatchId, MatchRecord, Stage};

const EPSILON: f64 = 1e-9;

fn all_records(template: &BracketTemplate) -> Vec<MatchRecord> {
    template
        .matches()
        .iter()
        .map(|m| MatchRecord::new(m.id.0, m.stage))
        .collect()
}

#[test]
fn test_parents_center_over_children() {
    let template = BracketTemplate::world_cup_2026();
    let topology = Topology::new(&template);
    let bracket = layout::organize(&all_records(&template), &template);
    let organized = &bracket.organized;

    for node in organized.nodes() {
        let Ok(Some([a, b])) = topology.children(node.id()) else {
            continue;
        };
        let a = organized.get(a).expect("child present").slot.value();
        let b = organized.get(b).expect("child present").slot.value();
        let expected = ((a + 0.5) + (b + 0.5)) / 2.0 - 0.5;
        assert!(
            (node.slot.value() - expected).abs() < EPSILON,
            "match {} at slot {}, expected {}",
            node.id(),
            node.slot.value(),
            expected
        );
    }
}

#[test]
fn test_every_match_walks_to_its_semifinal() {
    let template = BracketTemplate::world_cup_2026();
    let topology = Topology::new(&template);

    for m in template.matches() {
        let half = topology.half(m.id).expect("known id");
        if m.id == template.final_match() {
            assert_eq!(half, None);
            continue;
        }

        let mut current = m.id;
        while let Ok(Some(parent)) = topology.parent(current) {
            if parent == template.final_match() {
                break;
            }
            current = parent;
        }
        let expected = if current == MatchId(101) {
            Half::Left
        } else {
            assert_eq!(current, MatchId(102));
            Half::Right
        };
        assert_eq!(half, Some(expected), "match {}", m.id);
    }
}

#[test]
fn test_empty_columns_are_compacted() {
    let template = BracketTemplate::world_cup_2026();
    let records = vec![
        MatchRecord::new(74, Stage::Round32),
        MatchRecord::new(77, Stage::Round32),
        MatchRecord::new(76, Stage::Round32),
        MatchRecord::new(78, Stage::Round32),
    ];
    let config = LayoutConfig::default();
    let layout = compute(&layout::organize(&records, &template), &config);

    assert_eq!(layout.columns, 2);
    let left = layout.card(MatchId(74)).expect("left card");
    let right = layout.card(MatchId(76)).expect("right card");
    assert_eq!(left.column, Column::Round32Left);
    assert_eq!(left.visual_column, 0);
    assert_eq!(right.column, Column::Round32Right);
    assert_eq!(right.visual_column, 1);
    assert_eq!(right.rect.x - left.rect.x, config.column_stride());
}

#[test]
fn test_hinted_rect_formula() {
    let template = BracketTemplate::world_cup_2026();
    let bracket = layout::organize(&all_records(&template), &template);
    let config = LayoutConfig::default()
        .with_card_size(100.0, 40.0)
        .with_column_width(120.0)
        .with_gutter(10.0)
        .with_vertical_spacing(50.0);
    let rects = hinted_rects(&bracket.organized, &config);

    // Final: visual column 4, slot 3.5
    assert_eq!(
        rects.get(&MatchId(104)),
        Some(&BoundingBox::new(4.0 * 130.0 + 60.0 - 50.0, 175.0, 100.0, 40.0))
    );
    // Right semifinal: visual column 5, slot 3.5
    assert_eq!(rects.get(&MatchId(102)).map(|r| r.x), Some(5.0 * 130.0 + 10.0));
}

#[test]
fn test_sixteen_team_template_has_no_round32_columns() {
    let template = BracketTemplate::sixteen_team();
    let layout = compute(
        &layout::organize(&all_records(&template), &template),
        &LayoutConfig::default(),
    );

    assert_eq!(layout.cards.len(), 15);
    assert_eq!(layout.columns, 7);
    assert!(layout
        .cards
        .iter()
        .all(|c| !matches!(c.column, Column::Round32Left | Column::Round32Right)));
    assert_eq!(layout.card(MatchId(1)).map(|c| c.visual_column), Some(0));
    assert_eq!(layout.card(MatchId(15)).map(|c| c.visual_column), Some(3));
}

#[test]
fn test_observed_rects_drive_connectors() {
    let template = BracketTemplate::sixteen_team();
    let bracket = layout::organize(&all_records(&template), &template);
    let config = LayoutConfig::default();

    let moved = BoundingBox::new(500.0, 900.0, 160.0, 56.0);
    let observed = ObservedRects::new().with(MatchId(15), moved);
    let layout = compute_observed(&bracket, &config, &observed);

    assert_eq!(layout.card(MatchId(15)).map(|c| c.rect), Some(moved));
    let feeds: Vec<&Connector> = layout
        .connectors
        .iter()
        .filter(|c| c.parent() == MatchId(15))
        .collect();
    assert_eq!(feeds.len(), 2);
    for feed in feeds {
        let segment = feed.segments()[0];
        assert_eq!(segment.to.y, moved.center().y);
        let expected_x = match feed.half() {
            Half::Left => moved.x,
            Half::Right => moved.right(),
        };
        assert_eq!(segment.to.x, expected_x);
    }
}

#[test]
fn test_non_finite_observed_rect_falls_back_to_hint() {
    let template = BracketTemplate::sixteen_team();
    let bracket = layout::organize(&all_records(&template), &template);
    let config = LayoutConfig::default();

    let observed = ObservedRects::new().with(MatchId(1), BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0));
    let hinted = compute(&bracket, &config);
    let reconciled = compute_observed(&bracket, &config, &observed);
    assert_eq!(hinted, reconciled);
}

#[test]
fn test_connector_direction_follows_half() {
    let template = BracketTemplate::world_cup_2026();
    let layout = compute(
        &layout::organize(&all_records(&template), &template),
        &LayoutConfig::default(),
    );

    for connector in &layout.connectors {
        let Connector::Elbow { stubs, feed, half, .. } = connector else {
            continue;
        };
        for segment in stubs.iter().chain(std::iter::once(feed)) {
            assert!(segment.is_horizontal());
            match half {
                Half::Left => assert!(segment.to.x > segment.from.x),
                Half::Right => assert!(segment.to.x < segment.from.x),
            }
        }
    }
}

#[test]
fn test_relayout_at_different_spacing_keeps_slots() {
    let template = BracketTemplate::world_cup_2026();
    let bracket = layout::organize(&all_records(&template), &template);

    let tight = compute(&bracket, &LayoutConfig::default().with_vertical_spacing(60.0));
    let loose = compute(&bracket, &LayoutConfig::default().fit_height(1200.0, 8));

    for (a, b) in tight.cards.iter().zip(&loose.cards) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.slot, b.slot);
        assert!((b.rect.y - a.rect.y * 150.0 / 60.0).abs() < EPSILON);
    }
}
