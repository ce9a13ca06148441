//! Lint checks for layout defects in a computed bracket.
//!
//! Runs after rectangles and connectors are known and reports mechanical
//! issues: overlapping cards, matches pinned to the placeholder slot, and
//! parents whose connector cannot be drawn because a child is missing.

use std::collections::HashMap;
use std::fmt;

use crate::record::MatchId;

use super::BracketLayout;

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Placeholder,
    Connector,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Placeholder => write!(f, "placeholder"),
            LintCategory::Connector => write!(f, "connector"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a completed layout.
pub fn check(layout: &BracketLayout) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_overlaps(layout, &mut warnings);
    check_placeholders(layout, &mut warnings);
    check_connectors(layout, &mut warnings);
    warnings
}

// ── Overlap detection ─────────────────────────────────────────────

fn check_overlaps(layout: &BracketLayout, warnings: &mut Vec<LintWarning>) {
    let cards = &layout.cards;
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            let a = &cards[i];
            let b = &cards[j];
            if a.visual_column != b.visual_column || !a.rect.intersects(&b.rect) {
                continue;
            }
            let overlap_h = a.rect.bottom().min(b.rect.bottom()) - a.rect.y.max(b.rect.y);
            warnings.push(LintWarning {
                category: LintCategory::Overlap,
                message: format!(
                    "matches {} and {} overlap by {:.0}px in column {}",
                    a.id, b.id, overlap_h, a.column
                ),
            });
        }
    }
}

// ── Placeholder slots ─────────────────────────────────────────────

fn check_placeholders(layout: &BracketLayout, warnings: &mut Vec<LintWarning>) {
    for card in layout.cards.iter().filter(|c| c.slot.is_placeholder()) {
        warnings.push(LintWarning {
            category: LintCategory::Placeholder,
            message: format!(
                "match {} in column {} is pinned to the top; its feeding matches are not known yet",
                card.id, card.column
            ),
        });
    }
}

// ── Missing siblings ──────────────────────────────────────────────

fn check_connectors(layout: &BracketLayout, warnings: &mut Vec<LintWarning>) {
    let mut children: HashMap<MatchId, usize> = HashMap::new();
    for card in &layout.cards {
        if let Some(parent) = card.parent {
            *children.entry(parent).or_default() += 1;
        }
    }

    for card in &layout.cards {
        if children.get(&card.id) == Some(&1) {
            warnings.push(LintWarning {
                category: LintCategory::Connector,
                message: format!(
                    "match {} has only one feeding match laid out; no connector drawn",
                    card.id
                ),
            });
        }
    }
}
