//! Plain-text dump of a computed bracket layout
//!
//! One line per card in column order, convenient for snapshot tests and for
//! eyeballing a layout from the command line.

use std::fmt::Write;

use crate::layout::{BracketLayout, Card, Slot};
use crate::record::SideSlot;

/// Render a layout as text, one card per line
pub fn render_text(layout: &BracketLayout) -> String {
    let mut out = String::new();
    for card in &layout.cards {
        write_card(&mut out, card);
    }
    for issue in &layout.issues {
        let _ = writeln!(out, "issue {}", issue);
    }
    for rejected in &layout.rejected {
        let _ = writeln!(out, "rejected {}", rejected);
    }
    out
}

fn write_card(out: &mut String, card: &Card) {
    let slot = match card.slot {
        Slot::Positioned(value) => value.to_string(),
        Slot::Placeholder => "placeholder".to_string(),
    };
    let marker = |side: SideSlot| if card.winner == Some(side) { "*" } else { "" };
    let _ = writeln!(
        out,
        "{} {} slot={} y={} {}{} v {}{}",
        card.column,
        card.id,
        slot,
        card.rect.y,
        card.side1,
        marker(SideSlot::Side1),
        card.side2,
        marker(SideSlot::Side2),
    );
}
