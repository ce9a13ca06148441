//! SVG preview of a computed bracket layout
//!
//! Connectors are written before cards so card fills cover the line ends.
//! Every element carries prefixed CSS classes (`card`, the stage name,
//! `placeholder`, `side`, `winner`, `connector`, the half) and no inline
//! styling, so the host page decides colors.

use crate::layout::{BoundingBox, BracketLayout, Card, Connector, Point};
use crate::record::SideSlot;

use super::SvgConfig;

/// Collects SVG elements in drawing order
struct SvgBuilder<'a> {
    config: &'a SvgConfig,
    connectors: Vec<String>,
    cards: Vec<String>,
}

impl<'a> SvgBuilder<'a> {
    fn new(config: &'a SvgConfig) -> Self {
        Self {
            config,
            connectors: Vec::new(),
            cards: Vec::new(),
        }
    }

    fn pad(&self, depth: usize) -> String {
        " ".repeat(self.config.indent.unwrap_or(0) * depth)
    }

    fn classes(&self, names: &[&str]) -> String {
        names
            .iter()
            .map(|n| self.config.class(n))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn card(&mut self, card: &Card) {
        let mut names = vec!["card", card.stage.as_str()];
        if card.slot.is_placeholder() {
            names.push("placeholder");
        }

        let rect = &card.rect;
        let mut group = format!(
            r#"{}<g id="match-{}" class="{}">"#,
            self.pad(1),
            card.id,
            self.classes(&names)
        );
        group.push_str(&format!(
            r#"{}{}<rect x="{}" y="{}" width="{}" height="{}" rx="{}"/>"#,
            self.newline(),
            self.pad(2),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            self.config.corner_radius
        ));

        let x = rect.x + self.config.label_inset;
        let quarter = rect.height / 4.0;
        let sides = [
            (SideSlot::Side1, card.side1.as_str(), rect.y + quarter),
            (SideSlot::Side2, card.side2.as_str(), rect.bottom() - quarter),
        ];
        for (slot, name, y) in sides {
            let class = if card.winner == Some(slot) {
                self.classes(&["side", "winner"])
            } else {
                self.classes(&["side"])
            };
            group.push_str(&format!(
                r#"{}{}<text class="{}" x="{}" y="{}" dominant-baseline="middle">{}</text>"#,
                self.newline(),
                self.pad(2),
                class,
                x,
                y,
                escape_xml(name)
            ));
        }
        group.push_str(&format!("{}{}</g>", self.newline(), self.pad(1)));
        self.cards.push(group);
    }

    fn connector(&mut self, connector: &Connector) {
        let class = self.classes(&["connector", connector.half().as_str()]);
        for segment in connector.segments() {
            self.connectors.push(format!(
                r#"{}<path class="{}" d="{}" fill="none"/>"#,
                self.pad(1),
                class,
                path_to_d(&[segment.from, segment.to])
            ));
        }
    }

    fn newline(&self) -> &'static str {
        if self.config.indent.is_some() {
            "\n"
        } else {
            ""
        }
    }

    fn finish(self, bounds: BoundingBox) -> String {
        let margin = self.config.margin;
        let nl = self.newline();

        let mut svg = String::new();
        if self.config.xml_declaration {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            bounds.x - margin,
            bounds.y - margin,
            bounds.width + 2.0 * margin,
            bounds.height + 2.0 * margin
        ));
        for element in self.connectors.iter().chain(&self.cards) {
            svg.push_str(nl);
            svg.push_str(element);
        }
        svg.push_str(nl);
        svg.push_str("</svg>");
        svg
    }
}

/// Render a bracket layout to an SVG document
pub fn render_svg(layout: &BracketLayout, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config);
    for connector in &layout.connectors {
        builder.connector(connector);
    }
    for card in &layout.cards {
        builder.card(card);
    }
    builder.finish(layout.bounds)
}

/// SVG path data for a polyline
fn path_to_d(path: &[Point]) -> String {
    let mut d = String::new();
    for (i, point) in path.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let command = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{} {}", command, point.x, point.y));
    }
    d
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
