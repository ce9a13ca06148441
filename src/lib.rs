//! Bracket Layout - topology and layout engine for knockout tournament brackets
//!
//! This library turns a flat list of match records into an organized,
//! positioned bracket: which half each match belongs to, which column it
//! sits in, its vertical slot, its card rectangle, and the connector lines
//! joining it to the matches that feed it.
//!
//! # Example
//!
//! ```rust
//! use bracket_layout::{build_from_json, BuildConfig};
//!
//! let json = r#"[
//!     {"template_match_id": 101, "stage": "semi"},
//!     {"template_match_id": 102, "stage": "semi"},
//!     {"template_match_id": 104, "stage": "final"}
//! ]"#;
//!
//! let layout = build_from_json(json, &BuildConfig::default()).unwrap();
//! assert_eq!(layout.cards.len(), 3);
//! assert_eq!(layout.connectors.len(), 2);
//! ```

pub mod error;
pub mod layout;
pub mod record;
pub mod renderer;
pub mod template;

use std::path::Path;

pub use error::TemplateError;
pub use layout::{BracketLayout, Half, LayoutConfig, LayoutError, ObservedRects};
pub use record::{MatchId, MatchRecord, RawMatchRecord, Stage};
pub use renderer::{render_svg, render_text, SvgConfig};
pub use template::BracketTemplate;

use thiserror::Error;

use layout::Topology;

/// Errors that can occur in the JSON entry point
#[derive(Debug, Error)]
pub enum BuildError {
    /// The input is not a JSON array of match records
    #[error("invalid match records JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The template could not be loaded
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Configuration for the complete build pipeline
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Tournament structure
    pub template: BracketTemplate,
    /// Layout configuration
    pub layout: LayoutConfig,
}

impl BuildConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bracket template
    pub fn with_template(mut self, template: BracketTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Load the bracket template from a TOML file
    pub fn with_template_file(self, path: &Path) -> Result<Self, TemplateError> {
        Ok(self.with_template(BracketTemplate::from_file(path)?))
    }
}

/// Organize and lay out validated records
///
/// Never fails as a whole: records that cannot be placed end up in
/// [`BracketLayout::issues`].
pub fn build(records: &[MatchRecord], config: &BuildConfig) -> BracketLayout {
    let bracket = layout::organize(records, &config.template);
    log::debug!(
        "organized {} of {} records ({} issues)",
        bracket.organized.len(),
        records.len(),
        bracket.issues.len()
    );
    layout::compute(&bracket, &config.layout)
}

/// Decode raw records from JSON, validate them and lay them out
///
/// Only a document that is not a JSON array is an error. Individual
/// records that fail to decode or validate are reported in
/// [`BracketLayout::rejected`].
pub fn build_from_json(json: &str, config: &BuildConfig) -> Result<BracketLayout, BuildError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let (records, rejected) = record::decode_records(values);
    let mut layout = build(&records, config);
    layout.rejected = rejected;
    Ok(layout)
}

/// Half of the built-in World Cup 2026 bracket a match belongs to
///
/// `None` for the final; an error for ids outside the template, including
/// the ignored third-place playoff.
pub fn calculate_match_side(id: impl Into<MatchId>) -> Result<Option<Half>, LayoutError> {
    Topology::new(&BracketTemplate::world_cup_2026()).half(id.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_match_side() {
        assert_eq!(calculate_match_side(MatchId(74)), Ok(Some(Half::Left)));
        assert_eq!(calculate_match_side(MatchId(85)), Ok(Some(Half::Right)));
        assert_eq!(calculate_match_side(MatchId(101)), Ok(Some(Half::Left)));
        assert_eq!(calculate_match_side(MatchId(102)), Ok(Some(Half::Right)));
        assert_eq!(calculate_match_side(MatchId(104)), Ok(None));
        assert_eq!(
            calculate_match_side(MatchId(103)),
            Err(LayoutError::unknown(MatchId(103)))
        );
    }

    #[test]
    fn test_build_from_json_reports_rejected_records() {
        let json = r#"[
            {"template_match_id": 73, "stage": "round32"},
            {"stage": "round32"},
            {"template_match_id": 75, "stage": "group"}
        ]"#;
        let layout = build_from_json(json, &BuildConfig::default()).unwrap();
        assert_eq!(layout.cards.len(), 1);
        assert_eq!(layout.rejected.len(), 2);
        assert!(layout.issues.is_empty());
    }

    #[test]
    fn test_build_from_json_keeps_records_around_a_malformed_one() {
        let json = r#"[
            {"template_match_id": 73, "stage": "round32"},
            {"template_match_id": 75, "stage": "round32"},
            {"template_match_id": "74", "stage": "round32"}
        ]"#;
        let layout = build_from_json(json, &BuildConfig::default()).unwrap();
        assert_eq!(layout.cards.len(), 2);
        assert_eq!(layout.rejected.len(), 1);
        assert!(matches!(
            layout.rejected[0],
            record::RecordError::Malformed { index: 2, .. }
        ));
    }

    #[test]
    fn test_build_from_json_rejects_non_array() {
        let result = build_from_json(r#"{"template_match_id": 73}"#, &BuildConfig::default());
        assert!(matches!(result, Err(BuildError::Json(_))));
    }

    #[test]
    fn test_build_with_sixteen_team_template() {
        let config = BuildConfig::new().with_template(BracketTemplate::sixteen_team());
        let records: Vec<MatchRecord> = (1..=8)
            .map(|id| MatchRecord::new(id, Stage::Round16))
            .collect();
        let layout = build(&records, &config);
        assert_eq!(layout.cards.len(), 8);
        assert_eq!(layout.columns, 2);
    }
}
