//! Per-match integrity errors raised while organizing a bracket

use serde::Serialize;
use thiserror::Error;

use crate::record::{MatchId, Stage};

/// Errors that exclude a single match (and the subtree it would anchor)
/// from the organized bracket
///
/// These are developer-facing data integrity problems, distinct from a
/// tournament that is simply still in progress.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutError {
    /// Match id not present in the bracket template
    #[error("unknown match id {id}")]
    UnknownMatchId { id: MatchId },

    /// Record stage disagrees with the template
    #[error("match {id} is reported as {found} but the template places it in {expected}")]
    StageMismatch {
        id: MatchId,
        expected: Stage,
        found: Stage,
    },

    /// The same match id was reported more than once
    #[error("match {id} appears {count} times")]
    DuplicateMatch { id: MatchId, count: usize },
}

impl LayoutError {
    /// Create an unknown match id error
    pub fn unknown(id: MatchId) -> Self {
        Self::UnknownMatchId { id }
    }

    /// The match the error refers to
    pub fn match_id(&self) -> MatchId {
        match self {
            Self::UnknownMatchId { id }
            | Self::StageMismatch { id, .. }
            | Self::DuplicateMatch { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_display() {
        let err = LayoutError::unknown(MatchId(7));
        assert_eq!(err.to_string(), "unknown match id 7");
        assert_eq!(err.match_id(), MatchId(7));
    }

    #[test]
    fn test_stage_mismatch_display() {
        let err = LayoutError::StageMismatch {
            id: MatchId(97),
            expected: Stage::Quarter,
            found: Stage::Semi,
        };
        assert!(err.to_string().contains("reported as semi"));
        assert!(err.to_string().contains("places it in quarter"));
    }
}
