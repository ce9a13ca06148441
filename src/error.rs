//! Error types for loading and validating bracket templates

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::record::{MatchId, Stage};

/// Byte range in template source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse template TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("match {id} is defined more than once")]
    DuplicateMatch { id: MatchId },

    #[error("match {id} is fed by match {from}, which is not defined in an earlier stage")]
    UnknownFeeder { id: MatchId, from: MatchId },

    #[error("match {id} feeds both match {first} and match {second}")]
    MultipleParents {
        id: MatchId,
        first: MatchId,
        second: MatchId,
    },

    #[error("match {id} must be fed by exactly two matches, found {count}")]
    WrongFeederCount { id: MatchId, count: usize },

    #[error("match {id} ({stage}) feeds no later match")]
    Orphan { id: MatchId, stage: Stage },

    #[error("leaf match {id} sits in stage {stage} after the first stage {first}")]
    LateLeaf {
        id: MatchId,
        stage: Stage,
        first: Stage,
    },

    #[error("stage {stage} is listed more than once")]
    DuplicateStage { stage: Stage },

    #[error("invalid bracket roots: {reason}")]
    InvalidRoots { reason: String },
}

impl TemplateError {
    /// Construct an invalid roots error
    pub fn roots(reason: impl Into<String>) -> Self {
        Self::InvalidRoots {
            reason: reason.into(),
        }
    }

    /// Source span of the error, when the TOML parser reported one
    pub fn span(&self) -> Option<Span> {
        match self {
            TemplateError::Parse(e) => e.span(),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors without a span fall back to their display message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message) = match self {
            TemplateError::Parse(e) => match e.span() {
                Some(span) => (span, e.message().to_string()),
                None => return self.to_string(),
            },
            _ => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid bracket template")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
