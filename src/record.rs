//! Match records as supplied by the prediction API
//!
//! Records arrive as loosely-typed JSON ([`RawMatchRecord`]) and are
//! validated into [`MatchRecord`] before they reach the topology resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side name the API uses for a team that is not yet known
pub const PLACEHOLDER_NAME: &str = "TBD";

/// Template match identifier, fixed per tournament structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MatchId {
    fn from(id: u32) -> Self {
        MatchId(id)
    }
}

/// Identifier of a competing team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

/// Knockout stage of a match, ordered from the leaves toward the final
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Round32,
    Round16,
    Quarter,
    Semi,
    Final,
}

impl Stage {
    /// All stages in bottom-up order
    pub const ALL: [Stage; 5] = [
        Stage::Round32,
        Stage::Round16,
        Stage::Quarter,
        Stage::Semi,
        Stage::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Round32 => "round32",
            Stage::Round16 => "round16",
            Stage::Quarter => "quarter",
            Stage::Semi => "semi",
            Stage::Final => "final",
        }
    }

    /// Stages below the semifinal are split into a left and a right group
    pub fn is_split(&self) -> bool {
        matches!(self, Stage::Round32 | Stage::Round16 | Stage::Quarter)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round32" | "round_of_32" => Ok(Stage::Round32),
            "round16" | "round_of_16" => Ok(Stage::Round16),
            "quarter" | "quarterfinal" => Ok(Stage::Quarter),
            "semi" | "semifinal" => Ok(Stage::Semi),
            "final" => Ok(Stage::Final),
            _ => Err(RecordError::UnknownStage {
                stage: s.to_string(),
            }),
        }
    }
}

/// One of the two competitors of a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub id: Option<TeamId>,
    pub name: Option<String>,
    pub flag: Option<String>,
}

impl Side {
    /// False while the previous round has not produced this competitor
    pub fn is_determined(&self) -> bool {
        match (&self.id, &self.name) {
            (Some(_), Some(name)) => !name.trim().eq_ignore_ascii_case(PLACEHOLDER_NAME),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Name to show on a card
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if self.is_determined() => name,
            _ => PLACEHOLDER_NAME,
        }
    }
}

/// Which side of a match won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideSlot {
    Side1,
    Side2,
}

/// A validated knockout match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub stage: Stage,
    pub side1: Side,
    pub side2: Side,
    pub winner_id: Option<TeamId>,
}

impl MatchRecord {
    /// Create a record with undetermined sides and no winner
    pub fn new(id: u32, stage: Stage) -> Self {
        Self {
            id: MatchId(id),
            stage,
            side1: Side::default(),
            side2: Side::default(),
            winner_id: None,
        }
    }

    pub fn with_sides(mut self, side1: Side, side2: Side) -> Self {
        self.side1 = side1;
        self.side2 = side2;
        self
    }

    pub fn with_winner(mut self, winner: TeamId) -> Self {
        self.winner_id = Some(winner);
        self
    }

    /// Side whose team id matches the recorded winner, if any
    pub fn winner_side(&self) -> Option<SideSlot> {
        let winner = self.winner_id?;
        if self.side1.id == Some(winner) {
            Some(SideSlot::Side1)
        } else if self.side2.id == Some(winner) {
            Some(SideSlot::Side2)
        } else {
            None
        }
    }
}

/// Errors for records rejected at the API boundary
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    #[error("record {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("unknown stage '{stage}'")]
    UnknownStage { stage: String },

    #[error("record {index} (match {id}): unknown stage '{stage}'")]
    InvalidStage {
        index: usize,
        id: MatchId,
        stage: String,
    },

    #[error("record {index}: malformed record: {reason}")]
    Malformed { index: usize, reason: String },
}

/// Record shape as returned by the prediction API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMatchRecord {
    #[serde(alias = "id")]
    pub template_match_id: Option<u32>,
    pub stage: Option<String>,
    pub side1_id: Option<u32>,
    pub side1_name: Option<String>,
    pub side1_flag: Option<String>,
    pub side2_id: Option<u32>,
    pub side2_name: Option<String>,
    pub side2_flag: Option<String>,
    pub winner_id: Option<u32>,
}

impl RawMatchRecord {
    /// Validate into a [`MatchRecord`]; `index` is the position in the input list
    pub fn validate(self, index: usize) -> Result<MatchRecord, RecordError> {
        let id = self
            .template_match_id
            .map(MatchId)
            .ok_or(RecordError::MissingField {
                index,
                field: "template_match_id",
            })?;
        let stage_name = self.stage.ok_or(RecordError::MissingField {
            index,
            field: "stage",
        })?;
        let stage = stage_name
            .parse::<Stage>()
            .map_err(|_| RecordError::InvalidStage {
                index,
                id,
                stage: stage_name.clone(),
            })?;

        Ok(MatchRecord {
            id,
            stage,
            side1: Side {
                id: self.side1_id.map(TeamId),
                name: self.side1_name,
                flag: self.side1_flag,
            },
            side2: Side {
                id: self.side2_id.map(TeamId),
                name: self.side2_name,
                flag: self.side2_flag,
            },
            winner_id: self.winner_id.map(TeamId),
        })
    }
}

/// Validate a batch of raw records, keeping the good ones
///
/// Rejected records are logged and returned separately so the caller can
/// still lay out everything that is well-formed.
pub fn validate_records(raw: Vec<RawMatchRecord>) -> (Vec<MatchRecord>, Vec<RecordError>) {
    partition_results(
        raw.into_iter()
            .enumerate()
            .map(|(index, record)| record.validate(index)),
    )
}

/// Decode and validate each element of a JSON array on its own
///
/// An element with the wrong shape (a string id, a non-object) is rejected
/// as [`RecordError::Malformed`] without affecting its neighbours.
pub fn decode_records(values: Vec<serde_json::Value>) -> (Vec<MatchRecord>, Vec<RecordError>) {
    partition_results(values.into_iter().enumerate().map(|(index, value)| {
        serde_json::from_value::<RawMatchRecord>(value)
            .map_err(|e| RecordError::Malformed {
                index,
                reason: e.to_string(),
            })
            .and_then(|raw| raw.validate(index))
    }))
}

fn partition_results(
    results: impl Iterator<Item = Result<MatchRecord, RecordError>>,
) -> (Vec<MatchRecord>, Vec<RecordError>) {
    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("rejecting match record: {}", e);
                rejected.push(e);
            }
        }
    }

    (records, rejected)
}
