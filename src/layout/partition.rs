//! Stage partitioning of match records into the eight bracket groups

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::record::{MatchId, MatchRecord, Stage};

use super::error::LayoutError;
use super::topology::Topology;
use super::types::{BracketNode, Column, Half};

/// One of the eight named groups of an organized bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Round32Left,
    Round32Right,
    Round16Left,
    Round16Right,
    QuarterLeft,
    QuarterRight,
    Semi,
    Final,
}

impl Group {
    /// All groups in bottom-up stage order
    pub const ALL: [Group; 8] = [
        Group::Round32Left,
        Group::Round32Right,
        Group::Round16Left,
        Group::Round16Right,
        Group::QuarterLeft,
        Group::QuarterRight,
        Group::Semi,
        Group::Final,
    ];

    /// Group a match belongs to; split stages need a half
    pub fn of(stage: Stage, half: Option<Half>) -> Option<Group> {
        let group = match (stage, half) {
            (Stage::Semi, _) => Group::Semi,
            (Stage::Final, _) => Group::Final,
            (Stage::Round32, Some(Half::Left)) => Group::Round32Left,
            (Stage::Round32, Some(Half::Right)) => Group::Round32Right,
            (Stage::Round16, Some(Half::Left)) => Group::Round16Left,
            (Stage::Round16, Some(Half::Right)) => Group::Round16Right,
            (Stage::Quarter, Some(Half::Left)) => Group::QuarterLeft,
            (Stage::Quarter, Some(Half::Right)) => Group::QuarterRight,
            (_, None) => return None,
        };
        Some(group)
    }

    pub fn stage(&self) -> Stage {
        match self {
            Group::Round32Left | Group::Round32Right => Stage::Round32,
            Group::Round16Left | Group::Round16Right => Stage::Round16,
            Group::QuarterLeft | Group::QuarterRight => Stage::Quarter,
            Group::Semi => Stage::Semi,
            Group::Final => Stage::Final,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Round32Left => "round32_left",
            Group::Round32Right => "round32_right",
            Group::Round16Left => "round16_left",
            Group::Round16Right => "round16_right",
            Group::QuarterLeft => "quarter_left",
            Group::QuarterRight => "quarter_right",
            Group::Semi => "semi",
            Group::Final => "final",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches bucketed into the eight bracket groups
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizedBracket {
    pub round32_left: Vec<BracketNode>,
    pub round32_right: Vec<BracketNode>,
    pub round16_left: Vec<BracketNode>,
    pub round16_right: Vec<BracketNode>,
    pub quarter_left: Vec<BracketNode>,
    pub quarter_right: Vec<BracketNode>,
    pub semi: Vec<BracketNode>,
    #[serde(rename = "final")]
    pub finals: Vec<BracketNode>,
}

impl OrganizedBracket {
    pub fn group(&self, group: Group) -> &[BracketNode] {
        match group {
            Group::Round32Left => &self.round32_left,
            Group::Round32Right => &self.round32_right,
            Group::Round16Left => &self.round16_left,
            Group::Round16Right => &self.round16_right,
            Group::QuarterLeft => &self.quarter_left,
            Group::QuarterRight => &self.quarter_right,
            Group::Semi => &self.semi,
            Group::Final => &self.finals,
        }
    }

    pub fn group_mut(&mut self, group: Group) -> &mut Vec<BracketNode> {
        match group {
            Group::Round32Left => &mut self.round32_left,
            Group::Round32Right => &mut self.round32_right,
            Group::Round16Left => &mut self.round16_left,
            Group::Round16Right => &mut self.round16_right,
            Group::QuarterLeft => &mut self.quarter_left,
            Group::QuarterRight => &mut self.quarter_right,
            Group::Semi => &mut self.semi,
            Group::Final => &mut self.finals,
        }
    }

    /// All nodes in bottom-up group order
    pub fn nodes(&self) -> impl Iterator<Item = &BracketNode> {
        Group::ALL.into_iter().flat_map(move |g| self.group(g).iter())
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut BracketNode> {
        [
            &mut self.round32_left,
            &mut self.round32_right,
            &mut self.round16_left,
            &mut self.round16_right,
            &mut self.quarter_left,
            &mut self.quarter_right,
            &mut self.semi,
            &mut self.finals,
        ]
        .into_iter()
        .flat_map(|group| group.iter_mut())
    }

    /// Nodes drawn in one logical column, in group order
    pub fn column(&self, column: Column) -> impl Iterator<Item = &BracketNode> {
        self.nodes().filter(move |n| n.column() == Some(column))
    }

    pub fn get(&self, id: MatchId) -> Option<&BracketNode> {
        self.nodes().find(|n| n.id() == id)
    }

    pub fn len(&self) -> usize {
        Group::ALL.iter().map(|g| self.group(*g).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Group sizes in [`Group::ALL`] order
    pub fn counts(&self) -> [usize; 8] {
        Group::ALL.map(|g| self.group(g).len())
    }
}

/// An organized bracket plus the matches that could not be placed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bracket {
    pub organized: OrganizedBracket,
    pub issues: Vec<LayoutError>,
}

/// Partition records into the eight groups using the resolved topology
///
/// Each record is checked on its own: an unknown id, a stage that disagrees
/// with the template, or a repeated id excludes only that match and is
/// reported in [`Bracket::issues`]. Ids the template ignores are skipped
/// silently. Groups are ordered by id, then regrouped so siblings sit next
/// to each other in the order of their parents.
pub fn partition(records: &[MatchRecord], topology: &Topology) -> Bracket {
    let mut bracket = Bracket::default();

    let mut sorted: Vec<&MatchRecord> = records
        .iter()
        .filter(|record| {
            let ignored = topology.is_ignored(record.id);
            if ignored {
                log::debug!("skipping match {} outside the bracket tree", record.id);
            }
            !ignored
        })
        .collect();
    sorted.sort_by_key(|r| r.id);

    let mut occurrences: HashMap<MatchId, usize> = HashMap::new();
    for record in &sorted {
        *occurrences.entry(record.id).or_default() += 1;
    }

    let mut reported_duplicates: Vec<MatchId> = Vec::new();
    for record in sorted {
        let count = occurrences.get(&record.id).copied().unwrap_or(0);
        if count > 1 {
            if !reported_duplicates.contains(&record.id) {
                reported_duplicates.push(record.id);
                let err = LayoutError::DuplicateMatch {
                    id: record.id,
                    count,
                };
                log::error!("dropping match: {}", err);
                bracket.issues.push(err);
            }
            continue;
        }

        match place(record, topology) {
            Ok((group, node)) => bracket.organized.group_mut(group).push(node),
            Err(err) => {
                log::error!("dropping match: {}", err);
                bracket.issues.push(err);
            }
        }
    }

    for group in Group::ALL {
        order_group(bracket.organized.group_mut(group), group, topology);
    }

    log::debug!(
        "partitioned {} matches into groups {:?} with {} issues",
        bracket.organized.len(),
        bracket.organized.counts(),
        bracket.issues.len()
    );
    bracket
}

fn place(record: &MatchRecord, topology: &Topology) -> Result<(Group, BracketNode), LayoutError> {
    let expected = topology.stage_of(record.id)?;
    if expected != record.stage {
        return Err(LayoutError::StageMismatch {
            id: record.id,
            expected,
            found: record.stage,
        });
    }

    let half = topology.half(record.id)?;
    let parent = topology.parent(record.id)?;
    let group = Group::of(record.stage, half).ok_or(LayoutError::unknown(record.id))?;
    Ok((group, BracketNode::new(record.clone(), half, parent)))
}

/// Sort by id, then pull siblings together below the semifinal
fn order_group(nodes: &mut [BracketNode], group: Group, topology: &Topology) {
    nodes.sort_by_key(|n| n.id());
    if group.stage().is_split() {
        nodes.sort_by_key(|n| {
            n.parent
                .and_then(|p| topology.rank(p).ok())
                .unwrap_or(usize::MAX)
        });
    }
}
