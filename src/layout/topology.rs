//! Bracket topology: parents, children and halves of template matches

use std::collections::HashMap;

use crate::record::{MatchId, Stage};
use crate::template::BracketTemplate;

use super::error::LayoutError;
use super::types::Half;

/// Resolved tree structure of a bracket template
///
/// Built once per template; every lookup is a table hit except [`half`],
/// which walks the parent chain up to one of the two semifinals.
///
/// [`half`]: Topology::half
#[derive(Debug, Clone)]
pub struct Topology {
    stages: HashMap<MatchId, Stage>,
    parents: HashMap<MatchId, MatchId>,
    children: HashMap<MatchId, [MatchId; 2]>,
    ranks: HashMap<MatchId, usize>,
    left_semifinal: MatchId,
    right_semifinal: MatchId,
    ignored: Vec<MatchId>,
}

impl Topology {
    pub fn new(template: &BracketTemplate) -> Self {
        let mut stages = HashMap::new();
        let mut parents = HashMap::new();
        let mut children = HashMap::new();

        for m in template.matches() {
            stages.insert(m.id, m.stage);
            if let Some(mut from) = m.from {
                from.sort();
                for child in from {
                    parents.insert(child, m.id);
                }
                children.insert(m.id, from);
            }
        }

        let ranks = depth_first_ranks(template.final_match(), &children);

        Self {
            stages,
            parents,
            children,
            ranks,
            left_semifinal: template.left_semifinal(),
            right_semifinal: template.right_semifinal(),
            ignored: template.ignored().to_vec(),
        }
    }

    fn ensure_known(&self, id: MatchId) -> Result<(), LayoutError> {
        if self.stages.contains_key(&id) {
            Ok(())
        } else {
            Err(LayoutError::unknown(id))
        }
    }

    /// Stage the template assigns to a match
    pub fn stage_of(&self, id: MatchId) -> Result<Stage, LayoutError> {
        self.stages
            .get(&id)
            .copied()
            .ok_or(LayoutError::UnknownMatchId { id })
    }

    /// Match the winner of `id` advances to; `None` for the final
    pub fn parent(&self, id: MatchId) -> Result<Option<MatchId>, LayoutError> {
        self.ensure_known(id)?;
        Ok(self.parents.get(&id).copied())
    }

    /// The two matches feeding `id`, in ascending id order; `None` for leaves
    pub fn children(&self, id: MatchId) -> Result<Option<[MatchId; 2]>, LayoutError> {
        self.ensure_known(id)?;
        Ok(self.children.get(&id).copied())
    }

    /// Half of the draw `id` belongs to; `None` for the final
    pub fn half(&self, id: MatchId) -> Result<Option<Half>, LayoutError> {
        self.ensure_known(id)?;

        let mut current = id;
        loop {
            if current == self.left_semifinal {
                return Ok(Some(Half::Left));
            }
            if current == self.right_semifinal {
                return Ok(Some(Half::Right));
            }
            match self.parents.get(&current) {
                Some(parent) => current = *parent,
                None => return Ok(None),
            }
        }
    }

    /// Depth-first position of `id` counted from the final
    pub fn rank(&self, id: MatchId) -> Result<usize, LayoutError> {
        self.ranks
            .get(&id)
            .copied()
            .ok_or(LayoutError::UnknownMatchId { id })
    }

    /// Known id that is deliberately kept out of the tree
    pub fn is_ignored(&self, id: MatchId) -> bool {
        self.ignored.contains(&id)
    }

    /// Number of matches in the template tree
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Preorder numbering from the root, smaller child first
fn depth_first_ranks(
    root: MatchId,
    children: &HashMap<MatchId, [MatchId; 2]>,
) -> HashMap<MatchId, usize> {
    let mut ranks = HashMap::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        ranks.insert(id, ranks.len());
        if let Some([first, second]) = children.get(&id) {
            stack.push(*second);
            stack.push(*first);
        }
    }
    ranks
}
