//! Bracket template definitions and their TOML loader

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::TemplateError;
use crate::record::{MatchId, Stage};

use super::builtin::{SIXTEEN_TEAM, WORLD_CUP_2026};

/// One match slot of a bracket template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch {
    pub id: MatchId,
    pub stage: Stage,
    /// The two matches whose winners meet here; `None` for leaves
    pub from: Option<[MatchId; 2]>,
}

impl TemplateMatch {
    pub fn is_leaf(&self) -> bool {
        self.from.is_none()
    }
}

/// A validated single-elimination bracket template
///
/// Only obtainable through [`BracketTemplate::from_str`] and friends, so
/// every instance is an acyclic tree rooted at the final.
#[derive(Debug, Clone)]
pub struct BracketTemplate {
    name: Option<String>,
    description: Option<String>,
    final_match: MatchId,
    left_semifinal: MatchId,
    right_semifinal: MatchId,
    /// Known ids outside the tree, such as a third-place playoff
    ignored: Vec<MatchId>,
    /// All matches in stage order, then declaration order
    matches: Vec<TemplateMatch>,
}

/// TOML structure for deserializing templates
#[derive(Deserialize)]
struct TomlTemplate {
    metadata: Option<TomlMetadata>,
    bracket: TomlBracket,
    stages: Vec<TomlStage>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlBracket {
    #[serde(rename = "final")]
    final_match: u32,
    left_semifinal: u32,
    right_semifinal: u32,
    #[serde(default)]
    ignored: Vec<u32>,
}

#[derive(Deserialize)]
struct TomlStage {
    stage: Stage,
    matches: Vec<TomlMatch>,
}

#[derive(Deserialize)]
struct TomlMatch {
    id: u32,
    #[serde(default)]
    from: Vec<u32>,
}

impl BracketTemplate {
    /// Load a template from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a template from a TOML string and validate its tree shape
    pub fn from_str(content: &str) -> Result<Self, TemplateError> {
        let mut parsed: TomlTemplate = toml::from_str(content)?;
        parsed.stages.sort_by_key(|s| s.stage);

        let mut matches = Vec::new();
        let mut stage_of: HashMap<MatchId, Stage> = HashMap::new();
        let first_stage = parsed.stages.first().map(|s| s.stage);
        let mut previous: Option<Stage> = None;

        for stage in &parsed.stages {
            if previous == Some(stage.stage) {
                return Err(TemplateError::DuplicateStage { stage: stage.stage });
            }
            previous = Some(stage.stage);

            for m in &stage.matches {
                let id = MatchId(m.id);
                if stage_of.contains_key(&id) {
                    return Err(TemplateError::DuplicateMatch { id });
                }

                let from = match m.from.as_slice() {
                    [] => {
                        if let Some(first) = first_stage.filter(|f| *f != stage.stage) {
                            return Err(TemplateError::LateLeaf {
                                id,
                                stage: stage.stage,
                                first,
                            });
                        }
                        None
                    }
                    [a, b] => {
                        for feeder in [MatchId(*a), MatchId(*b)] {
                            let known_earlier = stage_of
                                .get(&feeder)
                                .is_some_and(|s| *s < stage.stage);
                            if !known_earlier {
                                return Err(TemplateError::UnknownFeeder { id, from: feeder });
                            }
                        }
                        Some([MatchId(*a), MatchId(*b)])
                    }
                    other => {
                        return Err(TemplateError::WrongFeederCount {
                            id,
                            count: other.len(),
                        })
                    }
                };

                stage_of.insert(id, stage.stage);
                matches.push(TemplateMatch {
                    id,
                    stage: stage.stage,
                    from,
                });
            }
        }

        let template = BracketTemplate {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            final_match: MatchId(parsed.bracket.final_match),
            left_semifinal: MatchId(parsed.bracket.left_semifinal),
            right_semifinal: MatchId(parsed.bracket.right_semifinal),
            ignored: parsed.bracket.ignored.into_iter().map(MatchId).collect(),
            matches,
        };
        template.validate_parents()?;
        template.validate_roots()?;
        Ok(template)
    }

    /// Every match except the final feeds exactly one later match
    fn validate_parents(&self) -> Result<(), TemplateError> {
        let mut parent_of: HashMap<MatchId, MatchId> = HashMap::new();
        for m in &self.matches {
            for child in m.from.iter().flatten() {
                if let Some(first) = parent_of.insert(*child, m.id) {
                    return Err(TemplateError::MultipleParents {
                        id: *child,
                        first,
                        second: m.id,
                    });
                }
            }
        }

        for m in &self.matches {
            if m.id != self.final_match && !parent_of.contains_key(&m.id) {
                return Err(TemplateError::Orphan {
                    id: m.id,
                    stage: m.stage,
                });
            }
        }
        Ok(())
    }

    fn validate_roots(&self) -> Result<(), TemplateError> {
        let final_match = self.get(self.final_match).ok_or_else(|| {
            TemplateError::roots(format!("final match {} is not defined", self.final_match))
        })?;
        if final_match.stage != Stage::Final {
            return Err(TemplateError::roots(format!(
                "match {} is declared as the final but sits in stage {}",
                final_match.id, final_match.stage
            )));
        }
        if self.left_semifinal == self.right_semifinal {
            return Err(TemplateError::roots(
                "left and right semifinal must be different matches",
            ));
        }

        let fed_by: HashSet<MatchId> = final_match.from.iter().flatten().copied().collect();
        for semi in [self.left_semifinal, self.right_semifinal] {
            match self.get(semi) {
                Some(m) if m.stage == Stage::Semi && fed_by.contains(&semi) => {}
                Some(_) => {
                    return Err(TemplateError::roots(format!(
                        "semifinal {} must be a semi stage match feeding the final",
                        semi
                    )))
                }
                None => {
                    return Err(TemplateError::roots(format!(
                        "semifinal {} is not defined",
                        semi
                    )))
                }
            }
        }
        Ok(())
    }

    /// The built-in World Cup 2026 template (matches 73 to 104)
    pub fn world_cup_2026() -> Self {
        Self::from_str(WORLD_CUP_2026).expect("built-in World Cup template should be valid")
    }

    /// The built-in 16-team template (matches 1 to 15)
    pub fn sixteen_team() -> Self {
        Self::from_str(SIXTEEN_TEAM).expect("built-in 16-team template should be valid")
    }

    /// Look up a template match by id
    pub fn get(&self, id: MatchId) -> Option<&TemplateMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn final_match(&self) -> MatchId {
        self.final_match
    }

    /// Root of the left half of the draw
    pub fn left_semifinal(&self) -> MatchId {
        self.left_semifinal
    }

    /// Root of the right half of the draw
    pub fn right_semifinal(&self) -> MatchId {
        self.right_semifinal
    }

    pub fn ignored(&self) -> &[MatchId] {
        &self.ignored
    }

    /// All matches in stage order, then declaration order
    pub fn matches(&self) -> &[TemplateMatch] {
        &self.matches
    }

    /// Stage whose matches have no feeders
    pub fn leaf_stage(&self) -> Option<Stage> {
        self.matches.first().map(|m| m.stage)
    }

    /// Number of leaf matches in the widest half of the draw
    pub fn leaves_per_half(&self) -> usize {
        let leaves = self.matches.iter().filter(|m| m.is_leaf()).count();
        leaves.div_ceil(2)
    }

}

impl Default for BracketTemplate {
    fn default() -> Self {
        Self::world_cup_2026()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_TEAM: &str = r#"
[bracket]
final = 3
left_semifinal = 1
right_semifinal = 2

[[stages]]
stage = "final"
matches = [{ id = 3, from = [1, 2] }]

[[stages]]
stage = "semi"
matches = [{ id = 1 }, { id = 2 }]
"#;

    #[test]
    fn test_builtin_world_cup() {
        let template = BracketTemplate::world_cup_2026();
        assert_eq!(template.name(), Some("World Cup 2026"));
        assert_eq!(template.matches().len(), 31);
        assert_eq!(template.final_match(), MatchId(104));
        assert_eq!(template.left_semifinal(), MatchId(101));
        assert_eq!(template.right_semifinal(), MatchId(102));
        assert_eq!(template.leaf_stage(), Some(Stage::Round32));
        assert_eq!(template.leaves_per_half(), 8);
        assert_eq!(template.ignored(), &[MatchId(103)]);
        assert_eq!(
            template.get(MatchId(89)).and_then(|m| m.from),
            Some([MatchId(74), MatchId(77)])
        );
    }

    #[test]
    fn test_builtin_sixteen_team() {
        let template = BracketTemplate::sixteen_team();
        assert_eq!(template.matches().len(), 15);
        assert_eq!(template.leaf_stage(), Some(Stage::Round16));
        assert_eq!(template.leaves_per_half(), 4);
        assert!(template.ignored().is_empty());
    }

    #[test]
    fn test_stages_may_be_declared_in_any_order() {
        let template = BracketTemplate::from_str(FOUR_TEAM).expect("Should parse");
        assert_eq!(template.leaf_stage(), Some(Stage::Semi));
        assert_eq!(template.matches()[2].id, MatchId(3));
    }

    #[test]
    fn test_duplicate_match_rejected() {
        let toml_str = FOUR_TEAM.replace("{ id = 2 }", "{ id = 1 }");
        let err = BracketTemplate::from_str(&toml_str).unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateMatch { id } if id == MatchId(1)));
    }

    #[test]
    fn test_dangling_feeder_rejected() {
        let toml_str = FOUR_TEAM.replace("from = [1, 2]", "from = [1, 9]");
        let err = BracketTemplate::from_str(&toml_str).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownFeeder { from, .. } if from == MatchId(9)));
    }

    #[test]
    fn test_feeder_cycle_rejected() {
        // 1 and 2 feeding each other can only be written within one stage
        let toml_str = r#"
[bracket]
final = 3
left_semifinal = 1
right_semifinal = 2

[[stages]]
stage = "semi"
matches = [{ id = 1, from = [2, 4] }, { id = 2, from = [1, 4] }, { id = 4 }]

[[stages]]
stage = "final"
matches = [{ id = 3, from = [1, 2] }]
"#;
        let err = BracketTemplate::from_str(toml_str).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownFeeder { from, .. } if from == MatchId(2)));
    }

    #[test]
    fn test_wrong_feeder_count_rejected() {
        let toml_str = FOUR_TEAM.replace("from = [1, 2]", "from = [1]");
        let err = BracketTemplate::from_str(&toml_str).unwrap_err();
        assert!(matches!(err, TemplateError::WrongFeederCount { count: 1, .. }));
    }

    #[test]
    fn test_match_feeding_two_parents_rejected() {
        let toml_str = r#"
[bracket]
final = 15
left_semifinal = 13
right_semifinal = 14

[[stages]]
stage = "quarter"
matches = [{ id = 9 }, { id = 10 }, { id = 11 }, { id = 12 }]

[[stages]]
stage = "semi"
matches = [{ id = 13, from = [9, 10] }, { id = 14, from = [10, 12] }]

[[stages]]
stage = "final"
matches = [{ id = 15, from = [13, 14] }]
"#;
        let err = BracketTemplate::from_str(toml_str).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MultipleParents { id, .. } if id == MatchId(10)
        ));
    }

    #[test]
    fn test_final_not_fed_by_semifinals_rejected() {
        let toml_str = FOUR_TEAM.replace("right_semifinal = 2", "right_semifinal = 3");
        let err = BracketTemplate::from_str(&toml_str).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidRoots { .. }));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = BracketTemplate::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }
}
