//! Templates shipped with the crate

/// FIFA World Cup 2026 knockout stage, matches 73 to 104
pub const WORLD_CUP_2026: &str = include_str!("../../templates/world_cup_2026.toml");

/// Generic 16-team bracket, matches 1 to 15
pub const SIXTEEN_TEAM: &str = include_str!("../../templates/sixteen_team.toml");
