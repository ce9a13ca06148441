//! Tournament bracket templates
//!
//! A template describes the fixed tree of a knockout tournament: which
//! matches exist in each stage and which two matches feed each later one.
//! Templates are plain TOML so the engine works for any bracket size.
//!
//! # Example
//!
//! ```text
//! [bracket]
//! final = 15
//! left_semifinal = 13
//! right_semifinal = 14
//!
//! [[stages]]
//! stage = "semi"
//! matches = [{ id = 13, from = [9, 10] }, { id = 14, from = [11, 12] }]
//! ```

mod builtin;
mod definition;

pub use builtin::{SIXTEEN_TEAM, WORLD_CUP_2026};
pub use definition::{BracketTemplate, TemplateMatch};
