//! Previews of a computed bracket layout
//!
//! The layout engine only produces geometry; these renderers exist so a
//! layout can be inspected without the host UI. `svg` draws cards and
//! connectors, `text` lists cards one per line.

pub mod config;
pub mod svg;
pub mod text;

pub use config::SvgConfig;
pub use svg::render_svg;
pub use text::render_text;
