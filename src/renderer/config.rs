//! Options for the SVG bracket preview

/// How match cards and connectors are drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Margin added on every side of the layout bounds
    pub margin: f64,

    /// Emit an `<?xml ...?>` declaration before the root element
    pub xml_declaration: bool,

    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,

    /// Prepended to every CSS class, so `card` becomes `br-card`
    pub class_prefix: String,

    /// Horizontal distance from a card's left edge to its side names
    pub label_inset: f64,

    /// Rounded corner radius of match cards
    pub corner_radius: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            xml_declaration: true,
            indent: Some(2),
            class_prefix: "br-".to_string(),
            label_inset: 8.0,
            corner_radius: 4.0,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Leave out the XML declaration, for embedding in HTML
    pub fn embedded(mut self) -> Self {
        self.xml_declaration = false;
        self
    }

    /// Write the document on a single line
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_label_inset(mut self, inset: f64) -> Self {
        self.label_inset = inset;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Prefixed CSS class name
    pub(crate) fn class(&self, name: &str) -> String {
        format!("{}{}", self.class_prefix, name)
    }
}
