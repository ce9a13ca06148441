//! Configuration for the layout engine

/// Pixel dimensions used to turn slots into card rectangles
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Card width in pixels
    pub card_width: f64,

    /// Card height in pixels
    pub card_height: f64,

    /// Width of one bracket column; cards are centered inside it
    pub column_width: f64,

    /// Horizontal space between adjacent columns
    pub gutter: f64,

    /// Pixels per slot unit
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 160.0,
            card_height: 56.0,
            column_width: 200.0,
            gutter: 24.0,
            vertical_spacing: 72.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the card size
    pub fn with_card_size(mut self, width: f64, height: f64) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    /// Set the column width
    pub fn with_column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    /// Set the gutter between columns
    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.gutter = gutter;
        self
    }

    /// Set the pixels per slot unit
    pub fn with_vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Derive the vertical spacing from the available height and the number
    /// of leaf matches stacked in the deepest column
    ///
    /// Leaves the spacing unchanged when the result would not be a positive
    /// finite number.
    pub fn fit_height(mut self, available_height: f64, leaf_count: usize) -> Self {
        if leaf_count == 0 {
            return self;
        }
        let spacing = available_height / leaf_count as f64;
        if spacing.is_finite() && spacing > 0.0 {
            self.vertical_spacing = spacing;
        }
        self
    }

    /// Horizontal distance between the starts of adjacent columns
    pub fn column_stride(&self) -> f64 {
        self.column_width + self.gutter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.card_width, 160.0);
        assert_eq!(config.card_height, 56.0);
        assert_eq!(config.column_width, 200.0);
        assert_eq!(config.gutter, 24.0);
        assert_eq!(config.vertical_spacing, 72.0);
        assert_eq!(config.column_stride(), 224.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_card_size(120.0, 40.0)
            .with_column_width(150.0)
            .with_gutter(10.0)
            .with_vertical_spacing(50.0);

        assert_eq!(config.card_width, 120.0);
        assert_eq!(config.card_height, 40.0);
        assert_eq!(config.column_stride(), 160.0);
        assert_eq!(config.vertical_spacing, 50.0);
    }

    #[test]
    fn test_fit_height() {
        let config = LayoutConfig::new().fit_height(800.0, 8);
        assert_eq!(config.vertical_spacing, 100.0);

        let unchanged = LayoutConfig::new().fit_height(800.0, 0);
        assert_eq!(unchanged.vertical_spacing, 72.0);

        let negative = LayoutConfig::new().fit_height(-10.0, 4);
        assert_eq!(negative.vertical_spacing, 72.0);
    }
}
