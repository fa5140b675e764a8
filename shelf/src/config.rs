use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use gangsheet::fsize;
use gangsheet::io::svg::SvgDrawOptions;
use gangsheet::units::in_to_px;

/// Configuration for the [`Nester`](crate::opt::nester::Nester)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct NestConfig {
    /// Minimum distance between the items and every edge of the sheet, in inches
    pub padding: fsize,
    /// Minimum distance between any two items, in inches
    pub gutter: fsize,
    /// Whether items may be turned a quarter when they do not fit upright
    pub allow_rotation: bool,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl NestConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.padding.is_finite() && self.padding >= 0.0,
            "padding must be a non-negative number of inches, got {}",
            self.padding
        );
        ensure!(
            self.gutter.is_finite() && self.gutter >= 0.0,
            "gutter must be a non-negative number of inches, got {}",
            self.gutter
        );
        Ok(())
    }

    /// Gutter in display pixels, the unit the packer works in
    pub fn gutter_px(&self) -> fsize {
        in_to_px(self.gutter)
    }
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            padding: 0.5,
            gutter: 0.5,
            allow_rotation: true,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
