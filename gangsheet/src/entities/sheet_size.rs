use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::fsize;
use crate::geometry::PackableArea;
use crate::units::in_to_px;

/// Physical size of a print sheet, in inches
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub name: Cow<'static, str>,
    pub width: fsize,
    pub height: fsize,
}

/// The standard DTF gang sheet sizes, 22" wide rolls cut to length
pub const SHEET_SIZES: [SheetSize; 5] = [
    SheetSize::preset("22\" x 12\"", 22.0, 12.0),
    SheetSize::preset("22\" x 24\"", 22.0, 24.0),
    SheetSize::preset("22\" x 36\"", 22.0, 36.0),
    SheetSize::preset("22\" x 60\"", 22.0, 60.0),
    SheetSize::preset("22\" x 120\"", 22.0, 120.0),
];

impl SheetSize {
    pub fn new(name: impl Into<String>, width: fsize, height: fsize) -> Self {
        SheetSize {
            name: Cow::Owned(name.into()),
            width,
            height,
        }
    }

    const fn preset(name: &'static str, width: fsize, height: fsize) -> Self {
        SheetSize {
            name: Cow::Borrowed(name),
            width,
            height,
        }
    }

    /// Looks up one of the [`SHEET_SIZES`] by name
    pub fn by_name(name: &str) -> Option<SheetSize> {
        SHEET_SIZES.iter().find(|s| s.name == name).cloned()
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Width and height in display pixels
    pub fn size_px(&self) -> (fsize, fsize) {
        (in_to_px(self.width), in_to_px(self.height))
    }

    /// The region left after removing `padding` (inches) from every edge, in display pixels.
    /// Its origin is offset by the padding, so positions inside it are sheet coordinates.
    pub fn packable_area(&self, padding: fsize) -> PackableArea {
        let (w, h) = self.size_px();
        let padding_px = in_to_px(padding);
        PackableArea::new(
            padding_px,
            padding_px,
            w - 2.0 * padding_px,
            h - 2.0 * padding_px,
        )
    }
}

impl Default for SheetSize {
    fn default() -> Self {
        SHEET_SIZES[1].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_22_by_24() {
        let size = SheetSize::default();
        assert_eq!((size.width, size.height), (22.0, 24.0));
        assert_eq!(SheetSize::by_name("22\" x 60\"").map(|s| s.height), Some(60.0));
        assert_eq!(SheetSize::by_name("A4"), None);
    }

    #[test]
    fn packable_area_is_offset_by_padding() {
        let area = SheetSize::default().packable_area(0.5);
        assert_eq!(area, PackableArea::new(7.5, 7.5, 315.0, 345.0));
    }

    #[test]
    fn excessive_padding_gives_degenerate_area() {
        let size = SheetSize::new("tiny", 2.0, 10.0);
        assert!(size.packable_area(1.0).is_degenerate());
        assert!(!size.packable_area(0.9).is_degenerate());
    }

    #[test]
    fn serde_roundtrip_keeps_name() {
        let json = serde_json::to_string(&SHEET_SIZES[0]).unwrap();
        let back: SheetSize = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SHEET_SIZES[0]);
    }
}
