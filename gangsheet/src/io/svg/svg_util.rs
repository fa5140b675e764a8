use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::path::Data;

use crate::geometry::Rect;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
#[serde(default)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    pub theme: SvgSheetTheme,
    ///Draw the packable area (sheet minus padding) as a dashed outline
    pub packable_area: bool,
    ///Write the item name inside every footprint
    pub labels: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgSheetTheme::default(),
            packable_area: true,
            labels: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgSheetTheme {
    pub stroke_width_multiplier: f32,
    pub sheet_fill: Color,
    pub item_fill: Color,
    pub rotated_item_fill: Color,
    pub unplaced_item_fill: Color,
    pub padding_stroke: Color,
}

impl Default for SvgSheetTheme {
    fn default() -> Self {
        SvgSheetTheme::TRANSFER_FILM
    }
}

impl SvgSheetTheme {
    pub const TRANSFER_FILM: SvgSheetTheme = SvgSheetTheme {
        stroke_width_multiplier: 2.0,
        sheet_fill: Color(0xF5, 0xF5, 0xF0),
        item_fill: Color(0x7F, 0xB3, 0xD5),
        rotated_item_fill: Color(0x9B, 0xC5, 0x8A),
        unplaced_item_fill: Color(0xE0, 0x6C, 0x5A),
        padding_stroke: Color(0x88, 0x88, 0x88),
    };

    pub const GRAY: SvgSheetTheme = SvgSheetTheme {
        stroke_width_multiplier: 2.5,
        sheet_fill: Color(0xD3, 0xD3, 0xD3),
        item_fill: Color(0x7A, 0x7A, 0x7A),
        rotated_item_fill: Color(0x63, 0x63, 0x63),
        unplaced_item_fill: Color(0xD0, 0x00, 0x00),
        padding_stroke: Color(0x2D, 0x2D, 0x2D),
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid color: {s}"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("invalid color {s}: {e}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

pub fn rect_data(rect: Rect) -> Data {
    let (x_min, y_min) = (rect.x_min as f32, rect.y_min as f32);
    let (x_max, y_max) = (rect.x_max as f32, rect.y_max as f32);
    Data::new()
        .move_to((x_min, y_min))
        .line_to((x_max, y_min))
        .line_to((x_max, y_max))
        .line_to((x_min, y_max))
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::try_from("#7fB3d5").unwrap();
        assert_eq!(c, Color(0x7F, 0xB3, 0xD5));
        assert_eq!(c.to_string(), "#7FB3D5");
        assert!(Color::try_from("#12345").is_err());
        assert!(Color::try_from("zzzzzz").is_err());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: SvgDrawOptions = serde_json::from_str(r#"{"labels": false}"#).unwrap();
        assert!(!options.labels);
        assert!(options.packable_area);
        assert_eq!(options.theme, SvgSheetTheme::TRANSFER_FILM);

        let options: SvgDrawOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SvgDrawOptions::default());
    }
}
