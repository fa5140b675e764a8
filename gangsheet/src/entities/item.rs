use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::fsize;
use crate::geometry::{Rect, Rotation};
use crate::units::in_to_px;

/// Unique identifier of an [`Item`], stable across repacking
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rectangular image to be placed on a sheet.
/// The intrinsic size is stored in inches, in its unrotated orientation.
/// Position and rotation are outputs of the packer, expressed in display pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    /// Human readable identification, used in warnings
    pub name: String,
    pub width: fsize,
    pub height: fsize,
    pub x: fsize,
    pub y: fsize,
    pub rotation: Rotation,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, width: fsize, height: fsize) -> Self {
        Item {
            id,
            name: name.into(),
            width,
            height,
            x: 0.0,
            y: 0.0,
            rotation: Rotation::Deg0,
        }
    }

    /// An item with a non-positive (or NaN) dimension can never be placed
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Width and height in display pixels after applying the rotation
    pub fn footprint(&self) -> (fsize, fsize) {
        self.rotation.apply(in_to_px(self.width), in_to_px(self.height))
    }

    /// Axis-aligned bounding box of the placed item, `None` for invalid items
    pub fn bbox(&self) -> Option<Rect> {
        let (w, h) = self.footprint();
        Rect::from_origin(self.x, self.y, w, h).ok()
    }

    /// Intrinsic area in square inches
    pub fn area(&self) -> fsize {
        self.width * self.height
    }

    /// Returns a copy placed at (`x`, `y`) with the given rotation
    pub fn placed_at(&self, x: fsize, y: fsize, rotation: Rotation) -> Item {
        Item {
            x,
            y,
            rotation,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotated_footprint_swaps_dimensions() {
        let item = Item::new(ItemId(1), "logo", 4.0, 2.0);
        assert_eq!(item.footprint(), (60.0, 30.0));
        let rotated = item.placed_at(7.5, 7.5, Rotation::Deg90);
        assert_eq!(rotated.footprint(), (30.0, 60.0));
        let bbox = rotated.bbox().unwrap();
        assert_eq!((bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max), (7.5, 7.5, 37.5, 67.5));
    }

    #[test]
    fn invalid_dimensions() {
        assert!(!Item::new(ItemId(1), "a", 0.0, 2.0).is_valid());
        assert!(!Item::new(ItemId(2), "b", 2.0, -1.0).is_valid());
        assert!(!Item::new(ItemId(3), "c", fsize::NAN, 1.0).is_valid());
        assert!(Item::new(ItemId(4), "d", 0.01, 0.01).is_valid());
        assert_eq!(Item::new(ItemId(5), "e", 0.0, 2.0).bbox(), None);
    }

    #[test]
    fn placing_keeps_identity() {
        let item = Item::new(ItemId(9), "sticker", 1.0, 1.0);
        let placed = item.placed_at(10.0, 20.0, Rotation::Deg0);
        assert_eq!(placed.id, item.id);
        assert_eq!(placed.name, item.name);
        assert_eq!((placed.x, placed.y), (10.0, 20.0));
    }
}
