use crate::entities::{Item, SheetSize};
use crate::fsize;
use crate::geometry::Rect;

/// Whether a sheet holds packed items or the items that could not be placed anywhere
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetStatus {
    Packed,
    /// Holds items too large for the sheet size, their positions are meaningless
    Unplaced,
}

/// A print sheet and the items laid out on it.
/// The order of `items` is the stacking order for rendering, it is irrelevant for packing.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub size: SheetSize,
    pub items: Vec<Item>,
    pub status: SheetStatus,
}

impl Sheet {
    pub fn new(name: impl Into<String>, size: SheetSize) -> Self {
        Sheet {
            name: name.into(),
            size,
            items: vec![],
            status: SheetStatus::Packed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_unplaced(&self) -> bool {
        self.status == SheetStatus::Unplaced
    }

    /// Sum of the item footprints divided by the packable area (0 if degenerate or unplaced)
    pub fn density(&self, padding: fsize) -> fsize {
        let packable_area = self.size.packable_area(padding).area();
        if self.is_unplaced() || packable_area <= 0.0 {
            return 0.0;
        }
        let item_area = self
            .items
            .iter()
            .map(|i| {
                let (w, h) = i.footprint();
                w * h
            })
            .sum::<fsize>();
        item_area / packable_area
    }

    /// Smallest rectangle enclosing every item footprint, `None` for a sheet without valid items
    pub fn used_extent(&self) -> Option<Rect> {
        self.items
            .iter()
            .filter_map(|i| i.bbox())
            .reduce(Rect::bounding_rect)
    }
}
