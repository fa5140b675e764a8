use std::cmp::Reverse;

use gangsheet::entities::Item;
use gangsheet::fsize;
use gangsheet::geometry::{PackableArea, Rotation};
use gangsheet::units::in_to_px;
use gangsheet::util::assertions;
use itertools::Itertools;
use log::{debug, trace};
use ordered_float::OrderedFloat;

/// Partition of the items offered to [`pack`].
#[derive(Clone, Debug, Default)]
pub struct PackResult {
    /// Copies of the items that fit, in placement order, with position and rotation set
    pub placed: Vec<Item>,
    /// Items that did not fit, in input order and untouched
    pub unplaced: Vec<Item>,
}

/// Packs as many `items` as possible into `area` using a binary-tree shelf heuristic.
///
/// Items are sorted by their largest side, then by area, both descending.
/// Each item is put in the first free region of the tree that can hold it (depth-first, the
/// region beside an occupied node is searched before the one below it), trying the rotated
/// footprint only when the upright one fits nowhere. `gutter` is in display pixels and
/// separates every pair of placed footprints.
///
/// This is a pure function: identical inputs always give identical outputs.
/// Capacities are compared without any tolerance.
pub fn pack(items: &[Item], area: PackableArea, gutter: fsize, allow_rotation: bool) -> PackResult {
    if area.is_degenerate() {
        debug!("[SHELF] packable area {area:?} is degenerate, nothing can be placed");
        return PackResult {
            placed: vec![],
            unplaced: items.to_vec(),
        };
    }

    let mut root = PackNode::new(area.x_min, area.y_min, area.width, area.height);
    let mut is_placed = vec![false; items.len()];
    let mut placed = Vec::with_capacity(items.len());

    for idx in placement_order(items) {
        let item = &items[idx];
        let (w, h) = (in_to_px(item.width), in_to_px(item.height));

        let placement = match root.insert(w, h, gutter) {
            Some(origin) => Some((origin, Rotation::Deg0)),
            None if allow_rotation && w != h => root
                .insert(h, w, gutter)
                .map(|origin| (origin, Rotation::Deg90)),
            None => None,
        };

        match placement {
            Some(((x, y), rotation)) => {
                trace!(
                    "[SHELF] placed item {} ({}) at ({x:.2}, {y:.2}), rotation {}",
                    item.id,
                    item.name,
                    rotation.degrees()
                );
                placed.push(item.placed_at(x, y, rotation));
                is_placed[idx] = true;
            }
            None => trace!("[SHELF] item {} ({}) does not fit", item.id, item.name),
        }
    }

    let unplaced = items
        .iter()
        .zip(is_placed.iter())
        .filter(|(_, placed)| !**placed)
        .map(|(item, _)| item.clone())
        .collect_vec();

    debug!(
        "[SHELF] placed {}/{} items, {} unplaced",
        placed.len(),
        items.len(),
        unplaced.len()
    );

    debug_assert!(assertions::items_within_area(&placed, &area));
    debug_assert!(assertions::items_separated(&placed, gutter));
    debug_assert!(assertions::items_conserved(items, &placed, &unplaced));

    PackResult { placed, unplaced }
}

/// Indices of the valid items, largest side first, ties broken by largest area.
/// The sort is stable, so equal items keep their input order.
fn placement_order(items: &[Item]) -> Vec<usize> {
    (0..items.len())
        .filter(|&i| items[i].is_valid())
        .sorted_by_key(|&i| {
            let item = &items[i];
            (
                Reverse(OrderedFloat(fsize::max(item.width, item.height))),
                Reverse(OrderedFloat(item.area())),
            )
        })
        .collect_vec()
}

/// Free or occupied region of the packable area.
/// The tree is owned top-down and discarded after every [`pack`] call.
struct PackNode {
    x: fsize,
    y: fsize,
    width: fsize,
    height: fsize,
    /// Set once a footprint occupies the top left corner of this node
    split: Option<Box<Split>>,
}

/// The two regions left over after placing a footprint in a node
struct Split {
    /// Right of the footprint, spanning the full height of the node
    beside: PackNode,
    /// Under the footprint, only as wide as the footprint itself
    below: PackNode,
}

impl PackNode {
    fn new(x: fsize, y: fsize, width: fsize, height: fsize) -> Self {
        PackNode {
            x,
            y,
            width,
            height,
            split: None,
        }
    }

    /// Finds the first free node able to hold a `w` x `h` footprint and splits it.
    /// Returns the origin of that node. The tree is not modified when nothing fits.
    fn insert(&mut self, w: fsize, h: fsize, gutter: fsize) -> Option<(fsize, fsize)> {
        if let Some(split) = self.split.as_deref_mut() {
            return split
                .beside
                .insert(w, h, gutter)
                .or_else(|| split.below.insert(w, h, gutter));
        }
        if w <= self.width && h <= self.height {
            self.split = Some(Box::new(Split {
                beside: PackNode::new(
                    self.x + w + gutter,
                    self.y,
                    self.width - w - gutter,
                    self.height,
                ),
                below: PackNode::new(
                    self.x,
                    self.y + h + gutter,
                    w,
                    self.height - h - gutter,
                ),
            }));
            Some((self.x, self.y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gangsheet::entities::ItemId;

    fn item(id: u64, w: fsize, h: fsize) -> Item {
        Item::new(ItemId(id), format!("item {id}"), w, h)
    }

    #[test]
    fn order_is_largest_side_then_area() {
        let items = vec![
            item(0, 1.0, 1.0),
            item(1, 4.0, 1.0),
            item(2, 2.0, 4.0),
            item(3, 3.0, 3.0),
            item(4, 1.0, 4.0),
            item(5, 0.0, 9.0),
        ];
        assert_eq!(placement_order(&items), vec![2, 1, 4, 3, 0]);
    }

    #[test]
    fn split_leaves_beside_full_height_and_below_footprint_wide() {
        let mut root = PackNode::new(0.0, 0.0, 100.0, 80.0);
        assert_eq!(root.insert(30.0, 20.0, 5.0), Some((0.0, 0.0)));
        let split = root.split.as_ref().unwrap();
        let (beside, below) = (&split.beside, &split.below);
        assert_eq!(
            (beside.x, beside.y, beside.width, beside.height),
            (35.0, 0.0, 65.0, 80.0)
        );
        assert_eq!(
            (below.x, below.y, below.width, below.height),
            (0.0, 25.0, 30.0, 55.0)
        );
    }

    #[test]
    fn beside_is_searched_before_below() {
        let mut root = PackNode::new(0.0, 0.0, 100.0, 100.0);
        root.insert(40.0, 40.0, 0.0);
        //fits both beside (60x100) and below (40x60), beside wins
        assert_eq!(root.insert(30.0, 30.0, 0.0), Some((40.0, 0.0)));
        //too wide for what is left beside (30x100 right of the second item), only below fits
        assert_eq!(root.insert(40.0, 60.0, 0.0), Some((0.0, 40.0)));
    }

    #[test]
    fn failed_insert_keeps_tree() {
        let mut root = PackNode::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(root.insert(11.0, 1.0, 0.0), None);
        assert!(root.split.is_none());
        assert_eq!(root.insert(10.0, 10.0, 0.0), Some((0.0, 0.0)));
    }

    #[test]
    fn exact_fit_is_accepted() {
        let area = PackableArea::new(0.0, 0.0, 30.0, 15.0);
        let result = pack(&[item(0, 2.0, 1.0)], area, 0.0, false);
        assert_eq!(result.placed.len(), 1);
    }
}
