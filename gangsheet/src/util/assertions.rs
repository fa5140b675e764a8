//Various checks to verify the correctness of placements
//Used in debug_assert!() blocks and in tests

use float_cmp::approx_eq;
use itertools::Itertools;
use log::error;

use crate::entities::{Item, Sheet};
use crate::fsize;
use crate::geometry::geo_traits::SeparationDistance;
use crate::geometry::{GeoRelation, PackableArea, Rect};

/// Every item's footprint lies inside the packable area.
/// Edges may exceed the area by rounding noise of the pixel arithmetic.
pub fn items_within_area(items: &[Item], area: &PackableArea) -> bool {
    let Some(area_rect) = area.to_rect() else {
        return items.is_empty();
    };
    items.iter().all(|item| match item.bbox() {
        Some(bbox) => match area_rect.relation_to(&bbox) {
            GeoRelation::Surrounding => true,
            GeoRelation::Intersecting
                if approx_le(area_rect.x_min, bbox.x_min)
                    && approx_le(area_rect.y_min, bbox.y_min)
                    && approx_le(bbox.x_max, area_rect.x_max)
                    && approx_le(bbox.y_max, area_rect.y_max) =>
            {
                true
            }
            _ => {
                error!(
                    "item {} ({}) with footprint {:?} exceeds packable area {:?}",
                    item.id, item.name, bbox, area_rect
                );
                false
            }
        },
        None => {
            error!("item {} ({}) has no valid footprint", item.id, item.name);
            false
        }
    })
}

/// No two footprints overlap and every pair is at least `gutter` pixels apart on some axis.
/// The gap comparison tolerates rounding noise of the pixel arithmetic.
pub fn items_separated(items: &[Item], gutter: fsize) -> bool {
    items.iter().tuple_combinations().all(|(a, b)| {
        let (Some(bbox_a), Some(bbox_b)) = (a.bbox(), b.bbox()) else {
            return false;
        };
        if let Some(overlap) = Rect::intersection(bbox_a, bbox_b) {
            error!("items {} and {} overlap in {:?}", a.id, b.id, overlap);
            return false;
        }
        let gap = bbox_a.separation_distance(&bbox_b);
        match approx_le(gutter, gap) {
            true => true,
            false => {
                error!(
                    "items {} and {} are {gap} px apart, gutter is {gutter} px",
                    a.id, b.id
                );
                false
            }
        }
    })
}

fn approx_le(a: fsize, b: fsize) -> bool {
    a <= b || approx_eq!(fsize, a, b, epsilon = 1e-6)
}

/// Every input item is accounted for exactly once across `placed` and `unplaced`
pub fn items_conserved(input: &[Item], placed: &[Item], unplaced: &[Item]) -> bool {
    if input.len() != placed.len() + unplaced.len() {
        error!(
            "{} items in, {} placed + {} unplaced out",
            input.len(),
            placed.len(),
            unplaced.len()
        );
        return false;
    }
    let in_ids = input.iter().map(|i| i.id).sorted().collect_vec();
    let out_ids = placed
        .iter()
        .chain(unplaced.iter())
        .map(|i| i.id)
        .sorted()
        .collect_vec();
    in_ids == out_ids
}

/// Checks containment and separation of every packed sheet
pub fn sheets_valid(sheets: &[Sheet], padding: fsize, gutter: fsize) -> bool {
    sheets
        .iter()
        .filter(|s| !s.is_unplaced())
        .all(|s| {
            items_within_area(&s.items, &s.size.packable_area(padding))
                && items_separated(&s.items, gutter)
        })
}
