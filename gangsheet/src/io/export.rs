use std::time::Duration;

use crate::entities::{Item, Sheet};
use crate::fsize;
use crate::io::ext_repr::{ExtNestSolution, ExtPlacedImage, ExtSheet};

pub fn export_item(item: &Item) -> ExtPlacedImage {
    ExtPlacedImage {
        id: item.id.0,
        name: item.name.clone(),
        x: item.x,
        y: item.y,
        width: item.width,
        height: item.height,
        rotation: item.rotation,
    }
}

pub fn export_sheet(sheet: &Sheet, padding: fsize) -> ExtSheet {
    ExtSheet {
        name: sheet.name.clone(),
        width: sheet.size.width,
        height: sheet.size.height,
        unplaced: sheet.is_unplaced(),
        density: sheet.density(padding),
        items: sheet.items.iter().map(export_item).collect(),
    }
}

/// Exports a complete nesting result out of the library
pub fn export_solution(
    sheets: &[Sheet],
    unplaced: &[Item],
    warnings: Vec<String>,
    padding: fsize,
    run_time: Duration,
) -> ExtNestSolution {
    let packed = sheets.iter().filter(|s| !s.is_unplaced());
    let total_area = packed
        .clone()
        .map(|s| s.size.packable_area(padding).area())
        .sum::<fsize>();
    let used_area = packed
        .map(|s| s.density(padding) * s.size.packable_area(padding).area())
        .sum::<fsize>();
    let density = match total_area > 0.0 {
        true => used_area / total_area,
        false => 0.0,
    };

    ExtNestSolution {
        sheets: sheets.iter().map(|s| export_sheet(s, padding)).collect(),
        unplaced: unplaced.iter().map(export_item).collect(),
        warnings,
        density,
        run_time_ms: run_time.as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ItemId, SheetSize, SheetStatus};
    use crate::geometry::Rotation;

    #[test]
    fn exported_rotation_is_in_degrees() {
        let item = Item::new(ItemId(3), "tag", 2.0, 1.0).placed_at(7.5, 7.5, Rotation::Deg90);
        let json = serde_json::to_value(export_item(&item)).unwrap();
        assert_eq!(json["rotation"], 90);
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn solution_density_ignores_unplaced_sheet() {
        let size = SheetSize::new("test", 10.0, 10.0);
        let mut packed = Sheet::new("Sheet 1", size.clone());
        packed
            .items
            .push(Item::new(ItemId(0), "a", 5.0, 10.0).placed_at(0.0, 0.0, Rotation::Deg0));
        let mut unplaced = Sheet::new("Sheet 2 (Unplaced)", size);
        unplaced.status = SheetStatus::Unplaced;
        let huge = Item::new(ItemId(1), "b", 50.0, 50.0);
        unplaced.items.push(huge.clone());

        let sol = export_solution(
            &[packed, unplaced],
            &[huge],
            vec![],
            0.0,
            Duration::from_millis(3),
        );
        assert_eq!(sol.density, 0.5);
        assert_eq!(sol.sheets.len(), 2);
        assert!(sol.sheets[1].unplaced);
        assert_eq!(sol.unplaced.len(), 1);
        assert_eq!(sol.run_time_ms, 3);
    }
}
