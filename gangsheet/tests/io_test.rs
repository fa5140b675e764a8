use std::time::Duration;

use gangsheet::entities::{Sheet, SheetStatus};
use gangsheet::geometry::Rotation;
use gangsheet::io::ext_repr::{ExtNestInstance, ExtNestSolution};
use gangsheet::io::svg::{SvgDrawOptions, sheet_to_svg};
use gangsheet::io::{Importer, export_solution};
use gangsheet::util::assertions;

const INSTANCE: &str = r#"{
    "name": "team shirts",
    "sheet": {"name": "22\" x 24\"", "width": 22, "height": 24},
    "items": [
        {"id": 1, "name": "front logo", "width": 10, "height": 8, "quantity": 2},
        {"id": 2, "name": "sleeve", "width": 3, "height": 1.5}
    ]
}"#;

#[test]
fn imported_instance_exports_to_solution() {
    let ext: ExtNestInstance = serde_json::from_str(INSTANCE).unwrap();
    let (size, items) = Importer::new().import_instance(&ext).unwrap();
    assert_eq!(items.len(), 3);

    //hand placed layout: two logos side by side, sleeve rotated below them
    let mut sheet = Sheet::new("Sheet 1", size);
    sheet.items = vec![
        items[0].placed_at(7.5, 7.5, Rotation::Deg0),
        items[1].placed_at(165.0, 7.5, Rotation::Deg0),
        items[2].placed_at(7.5, 135.0, Rotation::Deg90),
    ];
    let area = sheet.size.packable_area(0.5);
    assert!(assertions::items_within_area(&sheet.items, &area));
    assert!(assertions::items_separated(&sheet.items, 7.5));

    let solution = export_solution(
        std::slice::from_ref(&sheet),
        &[],
        vec![],
        0.5,
        Duration::from_millis(12),
    );
    let json = serde_json::to_string(&solution).unwrap();
    let parsed: ExtNestSolution = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.sheets.len(), 1);
    assert_eq!(parsed.sheets[0].items[2].rotation, Rotation::Deg90);
    assert_eq!(parsed.sheets[0].items[2].name, "sleeve");
    assert!(parsed.density > 0.0 && parsed.density < 1.0);
    assert!(!json.contains("warnings"));
}

#[test]
fn unplaced_sheet_preview() {
    let ext: ExtNestInstance = serde_json::from_str(INSTANCE).unwrap();
    let (size, items) = Importer::new().import_instance(&ext).unwrap();
    let mut sheet = Sheet::new("Sheet 2 (Unplaced)", size);
    sheet.status = SheetStatus::Unplaced;
    sheet.items = items;

    let svg = sheet_to_svg(&sheet, 0.5, SvgDrawOptions::default(), "").to_string();
    assert!(svg.contains("Sheet 2 (Unplaced)"));
    assert!(svg.contains("item_0"));
    assert!(svg.contains("item_2"));
}
