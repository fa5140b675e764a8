use std::time::Duration;

use anyhow::{Result, bail};
use gangsheet::geometry::Rotation;
use gangsheet_utils::export::{ExportPlan, export_sheet};
use gangsheet_utils::{
    ImageSource, SheetRenderer, SheetStore, StoreSheet, SvgSheetRenderer, export_all,
};
use itertools::Itertools;

/// Fails on every sheet whose name contains "broken"
struct PickyRenderer;

impl SheetRenderer for PickyRenderer {
    fn render(&self, sheet: &StoreSheet, plan: &ExportPlan) -> Result<Vec<u8>> {
        if sheet.name.contains("broken") {
            bail!("canvas too large");
        }
        Ok(format!("{}x{}", plan.width_dots, plan.height_dots).into_bytes())
    }

    fn file_extension(&self) -> &str {
        "png"
    }
}

fn png() -> ImageSource {
    ImageSource::new("image/png", "data:image/png;base64,iVBORw0KGgo=")
}

fn three_sheets() -> Vec<StoreSheet> {
    let mut store = SheetStore::default();
    store.add_image("logo", png(), 600, 300).unwrap();
    store.add_sheet();
    store.add_sheet();
    store
        .sheets()
        .map(|(_, s)| s.clone())
        .enumerate()
        .map(|(i, s)| match i {
            1 => StoreSheet {
                name: "broken sheet".to_string(),
                ..s
            },
            _ => s,
        })
        .collect_vec()
}

#[tokio::test]
async fn batch_export_continues_after_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let sheets = three_sheets();

    let report = export_all(&sheets, &PickyRenderer, dir.path(), Duration::from_millis(1)).await?;

    let names = report
        .written
        .iter()
        .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
        .collect_vec();
    assert_eq!(
        names,
        vec!["gang-sheet-Sheet_1-22x24.png", "gang-sheet-Sheet_3-22x24.png"]
    );
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].sheet, "broken sheet");
    assert!(report.failed[0].reason.contains("canvas too large"));

    let content = tokio::fs::read_to_string(&report.written[0]).await?;
    assert_eq!(content, "6600x7200");
    Ok(())
}

#[tokio::test]
async fn export_folder_is_created() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let nested = dir.path().join("out").join("sheets");
    let report = export_all(&three_sheets()[..1], &PickyRenderer, &nested, Duration::ZERO).await?;
    assert_eq!(report.written.len(), 1);
    assert!(report.written[0].starts_with(&nested));
    Ok(())
}

#[tokio::test]
async fn svg_export_embeds_images_at_print_scale() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut store = SheetStore::default();
    let id = store.add_image("logo", png(), 600, 300)?;
    store.set_image_rotation(id, Rotation::Deg90)?;

    let path = export_sheet(store.active_sheet(), &SvgSheetRenderer, dir.path()).await?;
    assert_eq!(path.file_name().unwrap(), "gang-sheet-22x24.svg");

    let svg = tokio::fs::read_to_string(&path).await?;
    assert!(svg.contains("viewBox=\"0 0 6600 7200\""));
    assert!(svg.contains("data:image/png;base64,iVBORw0KGgo="));
    //2" x 1" at 300 dpi
    assert!(svg.contains("width=\"600\""));
    assert!(svg.contains("height=\"300\""));
    //rotated about its corner and shifted by its height: (7.5 + 15) * 20
    assert!(svg.contains("translate(450 150) rotate(90)"));
    Ok(())
}
