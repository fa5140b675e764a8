use svg::Document;
use svg::node::element::{Group, Path, Text, Title};

use crate::entities::Sheet;
use crate::fsize;
use crate::geometry::{Rect, Rotation};
use crate::io::svg::svg_util::{SvgDrawOptions, rect_data};
use crate::units::px_to_in;

/// Renders a preview of `sheet` in display pixel coordinates
pub fn sheet_to_svg(sheet: &Sheet, padding: fsize, options: SvgDrawOptions, title: &str) -> Document {
    let (sheet_w, sheet_h) = sheet.size.size_px();
    let (w, h) = (sheet_w as f32, sheet_h as f32);
    let theme = &options.theme;

    //leave some room above the sheet for the label
    let margin = 0.05 * f32::min(w, h);
    let stroke_width = f32::min(w, h) * 0.001 * theme.stroke_width_multiplier;
    let font_size = f32::min(w, h) * 0.025;

    let label = {
        let used_height = sheet.used_extent().map_or(0.0, |e| px_to_in(e.y_max));
        let label_content = format!(
            "{} | {}\" x {}\" | {} items | density: {:.3}% | used: {:.2}\" | {}",
            sheet.name,
            sheet.size.width,
            sheet.size.height,
            sheet.items.len(),
            sheet.density(padding) * 100.0,
            used_height,
            title,
        );
        Text::new(label_content)
            .set("x", 0.0f32)
            .set("y", -0.5 * margin)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let sheet_group = {
        let mut group = Group::new().set("id", "sheet").add(Title::new(format!(
            "sheet: {}, {}x{} px",
            sheet.name, sheet_w, sheet_h
        )));
        if let Ok(outline) = Rect::try_new(0.0, 0.0, sheet_w, sheet_h) {
            group = group.add(
                Path::new()
                    .set("fill", format!("{}", theme.sheet_fill))
                    .set("stroke", "black")
                    .set("stroke-width", 2.0 * stroke_width)
                    .set("d", rect_data(outline)),
            );
        }
        if options.packable_area {
            if let Some(area) = sheet.size.packable_area(padding).to_rect() {
                group = group.add(
                    Path::new()
                        .set("fill", "none")
                        .set("stroke", format!("{}", theme.padding_stroke))
                        .set("stroke-width", stroke_width)
                        .set(
                            "stroke-dasharray",
                            format!("{} {}", 4.0 * stroke_width, 4.0 * stroke_width),
                        )
                        .set("d", rect_data(area)),
                );
            }
        }
        group
    };

    let items_group = {
        let mut group = Group::new().set("id", "items");
        for item in &sheet.items {
            let Some(bbox) = item.bbox() else {
                continue;
            };
            let fill = match (sheet.is_unplaced(), item.rotation) {
                (true, _) => theme.unplaced_item_fill,
                (false, Rotation::Deg0) => theme.item_fill,
                (false, Rotation::Deg90) => theme.rotated_item_fill,
            };
            let mut item_group = Group::new()
                .set("id", format!("item_{}", item.id.0))
                .add(Title::new(format!(
                    "item {}, {}: {}\" x {}\", rotation: {}, at ({:.1}, {:.1})",
                    item.id,
                    item.name,
                    item.width,
                    item.height,
                    item.rotation.degrees(),
                    item.x,
                    item.y
                )))
                .add(
                    Path::new()
                        .set("fill", format!("{fill}"))
                        .set("fill-opacity", 0.8f32)
                        .set("stroke", "black")
                        .set("stroke-width", stroke_width)
                        .set("d", rect_data(bbox)),
                );
            if options.labels {
                let item_font =
                    f32::min(font_size, 0.2 * fsize::min(bbox.width(), bbox.height()) as f32);
                item_group = item_group.add(
                    Text::new(item.name.clone())
                        .set("x", (bbox.x_min + 0.5 * bbox.width()) as f32)
                        .set("y", (bbox.y_min + 0.5 * bbox.height()) as f32)
                        .set("font-size", item_font)
                        .set("font-family", "monospace")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            }
            group = group.add(item_group);
        }
        group
    };

    Document::new()
        .set(
            "viewBox",
            (-margin, -margin, w + 2.0 * margin, h + 2.0 * margin),
        )
        .add(sheet_group)
        .add(items_group)
        .add(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Item, ItemId, SheetSize};

    #[test]
    fn every_item_gets_a_group() {
        let mut sheet = Sheet::new("Sheet 1", SheetSize::default());
        sheet
            .items
            .push(Item::new(ItemId(4), "logo", 2.0, 1.0).placed_at(7.5, 7.5, Rotation::Deg0));
        sheet
            .items
            .push(Item::new(ItemId(5), "tag", 2.0, 1.0).placed_at(45.0, 7.5, Rotation::Deg90));
        let svg = sheet_to_svg(&sheet, 0.5, SvgDrawOptions::default(), "preview").to_string();
        assert!(svg.contains("id=\"item_4\""));
        assert!(svg.contains("id=\"item_5\""));
        assert!(svg.contains("Sheet 1"));
        assert!(svg.contains("stroke-dasharray"));
        //the rotated tag reaches down to 37.5 px
        assert!(svg.contains("used: 2.50\""));
    }

    #[test]
    fn invalid_items_are_skipped() {
        let mut sheet = Sheet::new("Sheet 1", SheetSize::default());
        sheet.items.push(Item::new(ItemId(1), "broken", 0.0, 1.0));
        let svg = sheet_to_svg(&sheet, 0.5, SvgDrawOptions::default(), "").to_string();
        assert!(!svg.contains("item_1"));
    }
}
