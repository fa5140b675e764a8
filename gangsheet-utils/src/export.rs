use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use gangsheet::fsize;
use gangsheet::geometry::Rotation;
use gangsheet::units::{export_pixel_ratio, in_to_dots, in_to_px};
use log::{error, info, warn};
use svg::Document;
use svg::node::element::{Group, Image};

use crate::session::StoreSheet;

/// Largest raster dimension most renderers accept
pub const MAX_CANVAS_DIMENSION: fsize = 32767.0;

/// Default pause between two exports of a batch
pub const DEFAULT_EXPORT_DELAY: Duration = Duration::from_millis(300);

/// How a single sheet is turned into a print file
#[derive(Clone, Debug, PartialEq)]
pub struct ExportPlan {
    pub sheet_name: String,
    /// Output width at [`EXPORT_DPI`](gangsheet::units::EXPORT_DPI)
    pub width_dots: fsize,
    pub height_dots: fsize,
    /// Scale from the display canvas to the output raster
    pub pixel_ratio: fsize,
    /// File name without extension
    pub file_stem: String,
}

impl ExportPlan {
    /// Plan for exporting one sheet on its own, named after its size only
    pub fn single(sheet: &StoreSheet) -> Self {
        let file_stem = format!("gang-sheet-{}x{}", sheet.size.width, sheet.size.height);
        ExportPlan::with_stem(sheet, file_stem)
    }

    /// Plan for exporting a sheet as part of a batch, the sheet name keeps file names apart
    pub fn batch(sheet: &StoreSheet) -> Self {
        let file_stem = format!(
            "gang-sheet-{}-{}x{}",
            replace_whitespace_runs(&sheet.name),
            sheet.size.width,
            sheet.size.height
        );
        ExportPlan::with_stem(sheet, file_stem)
    }

    fn with_stem(sheet: &StoreSheet, file_stem: String) -> Self {
        ExportPlan {
            sheet_name: sheet.name.clone(),
            width_dots: in_to_dots(sheet.size.width),
            height_dots: in_to_dots(sheet.size.height),
            pixel_ratio: export_pixel_ratio(),
            file_stem,
        }
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.file_stem)
    }

    /// The output is likely to be rejected or cropped by the renderer
    pub fn exceeds_canvas_limit(&self) -> bool {
        self.width_dots > MAX_CANVAS_DIMENSION || self.height_dots > MAX_CANVAS_DIMENSION
    }
}

fn replace_whitespace_runs(name: &str) -> String {
    let mut replaced = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        match c.is_whitespace() {
            true if !in_run => replaced.push('_'),
            true => {}
            false => replaced.push(c),
        }
        in_run = c.is_whitespace();
    }
    replaced
}

/// Turns a sheet into the bytes of a print file
pub trait SheetRenderer {
    fn render(&self, sheet: &StoreSheet, plan: &ExportPlan) -> Result<Vec<u8>>;

    /// Extension of the produced files
    fn file_extension(&self) -> &str;
}

/// Renders sheets as SVG documents at export resolution, with the images embedded as data URLs.
/// The background is left transparent.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgSheetRenderer;

impl SheetRenderer for SvgSheetRenderer {
    fn render(&self, sheet: &StoreSheet, plan: &ExportPlan) -> Result<Vec<u8>> {
        let scale = plan.pixel_ratio;
        let mut images = Group::new().set("id", "images");
        for image in sheet.images_by_z() {
            let item = &image.item;
            let (w, h) = (in_to_px(item.width) * scale, in_to_px(item.height) * scale);
            let (x, y) = (item.x * scale, item.y * scale);
            //quarter turn clockwise around the top left corner, then shifted back into the footprint
            let transform = match item.rotation {
                Rotation::Deg0 => format!("translate({} {})", x as f32, y as f32),
                Rotation::Deg90 => format!("translate({} {}) rotate(90)", (x + h) as f32, y as f32),
            };
            images = images.add(
                Image::new()
                    .set("id", format!("image_{}", item.id.0))
                    .set("width", w as f32)
                    .set("height", h as f32)
                    .set("preserveAspectRatio", "none")
                    .set("transform", transform)
                    .set("href", image.source.data.as_str()),
            );
        }

        let (width, height) = (plan.width_dots as f32, plan.height_dots as f32);
        let document = Document::new()
            .set("viewBox", (0.0f32, 0.0f32, width, height))
            .set("width", width)
            .set("height", height)
            .add(images);
        Ok(document.to_string().into_bytes())
    }

    fn file_extension(&self) -> &str {
        "svg"
    }
}

/// A sheet that could not be exported
#[derive(Clone, Debug, PartialEq)]
pub struct ExportFailure {
    pub sheet: String,
    pub reason: String,
}

/// Outcome of [`export_all`]
#[derive(Clone, Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<ExportFailure>,
}

/// Renders and writes a single sheet to `out_dir`
pub async fn export_sheet(
    sheet: &StoreSheet,
    renderer: &impl SheetRenderer,
    out_dir: &Path,
) -> Result<PathBuf> {
    let plan = ExportPlan::single(sheet);
    write_sheet(sheet, &plan, renderer, out_dir).await
}

/// Exports every sheet to `out_dir`, one after the other, waiting `delay` between two sheets.
/// A failing sheet is logged and reported, the remaining sheets are still exported.
pub async fn export_all(
    sheets: &[StoreSheet],
    renderer: &impl SheetRenderer,
    out_dir: &Path,
    delay: Duration,
) -> Result<ExportReport> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("could not create export folder: {}", out_dir.display()))?;

    let mut report = ExportReport::default();
    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }
        info!("[EXPORT] exporting {} ({}/{})", sheet.name, i + 1, sheets.len());
        let plan = ExportPlan::batch(sheet);
        match write_sheet(sheet, &plan, renderer, out_dir).await {
            Ok(path) => report.written.push(path),
            Err(err) => {
                error!("[EXPORT] failed to export sheet {}: {err:#}", sheet.name);
                report.failed.push(ExportFailure {
                    sheet: sheet.name.clone(),
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    info!(
        "[EXPORT] exported {}/{} sheets",
        report.written.len(),
        sheets.len()
    );
    Ok(report)
}

async fn write_sheet(
    sheet: &StoreSheet,
    plan: &ExportPlan,
    renderer: &impl SheetRenderer,
    out_dir: &Path,
) -> Result<PathBuf> {
    if plan.exceeds_canvas_limit() {
        warn!(
            "[EXPORT] requested export size of {}x{} dots for {} exceeds {MAX_CANVAS_DIMENSION}, output may fail or be cropped",
            plan.width_dots, plan.height_dots, sheet.name
        );
    }
    let bytes = renderer
        .render(sheet, plan)
        .with_context(|| format!("could not render sheet {}", sheet.name))?;
    let path = out_dir.join(plan.file_name(renderer.file_extension()));
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("could not write {}", path.display()))?;
    info!("[EXPORT] {} written to {:?}", sheet.name, path);
    Ok(path)
}
