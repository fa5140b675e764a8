use std::collections::HashMap;

use anyhow::{Context, Result, ensure};
use gangsheet::entities::{Item, ItemId, Sheet, SheetSize, SheetStatus};
use gangsheet::fsize;
use gangsheet::geometry::Rotation;
use gangsheet::units::{image_px_to_in, in_to_px};
use itertools::Itertools;
use log::{debug, info};
use shelf::config::NestConfig;
use shelf::opt::nester::{NestWarning, Nester};
use slotmap::{SlotMap, new_key_type};

use crate::services::{ImageService, PatternRequest};
use crate::session::{ImageSource, SheetImage};

new_key_type! {
    /// Unique key for each [`StoreSheet`] in a [`SheetStore`]
    pub struct SheetKey;
}

/// Position of an image added to a sheet which already holds images, in display pixels
const NEW_IMAGE_OFFSET: fsize = 50.0;

/// A sheet as edited by the user
#[derive(Clone, Debug, PartialEq)]
pub struct StoreSheet {
    pub name: String,
    pub size: SheetSize,
    pub images: Vec<SheetImage>,
    pub status: SheetStatus,
}

impl StoreSheet {
    fn new(name: impl Into<String>, size: SheetSize) -> Self {
        StoreSheet {
            name: name.into(),
            size,
            images: vec![],
            status: SheetStatus::Packed,
        }
    }

    pub fn image(&self, id: ItemId) -> Option<&SheetImage> {
        self.images.iter().find(|img| img.id() == id)
    }

    /// Images from bottom to top
    pub fn images_by_z(&self) -> Vec<&SheetImage> {
        self.images.iter().sorted_by_key(|img| img.z_index).collect_vec()
    }

    /// Packing view of this sheet, items in drawing order
    pub fn to_sheet(&self) -> Sheet {
        Sheet {
            name: self.name.clone(),
            size: self.size.clone(),
            items: self
                .images_by_z()
                .into_iter()
                .map(|img| img.item.clone())
                .collect_vec(),
            status: self.status,
        }
    }
}

/// An image uploaded in bulk, to be placed `quantity` times
#[derive(Clone, Debug)]
pub struct BulkEntry {
    pub name: String,
    pub source: ImageSource,
    /// Requested print size in inches
    pub width: fsize,
    pub height: fsize,
    pub quantity: usize,
}

/// The editing session: every sheet, its images and the layout settings.
///
/// At least one sheet always exists and exactly one of them is active.
/// Manual edits act on the active sheet, nesting replaces all sheets at once.
#[derive(Clone, Debug)]
pub struct SheetStore {
    sheets: SlotMap<SheetKey, StoreSheet>,
    /// Tab order
    order: Vec<SheetKey>,
    active: SheetKey,
    config: NestConfig,
    next_z_index: u64,
    next_item_id: u64,
}

impl SheetStore {
    pub fn new(config: NestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &NestConfig {
        &self.config
    }

    /// Changes padding, gutter or rotation permission. Existing layouts are not repacked.
    pub fn set_config(&mut self, config: NestConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// All sheets in tab order
    pub fn sheets(&self) -> impl Iterator<Item = (SheetKey, &StoreSheet)> + '_ {
        self.order.iter().map(|&key| (key, &self.sheets[key]))
    }

    pub fn n_sheets(&self) -> usize {
        self.order.len()
    }

    pub fn sheet(&self, key: SheetKey) -> Option<&StoreSheet> {
        self.sheets.get(key)
    }

    pub fn active_key(&self) -> SheetKey {
        self.active
    }

    pub fn active_sheet(&self) -> &StoreSheet {
        &self.sheets[self.active]
    }

    /// Opens an empty sheet with the size of the active one and makes it active
    pub fn add_sheet(&mut self) -> SheetKey {
        let name = format!("Sheet {}", self.order.len() + 1);
        let size = self.active_sheet().size.clone();
        info!("[STORE] adding {name} ({})", size.name);
        let key = self.sheets.insert(StoreSheet::new(name, size));
        self.order.push(key);
        self.active = key;
        key
    }

    pub fn set_active_sheet(&mut self, key: SheetKey) -> Result<()> {
        ensure!(self.sheets.contains_key(key), "sheet {key:?} does not exist");
        self.active = key;
        Ok(())
    }

    pub fn set_sheet_size(&mut self, size: SheetSize) -> Result<()> {
        ensure!(
            size.is_valid(),
            "invalid sheet size, width: {}, height: {}",
            size.width,
            size.height
        );
        self.sheets[self.active].size = size;
        Ok(())
    }

    /// Adds a bitmap of `px_width` x `px_height` pixels to the active sheet, printed at 300 DPI.
    /// The first image of an empty sheet lands in the top left corner of the packable area.
    pub fn add_image(
        &mut self,
        name: impl Into<String>,
        source: ImageSource,
        px_width: u32,
        px_height: u32,
    ) -> Result<ItemId> {
        let name = name.into();
        ensure!(
            px_width > 0 && px_height > 0,
            "image {name} has no pixels ({px_width}x{px_height})"
        );
        let (x, y) = match self.active_sheet().images.is_empty() {
            true => {
                let padding_px = in_to_px(self.config.padding);
                (padding_px, padding_px)
            }
            false => (NEW_IMAGE_OFFSET, NEW_IMAGE_OFFSET),
        };
        let id = self.take_item_id();
        let item = Item::new(id, name, image_px_to_in(px_width), image_px_to_in(px_height))
            .placed_at(x, y, Rotation::Deg0);
        let image = SheetImage {
            item,
            source,
            z_index: self.take_z_index(),
        };
        debug!(
            "[STORE] added image {id} ({}x{} in) to {}",
            image.item.width,
            image.item.height,
            self.active_sheet().name
        );
        self.sheets[self.active].images.push(image);
        Ok(id)
    }

    /// Sets the print size of an image on the active sheet, in inches
    pub fn update_image_size(&mut self, id: ItemId, width: fsize, height: fsize) -> Result<()> {
        ensure!(
            width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite(),
            "invalid image size, width: {width}, height: {height}"
        );
        let image = self.image_mut(id)?;
        image.item.width = width;
        image.item.height = height;
        Ok(())
    }

    /// Moves an image on the active sheet, (`x`, `y`) in display pixels
    pub fn move_image(&mut self, id: ItemId, x: fsize, y: fsize) -> Result<()> {
        let image = self.image_mut(id)?;
        image.item.x = x;
        image.item.y = y;
        Ok(())
    }

    pub fn set_image_rotation(&mut self, id: ItemId, rotation: Rotation) -> Result<()> {
        self.image_mut(id)?.item.rotation = rotation;
        Ok(())
    }

    /// Puts an image on top of all others. Returns false if it already was the topmost one.
    pub fn bring_to_front(&mut self, id: ItemId) -> Result<bool> {
        let topmost = self.next_z_index - 1;
        let image = self.image_mut(id)?;
        if image.z_index == topmost {
            return Ok(false);
        }
        image.z_index = topmost + 1;
        self.next_z_index += 1;
        Ok(true)
    }

    /// Removes the given images from the active sheet, returns how many were found
    pub fn delete_images(&mut self, ids: &[ItemId]) -> usize {
        let images = &mut self.sheets[self.active].images;
        let n_before = images.len();
        images.retain(|img| !ids.contains(&img.id()));
        n_before - images.len()
    }

    /// Repeats an image in a `rows` x `cols` grid starting from its current position.
    /// Copies are spaced by the footprint plus the gutter, the original fills the first cell.
    pub fn grid_fill(&mut self, id: ItemId, rows: usize, cols: usize) -> Result<Vec<ItemId>> {
        ensure!(rows >= 1 && cols >= 1, "grid needs at least one row and column");
        let original = self
            .active_sheet()
            .image(id)
            .cloned()
            .with_context(|| format!("no image {id} on the active sheet"))?;
        let gutter_px = self.config.gutter_px();
        let (w, h) = original.item.footprint();

        let mut copies = vec![];
        for (row, col) in (0..rows).cartesian_product(0..cols) {
            if row == 0 && col == 0 {
                continue;
            }
            let item = Item {
                id: self.take_item_id(),
                x: original.item.x + col as fsize * (w + gutter_px),
                y: original.item.y + row as fsize * (h + gutter_px),
                ..original.item.clone()
            };
            copies.push(SheetImage {
                item,
                source: original.source.clone(),
                z_index: self.take_z_index(),
            });
        }
        let new_ids = copies.iter().map(|img| img.id()).collect_vec();
        debug!("[STORE] grid fill of {id} added {} copies", new_ids.len());
        self.sheets[self.active].images.extend(copies);
        Ok(new_ids)
    }

    /// Adds `quantity` copies of every entry and repacks every image of the session
    pub fn bulk_add(&mut self, entries: &[BulkEntry]) -> Vec<NestWarning> {
        let mut new_images = vec![];
        for entry in entries {
            for _ in 0..entry.quantity {
                let item = Item::new(self.take_item_id(), &entry.name, entry.width, entry.height);
                new_images.push(SheetImage {
                    item,
                    source: entry.source.clone(),
                    z_index: self.take_z_index(),
                });
            }
        }
        info!(
            "[STORE] bulk adding {} images from {} entries",
            new_images.len(),
            entries.len()
        );
        let all_images = self.all_images().chain(new_images).collect_vec();
        match all_images.is_empty() {
            true => vec![],
            false => self.repack(all_images),
        }
    }

    /// Nests every image of every sheet onto sheets of the active sheet's size.
    /// Does nothing when the session holds no images.
    pub fn auto_nest(&mut self) -> Vec<NestWarning> {
        let all_images = self.all_images().collect_vec();
        if all_images.is_empty() {
            debug!("[STORE] nothing to nest");
            return vec![];
        }
        self.repack(all_images)
    }

    /// Replaces the source of an image on the active sheet with a background-free version.
    /// The session is untouched when the service fails.
    pub fn remove_background(&mut self, id: ItemId, service: &impl ImageService) -> Result<()> {
        let source = &self
            .active_sheet()
            .image(id)
            .with_context(|| format!("no image {id} on the active sheet"))?
            .source;
        let cleaned = service
            .remove_background(source)
            .context("background removal failed")?;
        self.image_mut(id)?.source = cleaned;
        info!("[STORE] removed background of image {id}");
        Ok(())
    }

    /// Generates a pattern and adds it to the active sheet as a `px_width` x `px_height` bitmap
    pub fn add_generated_pattern(
        &mut self,
        request: &PatternRequest,
        service: &impl ImageService,
        px_width: u32,
        px_height: u32,
    ) -> Result<ItemId> {
        request.validate()?;
        let source = service
            .generate_pattern(request)
            .context("pattern generation failed")?;
        self.add_image(
            format!("pattern: {}", request.prompt.trim()),
            source,
            px_width,
            px_height,
        )
    }

    /// Nests `images` and replaces all sheets with the outcome, the first sheet becomes active
    fn repack(&mut self, images: Vec<SheetImage>) -> Vec<NestWarning> {
        let size = self.active_sheet().size.clone();
        let items = images.iter().map(|img| img.item.clone()).collect_vec();
        let outcome = Nester::new(self.config).nest_all(&items, &size);

        let mut images_by_id: HashMap<ItemId, SheetImage> =
            images.into_iter().map(|img| (img.id(), img)).collect();

        self.sheets.clear();
        self.order.clear();
        for sheet in outcome.sheets {
            let images = sheet
                .items
                .into_iter()
                .filter_map(|item| {
                    images_by_id
                        .remove(&item.id)
                        .map(|image| SheetImage { item, ..image })
                })
                .collect_vec();
            let key = self.sheets.insert(StoreSheet {
                name: sheet.name,
                size: sheet.size,
                images,
                status: sheet.status,
            });
            self.order.push(key);
        }
        //the nester always returns at least one sheet
        self.active = self.order[0];

        info!(
            "[STORE] repacked {} images onto {} sheets",
            items.len(),
            self.order.len()
        );
        outcome.warnings
    }

    /// Every image of every sheet, in tab order
    fn all_images(&self) -> impl Iterator<Item = SheetImage> + '_ {
        self.sheets()
            .flat_map(|(_, sheet)| sheet.images.iter().cloned())
    }

    fn image_mut(&mut self, id: ItemId) -> Result<&mut SheetImage> {
        self.sheets[self.active]
            .images
            .iter_mut()
            .find(|img| img.id() == id)
            .with_context(|| format!("no image {id} on the active sheet"))
    }

    fn take_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    fn take_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index += 1;
        z_index
    }
}

impl Default for SheetStore {
    fn default() -> Self {
        let mut sheets = SlotMap::with_key();
        let active = sheets.insert(StoreSheet::new("Sheet 1", SheetSize::default()));
        Self {
            sheets,
            order: vec![active],
            active,
            config: NestConfig::default(),
            next_z_index: 1,
            next_item_id: 0,
        }
    }
}
