use anyhow::{Result, ensure};
use log::{debug, warn};

use crate::entities::{Item, ItemId, SheetSize};
use crate::io::ext_repr::{ExtImage, ExtNestInstance, ExtSheetSize};

/// Converts external representations of sheets and images into internal ones.
/// Every copy of an image receives its own [`ItemId`], assigned sequentially.
#[derive(Clone, Debug, Default)]
pub struct Importer {
    next_id: u64,
}

impl Importer {
    pub fn new() -> Self {
        Importer::default()
    }

    /// Starts numbering items at `first_id`
    pub fn starting_at(first_id: u64) -> Self {
        Importer { next_id: first_id }
    }

    pub fn import_instance(&mut self, ext: &ExtNestInstance) -> Result<(SheetSize, Vec<Item>)> {
        let sheet_size = import_sheet_size(&ext.sheet)?;
        let mut items = vec![];
        for ext_image in &ext.items {
            items.extend(self.import_image(ext_image));
        }
        debug!(
            "imported instance {} with {} items on {} sheets",
            ext.name,
            items.len(),
            sheet_size.name
        );
        Ok((sheet_size, items))
    }

    /// One [`Item`] per requested copy.
    /// Images without a positive size are kept, so they end up reported as unplaced.
    pub fn import_image(&mut self, ext_image: &ExtImage) -> Vec<Item> {
        let name = match &ext_image.name {
            Some(name) => name.clone(),
            None => format!("image {}", ext_image.id),
        };
        if !(ext_image.width > 0.0 && ext_image.height > 0.0) {
            warn!(
                "image {} ({name}) has an invalid size {}x{}, it cannot be placed",
                ext_image.id, ext_image.width, ext_image.height
            );
        }
        (0..ext_image.quantity)
            .map(|_| {
                let id = ItemId(self.next_id);
                self.next_id += 1;
                Item::new(id, name.clone(), ext_image.width, ext_image.height)
            })
            .collect()
    }
}

pub fn import_sheet_size(ext: &ExtSheetSize) -> Result<SheetSize> {
    ensure!(
        ext.width > 0.0 && ext.height > 0.0,
        "invalid sheet size, width: {}, height: {}",
        ext.width,
        ext.height
    );
    let name = match &ext.name {
        Some(name) => name.clone(),
        None => format!("{}\" x {}\"", ext.width, ext.height),
    };
    Ok(SheetSize::new(name, ext.width, ext.height))
}
