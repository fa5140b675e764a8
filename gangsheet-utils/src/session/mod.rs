//! Editing session owning the sheets and the images placed on them

mod image;
mod store;

pub use image::{ImageSource, SheetImage};
pub use store::{BulkEntry, SheetKey, SheetStore, StoreSheet};
