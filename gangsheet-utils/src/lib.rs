//! Utilities built on top of the gang sheet nester
//!
//! This crate holds what an editor around the [`shelf`] nester needs:
//! the editing session owning the sheets and their images, export planning with sequential
//! batch export, and the injected image services (background removal, pattern generation).

pub mod export;
pub mod services;
pub mod session;

pub use export::{ExportPlan, ExportReport, SheetRenderer, SvgSheetRenderer, export_all};
pub use services::{ImageService, PatternRequest};
pub use session::{BulkEntry, ImageSource, SheetImage, SheetKey, SheetStore, StoreSheet};
