mod export;
mod import;

/// External (serializable) representations of instances and solutions.
pub mod ext_repr;

/// SVG previews of sheets
pub mod svg;

#[doc(inline)]
pub use export::{export_item, export_sheet, export_solution};
#[doc(inline)]
pub use import::{Importer, import_sheet_size};
