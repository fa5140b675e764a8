mod item;
mod sheet;
mod sheet_size;

#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use item::ItemId;
#[doc(inline)]
pub use sheet::Sheet;
#[doc(inline)]
pub use sheet::SheetStatus;
#[doc(inline)]
pub use sheet_size::SHEET_SIZES;
#[doc(inline)]
pub use sheet_size::SheetSize;
