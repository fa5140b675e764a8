mod packable_area;
mod rect;
mod rotation;

/// Traits shared by geometric primitives
pub mod geo_traits;

#[doc(inline)]
pub use packable_area::PackableArea;
#[doc(inline)]
pub use rect::GeoRelation;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use rotation::Rotation;
