//! Core library for laying out rectangular images on fixed-size print sheets (gang sheets).
//!
//! This crate holds the data model shared by the packing engine and the editing session:
//! items, sheets and sheet sizes, axis-aligned geometry, unit conversion between inches and
//! pixels, and the external (serializable) representations used for import and export.

/// Entities to model gang sheets and the images placed on them
pub mod entities;

/// Axis-aligned geometry in display pixel space
pub mod geometry;

/// Importing instances into and exporting solutions out of this library
pub mod io;

/// Conversion between physical inches, export dots and display pixels
pub mod units;

/// Helper functions which do not belong to any specific module
pub mod util;

/// Floating point type used throughout the library
#[allow(non_camel_case_types)]
pub type fsize = f64;
