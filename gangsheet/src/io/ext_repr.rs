use serde::{Deserialize, Serialize};

use crate::fsize;
use crate::geometry::Rotation;

/// A set of images to lay out on sheets of a single size
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestInstance {
    /// The name of the instance
    pub name: String,
    /// Size of every sheet
    pub sheet: ExtSheetSize,
    /// Images to be placed
    pub items: Vec<ExtImage>,
}

/// Sheet dimensions in inches
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheetSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: fsize,
    pub height: fsize,
}

/// An image with its intrinsic size in inches
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtImage {
    /// Identifier of the image in the instance
    pub id: u64,
    /// Human readable name, reported when the image cannot be placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub width: fsize,
    pub height: fsize,
    /// Number of copies to print
    #[serde(default = "default_quantity")]
    pub quantity: usize,
}

fn default_quantity() -> usize {
    1
}

/// Result of nesting an [`ExtNestInstance`]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestSolution {
    /// Sheets in creation order, a trailing sheet may hold the unplaceable items
    pub sheets: Vec<ExtSheet>,
    /// Items which could not be placed on any sheet
    pub unplaced: Vec<ExtPlacedImage>,
    /// Human readable warnings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Sum of the placed footprints divided by the sum of the packable areas
    pub density: fsize,
    /// Time it took to generate the solution in milliseconds
    pub run_time_ms: u64,
}

/// A sheet and the images laid out on it
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheet {
    pub name: String,
    /// Width in inches
    pub width: fsize,
    /// Height in inches
    pub height: fsize,
    /// True for the sheet collecting the items that fit nowhere
    #[serde(default)]
    pub unplaced: bool,
    pub density: fsize,
    pub items: Vec<ExtPlacedImage>,
}

/// An image and where it was placed
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedImage {
    /// Unique id of the placed copy
    pub id: u64,
    pub name: String,
    /// Position of the top left corner of the footprint, in display pixels
    pub x: fsize,
    pub y: fsize,
    /// Intrinsic (unrotated) width in inches
    pub width: fsize,
    /// Intrinsic (unrotated) height in inches
    pub height: fsize,
    /// Rotation in degrees, 0 or 90
    pub rotation: Rotation,
}
