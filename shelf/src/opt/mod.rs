/// Multi-sheet nesting on top of the shelf packer
pub mod nester;
/// Binary-tree shelf packing of rectangles onto a single sheet
pub mod shelf_packer;
