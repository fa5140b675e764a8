use crate::fsize;

/// Dots per inch of the exported print file
pub const EXPORT_DPI: fsize = 300.0;

/// Pixels per inch of the on-screen canvas. All packing happens in this coordinate space.
pub const DISPLAY_PPI: fsize = 15.0;

/// Inches to display pixels
pub fn in_to_px(inches: fsize) -> fsize {
    inches * DISPLAY_PPI
}

/// Display pixels to inches
pub fn px_to_in(px: fsize) -> fsize {
    px / DISPLAY_PPI
}

/// Inches to export dots
pub fn in_to_dots(inches: fsize) -> fsize {
    inches * EXPORT_DPI
}

/// Scale factor from the display canvas to the exported raster.
pub fn export_pixel_ratio() -> fsize {
    EXPORT_DPI / DISPLAY_PPI
}

/// Intrinsic size in inches of a bitmap dimension, assuming it was authored at [`EXPORT_DPI`].
pub fn image_px_to_in(px: u32) -> fsize {
    px as fsize / EXPORT_DPI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_export_scales() {
        assert_eq!(in_to_px(2.0), 30.0);
        assert_eq!(px_to_in(45.0), 3.0);
        assert_eq!(in_to_dots(22.0), 6600.0);
        assert_eq!(export_pixel_ratio(), 20.0);
        assert_eq!(in_to_px(1.0) * export_pixel_ratio(), in_to_dots(1.0));
    }

    #[test]
    fn bitmap_size_in_inches() {
        assert_eq!(image_px_to_in(600), 2.0);
        assert_eq!(image_px_to_in(0), 0.0);
    }
}
