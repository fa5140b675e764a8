use crate::fsize;
use crate::geometry::Rect;

/// Region of a sheet in which items may be placed, in display pixels.
/// Unlike [`Rect`] it may be degenerate, in which case nothing can be placed in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackableArea {
    pub x_min: fsize,
    pub y_min: fsize,
    pub width: fsize,
    pub height: fsize,
}

impl PackableArea {
    pub fn new(x_min: fsize, y_min: fsize, width: fsize, height: fsize) -> Self {
        Self {
            x_min,
            y_min,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn to_rect(&self) -> Option<Rect> {
        match self.is_degenerate() {
            true => None,
            false => Rect::from_origin(self.x_min, self.y_min, self.width, self.height).ok(),
        }
    }

    pub fn area(&self) -> fsize {
        match self.is_degenerate() {
            true => 0.0,
            false => self.width * self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_areas() {
        assert!(PackableArea::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(PackableArea::new(0.0, 0.0, 10.0, -5.0).is_degenerate());
        assert!(PackableArea::new(0.0, 0.0, fsize::NAN, 10.0).is_degenerate());
        assert_eq!(PackableArea::new(0.0, 0.0, -1.0, -1.0).area(), 0.0);
        assert_eq!(PackableArea::new(7.5, 7.5, 0.0, 1.0).to_rect(), None);
    }

    #[test]
    fn valid_area_converts_to_rect() {
        let area = PackableArea::new(7.5, 7.5, 315.0, 345.0);
        let rect = area.to_rect().unwrap();
        assert_eq!(rect.x_max, 322.5);
        assert_eq!(rect.y_max, 352.5);
        assert_eq!(area.area(), rect.area());
    }
}
