use crate::fsize;
use crate::geometry::geo_traits::{CollidesWith, SeparationDistance};
use anyhow::Result;
use anyhow::ensure;

/// Geometric relation between two rectangles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoRelation {
    /// The rectangles share no interior point
    Disjoint,
    /// `self` fully contains the other one
    Surrounding,
    /// `self` is fully contained by the other one
    Enclosed,
    /// Partial overlap
    Intersecting,
}

///Axis-aligned rectangle in display pixel space, y pointing down
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Rect {
    pub x_min: fsize,
    pub y_min: fsize,
    pub x_max: fsize,
    pub y_max: fsize,
}

impl Rect {
    pub fn try_new(x_min: fsize, y_min: fsize, x_max: fsize, y_max: fsize) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Rectangle with its top-left corner at (`x`, `y`)
    pub fn from_origin(x: fsize, y: fsize, width: fsize, height: fsize) -> Result<Self> {
        Rect::try_new(x, y, x + width, y + height)
    }

    /// Returns the geometric relation between `self` and another [`Rect`].
    /// Touching edges count as [`GeoRelation::Disjoint`].
    pub fn relation_to(&self, other: &Rect) -> GeoRelation {
        if !self.collides_with(other) {
            return GeoRelation::Disjoint;
        }
        if self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
        {
            return GeoRelation::Surrounding;
        }
        if self.x_min >= other.x_min
            && self.y_min >= other.y_min
            && self.x_max <= other.x_max
            && self.y_max <= other.y_max
        {
            return GeoRelation::Enclosed;
        }
        GeoRelation::Intersecting
    }

    pub fn width(&self) -> fsize {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> fsize {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> fsize {
        self.width() * self.height()
    }

    /// Returns the largest rectangle that is contained in both `a` and `b`.
    pub fn intersection(a: Rect, b: Rect) -> Option<Rect> {
        let x_min = fsize::max(a.x_min, b.x_min);
        let y_min = fsize::max(a.y_min, b.y_min);
        let x_max = fsize::min(a.x_max, b.x_max);
        let y_max = fsize::min(a.y_max, b.y_max);
        Rect::try_new(x_min, y_min, x_max, y_max).ok()
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: fsize::min(a.x_min, b.x_min),
            y_min: fsize::min(a.y_min, b.y_min),
            x_max: fsize::max(a.x_max, b.x_max),
            y_max: fsize::max(a.y_max, b.y_max),
        }
    }
}

impl CollidesWith<Rect> for Rect {
    /// True if the interiors overlap, rectangles sharing only an edge do not collide.
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        fsize::max(self.x_min, other.x_min) < fsize::min(self.x_max, other.x_max)
            && fsize::max(self.y_min, other.y_min) < fsize::min(self.y_max, other.y_max)
    }
}

impl SeparationDistance<Rect> for Rect {
    #[inline(always)]
    fn separation_distance(&self, other: &Rect) -> fsize {
        let dx = fsize::max(other.x_min - self.x_max, self.x_min - other.x_max);
        let dy = fsize::max(other.y_min - self.y_max, self.y_min - other.y_max);
        fsize::max(dx, dy)
    }
}
