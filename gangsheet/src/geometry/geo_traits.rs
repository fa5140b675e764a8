use crate::fsize;

/// Trait for types that can detect collisions between `self` and `other` of type `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can compute the axis-aligned gap between `self` and `other` of type `T`.
pub trait SeparationDistance<T> {
    /// Width of the empty band between `self` and `other`, negative if their interiors overlap.
    fn separation_distance(&self, other: &T) -> fsize;
}
