/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of shapes. They usually have constant time
/// intersection test and merge.
pub trait BoundingVolume {
    /// Checks if this bounding volume intersect with another one.
    ///
    /// Touching volumes are considered intersecting.
    fn intersects(&self, _: &Self) -> bool;

    /// Merges this bounding volume with another one.
    fn merged(&self, _: &Self) -> Self;
}
