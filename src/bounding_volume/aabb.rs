//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always
/// parallel to the world axes, which makes intersection tests just six
/// comparisons. This is what the collision pipeline uses as its broad-phase:
/// two bodies whose AABBs are disjoint on any axis never reach the SAT test.
///
/// # Example
///
/// ```rust
/// use fender3d::bounding_volume::{Aabb, BoundingVolume};
/// use fender3d::math::Point;
///
/// let a = Aabb::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5));
/// let b = Aabb::new(Point::new(0.5, -0.5, -0.5), Point::new(1.5, 0.5, 0.5));
/// let c = Aabb::new(Point::new(1.5, -0.5, -0.5), Point::new(2.5, 0.5, 0.5));
///
/// // Touching boxes intersect.
/// assert!(a.intersects(&b));
/// assert!(!a.intersects(&c));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point,
    /// The point with maximum coordinates.
    pub maxs: Point,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   * `mins` - position of the point with the smallest coordinates.
    ///   * `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point, maxs: Point) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point, half_extents: Vector) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates the smallest AABB enclosing a set of points.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        super::aabb_utils::local_point_cloud_aabb(pts)
    }

    /// Do the projections of `self` and `other` on the `i`-th world axis overlap?
    #[inline]
    pub fn overlaps_on_axis(&self, other: &Aabb, i: usize) -> bool {
        self.mins[i] <= other.maxs[i] && self.maxs[i] >= other.mins[i]
    }

    /// Computes the 8 vertices of this `Aabb`.
    ///
    /// Vertex `0` is the `mins` corner and is adjacent to `1` (along `x`), `3` (along `y`)
    /// and `4` (along `z`).
    #[inline]
    pub fn vertices(&self) -> [Point; 8] {
        [
            Point::new(self.mins.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.mins.y, self.mins.z),
            Point::new(self.maxs.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.maxs.y, self.mins.z),
            Point::new(self.mins.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.mins.y, self.maxs.z),
            Point::new(self.maxs.x, self.maxs.y, self.maxs.z),
            Point::new(self.mins.x, self.maxs.y, self.maxs.z),
        ]
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        (0..DIM).all(|i| self.overlaps_on_axis(other, i))
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }
}
