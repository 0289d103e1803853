use core::iter::IntoIterator;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Computes the AABB of a set of points.
///
/// An empty set yields an inverted AABB (`mins = +MAX`, `maxs = -MAX`) that
/// intersects nothing.
pub fn local_point_cloud_aabb<I>(pts: I) -> Aabb
where
    I: IntoIterator<Item = Point>,
{
    let mut mins = Point::from([Real::MAX; 3]);
    let mut maxs = Point::from([-Real::MAX; 3]);

    for pt in pts {
        mins = mins.inf(&pt);
        maxs = maxs.sup(&pt);
    }

    Aabb::new(mins, maxs)
}
