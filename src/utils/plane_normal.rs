use crate::math::{Point, Real, UnitVector, Vector};

/// Computes the normal of the plane passing through `p1`, `p2` and `p3`.
///
/// The normal is `(p1 - p2) × (p3 - p2)`, normalized, so `p2` is the corner
/// shared by both edges. The edges are normalized before the cross product,
/// so the collinearity test doesn't depend on the size of the triangle.
///
/// Returns `None` if the three points are (almost) collinear, or if one of
/// the edges is shorter than `eps`.
#[inline]
pub fn plane_normal(p1: &Point, p2: &Point, p3: &Point, eps: Real) -> Option<UnitVector> {
    let e1 = (p1 - p2).try_normalize(eps)?;
    let e2 = (p3 - p2).try_normalize(eps)?;
    UnitVector::try_new(e1.cross(&e2), eps)
}

/// Computes the normalized cross product of `a` and `b`.
///
/// Returns `None` if `a` and `b` are (almost) parallel.
#[inline]
pub fn normalized_cross(a: &Vector, b: &Vector, eps: Real) -> Option<UnitVector> {
    UnitVector::try_new(a.cross(b), eps)
}
