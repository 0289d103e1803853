use crate::math::{Matrix4, Real, UnitVector, Vector};

/// Projects `v` onto the line spanned by `w`.
///
/// Returns the zero vector if `w` is zero.
#[inline]
pub fn project(v: &Vector, w: &Vector) -> Vector {
    let sq_norm = w.norm_squared();

    if sq_norm == 0.0 {
        Vector::zeros()
    } else {
        w * (v.dot(w) / sq_norm)
    }
}

/// Mirrors `v` about the plane orthogonal to `n`.
///
/// The component of `v` along `n` is negated, the tangential part is kept.
#[inline]
pub fn reflect(v: &Vector, n: &UnitVector) -> Vector {
    v - n.into_inner() * (2.0 * v.dot(n))
}

/// Restricts `val` to `[min, max]`.
#[inline]
pub fn clamp(min: Real, val: Real, max: Real) -> Real {
    max.min(val.max(min))
}

/// The sign of `x`: `-1`, `1`, or `0` when `x` is zero (or NaN).
///
/// Unlike [`f32::signum`], this returns zero for `±0.0`.
#[inline]
pub fn sign(x: Real) -> Real {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Transforms a direction (homogeneous `w = 0`) by `m`, ignoring its translation part.
#[inline]
pub fn transform_direction(m: &Matrix4, v: &Vector) -> Vector {
    m.fixed_view::<3, 3>(0, 0) * v
}
