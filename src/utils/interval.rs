use crate::math::{Point, Real, Vector};

/// The closed range of values covered by the projection of a point set on an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// The smallest projected value.
    pub min: Real,
    /// The largest projected value.
    pub max: Real,
}

impl Interval {
    /// Builds the interval `[min, max]`.
    #[inline]
    pub fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    /// Projects every point of `pts` onto `axis` and returns the covered range.
    ///
    /// The axis does not need to be normalized, but the resulting values are
    /// then scaled by its length.
    pub fn from_projection(pts: &[Point], axis: &Vector) -> Self {
        let mut min = Real::MAX;
        let mut max = -Real::MAX;

        for pt in pts {
            let d = pt.coords.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }

        Self { min, max }
    }

    /// Do these two closed intervals share at least one value?
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    /// The signed shift to apply to `self` so it stops overlapping `other`.
    ///
    /// Of the two possible shifts (pushing `self` past `other.max`, or back
    /// before `other.min`), the one with the smallest magnitude is returned.
    #[inline]
    pub fn separation_from(&self, other: &Self) -> Real {
        let forward = other.max - self.min;
        let backward = other.min - self.max;

        if forward.abs() < backward.abs() {
            forward
        } else {
            backward
        }
    }
}
