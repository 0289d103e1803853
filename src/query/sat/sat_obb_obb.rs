use crate::bounding_volume::{BoundingVolume, WorldObb};
use crate::math::{Real, Vector};
use crate::utils::{self, Interval};
use arrayvec::ArrayVec;

/// The maximum number of candidate axes between two hexahedra: 3 + 3 face
/// normals and 3 × 3 edge cross products.
pub const OBB_OBB_MAX_AXES: usize = 15;

/// Broad-phase test between two world-space OBBs.
///
/// Returns `false` if the axis-aligned bounds of `obb1` and `obb2` are
/// disjoint on at least one world axis, in which case the boxes can't
/// intersect.
#[inline]
pub fn obb_obb_broad_phase(obb1: &WorldObb, obb2: &WorldObb) -> bool {
    obb1.aabb.intersects(&obb2.aabb)
}

/// Collects the candidate separating axes of two world-space OBBs.
///
/// The axes are, in order: the face normals of `obb1`, the face normals of
/// `obb2`, then `n1[i] × n2[j]` for `i` then `j` in `0..3`. Every axis is
/// normalized. Axes with a norm smaller than `eps` (flattened faces, or
/// cross products of parallel normals) are skipped.
pub fn obb_obb_candidate_axes(
    obb1: &WorldObb,
    obb2: &WorldObb,
    eps: Real,
) -> ArrayVec<Vector, OBB_OBB_MAX_AXES> {
    let mut axes = ArrayVec::new();

    for n in obb1.normals.iter().chain(obb2.normals.iter()) {
        if n.norm() > eps {
            axes.push(n.normalize());
        }
    }

    for n1 in &obb1.normals {
        for n2 in &obb2.normals {
            if let Some(axis) = utils::normalized_cross(n1, n2, eps) {
                axes.push(axis.into_inner());
            }
        }
    }

    axes
}

/// Computes the translation along `axis` that would separate `obb1` from `obb2`.
///
/// Both boxes are projected onto `axis`. Returns `None` if the projected
/// intervals are disjoint, meaning `axis` is a separating axis. Otherwise,
/// returns the shortest translation of `obb1` along `axis` that removes the
/// overlap (zero if the intervals are just touching).
#[inline]
pub fn obb_obb_separation_wrt_axis(
    obb1: &WorldObb,
    obb2: &WorldObb,
    axis: &Vector,
) -> Option<Vector> {
    let interval1 = Interval::from_projection(&obb1.vertices, axis);
    let interval2 = Interval::from_projection(&obb2.vertices, axis);

    if interval1.overlaps(&interval2) {
        Some(axis * interval1.separation_from(&interval2))
    } else {
        None
    }
}

/// Tests two world-space OBBs for intersection and computes their minimum translation vector.
///
/// Returns `None` if the boxes don't intersect. Otherwise, returns the
/// translation to apply to `obb1` so it stops overlapping `obb2`. It is the
/// smallest of the per-axis translations computed by
/// [`obb_obb_separation_wrt_axis`] over all the axes returned by
/// [`obb_obb_candidate_axes`]. On ties, the first axis in that order wins.
///
/// The broad-phase test [`obb_obb_broad_phase`] is run first: pairs failing it
/// never reach the per-axis projections.
pub fn obb_obb_minimum_translation(obb1: &WorldObb, obb2: &WorldObb, eps: Real) -> Option<Vector> {
    if !obb_obb_broad_phase(obb1, obb2) {
        return None;
    }

    let mut best: Option<(Real, Vector)> = None;

    for axis in obb_obb_candidate_axes(obb1, obb2, eps) {
        // A single separating axis is enough to conclude.
        let offset = obb_obb_separation_wrt_axis(obb1, obb2, &axis)?;
        let sq_norm = offset.norm_squared();

        if best.map_or(true, |(best_sq_norm, _)| sq_norm < best_sq_norm) {
            best = Some((sq_norm, offset));
        }
    }

    best.map(|(_, offset)| offset)
}
