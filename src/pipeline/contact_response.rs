//! Velocity and displacement responses to a contact.
//!
//! All the functions take the minimum translation vector `mtv` computed by
//! [`obb_obb_minimum_translation`](crate::query::sat::obb_obb_minimum_translation),
//! which is the displacement to apply to the moved body.

use crate::math::{Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::DegenerateConfiguration;
use crate::utils;

/// Splits `mtv` between two movable bodies, inversely to their masses.
///
/// Returns the world-space offsets `(offset1, offset2)` with
/// `offset1 = mtv * m2 / (m1 + m2)` and `offset2 = -mtv * m1 / (m1 + m2)`,
/// so that `offset1 - offset2 = mtv`.
pub fn mass_weighted_split(
    mtv: &Vector,
    mass1: Real,
    mass2: Real,
) -> Result<(Vector, Vector), DegenerateConfiguration> {
    let total = mass1 + mass2;

    if total <= 0.0 || !total.is_finite() {
        return Err(DegenerateConfiguration::CombinedMass(total));
    }

    Ok((mtv * (mass2 / total), mtv * (-mass1 / total)))
}

/// The factor applied to the speed of a vehicle pushing a movable body.
///
/// It is `exp(dt * ln(m2 / (m1 + m2)))`: pushing a light body barely slows the
/// vehicle down, pushing a heavy one nearly stops it. A null timestep leaves
/// the speed unchanged.
pub fn push_damping(mass1: Real, mass2: Real, dt: Real) -> Result<Real, DegenerateConfiguration> {
    let total = mass1 + mass2;

    if total <= 0.0 || !total.is_finite() {
        return Err(DegenerateConfiguration::CombinedMass(total));
    }

    let ratio = mass2 / total;

    if ratio.is_nan() || ratio <= 0.0 || ratio > 1.0 {
        return Err(DegenerateConfiguration::MassRatio(ratio));
    }

    if dt == 0.0 {
        return Ok(1.0);
    }

    let damping = (dt * ratio.ln()).exp();

    if damping.is_finite() {
        Ok(damping)
    } else {
        Err(DegenerateConfiguration::MassRatio(ratio))
    }
}

/// The factor `1 - |cos θ|` applied to the speed of a body hitting an immovable obstacle.
///
/// `θ` is the angle between the world-space `heading` and `mtv`. A head-on
/// impact gives zero, a graze gives one. If either vector is zero, the speed
/// is left unchanged.
pub fn heading_damping(heading: &Vector, mtv: &Vector) -> Real {
    match (
        heading.try_normalize(DEFAULT_EPSILON),
        mtv.try_normalize(DEFAULT_EPSILON),
    ) {
        (Some(heading), Some(normal)) => 1.0 - heading.dot(&normal).abs(),
        _ => 1.0,
    }
}

/// Reflects `velocity` about the contact `normal` and rescales it to `speed`.
///
/// If the reflected velocity is zero, the body leaves along `normal`.
pub fn bounce_velocity(velocity: &Vector, normal: &UnitVector, speed: Real) -> Vector {
    let reflected = utils::reflect(velocity, normal);

    reflected
        .try_normalize(DEFAULT_EPSILON)
        .unwrap_or_else(|| normal.into_inner())
        * speed
}
