use crate::math::{Real, Rotation, Vector};
use core::f32::consts::{FRAC_PI_2, PI, TAU};

/// The pitch range allowed to an [`OrbitRotation`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitLimits {
    /// The smallest pitch angle, in radians.
    pub min_pitch: Real,
    /// The largest pitch angle, in radians.
    pub max_pitch: Real,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_pitch: -0.4,
            max_pitch: FRAC_PI_2,
        }
    }
}

/// A yaw/pitch pair describing the orientation of an orbit anchor.
///
/// The yaw is always wrapped into `[0, 2π)` and the pitch clamped to the
/// [`OrbitLimits`]. The resulting orientation is a rotation about the `Y`
/// axis by the yaw, followed by a rotation about the (rotated) `X` axis by
/// the pitch.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitRotation {
    yaw: Real,
    pitch: Real,
    limits: OrbitLimits,
}

impl Default for OrbitRotation {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl OrbitRotation {
    /// Creates an orbit rotation with the default pitch limits.
    pub fn new(yaw: Real, pitch: Real) -> Self {
        Self::with_limits(yaw, pitch, OrbitLimits::default())
    }

    /// Creates an orbit rotation with custom pitch limits.
    pub fn with_limits(yaw: Real, pitch: Real, limits: OrbitLimits) -> Self {
        let mut result = Self {
            yaw: 0.0,
            pitch: 0.0,
            limits,
        };
        result.set_yaw(yaw);
        result.set_pitch(pitch);
        result
    }

    /// The yaw angle, in `[0, 2π)`.
    #[inline]
    pub fn yaw(&self) -> Real {
        self.yaw
    }

    /// The pitch angle, within the limits.
    #[inline]
    pub fn pitch(&self) -> Real {
        self.pitch
    }

    /// The pitch limits.
    #[inline]
    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Sets the yaw angle, wrapped into `[0, 2π)`.
    pub fn set_yaw(&mut self, yaw: Real) {
        let wrapped = yaw.rem_euclid(TAU);
        // `rem_euclid` may round up to `TAU` for tiny negative inputs.
        self.yaw = if wrapped >= TAU { 0.0 } else { wrapped };
    }

    /// Sets the pitch angle, clamped to the limits.
    pub fn set_pitch(&mut self, pitch: Real) {
        self.pitch = pitch.max(self.limits.min_pitch).min(self.limits.max_pitch);
    }

    /// Adds `delta` to the yaw angle.
    pub fn add_yaw(&mut self, delta: Real) {
        self.set_yaw(self.yaw + delta);
    }

    /// Adds `delta` to the pitch angle.
    pub fn add_pitch(&mut self, delta: Real) {
        self.set_pitch(self.pitch + delta);
    }

    /// Moves both angles towards zero by the factor `x`.
    ///
    /// The yaw is scaled along the shortest way around the circle, so a yaw
    /// slightly below `2π` grows back to `2π` instead of sweeping all the way
    /// down to zero.
    pub fn scale(&mut self, x: Real) {
        self.set_pitch(self.pitch * x);

        if self.yaw < PI {
            self.set_yaw(self.yaw * x);
        } else {
            self.set_yaw(TAU - (TAU - self.yaw) * x);
        }
    }

    /// The orientation described by this orbit.
    pub fn to_rotation(&self) -> Rotation {
        Rotation::from_axis_angle(&Vector::y_axis(), self.yaw)
            * Rotation::from_axis_angle(&Vector::x_axis(), self.pitch)
    }
}
