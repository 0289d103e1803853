use crate::math::Real;

/// Parameters of a [`CollisionPipeline`](super::CollisionPipeline).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionParams {
    /// The speed of an animated body after bouncing off an immovable obstacle.
    pub bounce_speed: Real,
    /// A camera pushed further than this distance from its orbit anchor is pulled back.
    pub camera_max_distance: Real,
    /// The distance from its anchor a camera is pulled back to.
    pub camera_reset_distance: Real,
    /// Candidate separating axes shorter than this are ignored.
    pub axis_epsilon: Real,
    /// How many bodies deep a push may propagate within one resolution.
    pub max_push_depth: usize,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            bounce_speed: 0.2,
            camera_max_distance: 2.5,
            camera_reset_distance: 3.0,
            axis_epsilon: 1.0e-5,
            max_push_depth: 8,
        }
    }
}

/// Parameters of a [`Simulation`](super::Simulation).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationParams {
    /// The longest timestep of a tick. Longer frames are simulated as if they took this long.
    pub max_timestep: Real,
    /// The seed used to scatter the initial velocities of ambient bodies.
    pub scatter_seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            max_timestep: 0.02,
            scatter_seed: 0,
        }
    }
}
