use super::{ControlError, OrbitRotation};
use crate::math::Real;
use crate::scene::{NodeHandle, SceneGraph};

/// Tuning of a [`CameraFollow`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowParams {
    /// Fraction of the distance to its default position the camera keeps after one second.
    pub return_rate: Real,
    /// How long the pointer must stay still, in seconds, before the orbit recenters.
    pub recenter_delay: Real,
    /// Radians of yaw or pitch per unit of pointer motion.
    pub pointer_sensitivity: Real,
}

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            return_rate: 0.05,
            recenter_delay: 0.5,
            pointer_sensitivity: 0.002,
        }
    }
}

/// A third-person camera orbiting an anchor.
///
/// The camera node must carry a [`CameraBody`](crate::scene::CameraBody) and
/// its parent an [`OrbitRotation`]. Pointer motion rotates the anchor. Every
/// tick the camera is pulled back towards its default position, and once the
/// pointer has been idle long enough, the orbit eases back to its neutral
/// orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraFollow {
    /// The camera node.
    pub camera: NodeHandle,
    /// The tuning of this controller.
    pub params: FollowParams,
    idle_time: Real,
}

impl CameraFollow {
    /// Creates a follow controller for the given camera node.
    pub fn new(camera: NodeHandle, params: FollowParams) -> Self {
        Self {
            camera,
            params,
            idle_time: 0.0,
        }
    }

    /// The time elapsed since the last pointer motion, in seconds.
    pub fn idle_time(&self) -> Real {
        self.idle_time
    }

    /// Rotates the orbit anchor by a pointer motion of `(dx, dy)`.
    pub fn pointer_moved(&mut self, graph: &mut SceneGraph, dx: Real, dy: Real) -> Result<(), ControlError> {
        self.idle_time = 0.0;
        let sensitivity = self.params.pointer_sensitivity;

        self.update_orbit(graph, |orbit| {
            orbit.add_pitch(-dy * sensitivity);
            orbit.add_yaw(-dx * sensitivity);
        })
    }

    /// Pulls the camera towards its default position, and recenters the orbit when idle.
    pub fn update(&mut self, graph: &mut SceneGraph, dt: Real) -> Result<(), ControlError> {
        let camera = graph.validate(self.camera)?;
        let default_position = graph[camera]
            .body()
            .kind
            .as_camera()
            .ok_or(ControlError::NotACamera(camera))?
            .default_position;

        self.idle_time += dt;
        let scale = (dt * self.params.return_rate.ln()).exp();

        let translation = default_position + (graph[camera].translation() - default_position) * scale;
        graph.set_translation(camera, translation);

        let recenter = self.idle_time > self.params.recenter_delay;
        self.update_orbit(graph, |orbit| {
            if recenter {
                orbit.scale(scale);
            }
        })
    }

    fn update_orbit(
        &self,
        graph: &mut SceneGraph,
        f: impl FnOnce(&mut OrbitRotation),
    ) -> Result<(), ControlError> {
        let camera = graph.validate(self.camera)?;
        let anchor = graph[camera]
            .parent()
            .ok_or(ControlError::MissingOrbitAnchor(camera))?;
        let orbit = graph
            .body_mut(anchor)
            .orbit
            .as_mut()
            .ok_or(ControlError::MissingOrbitAnchor(camera))?;

        f(orbit);
        let rotation = orbit.to_rotation();
        graph.set_rotation(anchor, rotation);
        Ok(())
    }
}
