use crate::query::DegenerateConfiguration;
use crate::scene::{GraphError, NodeHandle};

/// Error returned by the vehicle and camera controllers.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ControlError {
    /// The controller update hit a degenerate configuration.
    #[error(transparent)]
    Degenerate(#[from] DegenerateConfiguration),
    /// A handle given to the controller is not part of the scene graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The node driven by a vehicle controller has no vehicle payload.
    #[error("the node {0} is not a vehicle.")]
    NotAVehicle(NodeHandle),
    /// The node driven by a camera controller has no camera payload.
    #[error("the node {0} is not a camera.")]
    NotACamera(NodeHandle),
    /// The parent of a camera doesn't carry an orbit rotation.
    #[error("the camera {0} has no orbit anchor.")]
    MissingOrbitAnchor(NodeHandle),
}
