use crate::math::Real;
use crate::scene::{GraphError, NodeHandle};

/// A configuration for which a collision response or a controller update is undefined.
///
/// These are reported instead of letting NaN or infinite values leak into
/// the transform graph.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum DegenerateConfiguration {
    /// The masses of two colliding bodies add up to zero (or to a non-finite value).
    #[error("the combined mass {0} of two colliding bodies is not a positive finite number.")]
    CombinedMass(Real),
    /// The share `m2 / (m1 + m2)` of a pushed body's mass is outside of `(0, 1]`.
    #[error("the mass ratio {0} of a pushed body is not in (0, 1].")]
    MassRatio(Real),
    /// A world-space offset cannot be expressed in the parent frame of a node.
    #[error("the parent matrix of the node {0} is not invertible.")]
    SingularParentMatrix(NodeHandle),
    /// The camera is at the origin of its orbit anchor, so it has no orbit direction.
    #[error("the camera {0} sits at the origin of its orbit anchor.")]
    CameraAtAnchor(NodeHandle),
    /// The steering angle has a zero sine, so the turning radius is infinite.
    #[error("the steering angle {0} has a zero sine; the turning radius is undefined.")]
    ZeroSteeringSine(Real),
}

/// Error returned by the collision pipeline.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum CollisionError {
    /// The collision response hit a degenerate configuration.
    #[error(transparent)]
    Degenerate(#[from] DegenerateConfiguration),
    /// A handle given to the pipeline is not part of the scene graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
