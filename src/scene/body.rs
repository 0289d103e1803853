use crate::control::{OrbitRotation, VehicleBody};
use crate::math::{Real, Vector};

/// The mass given to bodies that don't specify one.
///
/// It is large enough for these bodies to be barely displaced when hit by a
/// lighter movable body.
pub const DEFAULT_MASS: Real = 100_000.0;

bitflags::bitflags! {
    /// Flags describing how a node takes part in the simulation.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct BodyFlags: u8 {
        /// The node may be displaced by the collision response.
        const MOVABLE = 1;
        /// The node moves on its own: its velocity is integrated every tick and
        /// bounces off immovable obstacles.
        const ANIMATED = 1 << 1;
        /// The node should be drawn.
        const RENDERABLE = 1 << 2;
        /// The node's OBB takes part in collision detection.
        ///
        /// The collision pipeline doesn't descend into the children of a
        /// collidable node: they are covered by its OBB.
        const COLLIDABLE = 1 << 3;
    }
}

/// Payload of a camera node.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraBody {
    /// The translation the camera returns to, relative to its orbit anchor.
    pub default_position: Vector,
}

/// What kind of body a node is, which selects its collision response.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum BodyKind {
    /// A plain body.
    #[default]
    Generic,
    /// A camera sliding around obstacles by rotating its parent orbit anchor.
    Camera(CameraBody),
    /// A driven vehicle whose speed is damped by collisions.
    Vehicle(VehicleBody),
}

impl BodyKind {
    /// Is this a camera?
    pub fn is_camera(&self) -> bool {
        matches!(self, BodyKind::Camera(_))
    }

    /// The vehicle payload, if this is a vehicle.
    pub fn as_vehicle(&self) -> Option<&VehicleBody> {
        match self {
            BodyKind::Vehicle(vehicle) => Some(vehicle),
            _ => None,
        }
    }

    /// The mutable vehicle payload, if this is a vehicle.
    pub fn as_vehicle_mut(&mut self) -> Option<&mut VehicleBody> {
        match self {
            BodyKind::Vehicle(vehicle) => Some(vehicle),
            _ => None,
        }
    }

    /// The camera payload, if this is a camera.
    pub fn as_camera(&self) -> Option<&CameraBody> {
        match self {
            BodyKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }
}

/// The simulation state of a node.
///
/// Unlike the transform and the hierarchy links of a node, none of this is
/// cached by the scene graph, so it can be freely modified through
/// [`SceneGraph::body_mut`](super::SceneGraph::body_mut).
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// The velocity of the node, expressed in its parent's frame.
    pub velocity: Vector,
    /// The simulation flags of the node.
    pub flags: BodyFlags,
    /// The mass of the node, used to split collision offsets between movable bodies.
    pub mass: Real,
    /// The kind of body the node is.
    pub kind: BodyKind,
    /// The yaw/pitch accumulator of an orbit anchor.
    pub orbit: Option<OrbitRotation>,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            velocity: Vector::zeros(),
            flags: BodyFlags::empty(),
            mass: DEFAULT_MASS,
            kind: BodyKind::Generic,
            orbit: None,
        }
    }
}

impl Body {
    /// Does this body have all the given flags?
    #[inline]
    pub fn is(&self, flags: BodyFlags) -> bool {
        self.flags.contains(flags)
    }
}
