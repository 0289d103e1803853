//! The transform graph and the bodies living in it.

pub use self::body::{Body, BodyFlags, BodyKind, CameraBody, DEFAULT_MASS};
pub use self::node::{Node, Trs};
pub use self::scene_graph::{GraphError, NodeHandle, SceneGraph};

mod body;
mod node;
mod scene_graph;
