use super::Real;
use na::{Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, UnitVector3, Vector3};

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub type Point = Point3<Real>;

/// The vector type.
pub type Vector = Vector3<Real>;

/// The unit vector type.
pub type UnitVector = UnitVector3<Real>;

/// The matrix type.
pub type Matrix = Matrix3<Real>;

/// The homogeneous transformation matrix type.
///
/// Local and global node transforms are stored in this form since they may
/// carry a non-uniform scale.
pub type Matrix4 = na::Matrix4<Real>;

/// The rotation type.
pub type Rotation = UnitQuaternion<Real>;

/// The rotation matrix type.
pub type RotationMatrix = Rotation3<Real>;

/// The translation type.
pub type Translation = Translation3<Real>;
