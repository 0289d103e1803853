//! Application of the Separating Axis Theorem (SAT) for collision detection.
//!
//! Two convex shapes do **not** intersect if and only if there exists an axis
//! onto which their projections do not overlap. For two hexahedra, it is
//! sufficient to test:
//!
//! - the 3 face normals of the first box,
//! - the 3 face normals of the second box,
//! - the 9 cross products of one normal of each box.
//!
//! Cross products of (nearly) parallel normals are skipped since they don't
//! define a direction.
//!
//! If every candidate axis reports an overlap, the boxes intersect and the
//! smallest of the per-axis separating translations is the minimum
//! translation vector (MTV).
//!
//! # Example
//!
//! ```rust
//! use fender3d::bounding_volume::Obb;
//! use fender3d::math::{Matrix4, Vector};
//! use fender3d::query::sat::obb_obb_minimum_translation;
//!
//! let cube = Obb::cuboid(Vector::repeat(0.5)).unwrap();
//! let a = cube.transform(&Matrix4::identity());
//! let b = cube.transform(&Matrix4::new_translation(&Vector::new(0.5, 0.0, 0.0)));
//!
//! // Pushing `a` by the MTV separates it from `b`.
//! let mtv = obb_obb_minimum_translation(&a, &b, 1.0e-6).unwrap();
//! assert!((mtv - Vector::new(-0.5, 0.0, 0.0)).norm() < 1.0e-6);
//! ```

pub use self::sat_obb_obb::*;

mod sat_obb_obb;
