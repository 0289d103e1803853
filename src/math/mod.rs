//! Linear algebra type aliases.

mod math_nalgebra_3d;

pub use math_nalgebra_3d::*;

/// The scalar type used throughout this crate.
pub type Real = f32;
