//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::interval::Interval;
pub use self::plane_normal::{normalized_cross, plane_normal};
pub use self::projection::{clamp, project, reflect, sign, transform_direction};

mod center;
mod interval;
mod plane_normal;
mod projection;
