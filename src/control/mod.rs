//! Controllers driving the vehicle and its follow camera.

pub use self::camera_follow::{CameraFollow, FollowParams};
pub use self::error::ControlError;
pub use self::orbit_rotation::{OrbitLimits, OrbitRotation};
pub use self::vehicle::{
    DriveInput, VehicleBody, VehicleController, VehicleParams, WheelSet, STEERING_DEAD_ZONE,
    WHEEL_RADIUS,
};

mod camera_follow;
mod error;
mod orbit_rotation;
mod vehicle;
