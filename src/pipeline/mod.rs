//! The per-tick collision resolution and simulation driver.
//!
//! A [`CollisionPipeline`] resolves the collisions of one moving body against
//! every body of its [`Partition`]s, using the SAT test from
//! [`query::sat`](crate::query::sat). A [`Simulation`] owns the scene graph
//! and runs the controllers and the pipelines in a fixed order every tick.

pub use self::camera_slide::slide_camera;
pub use self::collision_pipeline::CollisionPipeline;
pub use self::params::{CollisionParams, SimulationParams};
pub use self::partition::Partition;
pub use self::simulation::{Simulation, SimulationError, Spinner, TickReport};

mod camera_slide;
mod collision_pipeline;
pub mod contact_response;
mod params;
mod partition;
mod simulation;
