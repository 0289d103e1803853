//! Non-persistent geometric queries.
//!
//! # Overview
//!
//! The only narrow-phase query needed by the collision pipeline is the
//! Separating Axis Theorem test between two world-space OBBs, which also
//! yields the minimum translation vector used for positional resolution.
//! See the [`sat`] module.

pub use self::error::{CollisionError, DegenerateConfiguration};

mod error;
pub mod sat;
