/*!
fender3d
========

**fender3d** is the physics layer of a small real-time 3D driving
environment, written with the rust programming language.

It maintains a hierarchical transform graph with lazily cached matrices,
derives oriented bounding boxes from it, detects overlaps between them with
the Separating Axis Theorem, and resolves them positionally while feeding
the result back into vehicle and camera state.

Resolution is discrete and per-frame: there is no angular momentum, no
constraint solver and no continuous collision detection.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![doc(html_root_url = "http://docs.rs/fender3d/0.1.0")]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod control;
pub mod math;
pub mod pipeline;
pub mod query;
pub mod scene;
pub mod utils;
