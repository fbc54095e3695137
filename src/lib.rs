//! This is the documentation for the **rochester-cloak** package, a paraxial simulation of the four-lens
//! "Rochester Cloak".
//!
//! The cloak consists of four thin lenses with focal lengths `f1`, `f2`, `f2`, `f1`. With the separations
//! `t1 = f1 + f2` and `t2 = 2 f2 (f1 + f2) / (f1 - f2)` the whole lens stack acts like a free propagation over its
//! total length `L = 2 t1 + t2`, so an object placed between the inner lenses is hidden from an observer.
//!
//! The package calculates the ABCD system matrix of the stack, checks the cloak conditions, traces rays element by
//! element and visualizes the ray trajectories.
#![allow(clippy::module_name_repetitions)]

pub mod cloak;
pub mod console;
pub mod element;
pub mod error;
pub mod plottable;
pub mod ray;
pub mod ray_matrix;
pub mod report;
pub mod settings;
pub mod tracer;
pub mod utils;

pub use cloak::{cloak_condition_check, system_matrix, CloakConfig};
pub use ray::ParaxialRay;
pub use ray_matrix::{lens_matrix, propagate_ray, translation_matrix, RayTransferMatrix};

/// Return the version information of the currently built executable.
#[must_use]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}
