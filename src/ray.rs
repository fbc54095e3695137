#![warn(missing_docs)]
//! Module for handling paraxial (meridional) rays
use std::fmt::Display;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::millimeter,
};

/// State of a paraxial ray at a given axial plane.
///
/// A [`ParaxialRay`] consists of its `height` (lateral distance from the optical axis) and its `angle`
/// with respect to the optical axis. Within the paraxial approximation the angle is treated as its own
/// tangent, i.e. a propagation over a distance `d` changes the height by `angle * d`.
///
/// The ray is an immutable value. Propagating it through an optical element yields a new [`ParaxialRay`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParaxialRay {
    height: Length,
    angle: Angle,
}
impl ParaxialRay {
    /// Creates a new [`ParaxialRay`] with the given height and angle.
    #[must_use]
    pub const fn new(height: Length, angle: Angle) -> Self {
        Self { height, angle }
    }
    /// Returns the height (distance from the optical axis) of this [`ParaxialRay`].
    #[must_use]
    pub const fn height(&self) -> Length {
        self.height
    }
    /// Returns the angle of this [`ParaxialRay`] with respect to the optical axis.
    #[must_use]
    pub const fn angle(&self) -> Angle {
        self.angle
    }
    /// Returns `true` if height and angle of this [`ParaxialRay`] are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.height.is_finite() && self.angle.is_finite()
    }
    /// Returns the ray as column vector `(height in mm, angle in rad)` as needed for the multiplication
    /// with a [`RayTransferMatrix`](crate::ray_matrix::RayTransferMatrix).
    #[must_use]
    pub fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.height.get::<millimeter>(), self.angle.get::<radian>())
    }
    /// Creates a [`ParaxialRay`] from a column vector `(height in mm, angle in rad)`.
    #[must_use]
    pub fn from_vector(vector: &Vector2<f64>) -> Self {
        Self {
            height: Length::new::<millimeter>(vector[0]),
            angle: Angle::new::<radian>(vector[1]),
        }
    }
}
impl Display for ParaxialRay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "y = {:.3} mm, θ = {:.6} rad",
            self.height.get::<millimeter>(),
            self.angle.get::<radian>()
        )
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::{millimeter, milliradian, radian};
    use approx::assert_abs_diff_eq;
    #[test]
    fn new() {
        let ray = ParaxialRay::new(millimeter!(10.0), radian!(0.01));
        assert_eq!(ray.height(), millimeter!(10.0));
        assert_eq!(ray.angle(), radian!(0.01));
    }
    #[test]
    fn is_finite() {
        assert!(ParaxialRay::new(millimeter!(10.0), radian!(0.01)).is_finite());
        assert!(!ParaxialRay::new(millimeter!(f64::NAN), radian!(0.01)).is_finite());
        assert!(!ParaxialRay::new(millimeter!(1.0), radian!(f64::INFINITY)).is_finite());
    }
    #[test]
    fn as_vector() {
        let ray = ParaxialRay::new(millimeter!(-20.0), milliradian!(5.0));
        let v = ray.as_vector();
        assert_abs_diff_eq!(v[0], -20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[1], 0.005, epsilon = 1e-9);
    }
    #[test]
    fn from_vector() {
        let ray = ParaxialRay::from_vector(&Vector2::new(3.0, -0.25));
        assert_abs_diff_eq!(ray.height().get::<millimeter>(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ray.angle().get::<radian>(), -0.25, epsilon = 1e-9);
    }
    #[test]
    fn display() {
        let ray = ParaxialRay::new(millimeter!(10.0), radian!(0.01));
        assert_eq!(format!("{ray}"), "y = 10.000 mm, θ = 0.010000 rad");
    }
    #[test]
    fn serde_yaml() {
        let ray = ParaxialRay::new(millimeter!(10.0), radian!(0.01));
        let serialized = serde_yaml::to_string(&ray).unwrap();
        let deserialized: ParaxialRay = serde_yaml::from_str(&serialized).unwrap();
        assert_abs_diff_eq!(
            deserialized.height().get::<millimeter>(),
            10.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(deserialized.angle().get::<radian>(), 0.01, epsilon = 1e-9);
    }
}
