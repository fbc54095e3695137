#![warn(missing_docs)]
//! Paraxial ray transfer (ABCD) matrices
//!
//! A [`RayTransferMatrix`] maps a [`ParaxialRay`] at one axial plane to the ray at another plane. Elements
//! carrying a length dimension are stored in millimeters, i.e. `B` in mm and `C` in 1/mm.
use std::ops::Mul;

use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::{f64::Length, length::millimeter};

use crate::{
    error::{CloakError, CloakResult},
    ray::ParaxialRay,
};

/// A 2x2 ray transfer matrix `[[A, B], [C, D]]`.
///
/// Matrices compose with `*` in the usual ABCD convention: for a ray first passing element `m1` and then
/// element `m2` the combined matrix is `m2 * m1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayTransferMatrix(Matrix2<f64>);

impl Default for RayTransferMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
impl RayTransferMatrix {
    /// Creates a [`RayTransferMatrix`] from its elements.
    ///
    /// `b` is given in mm while `c` is given in 1/mm.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self(Matrix2::new(a, b, c, d))
    }
    /// Returns the identity matrix (no optical element at all).
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix2::identity())
    }
    /// Creates the matrix of a thin lens with the given focal length.
    ///
    /// A positive `focal_length` corresponds to a converging lens.
    ///
    /// # Errors
    /// This function returns an error if the given `focal_length` is zero or not finite or if its optical power
    /// `1/f` is not finite.
    pub fn lens(focal_length: Length) -> CloakResult<Self> {
        if focal_length.is_zero() || !focal_length.is_finite() {
            return Err(CloakError::InvalidFocalLength(
                "focal length must be != 0.0 & finite".into(),
            ));
        }
        let c = -1.0 / focal_length.get::<millimeter>();
        if !c.is_finite() {
            return Err(CloakError::InvalidFocalLength(format!(
                "optical power of a lens with f = {:e} mm is not finite",
                focal_length.get::<millimeter>()
            )));
        }
        Ok(Self::new(1.0, 0.0, c, 1.0))
    }
    /// Creates the matrix of a free-space propagation over the given (signed) distance.
    #[must_use]
    pub fn translation(distance: Length) -> Self {
        Self::new(1.0, distance.get::<millimeter>(), 0.0, 1.0)
    }
    /// Returns the element `A` (spatial magnification) of this [`RayTransferMatrix`].
    #[must_use]
    pub fn a(&self) -> f64 {
        self.0[(0, 0)]
    }
    /// Returns the element `B` of this [`RayTransferMatrix`].
    #[must_use]
    pub fn b(&self) -> Length {
        Length::new::<millimeter>(self.0[(0, 1)])
    }
    /// Returns the element `C` (negative optical power) of this [`RayTransferMatrix`] in 1/mm.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.0[(1, 0)]
    }
    /// Returns the element `D` (angular magnification) of this [`RayTransferMatrix`].
    #[must_use]
    pub fn d(&self) -> f64 {
        self.0[(1, 1)]
    }
    /// Returns the underlying matrix (`B` in mm, `C` in 1/mm).
    #[must_use]
    pub const fn matrix(&self) -> &Matrix2<f64> {
        &self.0
    }
    /// Returns `true` if all elements of this [`RayTransferMatrix`] are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
    /// Returns the determinant `AD - BC`. For matrices built from lenses and propagations this is 1.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }
    /// Propagate a [`ParaxialRay`] through this matrix.
    #[must_use]
    pub fn propagate(&self, ray: &ParaxialRay) -> ParaxialRay {
        ParaxialRay::from_vector(&(self.0 * ray.as_vector()))
    }
}
impl Mul for RayTransferMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl Mul<ParaxialRay> for RayTransferMatrix {
    type Output = ParaxialRay;

    fn mul(self, rhs: ParaxialRay) -> Self::Output {
        self.propagate(&rhs)
    }
}
/// Returns the [`RayTransferMatrix`] of a thin lens with the given focal length.
///
/// # Errors
/// This function returns an error if the given `focal_length` is zero or not finite.
pub fn lens_matrix(focal_length: Length) -> CloakResult<RayTransferMatrix> {
    RayTransferMatrix::lens(focal_length)
}
/// Returns the [`RayTransferMatrix`] of a free-space propagation over the given distance.
#[must_use]
pub fn translation_matrix(distance: Length) -> RayTransferMatrix {
    RayTransferMatrix::translation(distance)
}
/// Propagate a [`ParaxialRay`] through an optical system described by the given [`RayTransferMatrix`].
#[must_use]
pub fn propagate_ray(ray: &ParaxialRay, matrix: &RayTransferMatrix) -> ParaxialRay {
    matrix.propagate(ray)
}
