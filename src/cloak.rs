#![warn(missing_docs)]
//! The symmetric four-lens Rochester Cloak
//!
//! The cloak consists of four thin lenses with focal lengths `f1`, `f2`, `f2`, `f1`. The lenses are separated by
//!   - `t1 = f1 + f2` (between lens 1 & 2 as well as between lens 3 & 4)
//!   - `t2 = 2 f2 (f1 + f2) / (f1 - f2)` (between lens 2 & 3)
//!
//! For these separations the stack is (paraxially) equivalent to free space of its total length
//! `L = 2 t1 + t2`, hiding objects placed in the annular region between the inner lenses.
use log::warn;
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::{f64::Length, length::millimeter};

use crate::{
    element::CloakElement,
    error::{CloakError, CloakResult},
    millimeter,
    ray::ParaxialRay,
    ray_matrix::RayTransferMatrix,
};

/// Default tolerance used when checking the cloak conditions of a [`RayTransferMatrix`].
pub const DEFAULT_CLOAK_TOLERANCE: f64 = 1e-6;

/// Configuration of a Rochester Cloak given by the focal lengths of its outer (`f1`) and inner (`f2`) lens pairs.
///
/// All derived quantities (lens separations, total length, lens positions) are calculated on demand from the
/// focal lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloakConfig {
    f1: Length,
    f2: Length,
}
impl Default for CloakConfig {
    /// Create the default cloak configuration with the following parameters:
    ///   - outer focal length `f1`: 200 mm
    ///   - inner focal length `f2`: 75 mm
    fn default() -> Self {
        Self {
            f1: millimeter!(200.0),
            f2: millimeter!(75.0),
        }
    }
}
impl CloakConfig {
    /// Creates a new [`CloakConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - one of the focal lengths is zero or not finite.
    ///   - `f1` equals `f2` (the inner lens separation diverges).
    ///   - the system matrix of the lens stack is not finite.
    pub fn new(f1: Length, f2: Length) -> CloakResult<Self> {
        let config = Self { f1, f2 };
        config.compose()?;
        Ok(config)
    }
    /// Returns the focal length of the outer lenses (lens 1 & 4).
    #[must_use]
    pub const fn f1(&self) -> Length {
        self.f1
    }
    /// Returns the focal length of the inner lenses (lens 2 & 3).
    #[must_use]
    pub const fn f2(&self) -> Length {
        self.f2
    }
    /// Returns the separation `t1 = f1 + f2` between lens 1 & 2 (and between lens 3 & 4).
    #[must_use]
    pub fn t1(&self) -> Length {
        self.f1 + self.f2
    }
    /// Returns the separation `t2 = 2 f2 (f1 + f2) / (f1 - f2)` between lens 2 & 3.
    ///
    /// # Errors
    ///
    /// This function will return an error if `f1` equals `f2` or if the separation is not finite.
    pub fn t2(&self) -> CloakResult<Length> {
        if (self.f1 - self.f2).is_zero() {
            return Err(CloakError::Domain(format!(
                "focal lengths f1 and f2 must differ (f1 = f2 = {} mm)",
                self.f1.get::<millimeter>()
            )));
        }
        let f1 = self.f1.get::<millimeter>();
        let f2 = self.f2.get::<millimeter>();
        let t2 = 2.0 * f2 * (f1 + f2) / (f1 - f2);
        if !t2.is_finite() {
            return Err(CloakError::Domain(format!(
                "separation of the inner lenses is not finite (f1 = {f1} mm, f2 = {f2} mm)"
            )));
        }
        Ok(millimeter!(t2))
    }
    /// Returns the total axial length `L = 2 t1 + t2` of the lens stack.
    ///
    /// # Errors
    ///
    /// This function will return an error if the separation `t2` cannot be calculated.
    pub fn total_length(&self) -> CloakResult<Length> {
        Ok(self.t1() * 2.0 + self.t2()?)
    }
    /// Returns the axial positions of the four lenses with lens 1 located at the origin.
    ///
    /// # Errors
    ///
    /// This function will return an error if the separation `t2` cannot be calculated.
    pub fn lens_positions(&self) -> CloakResult<[Length; 4]> {
        let t1 = self.t1();
        let t2 = self.t2()?;
        Ok([Length::zero(), t1, t1 + t2, t1 * 2.0 + t2])
    }
    /// Returns the seven elements of the lens stack in the order they are traversed by the light:
    ///
    /// `lens(f1)`, `gap(t1)`, `lens(f2)`, `gap(t2)`, `lens(f2)`, `gap(t1)`, `lens(f1)`
    ///
    /// # Errors
    ///
    /// This function will return an error if the separation `t2` cannot be calculated.
    pub fn elements(&self) -> CloakResult<[CloakElement; 7]> {
        let t1 = self.t1();
        let t2 = self.t2()?;
        Ok([
            CloakElement::ParaxialSurface {
                focal_length: self.f1,
            },
            CloakElement::Propagation { distance: t1 },
            CloakElement::ParaxialSurface {
                focal_length: self.f2,
            },
            CloakElement::Propagation { distance: t2 },
            CloakElement::ParaxialSurface {
                focal_length: self.f2,
            },
            CloakElement::Propagation { distance: t1 },
            CloakElement::ParaxialSurface {
                focal_length: self.f1,
            },
        ])
    }
    /// Returns the [`RayTransferMatrix`] of the complete lens stack.
    ///
    /// The matrices of the single elements are multiplied such that the element hit first by the light is the
    /// rightmost factor: `M = L(f1) T(t1) L(f2) T(t2) L(f2) T(t1) L(f1)`.
    ///
    /// The cloak design assumes `f1 > f2 > 0`. Other combinations are calculated anyway but a warning is logged.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - `f1` equals `f2`.
    ///   - one of the focal lengths is zero or not finite.
    ///   - an element of the resulting matrix is not finite.
    pub fn system_matrix(&self) -> CloakResult<RayTransferMatrix> {
        if !(self.f1 > self.f2 && self.f2 > Length::zero()) {
            warn!(
                "focal lengths f1 = {:.1} mm, f2 = {:.1} mm do not follow the cloak design f1 > f2 > 0",
                self.f1.get::<millimeter>(),
                self.f2.get::<millimeter>()
            );
        }
        self.compose()
    }
    fn compose(&self) -> CloakResult<RayTransferMatrix> {
        let matrix = self
            .elements()?
            .iter()
            .try_fold(RayTransferMatrix::identity(), |total, element| {
                element.matrix().map(|m| m * total)
            })?;
        if !matrix.is_finite() {
            return Err(CloakError::Domain(format!(
                "system matrix of f1 = {:e} mm, f2 = {:e} mm is not finite",
                self.f1.get::<millimeter>(),
                self.f2.get::<millimeter>()
            )));
        }
        Ok(matrix)
    }
    /// Propagate a [`ParaxialRay`] from the plane of the first lens to the plane of the last lens.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system matrix cannot be calculated.
    pub fn propagate(&self, ray: &ParaxialRay) -> CloakResult<ParaxialRay> {
        Ok(self.system_matrix()?.propagate(ray))
    }
    /// Check whether this configuration forms a perfect paraxial cloak within the given tolerance.
    ///
    /// See [`cloak_condition_check`] for details.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system matrix cannot be calculated.
    pub fn is_cloak(&self, tolerance: f64) -> CloakResult<bool> {
        Ok(cloak_condition_check(
            &self.system_matrix()?,
            self.total_length()?,
            tolerance,
        ))
    }
}
/// Compute the [`RayTransferMatrix`] of a Rochester Cloak with the outer focal length `f1` and the inner
/// focal length `f2`.
///
/// # Errors
///
/// This function will return an error if
///   - `f1` equals `f2`.
///   - one of the focal lengths is zero or not finite.
pub fn system_matrix(f1: Length, f2: Length) -> CloakResult<RayTransferMatrix> {
    CloakConfig { f1, f2 }.system_matrix()
}
/// Verify that a [`RayTransferMatrix`] satisfies the conditions of a perfect paraxial cloak:
///   - `C = 0` (afocal system)
///   - `A = 1` (unit magnification, `D = 1` follows from the unit determinant)
///   - `B = L` (equivalent to free space of the physical length `L` of the system)
///
/// Each condition must be met within the given (absolute) `tolerance`. `B` and `L` are compared in mm.
#[must_use]
pub fn cloak_condition_check(matrix: &RayTransferMatrix, length: Length, tolerance: f64) -> bool {
    matrix.c().abs() < tolerance
        && (matrix.a() - 1.0).abs() < tolerance
        && (matrix.b() - length).get::<millimeter>().abs() < tolerance
}
