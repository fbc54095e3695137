#![warn(missing_docs)]
//! The elementary optical elements of a lens stack
use std::fmt::Display;

use uom::num_traits::Zero;
use uom::si::{f64::Length, length::millimeter};

use crate::{
    error::CloakResult,
    ray::ParaxialRay,
    ray_matrix::{lens_matrix, translation_matrix, RayTransferMatrix},
};

/// An elementary element of a paraxial lens stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CloakElement {
    /// Paraxial surface (= ideal thin lens) of the given focal length.
    ///
    /// A thin lens has no axial extent. A positive `focal length` corresponds to a converging lens.
    ParaxialSurface {
        /// focal length of the lens
        focal_length: Length,
    },
    /// Free-space propagation over the given axial distance.
    Propagation {
        /// propagation distance along the optical axis
        distance: Length,
    },
}
impl CloakElement {
    /// Returns the [`RayTransferMatrix`] of this [`CloakElement`].
    ///
    /// # Errors
    /// This function returns an error if a [`CloakElement::ParaxialSurface`] has a focal length of zero or a
    /// non-finite focal length.
    pub fn matrix(&self) -> CloakResult<RayTransferMatrix> {
        match self {
            Self::ParaxialSurface { focal_length } => lens_matrix(*focal_length),
            Self::Propagation { distance } => Ok(translation_matrix(*distance)),
        }
    }
    /// Returns the axial extent of this [`CloakElement`] (zero for a thin lens).
    #[must_use]
    pub fn axial_length(&self) -> Length {
        match self {
            Self::ParaxialSurface { .. } => Length::zero(),
            Self::Propagation { distance } => *distance,
        }
    }
    /// Propagate a [`ParaxialRay`] through this element.
    ///
    /// # Errors
    /// This function returns an error if the matrix of this element cannot be built (see [`CloakElement::matrix`]).
    pub fn propagate(&self, ray: &ParaxialRay) -> CloakResult<ParaxialRay> {
        Ok(self.matrix()?.propagate(ray))
    }
}
impl Display for CloakElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParaxialSurface { focal_length } => {
                write!(f, "lens (f = {:.1} mm)", focal_length.get::<millimeter>())
            }
            Self::Propagation { distance } => {
                write!(f, "propagation (d = {:.1} mm)", distance.get::<millimeter>())
            }
        }
    }
}
