#![warn(missing_docs)]
//! Numeric analysis report of a cloak configuration
use std::fmt::Display;

use serde::Serialize;
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
    length::millimeter,
};

use crate::{
    cloak::cloak_condition_check,
    error::{CloakError, CloakResult},
    ray::ParaxialRay,
    ray_matrix::RayTransferMatrix,
    settings::SimulationSettings,
};

/// Result of the numeric analysis of a cloak configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CloakReport {
    f1: Length,
    f2: Length,
    t1: Length,
    t2: Length,
    total_length: Length,
    matrix: RayTransferMatrix,
    is_cloak: bool,
    ray_in: ParaxialRay,
    ray_out: ParaxialRay,
}
impl CloakReport {
    /// Analyze the cloak given in the [`SimulationSettings`].
    ///
    /// The report contains the derived lens separations, the system matrix, the result of the cloak condition check
    /// and the propagation of the probe ray.
    ///
    /// # Errors
    ///
    /// This function will return an error if the system matrix of the cloak cannot be calculated.
    pub fn new(settings: &SimulationSettings) -> CloakResult<Self> {
        let cloak = &settings.cloak;
        let matrix = cloak.system_matrix()?;
        let total_length = cloak.total_length()?;
        Ok(Self {
            f1: cloak.f1(),
            f2: cloak.f2(),
            t1: cloak.t1(),
            t2: cloak.t2()?,
            total_length,
            matrix,
            is_cloak: cloak_condition_check(&matrix, total_length, settings.tolerance),
            ray_in: settings.probe_ray,
            ray_out: matrix.propagate(&settings.probe_ray),
        })
    }
    /// Returns the total length of the analyzed lens stack.
    #[must_use]
    pub const fn total_length(&self) -> Length {
        self.total_length
    }
    /// Returns the system matrix of the analyzed lens stack.
    #[must_use]
    pub const fn matrix(&self) -> &RayTransferMatrix {
        &self.matrix
    }
    /// Returns `true` if the analyzed lens stack fulfills the cloak conditions.
    #[must_use]
    pub const fn is_cloak(&self) -> bool {
        self.is_cloak
    }
    /// Returns the probe ray behind the last lens.
    #[must_use]
    pub const fn ray_out(&self) -> ParaxialRay {
        self.ray_out
    }
    /// Returns the change of the probe ray angle `θ_out - θ_in`.
    #[must_use]
    pub fn angle_change(&self) -> Angle {
        self.ray_out.angle() - self.ray_in.angle()
    }
    /// Returns the lateral shift of the probe ray `y_out - y_in`.
    #[must_use]
    pub fn lateral_shift(&self) -> Length {
        self.ray_out.height() - self.ray_in.height()
    }
    /// Serialize this [`CloakReport`] to a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml(&self) -> CloakResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CloakError::Other(format!("serialization of report failed: {e}")))
    }
}
impl Display for CloakReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rochester Cloak Simulation")?;
        writeln!(f, "==========================")?;
        writeln!(
            f,
            "Focal lengths: f1 = {:.1} mm, f2 = {:.1} mm",
            self.f1.get::<millimeter>(),
            self.f2.get::<millimeter>()
        )?;
        writeln!(
            f,
            "Separations: t1 = {:.1} mm, t2 = {:.1} mm",
            self.t1.get::<millimeter>(),
            self.t2.get::<millimeter>()
        )?;
        writeln!(
            f,
            "Total length: L = {:.1} mm",
            self.total_length.get::<millimeter>()
        )?;
        writeln!(f)?;
        writeln!(f, "Total ABCD matrix:")?;
        writeln!(
            f,
            "  A = {:.8}, B = {:.8} mm",
            self.matrix.a(),
            self.matrix.b().get::<millimeter>()
        )?;
        writeln!(f, "  C = {:.8}, D = {:.8}", self.matrix.c(), self.matrix.d())?;
        writeln!(f)?;
        writeln!(
            f,
            "Perfect paraxial cloak conditions satisfied: {}",
            self.is_cloak
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Ray entering at y = {:.3} mm, θ = {} rad",
            self.ray_in.height().get::<millimeter>(),
            self.ray_in.angle().get::<radian>()
        )?;
        writeln!(
            f,
            "Ray exits at   y = {:.3} mm, θ = {:.6} rad",
            self.ray_out.height().get::<millimeter>(),
            self.ray_out.angle().get::<radian>()
        )?;
        writeln!(
            f,
            "Angle change (θ_out - θ_in) = {:.6} rad",
            self.angle_change().get::<radian>()
        )?;
        write!(
            f,
            "Lateral shift (y_out - y_in) = {:.3} mm",
            self.lateral_shift().get::<millimeter>()
        )
    }
}
