#![warn(missing_docs)]
//! Element-wise ray tracing through the cloak
//!
//! In contrast to the propagation using the system matrix, the tracer walks a [`ParaxialRay`] through each element
//! of the lens stack and records the ray height after every element. The resulting [`RayPath`]s are used for
//! visualizing the ray trajectories.
use nalgebra::MatrixXx2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::{
    f64::{Angle, Length},
    length::millimeter,
};

use crate::{
    cloak::CloakConfig,
    error::{CloakError, CloakResult},
    millimeter, milliradian,
    ray::ParaxialRay,
    ray_matrix::translation_matrix,
    utils::linspace,
};

/// Configuration data for tracing rays through the cloak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    exit_length: Length,
}
impl Default for TraceConfig {
    /// Create a default trace config with the following parameters:
    ///   - free propagation behind the last lens: `50 mm`
    fn default() -> Self {
        Self {
            exit_length: millimeter!(50.0),
        }
    }
}
impl TraceConfig {
    /// Creates a new [`TraceConfig`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the given `exit_length` is negative or not finite.
    pub fn new(exit_length: Length) -> CloakResult<Self> {
        let mut config = Self::default();
        config.set_exit_length(exit_length)?;
        Ok(config)
    }
    /// Returns the length of the free propagation appended behind the last lens.
    #[must_use]
    pub const fn exit_length(&self) -> Length {
        self.exit_length
    }
    /// Sets the length of the free propagation appended behind the last lens.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given `exit_length` is negative or not finite.
    pub fn set_exit_length(&mut self, exit_length: Length) -> CloakResult<()> {
        if !exit_length.is_finite() || exit_length.is_sign_negative() {
            return Err(CloakError::Other(
                "exit length must be >=0.0 and finite".into(),
            ));
        }
        self.exit_length = exit_length;
        Ok(())
    }
}

/// The sampled trajectory of a single ray traced through the cloak.
///
/// The path contains one sample at the entrance plane (first lens) and one sample behind every element including the
/// final free propagation. Lenses do not change the axial position, so a lens produces two samples at the same position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RayPath {
    start_ray: ParaxialRay,
    exit_ray: ParaxialRay,
    positions: Vec<Length>,
    heights: Vec<Length>,
}
impl RayPath {
    fn new(start_ray: ParaxialRay) -> Self {
        Self {
            start_ray,
            exit_ray: start_ray,
            positions: vec![Length::zero()],
            heights: vec![start_ray.height()],
        }
    }
    fn add_sample(&mut self, position: Length, ray: ParaxialRay) {
        self.positions.push(position);
        self.heights.push(ray.height());
        self.exit_ray = ray;
    }
    /// Returns the ray at the entrance plane.
    #[must_use]
    pub const fn start_ray(&self) -> ParaxialRay {
        self.start_ray
    }
    /// Returns the ray at the last sample of the path.
    #[must_use]
    pub const fn exit_ray(&self) -> ParaxialRay {
        self.exit_ray
    }
    /// Returns the axial positions of the samples.
    #[must_use]
    pub fn positions(&self) -> &[Length] {
        &self.positions
    }
    /// Returns the ray heights of the samples.
    #[must_use]
    pub fn heights(&self) -> &[Length] {
        &self.heights
    }
    /// Returns the number of samples of this [`RayPath`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    /// Returns `true` if the [`RayPath`] contains no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    /// Returns the last sample `(axial position, height)`.
    #[must_use]
    pub fn last_sample(&self) -> Option<(Length, Length)> {
        self.positions.last().copied().zip(self.heights.last().copied())
    }
    /// Returns the samples as matrix with the axial positions (in mm) in the first and the heights (in mm) in the
    /// second column.
    #[must_use]
    pub fn samples_in_mm(&self) -> MatrixXx2<f64> {
        let mut samples = MatrixXx2::<f64>::zeros(self.len());
        for (idx, (x, y)) in self.positions.iter().zip(self.heights.iter()).enumerate() {
            samples[(idx, 0)] = x.get::<millimeter>();
            samples[(idx, 1)] = y.get::<millimeter>();
        }
        samples
    }
}

/// Trace a [`ParaxialRay`] element by element through the cloak.
///
/// The ray starts at the plane of the first lens. After the last lens the ray freely propagates over the
/// `exit_length` given in the [`TraceConfig`]. The returned [`RayPath`] contains 9 samples: the entrance, one sample
/// behind each of the 7 elements and the end of the exit propagation.
///
/// # Errors
///
/// This function will return an error if the elements of the cloak cannot be built (see [`CloakConfig::elements`]).
pub fn trace_ray(
    ray: ParaxialRay,
    cloak: &CloakConfig,
    config: &TraceConfig,
) -> CloakResult<RayPath> {
    let mut path = RayPath::new(ray);
    let mut position = Length::zero();
    let mut current = ray;
    for element in cloak.elements()? {
        current = element.propagate(&current)?;
        position += element.axial_length();
        path.add_sample(position, current);
    }
    current = translation_matrix(config.exit_length()).propagate(&current);
    position += config.exit_length();
    path.add_sample(position, current);
    Ok(path)
}

/// A fan of rays given by a set of start heights and a set of start angles.
///
/// Each start height is combined with each start angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayFan {
    min_height: Length,
    max_height: Length,
    nr_of_heights: usize,
    angles: Vec<Angle>,
}
impl Default for RayFan {
    /// Create a default ray fan with the following parameters:
    ///   - start heights: 9 values from -20 mm to 20 mm
    ///   - start angles: 0 mrad, 5 mrad, -5 mrad
    fn default() -> Self {
        Self {
            min_height: millimeter!(-20.0),
            max_height: millimeter!(20.0),
            nr_of_heights: 9,
            angles: milliradian!(0.0, 5.0, -5.0),
        }
    }
}
impl RayFan {
    /// Creates a new [`RayFan`] with `nr_of_heights` start heights equally distributed between `min_height` and
    /// `max_height`.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - one of the height limits or angles is not finite.
    ///   - `nr_of_heights` or the number of angles is zero.
    pub fn new(
        min_height: Length,
        max_height: Length,
        nr_of_heights: usize,
        angles: Vec<Angle>,
    ) -> CloakResult<Self> {
        if !min_height.is_finite() || !max_height.is_finite() {
            return Err(CloakError::Other("height limits must be finite".into()));
        }
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(CloakError::Other("start angles must be finite".into()));
        }
        if nr_of_heights == 0 || angles.is_empty() {
            return Err(CloakError::Other(
                "ray fan must contain at least one height and one angle".into(),
            ));
        }
        Ok(Self {
            min_height,
            max_height,
            nr_of_heights,
            angles,
        })
    }
    /// Returns the start heights of this [`RayFan`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the height limits are not finite.
    pub fn heights(&self) -> CloakResult<Vec<Length>> {
        Ok(linspace(
            self.min_height.get::<millimeter>(),
            self.max_height.get::<millimeter>(),
            self.nr_of_heights,
        )?
        .iter()
        .map(|h| millimeter!(*h))
        .collect())
    }
    /// Returns the lower limit of the start heights.
    #[must_use]
    pub const fn min_height(&self) -> Length {
        self.min_height
    }
    /// Returns the upper limit of the start heights.
    #[must_use]
    pub const fn max_height(&self) -> Length {
        self.max_height
    }
    /// Returns the number of start heights.
    #[must_use]
    pub const fn nr_of_heights(&self) -> usize {
        self.nr_of_heights
    }
    /// Returns the start angles of this [`RayFan`].
    #[must_use]
    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }
    /// Returns the start rays of this [`RayFan`] ordered by height first and angle second.
    ///
    /// # Errors
    ///
    /// This function will return an error if the height limits are not finite.
    pub fn rays(&self) -> CloakResult<Vec<ParaxialRay>> {
        Ok(self
            .heights()?
            .into_iter()
            .flat_map(|h| self.angles.iter().map(move |a| ParaxialRay::new(h, *a)))
            .collect())
    }
}

/// Trace all rays of a [`RayFan`] through the cloak.
///
/// The rays are traced in parallel. The order of the returned [`RayPath`]s corresponds to [`RayFan::rays`].
///
/// # Errors
///
/// This function will return an error if the start rays cannot be generated or one of the rays cannot be traced.
pub fn trace_ray_fan(
    fan: &RayFan,
    cloak: &CloakConfig,
    config: &TraceConfig,
) -> CloakResult<Vec<RayPath>> {
    fan.rays()?
        .par_iter()
        .map(|ray| trace_ray(*ray, cloak, config))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{radian, ray_matrix::propagate_ray};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use uom::si::angle::radian;
    #[test]
    fn trace_config_default() {
        assert_eq!(TraceConfig::default().exit_length(), millimeter!(50.0));
    }
    #[test]
    fn trace_config_exit_length() {
        assert_eq!(
            TraceConfig::new(millimeter!(120.0)).unwrap().exit_length(),
            millimeter!(120.0)
        );
        assert!(TraceConfig::new(millimeter!(0.0)).is_ok());
        assert!(TraceConfig::new(millimeter!(-1.0)).is_err());
        assert!(TraceConfig::new(millimeter!(f64::NAN)).is_err());
        assert!(TraceConfig::new(millimeter!(f64::INFINITY)).is_err());
        let mut config = TraceConfig::default();
        assert!(config.set_exit_length(millimeter!(-5.0)).is_err());
        assert_eq!(config.exit_length(), millimeter!(50.0));
    }
    #[test]
    fn trace_ray_samples() {
        let cloak = CloakConfig::default();
        let path = trace_ray(
            ParaxialRay::new(millimeter!(10.0), radian!(0.0)),
            &cloak,
            &TraceConfig::default(),
        )
        .unwrap();
        assert_eq!(path.len(), 9);
        assert!(!path.is_empty());
        assert_eq!(path.positions().len(), path.heights().len());
        let expected_positions = [0.0, 0.0, 275.0, 275.0, 605.0, 605.0, 880.0, 880.0, 930.0];
        for (x, expected) in path.positions().iter().zip(expected_positions) {
            assert_abs_diff_eq!(x.get::<millimeter>(), expected, epsilon = 1e-9);
        }
        // a parallel ray is focused by lens 1 and ends at -f2/f1 times its height behind lens 2
        assert_abs_diff_eq!(path.heights()[0].get::<millimeter>(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path.heights()[1].get::<millimeter>(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path.heights()[2].get::<millimeter>(), -3.75, epsilon = 1e-9);
        assert_abs_diff_eq!(path.heights()[8].get::<millimeter>(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            path.exit_ray().angle().get::<radian>(),
            0.0,
            epsilon = 1e-12
        );
        assert_eq!(path.start_ray().height(), millimeter!(10.0));
    }
    #[test]
    fn trace_ray_matches_system_matrix() {
        let cloak = CloakConfig::new(millimeter!(300.0), millimeter!(100.0)).unwrap();
        let config = TraceConfig::new(millimeter!(75.0)).unwrap();
        let system = translation_matrix(config.exit_length()) * cloak.system_matrix().unwrap();
        let total_length = cloak.total_length().unwrap() + config.exit_length();
        for (y, theta) in [(10.0, 0.01), (-20.0, 0.005), (0.0, -0.005), (3.3, 0.0)] {
            let ray = ParaxialRay::new(millimeter!(y), radian!(theta));
            let path = trace_ray(ray, &cloak, &config).unwrap();
            let expected = propagate_ray(&ray, &system);
            let (x_end, y_end) = path.last_sample().unwrap();
            assert_abs_diff_eq!(
                x_end.get::<millimeter>(),
                total_length.get::<millimeter>(),
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(
                y_end.get::<millimeter>(),
                expected.height().get::<millimeter>(),
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(
                path.exit_ray().angle().get::<radian>(),
                expected.angle().get::<radian>(),
                epsilon = 1e-12
            );
        }
    }
    #[test]
    fn trace_ray_invalid_cloak() {
        let cloak = CloakConfig::default();
        let invalid: CloakConfig = serde_yaml::from_str("f1: 0.1\nf2: 0.1\n").unwrap();
        assert_ne!(cloak, invalid);
        assert_matches!(
            trace_ray(
                ParaxialRay::new(millimeter!(1.0), radian!(0.0)),
                &invalid,
                &TraceConfig::default()
            ),
            Err(CloakError::Domain(_))
        );
    }
    #[test]
    fn samples_in_mm() {
        let path = trace_ray(
            ParaxialRay::new(millimeter!(5.0), radian!(0.0)),
            &CloakConfig::default(),
            &TraceConfig::default(),
        )
        .unwrap();
        let samples = path.samples_in_mm();
        assert_eq!(samples.nrows(), 9);
        assert_abs_diff_eq!(samples[(8, 0)], 930.0, epsilon = 1e-9);
        assert_abs_diff_eq!(samples[(8, 1)], 5.0, epsilon = 1e-9);
    }
    #[test]
    fn ray_fan_default() {
        let fan = RayFan::default();
        let heights = fan.heights().unwrap();
        assert_eq!(heights.len(), 9);
        assert_abs_diff_eq!(heights[0].get::<millimeter>(), -20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(heights[8].get::<millimeter>(), 20.0, epsilon = 1e-9);
        assert_eq!(fan.angles().len(), 3);
        let rays = fan.rays().unwrap();
        assert_eq!(rays.len(), 27);
        assert_eq!(rays[1].height(), heights[0]);
        assert_abs_diff_eq!(rays[1].angle().get::<radian>(), 0.005, epsilon = 1e-12);
        assert_eq!(rays[3].height(), heights[1]);
    }
    #[test]
    fn ray_fan_new() {
        assert!(RayFan::new(millimeter!(-1.0), millimeter!(1.0), 3, radian!(0.0, 0.1)).is_ok());
        assert!(RayFan::new(millimeter!(-1.0), millimeter!(1.0), 0, radian!(0.0, 0.1)).is_err());
        assert!(RayFan::new(millimeter!(-1.0), millimeter!(1.0), 3, vec![]).is_err());
        assert!(
            RayFan::new(millimeter!(f64::NAN), millimeter!(1.0), 3, radian!(0.0, 0.1)).is_err()
        );
        assert!(
            RayFan::new(millimeter!(-1.0), millimeter!(1.0), 3, radian!(0.0, f64::NAN)).is_err()
        );
    }
    #[test]
    fn trace_fan_keeps_order() {
        let cloak = CloakConfig::default();
        let config = TraceConfig::default();
        let fan = RayFan::default();
        let paths = trace_ray_fan(&fan, &cloak, &config).unwrap();
        let rays = fan.rays().unwrap();
        assert_eq!(paths.len(), rays.len());
        for (path, ray) in paths.iter().zip(rays.iter()) {
            assert_eq!(path.start_ray(), *ray);
            assert_eq!(path, &trace_ray(*ray, &cloak, &config).unwrap());
        }
    }
    #[test]
    fn trace_fan_invalid_cloak() {
        let invalid: CloakConfig = serde_yaml::from_str("f1: 0.1\nf2: 0.1\n").unwrap();
        assert!(trace_ray_fan(&RayFan::default(), &invalid, &TraceConfig::default()).is_err());
    }
}
