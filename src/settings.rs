#![warn(missing_docs)]
//! Simulation settings
//!
//! The settings bundle everything needed for a complete simulation run: the cloak configuration, the probe ray used for
//! the numeric analysis, the tolerance of the cloak check and the ray fan used for the visualization. They can be read
//! from a YAML file. All missing entries are replaced by their defaults. Lengths are given in meters, angles in radians.
//!
//! ```yaml
//! cloak:
//!   f1: 0.2
//!   f2: 0.075
//! probe_ray:
//!   height: 0.01
//!   angle: 0.01
//! tolerance: 1.0e-6
//! ```
use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    cloak::{CloakConfig, DEFAULT_CLOAK_TOLERANCE},
    error::{CloakError, CloakResult},
    millimeter, radian,
    ray::ParaxialRay,
    tracer::{RayFan, TraceConfig},
};

/// Container of all settings of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// configuration of the lens stack
    pub cloak: CloakConfig,
    /// configuration of the element-wise ray tracer
    pub trace: TraceConfig,
    /// ray used for the numeric analysis
    pub probe_ray: ParaxialRay,
    /// tolerance used for checking the cloak conditions
    pub tolerance: f64,
    /// rays used for the visualization
    pub fan: RayFan,
}
impl Default for SimulationSettings {
    /// Create the default settings:
    ///   - cloak: see [`CloakConfig::default`]
    ///   - trace: see [`TraceConfig::default`]
    ///   - probe ray: height `10 mm`, angle `0.01 rad`
    ///   - tolerance: `1e-6`
    ///   - fan: see [`RayFan::default`]
    fn default() -> Self {
        Self {
            cloak: CloakConfig::default(),
            trace: TraceConfig::default(),
            probe_ray: ParaxialRay::new(millimeter!(10.0), radian!(0.01)),
            tolerance: DEFAULT_CLOAK_TOLERANCE,
            fan: RayFan::default(),
        }
    }
}
impl SimulationSettings {
    /// Parse [`SimulationSettings`] from a YAML string.
    ///
    /// The parsed settings are checked with [`SimulationSettings::validate`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the string cannot be parsed or the settings are invalid.
    pub fn from_yaml(yaml: &str) -> CloakResult<Self> {
        let settings: Self = serde_yaml::from_str(yaml)
            .map_err(|e| CloakError::Config(format!("parsing of settings failed: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }
    /// Check these [`SimulationSettings`] against the same constraints the constructors of its parts enforce.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the cloak configuration is invalid (see [`CloakConfig::new`]).
    ///   - the exit length is negative or not finite.
    ///   - the ray fan is invalid (see [`RayFan::new`]).
    ///   - the probe ray is not finite.
    ///   - the tolerance is negative or not finite.
    pub fn validate(&self) -> CloakResult<()> {
        let invalid = |e: CloakError| CloakError::Config(format!("invalid settings: {e}"));
        CloakConfig::new(self.cloak.f1(), self.cloak.f2()).map_err(invalid)?;
        TraceConfig::new(self.trace.exit_length()).map_err(invalid)?;
        RayFan::new(
            self.fan.min_height(),
            self.fan.max_height(),
            self.fan.nr_of_heights(),
            self.fan.angles().to_vec(),
        )
        .map_err(invalid)?;
        if !self.probe_ray.is_finite() {
            return Err(CloakError::Config(
                "invalid settings: height and angle of the probe ray must be finite".into(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance.is_sign_negative() {
            return Err(CloakError::Config(
                "invalid settings: tolerance must be >=0.0 and finite".into(),
            ));
        }
        Ok(())
    }
    /// Read [`SimulationSettings`] from a YAML file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> CloakResult<Self> {
        info!("Reading simulation settings from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|e| {
            CloakError::Config(format!("cannot read file {} : {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }
    /// Serialize these [`SimulationSettings`] to a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml(&self) -> CloakResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CloakError::Config(format!("serialization of settings failed: {e}")))
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use std::io::Write;
    use uom::si::{angle::radian, length::millimeter};
    #[test]
    fn default() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.cloak, CloakConfig::default());
        assert_eq!(settings.trace, TraceConfig::default());
        assert_eq!(settings.fan, RayFan::default());
        assert_eq!(settings.tolerance, 1e-6);
        assert_eq!(settings.probe_ray.height(), millimeter!(10.0));
        assert_eq!(settings.probe_ray.angle(), radian!(0.01));
    }
    #[test]
    fn from_yaml_partial() {
        let settings = SimulationSettings::from_yaml("cloak:\n  f1: 0.3\n  f2: 0.1\n").unwrap();
        assert_abs_diff_eq!(
            settings.cloak.f1().get::<millimeter>(),
            300.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            settings.cloak.f2().get::<millimeter>(),
            100.0,
            epsilon = 1e-9
        );
        assert_eq!(settings.trace, TraceConfig::default());
        assert_eq!(settings.tolerance, DEFAULT_CLOAK_TOLERANCE);
        let settings = SimulationSettings::from_yaml("cloak:\n  f2: 0.05\n").unwrap();
        assert_eq!(settings.cloak.f1(), CloakConfig::default().f1());
        assert_abs_diff_eq!(
            settings.cloak.f2().get::<millimeter>(),
            50.0,
            epsilon = 1e-9
        );
    }
    #[test]
    fn from_yaml_full() {
        let yaml = "cloak:
  f1: 0.3
  f2: 0.1
trace:
  exit_length: 0.1
probe_ray:
  height: 0.005
  angle: -0.002
tolerance: 1.0e-3
fan:
  min_height: -0.01
  max_height: 0.01
  nr_of_heights: 5
  angles: [0.0, 0.001]
";
        let settings = SimulationSettings::from_yaml(yaml).unwrap();
        assert_abs_diff_eq!(
            settings.trace.exit_length().get::<millimeter>(),
            100.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            settings.probe_ray.height().get::<millimeter>(),
            5.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(settings.probe_ray.angle().get::<radian>(), -0.002);
        assert_abs_diff_eq!(settings.tolerance, 1e-3);
        assert_eq!(settings.fan.rays().unwrap().len(), 10);
    }
    #[test]
    fn from_yaml_invalid() {
        assert_matches!(
            SimulationSettings::from_yaml("cloak: [1, 2"),
            Err(CloakError::Config(_))
        );
        assert_matches!(
            SimulationSettings::from_yaml("tolerance: abc"),
            Err(CloakError::Config(_))
        );
    }
    #[test]
    fn from_yaml_invalid_values() {
        for yaml in [
            "cloak:\n  f1: 0.1\n  f2: 0.1\n",
            "cloak:\n  f1: 0.0\n",
            "cloak:\n  f1: 1.0e197\n  f2: 1.0e-203\n",
            "trace:\n  exit_length: -0.1\n",
            "trace:\n  exit_length: .inf\n",
            "probe_ray:\n  height: .nan\n  angle: 0.01\n",
            "probe_ray:\n  height: 0.01\n  angle: .inf\n",
            "tolerance: -1.0e-6\n",
            "tolerance: .nan\n",
            "fan:\n  nr_of_heights: 0\n",
            "fan:\n  angles: []\n",
            "fan:\n  min_height: .nan\n",
            "fan:\n  angles: [0.0, .nan]\n",
        ] {
            assert_matches!(
                SimulationSettings::from_yaml(yaml),
                Err(CloakError::Config(_)),
                "settings not rejected: {yaml}"
            );
        }
    }
    #[test]
    fn validate() {
        assert!(SimulationSettings::default().validate().is_ok());
        let settings = SimulationSettings {
            tolerance: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
        let settings = SimulationSettings {
            probe_ray: ParaxialRay::new(millimeter!(f64::NAN), radian!(0.0)),
            ..Default::default()
        };
        assert_matches!(settings.validate(), Err(CloakError::Config(_)));
    }
    #[test]
    fn from_file_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "trace:\n  exit_length: -0.1").unwrap();
        assert_matches!(
            SimulationSettings::from_file(file.path()),
            Err(CloakError::Config(_))
        );
    }
    #[test]
    fn yaml_round_trip() {
        let settings = SimulationSettings::default();
        let yaml = settings.to_yaml().unwrap();
        assert!(yaml.contains("cloak:"));
        assert!(yaml.contains("probe_ray:"));
        let parsed = SimulationSettings::from_yaml(&yaml).unwrap();
        assert_abs_diff_eq!(
            parsed.cloak.f1().get::<millimeter>(),
            200.0,
            epsilon = 1e-9
        );
        assert_eq!(parsed.fan.angles().len(), 3);
    }
    #[test]
    fn from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "cloak:\n  f1: 0.25\n  f2: 0.05").unwrap();
        let settings = SimulationSettings::from_file(file.path()).unwrap();
        assert_abs_diff_eq!(
            settings.cloak.f1().get::<millimeter>(),
            250.0,
            epsilon = 1e-9
        );
        assert_matches!(
            SimulationSettings::from_file(Path::new("./this_file_does_not_exist.yaml")),
            Err(CloakError::Config(_))
        );
    }
}
