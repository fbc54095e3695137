//! Handling the command line interface
//!
//! This module handles the command line parsing as well as basic information (e.g. help dialog, version information, etc.).
//! Settings are merged in the following order: a simulation file given by `--config` (or the defaults if none is given)
//! is read first, single values given on the command line override the corresponding entries.
use std::path::{Path, PathBuf};

use clap::{builder::Str, Parser};

use crate::{
    cloak::CloakConfig,
    error::{CloakError, CloakResult},
    get_version, millimeter,
    plottable::PltBackEnd,
    radian,
    ray::ParaxialRay,
    settings::SimulationSettings,
};
use uom::si::{angle::radian, length::millimeter};

/// Validated command line arguments of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    /// merged settings of the simulation run
    pub settings: SimulationSettings,
    /// file path of the ray trajectory plot. No plot is created if `None`
    pub plot_path: Option<PathBuf>,
}

/// Raw command line arguments as parsed by `clap`. All of them are optional.
///
/// They are converted into the validated [`Args`] using `Args::try_from`.
#[derive(Parser, Debug, Default)]
#[command(author, version = Str::from(&get_version()), about, long_about = None)]
pub struct PartialArgs {
    /// filepath of a simulation settings file (.yaml / .yml)
    #[arg(short, long)]
    config: Option<String>,

    /// focal length of the outer lenses L1 and L4 in mm
    #[arg(long)]
    f1: Option<f64>,

    /// focal length of the inner lenses L2 and L3 in mm
    #[arg(long)]
    f2: Option<f64>,

    /// height of the probe ray in mm
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,

    /// angle of the probe ray in rad
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// tolerance used for checking the cloak conditions
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// free propagation behind the last lens in mm used for the ray plot
    #[arg(short, long)]
    exit_length: Option<f64>,

    /// filepath of the ray trajectory plot (.png, .bmp, .jpg or .svg)
    #[arg(short, long)]
    plot: Option<String>,
}

/// Checks if the passed file path is a valid simulation settings file.
fn config_path_is_valid(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yaml" || e == "yml")
}

fn eval_config_input(config: Option<&str>) -> CloakResult<SimulationSettings> {
    config.map_or_else(
        || Ok(SimulationSettings::default()),
        |config| {
            let path = Path::new(config);
            if config_path_is_valid(path) {
                SimulationSettings::from_file(path)
            } else {
                Err(CloakError::Console(format!(
                    "invalid settings file {config}. The file must exist and have the extension .yaml or .yml"
                )))
            }
        },
    )
}

fn eval_plot_input(plot: Option<&str>) -> CloakResult<Option<PathBuf>> {
    plot.map(|p| {
        let path = PathBuf::from(p);
        PltBackEnd::from_path(&path)
            .map(|_| path)
            .map_err(|e| CloakError::Console(format!("{e}")))
    })
    .transpose()
}

impl TryFrom<PartialArgs> for Args {
    type Error = CloakError;

    fn try_from(part_args: PartialArgs) -> CloakResult<Self> {
        let mut settings = eval_config_input(part_args.config.as_deref())?;

        if part_args.f1.is_some() || part_args.f2.is_some() {
            let f1 = part_args
                .f1
                .unwrap_or_else(|| settings.cloak.f1().get::<millimeter>());
            let f2 = part_args
                .f2
                .unwrap_or_else(|| settings.cloak.f2().get::<millimeter>());
            settings.cloak = CloakConfig::new(millimeter!(f1), millimeter!(f2))?;
        }
        if part_args.height.is_some() || part_args.angle.is_some() {
            let height = part_args
                .height
                .unwrap_or_else(|| settings.probe_ray.height().get::<millimeter>());
            let angle = part_args
                .angle
                .unwrap_or_else(|| settings.probe_ray.angle().get::<radian>());
            if !height.is_finite() || !angle.is_finite() {
                return Err(CloakError::Console(
                    "height and angle of the probe ray must be finite".into(),
                ));
            }
            settings.probe_ray = ParaxialRay::new(millimeter!(height), radian!(angle));
        }
        if let Some(tolerance) = part_args.tolerance {
            if !tolerance.is_finite() || tolerance.is_sign_negative() {
                return Err(CloakError::Console(
                    "tolerance must be >=0.0 and finite".into(),
                ));
            }
            settings.tolerance = tolerance;
        }
        if let Some(exit_length) = part_args.exit_length {
            settings.trace.set_exit_length(millimeter!(exit_length))?;
        }
        let plot_path = eval_plot_input(part_args.plot.as_deref())?;
        Ok(Self {
            settings,
            plot_path,
        })
    }
}

fn create_intro() -> String {
    format!(
        "{: ^79}\n{: ^79}\n",
        "Rochester Cloak", "Paraxial ABCD-matrix simulation of a four-lens ray-optics cloak"
    )
}

/// Show the program name and the version information.
pub fn show_intro() {
    let intro = create_intro();
    let version_str = format!("{: ^79}\n", "version ".to_owned() + &get_version());
    println!("{intro}{version_str}");
}
