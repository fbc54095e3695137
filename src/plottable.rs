#![warn(missing_docs)]
//! Plotting of ray trajectories through the cloak.
use std::path::Path;

use itertools::izip;
use log::{info, warn};
use plotters::{
    backend::DrawingBackend,
    chart::{ChartBuilder, SeriesLabelPosition},
    coord::Shift,
    element::{Rectangle, Text},
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
    series::{DashedLineSeries, LineSeries},
    style::{Color, IntoFont, RGBAColor, RGBColor, BLACK, WHITE},
};
use strum::{Display, EnumIter, IntoEnumIterator};
use uom::si::length::millimeter;

use crate::{
    cloak::CloakConfig,
    error::{CloakError, CloakResult},
    tracer::RayPath,
    utils::usize_to_f64,
};

/// Enum to describe which type of plotting backend should be used
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, Display)]
pub enum PltBackEnd {
    /// `BitmapBackend`. Used to create .png, .bmp, .jpg
    #[default]
    BMP,
    /// `SVGBackend`. Used to create .svg
    SVG,
}
impl PltBackEnd {
    /// Returns the file extensions supported by this backend.
    #[must_use]
    pub const fn file_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::BMP => &["png", "bmp", "jpg", "jpeg"],
            Self::SVG => &["svg"],
        }
    }
    /// Determine the backend from the extension of the given file path.
    ///
    /// # Errors
    ///
    /// This function will return an error if the path has no extension or the extension is not supported by any backend.
    pub fn from_path(path: &Path) -> CloakResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        Self::iter()
            .find(|backend| backend.file_extensions().iter().any(|e| *e == ext))
            .ok_or_else(|| {
                let valid = Self::iter()
                    .flat_map(|b| b.file_extensions().iter().copied())
                    .collect::<Vec<_>>()
                    .join(", ");
                CloakError::Plot(format!(
                    "unsupported plot file {}. Valid extensions are: {valid}",
                    path.display()
                ))
            })
    }
}

const Y_LIMIT_MM: f64 = 30.0;
const X_MARGIN_LEFT_MM: f64 = 10.0;
const X_MARGIN_RIGHT_MM: f64 = 60.0;
const LENS_LABELS: [&str; 4] = ["L1 (f1)", "L2 (f2)", "L3 (f2)", "L4 (f1)"];

/// Plot of ray trajectories through a cloak.
///
/// The plot shows the lens planes (dashed lines), the cloaked region between the inner lenses (shaded), the optical
/// axis and all ray paths. The rays are colored by their start height.
pub struct RayFanPlot<'a> {
    cloak: &'a CloakConfig,
    paths: &'a [RayPath],
    plot_size: (u32, u32),
}
impl<'a> RayFanPlot<'a> {
    /// Creates a new [`RayFanPlot`] of the given ray paths.
    #[must_use]
    pub const fn new(cloak: &'a CloakConfig, paths: &'a [RayPath]) -> Self {
        Self {
            cloak,
            paths,
            plot_size: (1500, 900),
        }
    }
    /// Sets the size of the plot in pixels (width, height).
    pub fn set_plot_size(&mut self, plot_size: (u32, u32)) {
        self.plot_size = plot_size;
    }
    /// Returns the size of the plot in pixels (width, height).
    #[must_use]
    pub const fn plot_size(&self) -> (u32, u32) {
        self.plot_size
    }
    /// Returns the axial plot range in mm.
    ///
    /// # Errors
    ///
    /// This function will return an error if the total length of the cloak cannot be calculated.
    pub fn x_range(&self) -> CloakResult<(f64, f64)> {
        let total_length = self.cloak.total_length()?.get::<millimeter>();
        Ok((-X_MARGIN_LEFT_MM, total_length + X_MARGIN_RIGHT_MM))
    }
    /// Returns the line colors of the ray paths.
    ///
    /// The colors are taken from the viridis gradient (range 0.2 .. 0.8) depending on the start height of the ray.
    #[must_use]
    pub fn ray_colors(&self) -> Vec<RGBAColor> {
        let heights = self
            .paths
            .iter()
            .map(|p| p.start_ray().height().get::<millimeter>())
            .collect::<Vec<f64>>();
        let min = heights.iter().copied().fold(f64::INFINITY, f64::min);
        let max = heights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        heights
            .iter()
            .map(|h| {
                let grad_val = if range > 0.0 {
                    0.6f64.mul_add((h - min) / range, 0.2)
                } else {
                    0.5
                };
                let color = colorous::VIRIDIS.eval_continuous(grad_val);
                RGBAColor(color.r, color.g, color.b, 0.8)
            })
            .collect()
    }
    /// Write the plot to the given file.
    ///
    /// The backend is chosen by the file extension (see [`PltBackEnd::from_path`]). If there are no ray paths, no file
    /// is written and a warning is logged.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the file extension is not supported.
    ///   - the total length of the cloak cannot be calculated.
    ///   - the plot cannot be drawn or written.
    pub fn to_plot(&self, f_path: &Path) -> CloakResult<()> {
        let backend = PltBackEnd::from_path(f_path)?;
        if self.paths.is_empty() {
            warn!("No ray paths defined! Cannot create plot!");
            return Ok(());
        }
        match backend {
            PltBackEnd::BMP => {
                let root = BitMapBackend::new(f_path, self.plot_size).into_drawing_area();
                self.draw(&root)?;
            }
            PltBackEnd::SVG => {
                let root = SVGBackend::new(f_path, self.plot_size).into_drawing_area();
                self.draw(&root)?;
            }
        }
        info!("Figure saved as '{}'", f_path.display());
        Ok(())
    }
    fn draw<B: DrawingBackend>(&self, root: &DrawingArea<B, Shift>) -> CloakResult<()> {
        let plot_err = |e: &dyn std::fmt::Display| CloakError::Plot(format!("{e}"));
        let (x_min, x_max) = self.x_range()?;
        let lens_positions = self
            .cloak
            .lens_positions()?
            .map(|p| p.get::<millimeter>());
        let t1 = self.cloak.t1().get::<millimeter>();
        let t2 = self.cloak.t2()?.get::<millimeter>();

        root.fill(&WHITE).map_err(|e| plot_err(&e))?;
        let mut chart = ChartBuilder::on(root)
            .caption(
                "Ray trajectories through the Rochester Cloak",
                ("sans-serif", 30).into_font(),
            )
            .margin(30)
            .x_label_area_size(65)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, -Y_LIMIT_MM..Y_LIMIT_MM)
            .map_err(|e| plot_err(&e))?;
        chart
            .configure_mesh()
            .x_desc("Axial position (mm)")
            .y_desc("Height (mm)")
            .label_style(("sans-serif", 20).into_font())
            .draw()
            .map_err(|e| plot_err(&e))?;

        let region_color = RGBColor(211, 211, 211).mix(0.3);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(t1, -Y_LIMIT_MM), (t1 + t2, Y_LIMIT_MM)],
                region_color.filled(),
            )))
            .map_err(|e| plot_err(&e))?
            .label("Cloaked region (approx.)")
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 20, y + 6)], region_color.filled())
            });
        // optical axis
        chart
            .draw_series(LineSeries::new(vec![(x_min, 0.0), (x_max, 0.0)], &BLACK))
            .map_err(|e| plot_err(&e))?;
        for (x, label) in lens_positions.iter().zip(LENS_LABELS) {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(*x, -Y_LIMIT_MM), (*x, Y_LIMIT_MM)],
                    10,
                    5,
                    BLACK.mix(0.7).stroke_width(1),
                ))
                .map_err(|e| plot_err(&e))?;
            chart
                .draw_series(std::iter::once(Text::new(
                    label,
                    (*x, 0.95 * Y_LIMIT_MM),
                    ("sans-serif", 16).into_font(),
                )))
                .map_err(|e| plot_err(&e))?;
        }
        for (path, color) in self.paths.iter().zip(self.ray_colors()) {
            let samples = path.samples_in_mm();
            chart
                .draw_series(LineSeries::new(
                    izip!(samples.column(0).iter(), samples.column(1).iter())
                        .map(|xy| (*xy.0, *xy.1)),
                    color.stroke_width(2),
                ))
                .map_err(|e| plot_err(&e))?;
        }
        let parameters = [
            format!(
                "f1 = {:.0} mm, f2 = {:.0} mm",
                self.cloak.f1().get::<millimeter>(),
                self.cloak.f2().get::<millimeter>()
            ),
            format!("t1 = {t1:.0} mm, t2 = {t2:.0} mm"),
            format!("L = {:.0} mm", lens_positions[3]),
        ];
        let line_height = 0.08 * Y_LIMIT_MM;
        for (idx, text) in parameters.iter().enumerate() {
            let y = usize_to_f64(parameters.len() - idx).mul_add(line_height, -Y_LIMIT_MM);
            chart
                .draw_series(std::iter::once(Text::new(
                    text.clone(),
                    (x_min + 0.01 * (x_max - x_min), y),
                    ("sans-serif", 16).into_font(),
                )))
                .map_err(|e| plot_err(&e))?;
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .legend_area_size(25)
            .draw()
            .map_err(|e| plot_err(&e))?;
        root.present().map_err(|e| plot_err(&e))?;
        Ok(())
    }
}
