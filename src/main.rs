use clap::Parser;
use log::info;
use rochester_cloak::{
    console::{show_intro, Args, PartialArgs},
    error::CloakResult,
    plottable::RayFanPlot,
    report::CloakReport,
    tracer::trace_ray_fan,
};

fn main() -> CloakResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    //parse CLI arguments
    let cloak_args = Args::try_from(PartialArgs::parse())?;
    show_intro();

    //numeric analysis of the lens stack
    let report = CloakReport::new(&cloak_args.settings)?;
    println!("{report}");

    //trace the ray fan and plot the trajectories
    if let Some(plot_path) = &cloak_args.plot_path {
        let settings = &cloak_args.settings;
        let paths = trace_ray_fan(&settings.fan, &settings.cloak, &settings.trace)?;
        info!("Traced {} rays through the cloak", paths.len());
        RayFanPlot::new(&settings.cloak, &paths).to_plot(plot_path)?;
    }
    Ok(())
}
