//! `geoviz` command-line dashboards.

mod args;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use strum::IntoEnumIterator;

use args::{Cli, Command, Dashboard, MagneticArgs, SeismicArgs};
use geoviz::dashboard::{
    load_config, run_magnetic, run_seismic, MagneticDashboardConfig, SeismicDashboardConfig,
};
use geoviz::render::Colormap;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match common::log_setup::setup_logging(&cli.log_level, cli.log_dir.as_deref()) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("Failed to initialize logging: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Magnetic(args) => magnetic(&args),
        Command::Seismic(args) => seismic(&args),
        Command::Colormaps => {
            for colormap in Colormap::iter() {
                println!("{colormap}");
            }
            Ok(())
        }
        Command::Defaults { dashboard, format } => {
            let text = match dashboard {
                Dashboard::Magnetic => {
                    common::serialize(&MagneticDashboardConfig::default(), format.into())
                }
                Dashboard::Seismic => {
                    common::serialize(&SeismicDashboardConfig::default(), format.into())
                }
            }
            .context("Failed to serialize default configuration")?;
            print!("{text}");
            Ok(())
        }
    }
}

fn magnetic(args: &MagneticArgs) -> anyhow::Result<()> {
    let mut config: MagneticDashboardConfig = match &args.display.config {
        Some(path) => load_config(path)?,
        None => MagneticDashboardConfig::default(),
    };
    args.apply(&mut config);

    let view = run_magnetic(&config)
        .with_context(|| format!("Magnetic dashboard failed for '{}'", config.input.display()))?;

    let sep = &view.separation;
    log::info!(
        "{} observations gridded to {}x{}; {} cells outside the data hull filled with {:.3}",
        view.observations,
        sep.sample_grid.cols(),
        sep.sample_grid.rows(),
        sep.filled_cells,
        sep.fill_value
    );
    for (name, clip) in ["observed", "regional", "residual"].iter().zip(view.clips) {
        log::info!("{name} color scale: {:.3} .. {:.3}", clip.vmin, clip.vmax);
    }
    if let Some(path) = &view.exported {
        println!("{}", path.display());
    }
    Ok(())
}

fn seismic(args: &SeismicArgs) -> anyhow::Result<()> {
    let mut config: SeismicDashboardConfig = match &args.display.config {
        Some(path) => load_config(path)?,
        None => SeismicDashboardConfig::default(),
    };
    args.apply(&mut config);

    let view = run_seismic(&config).context("Seismic dashboard failed")?;

    log::info!(
        "Section {}x{} (samples x traces), |amplitude| <= {:.3}, color scale {:.3} .. {:.3}",
        view.section_shape.0,
        view.section_shape.1,
        view.abs_max,
        view.clip.vmin,
        view.clip.vmax
    );
    if let Some(path) = &view.exported {
        println!("{}", path.display());
    }
    Ok(())
}
