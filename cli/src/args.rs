use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use geoviz::dashboard::{
    MagneticDashboardConfig, ScaleControl, ScaleKind, SeismicDashboardConfig,
};
use geoviz::render::{CellSize, Colormap};
use geoviz::seismic::TraceRange;
use geoviz::separation::BoundaryMode;
use geoviz::{CoordRange, Resolution};

#[derive(Parser, Debug)]
#[command(name = "geoviz", version, about = "Magnetic anomaly and seismic section dashboards")]
pub struct Cli {
    /// Log level spec, e.g. `info` or `geoviz=debug`; RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Also write rotating log files into this directory.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grid a magnetic survey and plot observed, regional and residual fields.
    Magnetic(MagneticArgs),
    /// Generate and plot a synthetic seismic section.
    Seismic(SeismicArgs),
    /// List the available colormaps.
    Colormaps,
    /// Print a dashboard's default configuration.
    Defaults {
        #[arg(value_enum)]
        dashboard: Dashboard,
        #[arg(long, value_enum, default_value_t = ConfigFormat::Yaml)]
        format: ConfigFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Dashboard {
    Magnetic,
    Seismic,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl From<ConfigFormat> for common::FileFormat {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Yaml => common::FileFormat::Yaml,
            ConfigFormat::Json => common::FileFormat::Json,
        }
    }
}

/// Display options shared by both dashboards.
#[derive(Args, Debug, Default)]
pub struct DisplayArgs {
    /// YAML or JSON file with the dashboard configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub colormap: Option<Colormap>,

    /// `auto` follows the data, `manual` clips to --vmin/--vmax.
    #[arg(long)]
    pub scale: Option<ScaleKind>,

    /// Lower clip bound; implies manual scale.
    #[arg(long, allow_negative_numbers = true)]
    pub vmin: Option<f64>,

    /// Upper clip bound; implies manual scale.
    #[arg(long, allow_negative_numbers = true)]
    pub vmax: Option<f64>,

    /// Output PNG path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Render without writing the PNG.
    #[arg(long)]
    pub no_export: bool,
}

impl DisplayArgs {
    fn apply_scale(&self, scale: &mut ScaleControl) {
        if let Some(kind) = self.scale {
            scale.kind = kind;
        }
        if self.vmin.is_some() || self.vmax.is_some() {
            scale.kind = ScaleKind::Manual;
        }
        if self.vmin.is_some() {
            scale.vmin = self.vmin;
        }
        if self.vmax.is_some() {
            scale.vmax = self.vmax;
        }
    }
}

#[derive(Args, Debug)]
pub struct MagneticArgs {
    #[command(flatten)]
    pub display: DisplayArgs,

    /// Delimited survey file with x, y and value columns.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Column holding the observed field.
    #[arg(long)]
    pub column: Option<String>,

    /// Keep observations with x >= X_MIN.
    #[arg(long, allow_negative_numbers = true, requires = "x_max")]
    pub x_min: Option<f64>,

    /// Keep observations with x <= X_MAX.
    #[arg(long, allow_negative_numbers = true, requires = "x_min")]
    pub x_max: Option<f64>,

    /// Grid nodes per axis.
    #[arg(long)]
    pub resolution: Option<usize>,

    /// Gaussian scale of the regional filter, in grid cells.
    #[arg(long)]
    pub sigma: Option<f64>,

    #[arg(long)]
    pub boundary: Option<BoundaryMode>,

    /// Pixels per grid cell.
    #[arg(long)]
    pub cell_px: Option<u32>,
}

impl MagneticArgs {
    /// Overrides `config` with every flag that was given.
    pub fn apply(&self, config: &mut MagneticDashboardConfig) {
        let display = &self.display;
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(column) = &self.column {
            config.value_column = column.clone();
        }
        if let Some(colormap) = display.colormap {
            config.colormap = colormap;
        }
        display.apply_scale(&mut config.scale);
        if let (Some(min), Some(max)) = (self.x_min, self.x_max) {
            config.x_range = Some(CoordRange::new(min, max));
        }
        if let Some(n) = self.resolution {
            config.separation.resolution = Resolution::square(n);
        }
        if let Some(sigma) = self.sigma {
            config.separation.sigma = sigma;
        }
        if let Some(boundary) = self.boundary {
            config.separation.boundary = boundary;
        }
        if let Some(px) = self.cell_px {
            config.cell = CellSize::square(px);
        }
        if let Some(output) = &display.output {
            config.output = Some(output.clone());
        }
        if display.no_export {
            config.export = false;
        }
    }
}

#[derive(Args, Debug)]
pub struct SeismicArgs {
    #[command(flatten)]
    pub display: DisplayArgs,

    /// First trace shown (inclusive).
    #[arg(long)]
    pub trace_start: Option<usize>,

    /// Last trace shown (exclusive).
    #[arg(long)]
    pub trace_end: Option<usize>,

    /// Draw time increasing upwards.
    #[arg(long)]
    pub flip_time: bool,

    /// Random seed of the synthetic reflectivity.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SeismicArgs {
    pub fn apply(&self, config: &mut SeismicDashboardConfig) {
        let display = &self.display;
        if let Some(seed) = self.seed {
            config.section.seed = seed;
        }
        if let Some(colormap) = display.colormap {
            config.colormap = colormap;
        }
        display.apply_scale(&mut config.scale);
        if self.trace_start.is_some() || self.trace_end.is_some() {
            let current = config.traces();
            config.trace_range = Some(TraceRange::new(
                self.trace_start.unwrap_or(current.start),
                self.trace_end.unwrap_or(current.end),
            ));
        }
        if self.flip_time {
            config.flip_time = true;
        }
        if let Some(output) = &display.output {
            config.output = Some(output.clone());
        }
        if display.no_export {
            config.export = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn magnetic_flags_override_config() {
        let cli = Cli::parse_from([
            "geoviz", "magnetic", "--input", "survey.csv", "--colormap", "viridis", "--vmin",
            "-5", "--vmax", "5", "--x-min", "10", "--x-max", "90", "--sigma", "2",
            "--boundary", "nearest", "--no-export",
        ]);
        let Command::Magnetic(args) = cli.command else {
            panic!("expected magnetic subcommand");
        };

        let mut config = MagneticDashboardConfig::default();
        args.apply(&mut config);

        assert_eq!(config.input, PathBuf::from("survey.csv"));
        assert_eq!(config.colormap, Colormap::Viridis);
        assert_eq!(config.scale, ScaleControl::manual(-5.0, 5.0));
        assert_eq!(config.x_range, Some(CoordRange::new(10.0, 90.0)));
        assert_eq!(config.separation.sigma, 2.0);
        assert_eq!(config.separation.boundary, BoundaryMode::Nearest);
        assert!(!config.export);
    }

    #[test]
    fn x_range_needs_both_bounds() {
        assert!(Cli::try_parse_from(["geoviz", "magnetic", "--x-min", "1"]).is_err());
    }

    #[test]
    fn seismic_trace_bounds_fill_from_section() {
        let cli = Cli::parse_from(["geoviz", "seismic", "--trace-start", "20", "--flip-time"]);
        let Command::Seismic(args) = cli.command else {
            panic!("expected seismic subcommand");
        };

        let mut config = SeismicDashboardConfig::default();
        args.apply(&mut config);

        assert_eq!(config.trace_range, Some(TraceRange::new(20, 100)));
        assert!(config.flip_time);
        assert_eq!(config.scale.kind, ScaleKind::Auto);
    }

    #[test]
    fn global_log_flags_follow_subcommand() {
        let cli = Cli::parse_from(["geoviz", "colormaps", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
        assert!(cli.log_dir.is_none());
    }
}
