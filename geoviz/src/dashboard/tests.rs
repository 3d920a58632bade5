use std::fmt::Write as _;

use super::*;
use crate::error::Error;
use crate::grid::Resolution;
use crate::observation::CoordRange;
use crate::render::CellSize;
use crate::test_utils::{test_output_path, write_fixture};

fn survey_csv() -> String {
    let mut csv = String::from("x,y,t_obs,station\n");
    for i in 0..12 {
        for j in 0..10 {
            let x = i as f64 * 50.0 + (j % 3) as f64 * 7.0;
            let y = j as f64 * 40.0 + (i % 4) as f64 * 5.0;
            let bump = 20.0 * (-((x - 250.0).powi(2) + (y - 200.0).powi(2)) / 8000.0).exp();
            let value = 45000.0 + 0.01 * x - 0.02 * y + bump;
            writeln!(csv, "{x},{y},{value:.4},S{i}_{j}").unwrap();
        }
    }
    csv
}

fn magnetic_config(name: &str) -> MagneticDashboardConfig {
    MagneticDashboardConfig {
        input: write_fixture(&format!("dashboard/{name}.csv"), &survey_csv()),
        separation: crate::separation::SeparationConfig::default()
            .with_resolution(Resolution::new(30, 20)),
        cell: CellSize::square(2),
        export: false,
        ..MagneticDashboardConfig::default()
    }
}

// ============================================================================
// Magnetic dashboard
// ============================================================================

#[test]
fn test_magnetic_defaults() {
    let config = MagneticDashboardConfig::default();
    assert_eq!(config.input, PathBuf::from("test_magnetic.csv"));
    assert_eq!(config.value_column, "t_obs");
    assert_eq!(config.colormap, Colormap::Jet);
    assert_eq!(config.output_path(), PathBuf::from(MAGNETIC_OUTPUT));
    assert!(config.validate().is_ok());
}

#[test]
fn test_magnetic_run_renders_three_panels() {
    let config = magnetic_config("three_panels");
    let view = run_magnetic(&config).unwrap();

    assert_eq!(view.observations, 120);
    assert_eq!(view.separation.observed.shape(), (20, 30));
    // Each panel: 60 px grid + gap + scale strip; panels separated by a double gap.
    let panel_width = 30 * 2 + PANEL_GAP + COLOR_SCALE_WIDTH;
    assert_eq!(view.image.width(), 3 * panel_width + 2 * PANEL_GAP * 2);
    assert_eq!(view.image.height(), 40);
    assert!(view.exported.is_none());
}

#[test]
fn test_magnetic_auto_scale_is_per_panel() {
    let view = run_magnetic(&magnetic_config("auto_scale")).unwrap();
    let observed = view.separation.observed_stats().unwrap();
    assert_eq!(view.clips[0], ClipRange::new(observed.min, observed.max));
    assert_ne!(view.clips[0], view.clips[2]);
}

#[test]
fn test_magnetic_manual_scale_defaults_to_value_range() {
    let config = MagneticDashboardConfig {
        scale: ScaleControl {
            kind: ScaleKind::Manual,
            vmin: None,
            vmax: Some(45010.0),
        },
        ..magnetic_config("manual_scale")
    };
    let view = run_magnetic(&config).unwrap();
    let (lo, _) = view.value_range.unwrap();
    for clip in view.clips {
        assert_eq!(clip, ClipRange::new(lo, 45010.0));
    }
}

#[test]
fn test_magnetic_range_filter() {
    let config = MagneticDashboardConfig {
        x_range: Some(CoordRange::new(100.0, 400.0)),
        ..magnetic_config("range_filter")
    };
    let view = run_magnetic(&config).unwrap();
    assert!(view.observations < 120);
    let extent = view.separation.sample_grid.extent();
    assert!(extent.x_min >= 100.0 && extent.x_max <= 400.0);
}

#[test]
fn test_magnetic_empty_range_fails() {
    let config = MagneticDashboardConfig {
        x_range: Some(CoordRange::new(900.0, 1000.0)),
        ..magnetic_config("empty_range")
    };
    let err = run_magnetic(&config).unwrap_err();
    assert!(err.is_data_validation());
}

#[test]
fn test_magnetic_missing_input() {
    let config = MagneticDashboardConfig {
        input: test_output_path("dashboard/does_not_exist.csv"),
        ..MagneticDashboardConfig::default()
    };
    assert!(matches!(run_magnetic(&config), Err(Error::MissingInput { .. })));
}

#[test]
fn test_magnetic_export_writes_png() {
    let output = test_output_path("dashboard/magnetic_anomaly.png");
    let config = MagneticDashboardConfig {
        export: true,
        output: Some(output.clone()),
        ..magnetic_config("export")
    };
    let view = run_magnetic(&config).unwrap();
    assert_eq!(view.exported.as_deref(), Some(output.as_path()));
    assert!(output.exists());
}

// ============================================================================
// Seismic dashboard
// ============================================================================

fn seismic_config() -> SeismicDashboardConfig {
    SeismicDashboardConfig {
        export: false,
        ..SeismicDashboardConfig::default()
    }
}

#[test]
fn test_seismic_default_output_name_follows_colormap() {
    let config = SeismicDashboardConfig {
        colormap: Colormap::RdBu,
        ..SeismicDashboardConfig::default()
    };
    assert_eq!(config.output_path(), PathBuf::from("seismic_plot_RdBu.png"));
}

#[test]
fn test_seismic_run_full_section() {
    let view = run_seismic(&seismic_config()).unwrap();
    assert_eq!(view.section_shape, (500, 100));
    assert_eq!(view.traces, TraceRange::new(0, 100));
    assert_eq!(
        view.image.dimensions(),
        (100 * 6 + PANEL_GAP + COLOR_SCALE_WIDTH, 500)
    );
}

#[test]
fn test_seismic_manual_scale_defaults_to_half_abs_max() {
    let config = SeismicDashboardConfig {
        scale: ScaleControl {
            kind: ScaleKind::Manual,
            vmin: None,
            vmax: None,
        },
        ..seismic_config()
    };
    let view = run_seismic(&config).unwrap();
    assert!(view.abs_max > 0.0);
    assert_eq!(view.clip, ClipRange::symmetric(view.abs_max, 0.5));
}

#[test]
fn test_seismic_trace_window_and_flip() {
    let upright = run_seismic(&SeismicDashboardConfig {
        trace_range: Some(TraceRange::new(10, 30)),
        scale: ScaleControl::manual(-1.0, 1.0),
        ..seismic_config()
    })
    .unwrap();
    let flipped = run_seismic(&SeismicDashboardConfig {
        trace_range: Some(TraceRange::new(10, 30)),
        scale: ScaleControl::manual(-1.0, 1.0),
        flip_time: true,
        ..seismic_config()
    })
    .unwrap();

    assert_eq!(upright.image.width(), 20 * 6 + PANEL_GAP + COLOR_SCALE_WIDTH);
    assert_eq!(upright.image.get_pixel(0, 0), flipped.image.get_pixel(0, 499));
    assert_eq!(upright.image.get_pixel(5, 123), flipped.image.get_pixel(5, 376));
}

#[test]
fn test_seismic_rejects_out_of_bounds_traces() {
    let config = SeismicDashboardConfig {
        trace_range: Some(TraceRange::new(50, 150)),
        ..seismic_config()
    };
    assert!(matches!(run_seismic(&config), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_seismic_rejects_inverted_manual_bounds() {
    let config = SeismicDashboardConfig {
        scale: ScaleControl::manual(1.0, -1.0),
        ..seismic_config()
    };
    assert!(config.validate().is_err());
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn test_load_yaml_config_overrides_defaults() {
    let path = write_fixture(
        "dashboard/seismic.yaml",
        "colormap: gray\nflip_time: true\ntrace_range:\n  start: 5\n  end: 25\nscale:\n  kind: manual\n  vmin: -0.2\n  vmax: 0.2\nsection:\n  seed: 7\n",
    );
    let config: SeismicDashboardConfig = load_config(&path).unwrap();

    assert_eq!(config.colormap, Colormap::Gray);
    assert!(config.flip_time);
    assert_eq!(config.trace_range, Some(TraceRange::new(5, 25)));
    assert_eq!(config.scale, ScaleControl::manual(-0.2, 0.2));
    assert_eq!(config.section.seed, 7);
    assert_eq!(config.section.samples, 500);
}

#[test]
fn test_load_json_config() {
    let path = write_fixture(
        "dashboard/magnetic.json",
        r#"{ "colormap": "RdBu_r", "x_range": { "min": 0.0, "max": 250.0 }, "separation": { "sigma": 1.5 } }"#,
    );
    let config: MagneticDashboardConfig = load_config(&path).unwrap();

    assert_eq!(config.colormap, Colormap::RdBuR);
    assert_eq!(config.x_range, Some(CoordRange::new(0.0, 250.0)));
    assert_eq!(config.separation.sigma, 1.5);
    assert_eq!(config.separation.resolution, Resolution::default());
}

#[test]
fn test_load_config_errors() {
    let bad_ext = write_fixture("dashboard/config.toml", "colormap = 'jet'");
    assert!(matches!(
        load_config::<MagneticDashboardConfig>(&bad_ext),
        Err(Error::ConfigFormat(_))
    ));

    let bad_yaml = write_fixture("dashboard/broken.yaml", "colormap: [");
    assert!(matches!(
        load_config::<MagneticDashboardConfig>(&bad_yaml),
        Err(Error::Config { .. })
    ));

    let missing = test_output_path("dashboard/absent.yaml");
    assert!(matches!(
        load_config::<MagneticDashboardConfig>(&missing),
        Err(Error::MissingInput { .. })
    ));
}
