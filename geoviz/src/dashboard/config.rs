//! Dashboard configuration.
//!
//! Each dashboard takes one immutable config, built fresh for every run from
//! defaults, an optional YAML/JSON file and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use common::FileFormat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};
use crate::observation::{CoordRange, DEFAULT_VALUE_COLUMN};
use crate::render::{CellSize, ClipRange, Colormap, ScaleMode};
use crate::seismic::{SectionConfig, TraceRange};
use crate::separation::SeparationConfig;

/// Default export file of the magnetic dashboard.
pub const MAGNETIC_OUTPUT: &str = "magnetic_anomaly.png";

/// Fraction of the absolute maximum amplitude used for the default seismic clip.
pub const SEISMIC_CLIP_FRACTION: f64 = 0.5;

// ============================================================================
// Scale control
// ============================================================================

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScaleKind {
    #[default]
    Auto,
    Manual,
}

/// Auto/manual scale choice with optional manual bounds.
///
/// A missing manual bound takes the dashboard's default for that bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleControl {
    pub kind: ScaleKind,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
}

impl ScaleControl {
    pub const fn auto() -> Self {
        Self {
            kind: ScaleKind::Auto,
            vmin: None,
            vmax: None,
        }
    }

    pub const fn manual(vmin: f64, vmax: f64) -> Self {
        Self {
            kind: ScaleKind::Manual,
            vmin: Some(vmin),
            vmax: Some(vmax),
        }
    }

    /// Concrete scale mode, filling missing manual bounds from `default`.
    pub fn resolve(&self, default: ClipRange) -> Result<ScaleMode> {
        let mode = match self.kind {
            ScaleKind::Auto => ScaleMode::Auto,
            ScaleKind::Manual => ScaleMode::Manual {
                vmin: self.vmin.unwrap_or(default.vmin),
                vmax: self.vmax.unwrap_or(default.vmax),
            },
        };
        mode.validate()?;
        Ok(mode)
    }

    fn validate(&self) -> Result<()> {
        if let (Some(vmin), Some(vmax)) = (self.vmin, self.vmax) {
            ScaleMode::Manual { vmin, vmax }.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Magnetic dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticDashboardConfig {
    pub input: PathBuf,
    pub value_column: String,
    pub colormap: Colormap,
    pub scale: ScaleControl,
    /// Inclusive x filter; `None` keeps every observation.
    pub x_range: Option<CoordRange>,
    pub separation: SeparationConfig,
    pub cell: CellSize,
    pub output: Option<PathBuf>,
    pub export: bool,
}

impl Default for MagneticDashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("test_magnetic.csv"),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            colormap: Colormap::Jet,
            scale: ScaleControl::auto(),
            x_range: None,
            separation: SeparationConfig::default(),
            cell: CellSize::square(4),
            output: None,
            export: true,
        }
    }
}

impl MagneticDashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.value_column.trim().is_empty() {
            return Err(Error::InvalidConfig("value column must not be empty".to_string()));
        }
        self.scale.validate()?;
        self.separation.validate()?;
        self.cell.validate()?;
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(MAGNETIC_OUTPUT))
    }
}

// ============================================================================
// Seismic dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicDashboardConfig {
    pub section: SectionConfig,
    pub colormap: Colormap,
    pub scale: ScaleControl,
    /// Traces to display; `None` shows the whole section.
    pub trace_range: Option<TraceRange>,
    /// Draw time increasing upwards instead of downwards.
    pub flip_time: bool,
    pub cell: CellSize,
    pub output: Option<PathBuf>,
    pub export: bool,
}

impl Default for SeismicDashboardConfig {
    fn default() -> Self {
        Self {
            section: SectionConfig::default(),
            colormap: Colormap::Seismic,
            scale: ScaleControl::auto(),
            trace_range: None,
            flip_time: false,
            cell: CellSize::new(6, 1),
            output: None,
            export: true,
        }
    }
}

impl SeismicDashboardConfig {
    pub fn validate(&self) -> Result<()> {
        self.section.validate()?;
        if let Some(range) = self.trace_range {
            range.validate(self.section.traces)?;
        }
        self.scale.validate()?;
        self.cell.validate()?;
        Ok(())
    }

    pub fn traces(&self) -> TraceRange {
        self.trace_range
            .unwrap_or(TraceRange::full(self.section.traces))
    }

    /// `seismic_plot_<colormap>.png` unless an output was given.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("seismic_plot_{}.png", self.colormap)))
    }
}

/// Reads a YAML or JSON config, chosen by file extension.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = FileFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    let config = common::deserialize(&text, format).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded configuration from '{}'", path.display());
    Ok(config)
}
