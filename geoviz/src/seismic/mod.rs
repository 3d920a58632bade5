//! Synthetic seismic sections: sparse reflectivity convolved with a Ricker wavelet.

#[cfg(test)]
mod tests;

use std::f64::consts::PI;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Grid2;

/// Parameters of the synthetic section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    pub traces: usize,
    /// Time samples per trace.
    pub samples: usize,
    /// Dominant wavelet frequency in Hz.
    pub dominant_frequency: f64,
    pub wavelet_points: usize,
    /// Wavelet time axis runs from `-wavelet_half_span` to `wavelet_half_span` seconds.
    pub wavelet_half_span: f64,
    pub reflectors_per_trace: usize,
    pub seed: u64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            traces: 100,
            samples: 500,
            dominant_frequency: 25.0,
            wavelet_points: 100,
            wavelet_half_span: 0.1,
            reflectors_per_trace: 5,
            seed: 42,
        }
    }
}

impl SectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.traces == 0 || self.samples == 0 {
            return Err(Error::InvalidConfig(format!(
                "section must have at least one trace and one sample, got {}x{}",
                self.samples, self.traces
            )));
        }
        if self.wavelet_points < 2 {
            return Err(Error::InvalidConfig(format!(
                "wavelet needs at least 2 points, got {}",
                self.wavelet_points
            )));
        }
        if !(self.dominant_frequency.is_finite() && self.dominant_frequency > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dominant frequency must be positive, got {}",
                self.dominant_frequency
            )));
        }
        if !(self.wavelet_half_span.is_finite() && self.wavelet_half_span > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "wavelet half span must be positive, got {}",
                self.wavelet_half_span
            )));
        }
        Ok(())
    }
}

/// Ricker wavelet `(1 - 2π²f²t²)·exp(-π²f²t²)` on `points` samples spread
/// evenly over `[-half_span, half_span]`.
pub fn ricker_wavelet(frequency: f64, points: usize, half_span: f64) -> Vec<f64> {
    let a = (PI * frequency).powi(2);
    let step = if points > 1 {
        2.0 * half_span / (points - 1) as f64
    } else {
        0.0
    };
    (0..points)
        .map(|i| {
            let t = -half_span + step * i as f64;
            let t2 = t * t;
            (1.0 - 2.0 * a * t2) * (-a * t2).exp()
        })
        .collect()
}

/// One trace of zeros with `count` random spikes of standard-normal amplitude.
///
/// All indices are drawn before the amplitudes; a repeated index keeps the
/// later amplitude.
pub fn sparse_reflectivity<R: Rng>(rng: &mut R, samples: usize, count: usize) -> Vec<f64> {
    let mut trace = vec![0.0; samples];
    if samples == 0 {
        return trace;
    }
    let indices: Vec<usize> = (0..count).map(|_| rng.random_range(0..samples)).collect();
    for index in indices {
        trace[index] = rng.sample(StandardNormal);
    }
    trace
}

/// Discrete convolution trimmed to the longer input's length, centered
/// on the full result.
pub fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }

    let full_len = signal.len() + kernel.len() - 1;
    let out_len = signal.len().max(kernel.len());
    let shorter = signal.len().min(kernel.len());
    let offset = (shorter - 1) - shorter / 2;
    debug_assert!(offset + out_len <= full_len);

    (offset..offset + out_len)
        .map(|n| {
            let k_lo = n.saturating_sub(signal.len() - 1);
            let k_hi = n.min(kernel.len() - 1);
            (k_lo..=k_hi).map(|k| kernel[k] * signal[n - k]).sum()
        })
        .collect()
}

/// Builds a `samples x traces` section (rows are time, columns are traces).
pub fn generate_section(config: &SectionConfig) -> Result<Grid2<f64>> {
    config.validate()?;

    let wavelet = ricker_wavelet(
        config.dominant_frequency,
        config.wavelet_points,
        config.wavelet_half_span,
    );
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut section = Grid2::new_filled(config.traces, config.samples, 0.0);
    for col in 0..config.traces {
        let reflectivity =
            sparse_reflectivity(&mut rng, config.samples, config.reflectors_per_trace);
        let trace = convolve_same(&reflectivity, &wavelet);
        // A wavelet longer than the trace widens "same" output; keep the centre.
        let skip = (trace.len() - config.samples) / 2;
        for (row, &v) in trace[skip..skip + config.samples].iter().enumerate() {
            section[(col, row)] = v;
        }
    }

    log::debug!(
        "Generated seismic section: {} samples x {} traces (seed {})",
        config.samples,
        config.traces,
        config.seed
    );

    Ok(section)
}

/// Half-open range of trace numbers to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRange {
    pub start: usize,
    pub end: usize,
}

impl TraceRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn full(traces: usize) -> Self {
        Self {
            start: 0,
            end: traces,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn validate(&self, traces: usize) -> Result<()> {
        if self.start >= self.end || self.end > traces {
            return Err(Error::InvalidConfig(format!(
                "trace range {}..{} must be non-empty and within 0..{}",
                self.start, self.end, traces
            )));
        }
        Ok(())
    }
}

/// Columns `range` of `section`.
pub fn trace_window(section: &Grid2<f64>, range: TraceRange) -> Result<Grid2<f64>> {
    range.validate(section.cols())?;
    Ok(section.column_window(range.as_range()))
}
