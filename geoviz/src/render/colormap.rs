//! Named color palettes sampled by normalized value.
//!
//! Each palette is a list of sRGB stops on `[0, 1]`; samples between stops are
//! interpolated linearly in sRGB, which is what plotting libraries do for
//! their listed colormaps.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A single color stop along the normalized value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub v: f64,
    pub rgb: [u8; 3],
}

const fn stop(v: f64, rgb: [u8; 3]) -> ColorStop {
    ColorStop { v, rgb }
}

const GRAY: &[ColorStop] = &[stop(0.0, [0, 0, 0]), stop(1.0, [255, 255, 255])];

const GREYS: &[ColorStop] = &[stop(0.0, [255, 255, 255]), stop(1.0, [0, 0, 0])];

const SEISMIC: &[ColorStop] = &[
    stop(0.0, [0, 0, 77]),
    stop(0.25, [0, 0, 255]),
    stop(0.5, [255, 255, 255]),
    stop(0.75, [255, 0, 0]),
    stop(1.0, [128, 0, 0]),
];

// ColorBrewer 11-class RdBu, red at the low end.
const RDBU: &[ColorStop] = &[
    stop(0.0, [0x67, 0x00, 0x1f]),
    stop(0.1, [0xb2, 0x18, 0x2b]),
    stop(0.2, [0xd6, 0x60, 0x4d]),
    stop(0.3, [0xf4, 0xa5, 0x82]),
    stop(0.4, [0xfd, 0xdb, 0xc7]),
    stop(0.5, [0xf7, 0xf7, 0xf7]),
    stop(0.6, [0xd1, 0xe5, 0xf0]),
    stop(0.7, [0x92, 0xc5, 0xde]),
    stop(0.8, [0x43, 0x93, 0xc3]),
    stop(0.9, [0x21, 0x66, 0xac]),
    stop(1.0, [0x05, 0x30, 0x61]),
];

const RDBU_R: &[ColorStop] = &[
    stop(0.0, [0x05, 0x30, 0x61]),
    stop(0.1, [0x21, 0x66, 0xac]),
    stop(0.2, [0x43, 0x93, 0xc3]),
    stop(0.3, [0x92, 0xc5, 0xde]),
    stop(0.4, [0xd1, 0xe5, 0xf0]),
    stop(0.5, [0xf7, 0xf7, 0xf7]),
    stop(0.6, [0xfd, 0xdb, 0xc7]),
    stop(0.7, [0xf4, 0xa5, 0x82]),
    stop(0.8, [0xd6, 0x60, 0x4d]),
    stop(0.9, [0xb2, 0x18, 0x2b]),
    stop(1.0, [0x67, 0x00, 0x1f]),
];

const VIRIDIS: &[ColorStop] = &[
    stop(0.0, [0x44, 0x01, 0x54]),
    stop(0.125, [0x47, 0x2d, 0x7b]),
    stop(0.25, [0x3b, 0x52, 0x8b]),
    stop(0.375, [0x2c, 0x72, 0x8e]),
    stop(0.5, [0x21, 0x91, 0x8c]),
    stop(0.625, [0x28, 0xae, 0x80]),
    stop(0.75, [0x5e, 0xc9, 0x62]),
    stop(0.875, [0xad, 0xdc, 0x30]),
    stop(1.0, [0xfd, 0xe7, 0x25]),
];

const MAGMA: &[ColorStop] = &[
    stop(0.0, [0x00, 0x00, 0x04]),
    stop(1.0 / 9.0, [0x18, 0x0f, 0x3d]),
    stop(2.0 / 9.0, [0x44, 0x0f, 0x76]),
    stop(3.0 / 9.0, [0x72, 0x1f, 0x81]),
    stop(4.0 / 9.0, [0x9e, 0x2f, 0x7f]),
    stop(5.0 / 9.0, [0xcd, 0x40, 0x71]),
    stop(6.0 / 9.0, [0xf1, 0x60, 0x5d]),
    stop(7.0 / 9.0, [0xfd, 0x96, 0x68]),
    stop(8.0 / 9.0, [0xfe, 0xca, 0x8d]),
    stop(1.0, [0xfc, 0xfd, 0xbf]),
];

const JET: &[ColorStop] = &[
    stop(0.0, [0, 0, 128]),
    stop(0.125, [0, 0, 255]),
    stop(0.375, [0, 255, 255]),
    stop(0.625, [255, 255, 0]),
    stop(0.875, [255, 0, 0]),
    stop(1.0, [128, 0, 0]),
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Colormap {
    #[serde(rename = "gray")]
    #[strum(serialize = "gray")]
    Gray,
    #[serde(rename = "Greys")]
    #[strum(serialize = "Greys")]
    Greys,
    #[serde(rename = "seismic")]
    #[strum(serialize = "seismic")]
    Seismic,
    #[serde(rename = "RdBu")]
    #[strum(serialize = "RdBu")]
    RdBu,
    #[serde(rename = "RdBu_r")]
    #[strum(serialize = "RdBu_r")]
    RdBuR,
    #[serde(rename = "viridis")]
    #[strum(serialize = "viridis")]
    Viridis,
    #[serde(rename = "magma")]
    #[strum(serialize = "magma")]
    Magma,
    #[serde(rename = "jet")]
    #[strum(serialize = "jet")]
    Jet,
}

impl Colormap {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn stops(self) -> &'static [ColorStop] {
        match self {
            Colormap::Gray => GRAY,
            Colormap::Greys => GREYS,
            Colormap::Seismic => SEISMIC,
            Colormap::RdBu => RDBU,
            Colormap::RdBuR => RDBU_R,
            Colormap::Viridis => VIRIDIS,
            Colormap::Magma => MAGMA,
            Colormap::Jet => JET,
        }
    }

    /// Color at normalized position `t`; clamped to `[0, 1]`, NaN maps to the low end.
    pub fn sample(self, t: f64) -> [u8; 3] {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let i = stops
            .windows(2)
            .position(|w| t <= w[1].v)
            .unwrap_or(stops.len() - 2);
        let a = stops[i];
        let b = stops[i + 1];
        let f = if b.v > a.v { (t - a.v) / (b.v - a.v) } else { 0.0 };

        let mut rgb = [0u8; 3];
        for (c, out) in rgb.iter_mut().enumerate() {
            let lo = a.rgb[c] as f64;
            let hi = b.rgb[c] as f64;
            *out = (lo + f * (hi - lo)).round().clamp(0.0, 255.0) as u8;
        }
        rgb
    }
}
