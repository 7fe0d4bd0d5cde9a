//! 24-bit colors and the intensity-color codec.
//!
//! Intensity 0..=100 maps onto two straight segments in RGB space,
//! `LOW -> MEDIUM` for 0..=50 and `MEDIUM -> HIGH` for 50..=100. Decoding an
//! arbitrary color picks the nearest point on either segment, so it is a
//! nearest-match and not a true inverse. Only the anchors round-trip exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 24-bit RGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        let malformed = || ValidationError::MalformedColor(s.to_string());
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(malformed());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    fn channels(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Anchor color for intensity 0
pub const LOW: Rgb = Rgb::new(0x4c, 0xaf, 0x50);
/// Anchor color for intensity 50
pub const MEDIUM: Rgb = Rgb::new(0xff, 0xc1, 0x07);
/// Anchor color for intensity 100
pub const HIGH: Rgb = Rgb::new(0xf4, 0x43, 0x36);

/// Upper bound of the intensity scale
pub const MAX_INTENSITY: f64 = 100.0;
const MID_INTENSITY: f64 = MAX_INTENSITY / 2.0;

/// Bidirectional intensity <-> color mapping anchored at three colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityCodec {
    pub low: Rgb,
    pub medium: Rgb,
    pub high: Rgb,
}

impl Default for IntensityCodec {
    fn default() -> Self {
        Self::new(LOW, MEDIUM, HIGH)
    }
}

impl IntensityCodec {
    pub const fn new(low: Rgb, medium: Rgb, high: Rgb) -> Self {
        Self { low, medium, high }
    }

    /// Color for an intensity. Input is clamped to 0..=100, NaN counts as 0.
    pub fn encode(&self, intensity: f64) -> Rgb {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, MAX_INTENSITY)
        };

        if intensity <= MID_INTENSITY {
            lerp(self.low, self.medium, intensity / MID_INTENSITY)
        } else {
            lerp(self.medium, self.high, (intensity - MID_INTENSITY) / MID_INTENSITY)
        }
    }

    /// Intensity of the closest on-segment color. Ties go to the lower segment.
    pub fn decode(&self, color: Rgb) -> f64 {
        let (t1, d1) = project(color, self.low, self.medium);
        let (t2, d2) = project(color, self.medium, self.high);

        if d1 <= d2 {
            t1 * MID_INTENSITY
        } else {
            MID_INTENSITY + t2 * MID_INTENSITY
        }
    }
}

/// Encode with the default anchors
pub fn encode(intensity: f64) -> Rgb {
    IntensityCodec::default().encode(intensity)
}

/// Decode with the default anchors
pub fn decode(color: Rgb) -> f64 {
    IntensityCodec::default().decode(color)
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let [ar, ag, ab] = a.channels();
    let [br, bg, bb] = b.channels();
    let mix = |from: f64, to: f64| (from + (to - from) * t).round().clamp(0.0, 255.0) as u8;
    Rgb::new(mix(ar, br), mix(ag, bg), mix(ab, bb))
}

/// Orthogonal projection of `target` onto segment `a`-`b`.
///
/// Returns the clamped segment parameter and the Euclidean distance from
/// `target` to the projected point. A zero-length segment yields `t = 0`.
fn project(target: Rgb, a: Rgb, b: Rgb) -> (f64, f64) {
    let (p, a, b) = (target.channels(), a.channels(), b.channels());
    let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let ap = [p[0] - a[0], p[1] - a[1], p[2] - a[2]];

    let len_sq = dot(ab, ab);
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (dot(ap, ab) / len_sq).clamp(0.0, 1.0)
    };

    let closest = [a[0] + ab[0] * t, a[1] + ab[1] * t, a[2] + ab[2] * t];
    let diff = [p[0] - closest[0], p[1] - closest[1], p[2] - closest[2]];
    (t, dot(diff, diff).sqrt())
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
