//! Colormap objects built from sampled palettes.
//!
//! A [`ColorSequence`] is a validated, normalized palette: an `n × c`
//! array of channel values in `[0, 1]`, with `c` either 3 (RGB) or 4
//! (RGBA). A [`Colormap`] wraps one sequence together with a name and
//! evaluates it at any continuous position in `[0, 1]` by piecewise
//! linear interpolation between the bracketing samples.

use ndarray::Array2;

use crate::error::{BadmapError, Result};

/// Suffix appended to a colormap name to denote its reversed counterpart.
pub const REVERSED_SUFFIX: &str = "_r";

/// A validated palette: `n` samples of 3 or 4 channels, all in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSequence {
    samples: Array2<f64>,
}

impl ColorSequence {
    /// Create a sequence from an already-normalized sample array.
    ///
    /// Rejects empty palettes, channel counts other than 3 or 4, and
    /// any channel value outside `[0, 1]` (including NaN).
    pub fn new(samples: Array2<f64>) -> Result<Self> {
        let (n, channels) = samples.dim();
        if n == 0 {
            return Err(BadmapError::InvalidPalette {
                message: "color sequence must contain at least one sample".to_string(),
            });
        }
        if channels != 3 && channels != 4 {
            return Err(BadmapError::InvalidPalette {
                message: format!(
                    "color samples must have 3 or 4 channels, got {}",
                    channels
                ),
            });
        }
        if !samples.iter().all(|&v| (0.0..=1.0).contains(&v)) {
            return Err(BadmapError::InvalidPalette {
                message: "color channels must lie in [0, 1]".to_string(),
            });
        }
        Ok(Self { samples })
    }

    /// Number of samples in the palette.
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    /// Always false: construction rejects empty palettes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Channels per sample (3 for RGB, 4 for RGBA).
    pub fn num_channels(&self) -> usize {
        self.samples.ncols()
    }

    /// The sample at index `i` as RGBA, alpha defaulting to 1.0.
    pub fn sample(&self, i: usize) -> [f64; 4] {
        let row = self.samples.row(i);
        let alpha = if self.num_channels() == 4 { row[3] } else { 1.0 };
        [row[0], row[1], row[2], alpha]
    }

    /// A deep copy of this sequence with the sample order reversed.
    pub fn reversed(&self) -> Self {
        let mut reversed = self.samples.clone();
        reversed.invert_axis(ndarray::Axis(0));
        Self { samples: reversed }
    }

    /// The raw sample array.
    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }
}

/// An immutable colormap: a named palette evaluable at any position
/// in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    sequence: ColorSequence,
}

impl Colormap {
    /// Create a colormap from a name and a validated palette.
    pub fn new(name: impl Into<String>, sequence: ColorSequence) -> Self {
        Self {
            name: name.into(),
            sequence,
        }
    }

    /// Name of this colormap.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of samples in the backing palette.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false: the backing palette is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The backing palette.
    pub fn sequence(&self) -> &ColorSequence {
        &self.sequence
    }

    /// Evaluate the colormap at position `t`.
    ///
    /// `t` is clamped to `[0, 1]`. Sample `i` of `n` sits at position
    /// `i / (n - 1)`; positions between samples interpolate each channel
    /// linearly, and the exact endpoints return the first and last
    /// samples with no interpolation drift. A single-sample palette is
    /// a constant map.
    pub fn eval(&self, t: f64) -> [f64; 4] {
        let n = self.sequence.len();
        if n == 1 {
            return self.sequence.sample(0);
        }

        let t = t.clamp(0.0, 1.0);
        let scaled = t * (n - 1) as f64;
        let lo = scaled.floor() as usize;
        if lo >= n - 1 {
            return self.sequence.sample(n - 1);
        }
        let frac = scaled - lo as f64;
        if frac == 0.0 {
            return self.sequence.sample(lo);
        }
        lerp(self.sequence.sample(lo), self.sequence.sample(lo + 1), frac)
    }

    /// The reversed counterpart: a deep, independent palette in reverse
    /// sample order, named `<name>_r`.
    pub fn reversed(&self) -> Colormap {
        Colormap {
            name: format!("{}{}", self.name, REVERSED_SUFFIX),
            sequence: self.sequence.reversed(),
        }
    }
}

/// Build the forward colormap and its reversed counterpart from one
/// palette.
pub fn build(name: impl Into<String>, sequence: ColorSequence) -> (Colormap, Colormap) {
    let forward = Colormap::new(name, sequence);
    let reverse = forward.reversed();
    (forward, reverse)
}

/// Linear interpolation between two RGBA colors, channel by channel.
pub fn lerp(c1: [f64; 4], c2: [f64; 4], t: f64) -> [f64; 4] {
    [
        c1[0] * (1.0 - t) + c2[0] * t,
        c1[1] * (1.0 - t) + c2[1] * t,
        c1[2] * (1.0 - t) + c2[2] * t,
        c1[3] * (1.0 - t) + c2[3] * t,
    ]
}
