//! # Terrain Generators
//!
//! Seeded, parameterized passes that layer height contributions into a
//! [`TerrainChunk`].
//!
//! ## Determinism Guarantee
//!
//! Every generator draws randomness from a `ChaCha8Rng` that
//! [`TerrainChunk::generate`] reseeds from the chunk's seed right before
//! the pass runs. One pass consumes one sequential random stream, so the
//! row-major visitation order is part of the contract: same seed, same
//! parameters, same heightmap. ALWAYS.
//!
//! ## Layering
//!
//! Passes accumulate with [`ChunkCursor::add`](crate::chunk::ChunkCursor::add)
//! instead of overwriting, so
//! stacking passes (a sine base plus peak features, say) produces the
//! elementwise sum of what each pass would produce alone.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use crate::chunk::TerrainChunk;
use crate::sample::lerp;

/// Named `f64` parameters with lookup-or-zero semantics.
///
/// Reading a name that was never set yields `0.0` rather than an error.
/// That soft default is deliberate: an unset knob behaves as a disabled
/// term in a generator's formula (unset `roughness` means no roughness).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct GeneratorParams {
    values: BTreeMap<String, f64>,
}

impl GeneratorParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or overwrites a parameter. Names are not validated; a name
    /// no generator reads is simply ignored by that generator.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Reads a parameter, defaulting to `0.0` when unset.
    #[must_use]
    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Folds `overrides` into this set, overwriting colliding names.
    pub fn merge(&mut self, overrides: &Self) {
        for (name, value) in &overrides.values {
            self.values.insert(name.clone(), *value);
        }
    }
}

/// A seeded, parameterized terrain generation pass.
///
/// Concrete variants provide their own parameter defaults and the
/// per-cell formula; the chunk drives reseeding through
/// [`TerrainChunk::generate`]. New variants plug in without touching the
/// chunk itself.
pub trait TerrainGenerator {
    /// The defaults this variant starts from. Constructors apply these;
    /// callers can overwrite any of them afterwards.
    fn default_parameters(&self) -> GeneratorParams;

    /// Current parameters.
    fn params(&self) -> &GeneratorParams;

    /// Mutable access to the current parameters. Parameters persist
    /// across generation calls until overwritten.
    fn params_mut(&mut self) -> &mut GeneratorParams;

    /// Resets the internal random stream.
    ///
    /// Called automatically by [`TerrainChunk::generate`] with the chunk's
    /// seed before every pass.
    fn reseed(&mut self, seed: u64);

    /// Runs one pass, adding this generator's contribution into `chunk`.
    ///
    /// Reads only its own parameters, its random stream and the chunk's
    /// existing values; writes only into the chunk.
    fn generate(&mut self, chunk: &mut TerrainChunk);

    /// Stores or overwrites a named parameter.
    fn set_parameter(&mut self, name: &str, value: f64) {
        self.params_mut().set(name, value);
    }

    /// Reads a named parameter (`0.0` when unset).
    fn parameter(&self, name: &str) -> f64 {
        self.params().get(name)
    }
}

/// Draws one roughness sample, or `0.0` when the term is disabled.
///
/// The bound is `|roughness * amplitude|`; a zero bound (either knob
/// unset) disables the term without touching the random stream.
fn roughness_sample(rng: &mut ChaCha8Rng, roughness: f64, amplitude: f64) -> f64 {
    let bound = (roughness * amplitude).abs();
    if bound > 0.0 {
        rng.gen_range(-bound..bound)
    } else {
        0.0
    }
}

/// Wavy terrain from two crossed sine waves plus uniform roughness.
///
/// Per cell, in cursor order:
///
/// ```text
/// rough = roughness != 0 ? uniform(-roughness*amplitude, roughness*amplitude) : 0
/// value = offset + rough + (amplitude / 2) * (sin(x * xscale) + sin(y * yscale))
/// cell += value
/// ```
pub struct SineGenerator {
    rng: ChaCha8Rng,
    params: GeneratorParams,
}

impl SineGenerator {
    /// Creates a sine generator with its default parameters
    /// (`amplitude=18, offset=30, xscale=32, yscale=42, roughness=0.15`).
    #[must_use]
    pub fn new() -> Self {
        let mut gen = Self {
            rng: ChaCha8Rng::seed_from_u64(0),
            params: GeneratorParams::new(),
        };
        gen.params = gen.default_parameters();
        gen
    }
}

impl Default for SineGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainGenerator for SineGenerator {
    fn default_parameters(&self) -> GeneratorParams {
        let mut params = GeneratorParams::new();
        params.set("amplitude", 18.0);
        params.set("offset", 30.0);
        params.set("xscale", 32.0);
        params.set("yscale", 42.0);
        params.set("roughness", 0.15);
        params
    }

    fn params(&self) -> &GeneratorParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut GeneratorParams {
        &mut self.params
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn generate(&mut self, chunk: &mut TerrainChunk) {
        let amplitude = self.params.get("amplitude");
        let offset = self.params.get("offset");
        let roughness = self.params.get("roughness");
        let x_scale = self.params.get("xscale");
        let y_scale = self.params.get("yscale");

        let half_amplitude = amplitude / 2.0;

        let mut cursor = chunk.cursor();
        while cursor.next() {
            let rough = roughness_sample(&mut self.rng, roughness, amplitude);
            let value = offset
                + rough
                + half_amplitude
                    * ((cursor.x() as f64 * x_scale).sin() + (cursor.y() as f64 * y_scale).sin());
            cursor.add(value);
        }
    }
}

/// A single terrain feature used by [`PeakGenerator`].
///
/// A peak rises toward `height` near its center and falls off toward the
/// surrounding base height with a reciprocal-power curve, creased at the
/// very tip and smoothed ("lipped") toward zero near its outer rim.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Peak {
    /// Center column, in grid coordinates.
    pub x: f64,
    /// Center row, in grid coordinates.
    pub y: f64,
    /// Falloff sharpness; higher values make a steeper peak.
    #[serde(default = "Peak::default_strength")]
    pub strength: f64,
    /// Height the peak rises toward at its center.
    #[serde(default = "Peak::default_height")]
    pub height: f64,
    /// Radius beyond which the peak contributes nothing.
    #[serde(default = "Peak::default_max_radius")]
    pub max_radius: f64,
    /// Width of the smoothing band along the outer rim.
    #[serde(default = "Peak::default_lip")]
    pub lip: f64,
    /// Radius of the crease softening at the very tip.
    #[serde(default = "Peak::default_tip")]
    pub tip: f64,
}

impl Peak {
    fn default_strength() -> f64 {
        1.5
    }

    fn default_height() -> f64 {
        40.0
    }

    fn default_max_radius() -> f64 {
        32.0
    }

    fn default_lip() -> f64 {
        5.0
    }

    fn default_tip() -> f64 {
        9.0
    }

    /// Creates a peak at `(x, y)` with the default shape.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            strength: Self::default_strength(),
            height: Self::default_height(),
            max_radius: Self::default_max_radius(),
            lip: Self::default_lip(),
            tip: Self::default_tip(),
        }
    }

    /// Squared distance from this peak's center to `(other_x, other_y)`.
    #[must_use]
    pub fn distance_squared(&self, other_x: f64, other_y: f64) -> f64 {
        let off_x = self.x - other_x;
        let off_y = self.y - other_y;
        off_x * off_x + off_y * off_y
    }

    /// Height offset this peak contributes at `(other_x, other_y)`.
    ///
    /// `base_height` is the surrounding terrain height the peak rises
    /// from. Returns `0.0` outside `max_radius`.
    #[must_use]
    pub fn height_offset_at(&self, base_height: f64, other_x: f64, other_y: f64) -> f64 {
        let max_radius_sq = self.max_radius * self.max_radius;
        let distance_sq = self.distance_squared(other_x, other_y);

        if distance_sq >= max_radius_sq {
            return 0.0;
        }

        // Reciprocal-power falloff away from the center.
        let falloff = 1.0 + distance_sq.powf(1.0 / (1.0 + self.strength));
        let mut val = (self.height - base_height) / falloff;

        let distance = distance_sq.sqrt();
        let edge_distance = self.max_radius - distance;

        // Crease softening near the tip.
        if distance < self.tip {
            let tip_crease = ((self.tip - distance) * 2.0 / self.tip).powf(1.0 + self.strength);
            val -= tip_crease;
        }

        // Smooth toward zero along the rim.
        if edge_distance < self.lip {
            let lip_alpha = (self.lip - edge_distance) / self.lip;
            val = lerp(val, 0.0, lip_alpha);
        }

        val
    }
}

/// Terrain shaped by a list of [`Peak`] features over a rough base plane.
///
/// Per cell: `cell += height + uniform(-roughness, roughness) + sum of
/// peak offsets`. Parameters: `height` (base plane the peaks rise from)
/// and `roughness` (uniform coarseness bound). Peaks are structured data,
/// not named parameters, and are supplied by the caller.
pub struct PeakGenerator {
    rng: ChaCha8Rng,
    params: GeneratorParams,
    peaks: Vec<Peak>,
}

impl PeakGenerator {
    /// Creates a peak generator with default parameters and no peaks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_peaks(Vec::new())
    }

    /// Creates a peak generator with default parameters and `peaks`.
    #[must_use]
    pub fn with_peaks(peaks: Vec<Peak>) -> Self {
        let mut gen = Self {
            rng: ChaCha8Rng::seed_from_u64(0),
            params: GeneratorParams::new(),
            peaks,
        };
        gen.params = gen.default_parameters();
        gen
    }

    /// Adds a peak feature.
    pub fn add_peak(&mut self, peak: Peak) {
        self.peaks.push(peak);
    }

    /// The peaks this generator shapes terrain with.
    #[must_use]
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }
}

impl Default for PeakGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainGenerator for PeakGenerator {
    fn default_parameters(&self) -> GeneratorParams {
        let mut params = GeneratorParams::new();
        params.set("height", 20.0);
        params.set("roughness", 0.5);
        params
    }

    fn params(&self) -> &GeneratorParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut GeneratorParams {
        &mut self.params
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn generate(&mut self, chunk: &mut TerrainChunk) {
        let height = self.params.get("height");
        let roughness = self.params.get("roughness");

        let mut cursor = chunk.cursor();
        while cursor.next() {
            let rough = roughness_sample(&mut self.rng, roughness, 1.0);
            let (x, y) = (cursor.x() as f64, cursor.y() as f64);

            let mut value = height + rough;
            for peak in &self.peaks {
                value += peak.height_offset_at(height, x, y);
            }

            cursor.add(value);
        }
    }
}
