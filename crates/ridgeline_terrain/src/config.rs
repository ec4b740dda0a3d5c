//! # Terrain Configuration
//!
//! TOML-backed chunk and generator configuration, loaded once at startup.
//!
//! A config names the chunk's seed, width and base height plus an ordered
//! list of generator layers. Layers run in order and accumulate, so the
//! file describes the whole composed terrain:
//!
//! ```toml
//! seed = 42
//! width = 64
//! base_height = 0.0
//!
//! [[layers]]
//! kind = "sine"
//! parameters = { amplitude = 12.0, roughness = 0.1 }
//!
//! [[layers]]
//! kind = "peak"
//! peaks = [{ x = 20.0, y = 44.0, height = 55.0 }]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::chunk::TerrainChunk;
use crate::error::TerrainError;
use crate::generator::{GeneratorParams, Peak, PeakGenerator, SineGenerator, TerrainGenerator};

/// Which generator variant a layer uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// [`SineGenerator`].
    Sine,
    /// [`PeakGenerator`].
    Peak,
}

/// One generator pass in a terrain config.
#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorLayer {
    /// Generator variant to run.
    pub kind: GeneratorKind,
    /// Parameter overrides applied on top of the variant's defaults.
    #[serde(default)]
    pub parameters: GeneratorParams,
    /// Peak features for `kind = "peak"`; ignored by other kinds.
    #[serde(default)]
    pub peaks: Vec<Peak>,
}

impl GeneratorLayer {
    /// Builds this layer's generator with defaults overridden by the
    /// layer's parameter table.
    #[must_use]
    pub fn build(&self) -> Box<dyn TerrainGenerator> {
        let mut generator: Box<dyn TerrainGenerator> = match self.kind {
            GeneratorKind::Sine => Box::new(SineGenerator::new()),
            GeneratorKind::Peak => Box::new(PeakGenerator::with_peaks(self.peaks.clone())),
        };
        generator.params_mut().merge(&self.parameters);
        generator
    }
}

/// Declarative description of a terrain chunk and its generator passes.
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    /// Chunk generation seed.
    pub seed: u64,
    /// Chunk side length; must be positive.
    pub width: usize,
    /// Uniform height every cell starts from.
    #[serde(default)]
    pub base_height: f64,
    /// Generator passes, run in order.
    #[serde(default)]
    pub layers: Vec<GeneratorLayer>,
}

impl TerrainConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::Parse`] when the text is not valid TOML or
    /// does not match the schema.
    pub fn from_toml_str(text: &str) -> Result<Self, TerrainError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::Io`] when the file cannot be read and
    /// [`TerrainError::Parse`] when its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading terrain config");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Constructs the chunk and runs every layer over it, in order.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidWidth`] when `width` is zero.
    pub fn build_chunk(&self) -> Result<TerrainChunk, TerrainError> {
        if self.width == 0 {
            return Err(TerrainError::InvalidWidth);
        }

        let mut chunk = TerrainChunk::with_base_height(self.seed, self.width, self.base_height);
        for layer in &self.layers {
            let mut generator = layer.build();
            chunk.generate(generator.as_mut());
        }
        Ok(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        seed = 42
        width = 16
        base_height = 1.0

        [[layers]]
        kind = "sine"
        parameters = { amplitude = 10.0, roughness = 0.0 }

        [[layers]]
        kind = "peak"
        parameters = { roughness = 0.0 }
        peaks = [{ x = 8.0, y = 8.0, height = 50.0, max_radius = 6.0 }]
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = TerrainConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.width, 16);
        assert_eq!(config.base_height, 1.0);
        assert_eq!(config.layers.len(), 2);

        assert_eq!(config.layers[0].kind, GeneratorKind::Sine);
        assert_eq!(config.layers[0].parameters.get("amplitude"), 10.0);

        assert_eq!(config.layers[1].kind, GeneratorKind::Peak);
        assert_eq!(config.layers[1].peaks.len(), 1);
        assert_eq!(config.layers[1].peaks[0].height, 50.0);
        // Unspecified peak fields take their defaults.
        assert_eq!(config.layers[1].peaks[0].lip, 5.0);
    }

    #[test]
    fn test_defaults_when_omitted() {
        let config = TerrainConfig::from_toml_str("seed = 1\nwidth = 4").unwrap();
        assert_eq!(config.base_height, 0.0);
        assert!(config.layers.is_empty());

        let chunk = config.build_chunk().unwrap();
        assert!(chunk.heights().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_layer_overrides_merge_onto_defaults() {
        let config = TerrainConfig::from_toml_str(CONFIG).unwrap();
        let generator = config.layers[0].build();
        // Overridden:
        assert_eq!(generator.parameter("amplitude"), 10.0);
        assert_eq!(generator.parameter("roughness"), 0.0);
        // Untouched defaults survive:
        assert_eq!(generator.parameter("offset"), 30.0);
        assert_eq!(generator.parameter("yscale"), 42.0);
    }

    #[test]
    fn test_build_chunk_is_deterministic() {
        let config = TerrainConfig::from_toml_str(CONFIG).unwrap();
        let chunk1 = config.build_chunk().unwrap();
        let chunk2 = config.build_chunk().unwrap();
        assert_eq!(chunk1.heights(), chunk2.heights());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = TerrainConfig::from_toml_str("seed = 1\nwidth = 0").unwrap();
        assert!(matches!(
            config.build_chunk(),
            Err(TerrainError::InvalidWidth)
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let text = "seed = 1\nwidth = 4\n[[layers]]\nkind = \"volcano\"";
        assert!(matches!(
            TerrainConfig::from_toml_str(text),
            Err(TerrainError::Parse(_))
        ));
    }
}
