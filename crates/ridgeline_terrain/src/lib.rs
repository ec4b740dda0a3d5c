//! # Ridgeline Terrain
//!
//! Deterministic procedural heightmap terrain.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed always produces the same heightmap
//! 2. **Composable**: generator passes add into the grid, so layers stack
//! 3. **Infallible hot path**: cell access never branches for errors;
//!    seeks clamp and unset parameters read as zero
//!
//! ## Core Components
//!
//! - [`TerrainChunk`]: a square heightmap grid plus its generation seed
//! - [`ChunkCursor`]: row-major traversal over a chunk's cells
//! - [`TerrainGenerator`]: seeded, parameterized generation passes
//!   ([`SineGenerator`], [`PeakGenerator`])
//! - [`bilinear`]: continuous-position sampling over the discrete grid
//! - [`TerrainConfig`]: TOML description of a chunk and its passes
//!
//! ## Example
//!
//! ```rust
//! use ridgeline_terrain::{SineGenerator, TerrainChunk, TerrainGenerator};
//!
//! let mut chunk = TerrainChunk::new(42, 32);
//! let mut generator = SineGenerator::new();
//! generator.set_parameter("amplitude", 12.0);
//!
//! chunk.generate(&mut generator);
//!
//! // Continuous height query for physics/rendering.
//! let height = chunk.sample(3.25, 7.5);
//! assert!(height.is_finite());
//! ```
//!
//! ## Concurrency
//!
//! Generation is a sequential walk over one shared random stream, so cell
//! order is part of the deterministic contract. Publish chunks for
//! sampling only after generation finishes; the crate does no internal
//! synchronization.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod generator;
pub mod sample;

pub use chunk::{ChunkCursor, TerrainChunk};
pub use config::{GeneratorKind, GeneratorLayer, TerrainConfig};
pub use error::TerrainError;
pub use generator::{GeneratorParams, Peak, PeakGenerator, SineGenerator, TerrainGenerator};
pub use sample::{bilinear, lerp};
