//! # Terrain Error Types
//!
//! Errors surfaced by the configuration layer. The grid hot path never
//! fails: out-of-range seeks clamp, unset parameters read as zero, and
//! cell access is a caller precondition.

use thiserror::Error;

/// Errors that can occur while loading or applying terrain configuration.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// Reading the config file failed.
    #[error("failed to read terrain config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file was not valid TOML or did not match the schema.
    #[error("invalid terrain config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A chunk width of zero was requested.
    #[error("chunk width must be positive")]
    InvalidWidth,
}
