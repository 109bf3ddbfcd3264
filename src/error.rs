//! Error types for startup configuration
//!
//! The simulation itself has no failure paths. Everything that can go wrong
//! happens while loading and validating geometry, before a run starts.

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::GameConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading a config file from disk
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A sprite or screen dimension is zero, negative or not finite
    #[error("Invalid dimension for {what}: {value}")]
    InvalidDimension { what: &'static str, value: f32 },

    /// No planet sprite sizes were provided
    #[error("At least one planet sprite size is required")]
    NoPlanetSprites,

    /// Screen is too short to hold the tallest corridor plus a wall row
    #[error("Screen holds {rows} corridor rows, need at least {required}")]
    GridTooSmall { rows: i32, required: i32 },

    /// A sprite cannot fit inside the narrowest corridor
    #[error("Sprite '{what}' is {height}px tall, narrowest corridor is {corridor}px")]
    SpriteTooTall {
        what: &'static str,
        height: f32,
        corridor: f32,
    },
}

/// Result alias for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
