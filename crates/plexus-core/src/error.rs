//! Error types for the particle field.
//!
//! The simulation itself cannot fail; these cover the configuration edges
//! (theme colors, JSON overrides) and the canvas acquisition done by the
//! bindings crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    /// A color string could not be parsed as `#rrggbb` / `#rgb`.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// JSON config overrides were malformed or had the wrong types.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The drawing surface could not be obtained.
    #[error("canvas unavailable: {0}")]
    Canvas(String),
}
