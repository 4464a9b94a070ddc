//! Crate error type.
//!
//! Only configuration loading can fail. Once a `Scenario` is built, every
//! runtime path (ticks, pointer and window events) is infallible.

use bevy::color::HexColorError;
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A numeric setting is out of range or not finite.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Bodies draw their colour from the palette, so it cannot be empty.
    #[error("colour palette must contain at least one colour")]
    EmptyPalette,

    /// A palette or background entry is not a hex colour.
    #[error("invalid colour {value:?}: {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: HexColorError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
