//! Error types for parameter resolution.

use thiserror::Error;

/// Errors surfaced by [`resolve_parameters`](crate::resolve_parameters) and the
/// color compositor.
///
/// Storage problems never show up here: the preference store logs them and
/// degrades to an empty mapping (see [`StorageError`](crate::StorageError)).
#[derive(Debug, Error)]
pub enum ParamsError {
    /// A color literal did not match `#RRGGBB`.
    #[error("invalid hex color `{value}`: expected `#` followed by six hex digits")]
    InvalidHexColor { value: String },

    /// An opacity was not a finite number in `0.0..=1.0`.
    #[error("alpha {value} is outside the range 0.0..=1.0")]
    AlphaOutOfRange { value: f64 },

    /// A `defaultSize` shorthand did not split into exactly `<width>x<height>`.
    #[error("malformed size `{value}`: expected `fill` or `<width>x<height>`")]
    MalformedSize { value: String },

    /// A caller value for a recognized option could not be read as its kind.
    #[error("invalid `{key}` value {value}: expected {expected}")]
    InvalidOption {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    /// A caller parameter that triggers a collaborator call had the wrong shape.
    #[error("invalid `{key}` parameter: {source}")]
    InvalidEffect {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The layered values could not be converted into a [`ResolvedConfig`](crate::ResolvedConfig).
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
