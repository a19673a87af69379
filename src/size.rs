//! Default canvas size: structured form and shorthand parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParamsError;

/// Token meaning "fill the container" for either dimension.
pub const FILL: &str = "fill";

/// Width and height of the initial canvas.
///
/// Each dimension is either [`FILL`] or a numeric string, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct SizeSpec {
    pub width: String,
    pub height: String,
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::fill()
    }
}

impl SizeSpec {
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// `{ width: "fill", height: "fill" }`.
    pub fn fill() -> Self {
        Self::new(FILL, FILL)
    }

    /// Parses `fill` or `<W>x<H>` shorthand.
    ///
    /// Each half is trimmed and kept as-is. Anything that does not split into
    /// exactly two halves is a [`ParamsError::MalformedSize`].
    ///
    /// ```
    /// use ptro_params::SizeSpec;
    ///
    /// assert_eq!(SizeSpec::parse("800 x 600").unwrap(), SizeSpec::new("800", "600"));
    /// assert_eq!(SizeSpec::parse("fill").unwrap(), SizeSpec::fill());
    /// assert!(SizeSpec::parse("800").is_err());
    /// ```
    pub fn parse(shorthand: &str) -> Result<Self, ParamsError> {
        if shorthand == FILL {
            return Ok(Self::fill());
        }

        let mut halves = shorthand.split('x');
        match (halves.next(), halves.next(), halves.next()) {
            (Some(width), Some(height), None) => Ok(Self::new(width.trim(), height.trim())),
            _ => Err(ParamsError::MalformedSize {
                value: shorthand.to_string(),
            }),
        }
    }

    /// Normalizes a layered `defaultSize` value.
    ///
    /// Objects are the already structured form (e.g. a value restored from
    /// storage) and are kept; strings go through [`parse`](Self::parse).
    pub fn normalize(value: &Value) -> Result<Self, ParamsError> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
            Value::String(s) => Self::parse(s),
            other => Self::parse(&other.to_string()),
        }
    }

    pub fn is_fill(&self) -> bool {
        self.width == FILL && self.height == FILL
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shorthand_expands_to_both_dimensions() {
        assert_eq!(SizeSpec::parse("800x600").unwrap(), SizeSpec::new("800", "600"));
    }

    #[test]
    fn fill_expands_to_fill_fill() {
        let size = SizeSpec::parse("fill").unwrap();
        assert!(size.is_fill());
        assert_eq!(size, SizeSpec::new("fill", "fill"));
    }

    #[test]
    fn halves_are_trimmed_but_not_validated() {
        assert_eq!(
            SizeSpec::parse(" 1024 x fill ").unwrap(),
            SizeSpec::new("1024", "fill")
        );
        assert_eq!(SizeSpec::parse("abcx").unwrap(), SizeSpec::new("abc", ""));
    }

    #[test]
    fn missing_half_is_malformed() {
        let err = SizeSpec::parse("800").unwrap_err();
        assert!(matches!(err, ParamsError::MalformedSize { ref value } if value == "800"));
    }

    #[test]
    fn extra_separator_is_malformed() {
        assert!(matches!(
            SizeSpec::parse("800x600x2"),
            Err(ParamsError::MalformedSize { .. })
        ));
    }

    #[test]
    fn structured_value_is_kept() {
        let stored = json!({ "width": "640", "height": "fill" });
        assert_eq!(SizeSpec::normalize(&stored).unwrap(), SizeSpec::new("640", "fill"));
    }

    #[test]
    fn incomplete_structured_value_is_rejected() {
        let stored = json!({ "width": "640" });
        assert!(matches!(
            SizeSpec::normalize(&stored),
            Err(ParamsError::InvalidConfig(_))
        ));
    }
}
