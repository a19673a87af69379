//! Alpha compositing of hex colors into renderable CSS colors.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;

use crate::error::ParamsError;

// ============================================================================
// AlphaColor
// ============================================================================

/// A base color combined with an opacity.
///
/// Displays as a CSS `rgba()` function with decimal channels and the alpha in
/// its shortest form:
///
/// ```
/// use ptro_params::composite;
///
/// let color = composite("#abcdef", 0.5).unwrap();
/// assert_eq!(color.to_string(), "rgba(171,205,239,0.5)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaColor {
    /// The opaque base color.
    pub color: Srgb<u8>,

    /// Opacity in `0.0..=1.0`.
    pub alpha: f64,
}

impl AlphaColor {
    /// Returns the channels as an `(r, g, b)` tuple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.color.red, self.color.green, self.color.blue)
    }
}

impl fmt::Display for AlphaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb();
        write!(f, "rgba({},{},{},{})", r, g, b, self.alpha)
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Composes a `#RRGGBB` color literal and an opacity into an [`AlphaColor`].
///
/// The alpha is not clamped: values outside `0.0..=1.0` (and NaN) are rejected
/// with [`ParamsError::AlphaOutOfRange`].
pub fn composite(hex: &str, alpha: f64) -> Result<AlphaColor, ParamsError> {
    let color = parse_hex(hex)?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ParamsError::AlphaOutOfRange { value: alpha });
    }
    Ok(AlphaColor { color, alpha })
}

/// Parses a strict `#RRGGBB` literal.
///
/// Shorthand (`#fff`), eight-digit and unprefixed forms are all rejected.
pub fn parse_hex(hex: &str) -> Result<Srgb<u8>, ParamsError> {
    let invalid = || ParamsError::InvalidHexColor {
        value: hex.to_string(),
    };

    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    Srgb::<u8>::from_str(digits).map_err(|_| invalid())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_keeps_channels_and_alpha() {
        let color = composite("#abcdef", 0.5).unwrap();
        assert_eq!(color.rgb(), (0xab, 0xcd, 0xef));
        assert_eq!(color.alpha, 0.5);
        assert_eq!(color.to_string(), "rgba(171,205,239,0.5)");
    }

    #[test]
    fn integral_alpha_prints_without_fraction() {
        assert_eq!(composite("#ff0000", 1.0).unwrap().to_string(), "rgba(255,0,0,1)");
        assert_eq!(composite("#000000", 0.0).unwrap().to_string(), "rgba(0,0,0,0)");
    }

    #[test]
    fn uppercase_digits_are_accepted() {
        let color = composite("#7485B1", 1.0).unwrap();
        assert_eq!(color.rgb(), (0x74, 0x85, 0xb1));
    }

    #[test]
    fn malformed_hex_is_a_format_error() {
        for bad in ["#fff", "abcdef", "#abcdeg", "#abcdef00", "", "#"] {
            let err = composite(bad, 1.0).unwrap_err();
            assert!(
                matches!(err, ParamsError::InvalidHexColor { ref value } if value == bad),
                "expected InvalidHexColor for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn out_of_range_alpha_is_rejected() {
        assert!(matches!(
            composite("#ffffff", 1.5),
            Err(ParamsError::AlphaOutOfRange { .. })
        ));
        assert!(matches!(
            composite("#ffffff", -0.1),
            Err(ParamsError::AlphaOutOfRange { .. })
        ));
        assert!(matches!(
            composite("#ffffff", f64::NAN),
            Err(ParamsError::AlphaOutOfRange { .. })
        ));
    }
}
