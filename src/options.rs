//! Declarative option table driving parameter resolution.
//!
//! Every recognized option is described once by an [`OptionSpec`]: which layers
//! it reads, how a missing value is detected, the kind of value it holds and
//! its literal default. The resolver walks [`OPTIONS`] in order with a single
//! generic loop.
//!
//! Stored values that cannot be read as their kind are skipped with a warning,
//! so a stale or hand-edited preference never blocks resolution. Caller values
//! are coerced leniently and only rejected when no reading makes sense.

use serde_json::{Map, Value, json};

use crate::color::parse_hex;
use crate::error::ParamsError;
use crate::store::Preferences;

// ============================================================================
// Descriptor Types
// ============================================================================

/// How a missing value is detected while scanning the layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Falsy values (`null`, `false`, `0`, `""`) count as absent.
    Or,
    /// Only a missing key or `null` counts as absent; `0` and `false` are kept.
    FirstDefined,
}

/// Which layers an option reads, highest priority first. Defaults always come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layers {
    PersistedThenCaller,
    CallerOnly,
}

/// The kind of value an option holds, and how loosely typed input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `#RRGGBB` color literal.
    Color,
    /// Opacity in `0.0..=1.0`; numeric strings are parsed.
    Alpha,
    /// Finite number; numeric strings are parsed.
    Number,
    /// Whole number up to `u32::MAX`; fractions are truncated.
    Count,
    /// Text; numbers and booleans are rendered as text.
    Text,
    /// Boolean by truthiness.
    Flag,
    /// List of names; a single name becomes a one-element list.
    Names,
    /// Kept as-is and checked by a later stage.
    Any,
}

impl ValueKind {
    /// Human-readable description used in error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Color => "a `#RRGGBB` color",
            Self::Alpha => "a number in 0.0..=1.0",
            Self::Number => "a number",
            Self::Count => "a non-negative whole number",
            Self::Text => "a string",
            Self::Flag => "a boolean",
            Self::Names => "a list of names",
            Self::Any => "any value",
        }
    }

    /// Reads `value` as this kind, returning the normalized JSON value.
    pub fn coerce(&self, key: &'static str, value: &Value) -> Result<Value, ParamsError> {
        let invalid = || ParamsError::InvalidOption {
            key,
            expected: self.expected(),
            value: value.to_string(),
        };

        match self {
            Self::Color => {
                let hex = value.as_str().ok_or_else(invalid)?;
                parse_hex(hex)?;
                Ok(value.clone())
            }
            Self::Alpha => {
                let alpha = as_number(value).ok_or_else(invalid)?;
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(ParamsError::AlphaOutOfRange { value: alpha });
                }
                Ok(json!(alpha))
            }
            Self::Number => as_number(value).map(|n| json!(n)).ok_or_else(invalid),
            Self::Count => as_number(value)
                .filter(|n| (0.0..=f64::from(u32::MAX)).contains(n))
                .map(|n| json!(n as u32))
                .ok_or_else(invalid),
            Self::Text => match value {
                Value::String(_) => Ok(value.clone()),
                Value::Number(n) => Ok(json!(n.to_string())),
                Value::Bool(b) => Ok(json!(b.to_string())),
                _ => Err(invalid()),
            },
            Self::Flag => Ok(json!(is_truthy(value))),
            Self::Names => match value {
                Value::String(name) => Ok(json!([name])),
                Value::Array(items) if items.iter().all(Value::is_string) => Ok(value.clone()),
                _ => Err(invalid()),
            },
            Self::Any => Ok(value.clone()),
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// A literal default value.
///
/// Kept as plain data so the option table can be a `const`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'static str),
    List(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(&self) -> Value {
        match *self {
            Self::Null => Value::Null,
            Self::Bool(b) => json!(b),
            Self::Int(i) => json!(i),
            Self::Float(f) => json!(f),
            Self::Str(s) => json!(s),
            Self::List(items) => json!(items),
        }
    }
}

/// Resolution rule for one recognized option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    pub key: &'static str,
    pub precedence: Precedence,
    pub layers: Layers,
    pub kind: ValueKind,
    pub default: DefaultValue,
}

impl OptionSpec {
    const fn new(
        key: &'static str,
        precedence: Precedence,
        layers: Layers,
        kind: ValueKind,
        default: DefaultValue,
    ) -> Self {
        Self {
            key,
            precedence,
            layers,
            kind,
            default,
        }
    }

    /// Returns a copy with a different default.
    pub fn with_default(self, default: DefaultValue) -> Self {
        Self { default, ..self }
    }

    /// Picks the effective value from the persisted and caller layers.
    ///
    /// A persisted value that cannot be read as [`kind`](Self::kind) is logged
    /// and skipped. A caller value that cannot be read is an error.
    pub fn resolve(
        &self,
        persisted: &Preferences,
        caller: &Map<String, Value>,
    ) -> Result<Value, ParamsError> {
        let accept: fn(&Value) -> bool = match self.precedence {
            Precedence::Or => is_truthy,
            Precedence::FirstDefined => is_defined,
        };

        if self.layers == Layers::PersistedThenCaller {
            if let Some(value) = persisted.get(self.key).filter(|&v| accept(v)) {
                match self.kind.coerce(self.key, value) {
                    Ok(value) => return Ok(value),
                    Err(e) => log::warn!("Ignoring stored preference `{}`: {e}", self.key),
                }
            }
        }

        match caller.get(self.key).filter(|&v| accept(v)) {
            Some(value) => self.kind.coerce(self.key, value),
            None => Ok(self.default.to_value()),
        }
    }
}

/// Looks up the option named `key`.
pub fn find<'a>(options: &'a [OptionSpec], key: &str) -> Option<&'a OptionSpec> {
    options.iter().find(|o| o.key == key)
}

// ============================================================================
// Value Semantics
// ============================================================================

/// JavaScript truthiness over JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// JSON has no `undefined`; a present `null` is treated the same way.
pub fn is_defined(value: &Value) -> bool {
    !value.is_null()
}

// ============================================================================
// Option Table
// ============================================================================

use DefaultValue::{Bool, Float, Int, List, Null, Str};
use Layers::{CallerOnly, PersistedThenCaller};
use Precedence::{FirstDefined, Or};
use ValueKind::{Alpha, Any, Color, Count, Flag, Names, Number, Text};

/// Every recognized top-level option, in resolution order.
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("activeColor", Or, PersistedThenCaller, Color, Str("#ff0000")),
    OptionSpec::new("activeColorAlpha", FirstDefined, PersistedThenCaller, Alpha, Float(1.0)),
    OptionSpec::new("activeFillColor", Or, PersistedThenCaller, Color, Str("#000000")),
    OptionSpec::new("activeFillColorAlpha", FirstDefined, PersistedThenCaller, Alpha, Float(0.0)),
    OptionSpec::new("initText", Or, CallerOnly, Text, Null),
    OptionSpec::new("initTextColor", Or, CallerOnly, Text, Str("#808080")),
    OptionSpec::new("initTextStyle", Or, CallerOnly, Text, Str("26px 'Open Sans', sans-serif")),
    OptionSpec::new("defaultLineWidth", Or, PersistedThenCaller, Number, Int(5)),
    OptionSpec::new("defaultArrowAngle", Or, PersistedThenCaller, Number, Int(30)),
    OptionSpec::new("defaultArrowLength", Or, PersistedThenCaller, Number, Int(15)),
    OptionSpec::new("defaultEraserWidth", FirstDefined, PersistedThenCaller, Number, Int(5)),
    OptionSpec::new("defaultFontSize", FirstDefined, PersistedThenCaller, Number, Int(24)),
    OptionSpec::new("fontStrokeSize", FirstDefined, PersistedThenCaller, Number, Int(0)),
    OptionSpec::new("backgroundFillColor", Or, PersistedThenCaller, Color, Str("#ffffff")),
    OptionSpec::new(
        "backgroundFillColorAlpha",
        FirstDefined,
        PersistedThenCaller,
        Alpha,
        Float(1.0),
    ),
    OptionSpec::new("textStrokeColor", Or, PersistedThenCaller, Color, Str("#ffffff")),
    OptionSpec::new("textStrokeColorAlpha", FirstDefined, PersistedThenCaller, Alpha, Float(1.0)),
    OptionSpec::new("worklogLimit", FirstDefined, CallerOnly, Count, Int(100)),
    OptionSpec::new("defaultTool", Or, CallerOnly, Text, Str("select")),
    OptionSpec::new("hiddenTools", Or, CallerOnly, Names, List(&["redo"])),
    OptionSpec::new("pixelizePixelSize", Or, PersistedThenCaller, Text, Str("20%")),
    OptionSpec::new("defaultSize", Or, CallerOnly, Any, Str("fill")),
    OptionSpec::new("defaultPixelSize", Or, CallerOnly, Count, Int(4)),
    OptionSpec::new("toolbarPosition", Or, CallerOnly, Text, Str("bottom")),
    OptionSpec::new("fixMobilePageReloader", FirstDefined, CallerOnly, Flag, Bool(true)),
];

// ============================================================================
// Tests
// ============================================================================
