//! Widget color scheme and its fallback chains.
//!
//! Each role is taken from the caller's nested `colorScheme` object when
//! truthy. Otherwise it falls back either to a literal color or to another,
//! already resolved role. [`ROLES`] lists the roles in dependency order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::options::is_truthy;

// ============================================================================
// ColorScheme
// ============================================================================

/// Fully populated set of color roles used by the generated stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct ColorScheme {
    /// Panel background.
    pub main: String,
    pub control: String,
    pub control_content: String,
    pub hover_control: String,
    pub hover_control_content: String,
    /// Background behind tool option labels.
    pub tool_control_name_color: String,
    pub active_control: String,
    pub active_control_content: String,
    pub input_border_color: String,
    pub input_background: String,
    pub input_text: String,
    /// Area around the drawing surface.
    pub background_color: String,
    /// Highlight shown while a file is dragged over the bar.
    pub drag_over_bar_color: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl ColorScheme {
    /// Resolves every role from an optional caller-supplied object.
    ///
    /// A missing or non-object value resolves to the built-in scheme.
    pub fn resolve(caller: Option<&Value>) -> Self {
        let empty = Map::new();
        let caller = caller.and_then(Value::as_object).unwrap_or(&empty);
        let roles = resolve_roles(caller);
        let role = |key: &str| roles.get(key).cloned().unwrap_or_default();

        Self {
            main: role("main"),
            control: role("control"),
            control_content: role("controlContent"),
            hover_control: role("hoverControl"),
            hover_control_content: role("hoverControlContent"),
            tool_control_name_color: role("toolControlNameColor"),
            active_control: role("activeControl"),
            active_control_content: role("activeControlContent"),
            input_border_color: role("inputBorderColor"),
            input_background: role("inputBackground"),
            input_text: role("inputText"),
            background_color: role("backgroundColor"),
            drag_over_bar_color: role("dragOverBarColor"),
        }
    }
}

// ============================================================================
// Role Table
// ============================================================================

/// Where a role falls back to when the caller leaves it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Literal(&'static str),
    /// Another role, which must appear earlier in [`ROLES`].
    Role(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSpec {
    pub key: &'static str,
    pub fallback: Fallback,
}

const fn role(key: &'static str, fallback: Fallback) -> RoleSpec {
    RoleSpec { key, fallback }
}

/// Color roles in dependency order.
pub const ROLES: &[RoleSpec] = &[
    role("main", Fallback::Literal("#dbebff")),
    role("control", Fallback::Literal("#abc6ff")),
    role("controlContent", Fallback::Literal("#000000")),
    role("hoverControl", Fallback::Role("control")),
    role("hoverControlContent", Fallback::Literal("#1a3d67")),
    role("toolControlNameColor", Fallback::Literal("rgba(255,255,255,0.7)")),
    role("activeControl", Fallback::Literal("#7485B1")),
    role("activeControlContent", Fallback::Role("main")),
    role("inputBorderColor", Fallback::Role("main")),
    role("inputBackground", Fallback::Literal("#ffffff")),
    role("inputText", Fallback::Role("activeControl")),
    role("backgroundColor", Fallback::Literal("#999999")),
    role("dragOverBarColor", Fallback::Literal("#899dff")),
];

/// Resolves [`ROLES`] in order into a role → color map.
///
/// Truthy non-string caller values are rendered as their JSON text.
fn resolve_roles(caller: &Map<String, Value>) -> HashMap<&'static str, String> {
    let mut resolved: HashMap<&'static str, String> = HashMap::with_capacity(ROLES.len());

    for spec in ROLES {
        let value = match caller.get(spec.key) {
            Some(v) if is_truthy(v) => as_color_text(v),
            _ => match spec.fallback {
                Fallback::Literal(color) => color.to_string(),
                Fallback::Role(source) => resolved.get(source).cloned().unwrap_or_default(),
            },
        };
        resolved.insert(spec.key, value);
    }

    resolved
}

fn as_color_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
