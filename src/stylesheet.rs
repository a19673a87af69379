//! Stylesheet generation from a resolved color scheme.
//!
//! [`generate`] substitutes the scheme's roles into a fixed rule set and
//! positions the toolbar. Output is plain CSS:
//!
//! ```css
//! .ptro-color-main {
//!   background-color: #dbebff;
//!   color: #000000;
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::scheme::ColorScheme;

/// Height reserved for the toolbar.
pub const TOOLBAR_HEIGHT: &str = "40px";

// ============================================================================
// ToolbarPosition
// ============================================================================

/// Edge of the widget the toolbar is anchored to.
///
/// Deserializes leniently: `"top"` is [`Top`](Self::Top) and any other string
/// is [`Bottom`](Self::Bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum ToolbarPosition {
    Top,
    #[default]
    Bottom,
}

impl ToolbarPosition {
    pub fn from_name(name: &str) -> Self {
        if name == "top" { Self::Top } else { Self::Bottom }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl<'de> Deserialize<'de> for ToolbarPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

// ============================================================================
// Rules
// ============================================================================

struct StyleRule<'a> {
    selector: &'static str,
    declarations: Vec<(&'static str, &'a str)>,
}

impl<'a> StyleRule<'a> {
    fn new(selector: &'static str, declarations: Vec<(&'static str, &'a str)>) -> Self {
        Self {
            selector,
            declarations,
        }
    }
}

impl fmt::Display for StyleRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            writeln!(f, "  {property}: {value};")?;
        }
        writeln!(f, "}}")
    }
}

/// Builds the widget stylesheet.
///
/// Pure and deterministic: equal inputs always produce byte-identical text.
///
/// ```
/// use ptro_params::{generate_stylesheet, ColorScheme, ToolbarPosition};
///
/// let css = generate_stylesheet(&ColorScheme::default(), ToolbarPosition::Top);
/// assert!(css.contains(".ptro-bar {\n  top: 0;\n}"));
/// ```
pub fn generate(scheme: &ColorScheme, position: ToolbarPosition) -> String {
    let input_border = format!("1px solid {}", scheme.input_border_color);
    let (wrapper_bottom, wrapper_top) = match position {
        ToolbarPosition::Top => ("0", TOOLBAR_HEIGHT),
        ToolbarPosition::Bottom => (TOOLBAR_HEIGHT, "0"),
    };

    let rules = [
        StyleRule::new(
            ".ptro-color-main",
            vec![
                ("background-color", scheme.main.as_str()),
                ("color", scheme.control_content.as_str()),
            ],
        ),
        StyleRule::new(
            ".ptro-color-control",
            vec![
                ("background-color", scheme.control.as_str()),
                ("color", scheme.control_content.as_str()),
            ],
        ),
        StyleRule::new(
            ".ptro-tool-ctl-name",
            vec![("background-color", scheme.tool_control_name_color.as_str())],
        ),
        StyleRule::new(
            "button.ptro-color-control:hover:not(.ptro-color-active-control):not([disabled])",
            vec![
                ("background-color", scheme.hover_control.as_str()),
                ("color", scheme.hover_control_content.as_str()),
            ],
        ),
        StyleRule::new(
            ".ptro-bordered-control",
            vec![("border-color", scheme.active_control.as_str())],
        ),
        StyleRule::new(
            "input.ptro-input, input.ptro-input:focus, select.ptro-input, select.ptro-input:focus",
            vec![
                ("border", input_border.as_str()),
                ("background-color", scheme.input_background.as_str()),
                ("color", scheme.input_text.as_str()),
            ],
        ),
        StyleRule::new(
            ".ptro-bar-dragover",
            vec![("background-color", scheme.drag_over_bar_color.as_str())],
        ),
        StyleRule::new(".ptro-color, .ptro-bordered-btn", vec![("border", input_border.as_str())]),
        StyleRule::new(
            ".ptro-color-control:active:enabled",
            vec![
                ("background-color", scheme.active_control.as_str()),
                ("color", scheme.active_control_content.as_str()),
            ],
        ),
        StyleRule::new(
            ".ptro-color-active-control",
            vec![
                ("background-color", scheme.active_control.as_str()),
                ("color", scheme.active_control_content.as_str()),
            ],
        ),
        StyleRule::new(
            ".ptro-wrapper",
            vec![
                ("background-color", scheme.background_color.as_str()),
                ("bottom", wrapper_bottom),
                ("top", wrapper_top),
            ],
        ),
        StyleRule::new(".ptro-bar", vec![(position.as_str(), "0")]),
    ];

    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn custom_scheme() -> ColorScheme {
        ColorScheme::resolve(Some(&json!({
            "main": "#010101",
            "control": "#020202",
            "controlContent": "#030303",
            "hoverControlContent": "#040404",
            "activeControl": "#050505",
            "inputBackground": "#060606",
            "backgroundColor": "#070707",
            "dragOverBarColor": "#080808",
        })))
    }

    #[test]
    fn output_is_deterministic() {
        let scheme = custom_scheme();
        let first = generate(&scheme, ToolbarPosition::Bottom);
        let second = generate(&scheme.clone(), ToolbarPosition::Bottom);
        assert_eq!(first, second);
    }

    #[test]
    fn scheme_roles_are_substituted() {
        let css = generate(&custom_scheme(), ToolbarPosition::Bottom);

        assert!(css.starts_with(
            ".ptro-color-main {\n  background-color: #010101;\n  color: #030303;\n}\n"
        ));
        assert!(css.contains(
            "button.ptro-color-control:hover:not(.ptro-color-active-control):not([disabled]) {\n  background-color: #020202;\n  color: #040404;\n}"
        ));
        assert!(css.contains(".ptro-bordered-control {\n  border-color: #050505;\n}"));
        assert!(css.contains(
            "  border: 1px solid #010101;\n  background-color: #060606;\n  color: #050505;\n"
        ));
        assert!(css.contains(".ptro-bar-dragover {\n  background-color: #080808;\n}"));
        assert!(css.contains(".ptro-color, .ptro-bordered-btn {\n  border: 1px solid #010101;\n}"));
        assert!(css.contains(
            ".ptro-color-active-control {\n  background-color: #050505;\n  color: #010101;\n}"
        ));
    }

    #[test]
    fn bottom_toolbar_offsets_wrapper_bottom() {
        let css = generate(&ColorScheme::default(), ToolbarPosition::Bottom);

        assert!(css.contains(
            ".ptro-wrapper {\n  background-color: #999999;\n  bottom: 40px;\n  top: 0;\n}"
        ));
        assert!(css.ends_with(".ptro-bar {\n  bottom: 0;\n}\n"));
    }

    #[test]
    fn top_toolbar_offsets_wrapper_top() {
        let css = generate(&ColorScheme::default(), ToolbarPosition::Top);

        assert!(css.contains(
            ".ptro-wrapper {\n  background-color: #999999;\n  bottom: 0;\n  top: 40px;\n}"
        ));
        assert!(css.ends_with(".ptro-bar {\n  top: 0;\n}\n"));
    }

    #[test]
    fn emits_every_rule_once() {
        let css = generate(&ColorScheme::default(), ToolbarPosition::Bottom);
        assert_eq!(css.matches(" {\n").count(), 12);
    }

    #[test]
    fn toolbar_position_parses_leniently() {
        let top: ToolbarPosition = serde_json::from_value(json!("top")).unwrap();
        let left: ToolbarPosition = serde_json::from_value(json!("left")).unwrap();
        assert_eq!(top, ToolbarPosition::Top);
        assert_eq!(left, ToolbarPosition::Bottom);
        assert_eq!(serde_json::to_value(ToolbarPosition::Top).unwrap(), json!("top"));
    }
}
