//! The fully resolved widget configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::composite;
use crate::error::ParamsError;
use crate::scheme::ColorScheme;
use crate::size::SizeSpec;
use crate::stylesheet::{self, ToolbarPosition};

/// Configuration consumed by the rest of the widget.
///
/// Every recognized option holds a concrete value. Caller parameters that are
/// not recognized are carried in [`extra`](Self::extra) and serialized back
/// alongside the recognized ones, so the JSON form is the caller's object with
/// all gaps filled:
///
/// ```json
/// {
///   "activeColor": "#ff0000",
///   "activeColorAlpha": 1.0,
///   "activeAlphaColor": "rgba(255,0,0,1)",
///   "defaultSize": { "width": "fill", "height": "fill" },
///   "toolbarPosition": "bottom",
///   "saveHandler": "onSave"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ResolvedConfig {
    pub active_color: String,
    pub active_color_alpha: f64,
    #[serde(default)]
    pub active_alpha_color: String,

    pub active_fill_color: String,
    pub active_fill_color_alpha: f64,
    #[serde(default)]
    pub active_fill_alpha_color: String,

    /// Text placed on the canvas at startup, if any.
    pub init_text: Option<String>,
    pub init_text_color: String,
    /// CSS font shorthand for `init_text`.
    pub init_text_style: String,

    pub default_line_width: f64,
    /// Arrow head angle in degrees.
    pub default_arrow_angle: f64,
    pub default_arrow_length: f64,
    pub default_eraser_width: f64,
    pub default_font_size: f64,
    pub font_stroke_size: f64,

    pub background_fill_color: String,
    pub background_fill_color_alpha: f64,
    #[serde(default)]
    pub background_fill_alpha_color: String,

    pub text_stroke_color: String,
    pub text_stroke_color_alpha: f64,
    #[serde(default)]
    pub text_stroke_alpha_color: String,

    /// Maximum number of undo states kept.
    pub worklog_limit: u32,

    pub default_tool: String,
    /// Tools not shown in the toolbar. Never contains `default_tool`.
    pub hidden_tools: Vec<String>,

    /// Pixelization cell size, absolute (`"8"`) or relative (`"20%"`).
    pub pixelize_pixel_size: String,

    pub color_scheme: ColorScheme,
    pub default_size: SizeSpec,
    pub default_pixel_size: u32,
    pub toolbar_position: ToolbarPosition,
    pub fix_mobile_page_reloader: bool,

    /// Generated stylesheet for `color_scheme` and `toolbar_position`.
    #[serde(default)]
    pub styles: String,

    /// Unrecognized caller parameters, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResolvedConfig {
    /// Removes every occurrence of `default_tool` from `hidden_tools`.
    ///
    /// Returns true when the default tool had been hidden.
    pub fn unhide_default_tool(&mut self) -> bool {
        let before = self.hidden_tools.len();
        let default_tool = &self.default_tool;
        self.hidden_tools.retain(|tool| tool != default_tool);
        self.hidden_tools.len() != before
    }

    /// Recomputes every `<X>AlphaColor` from its `<X>Color` and `<X>ColorAlpha`.
    pub fn composite_colors(&mut self) -> Result<(), ParamsError> {
        self.active_alpha_color =
            composite(&self.active_color, self.active_color_alpha)?.to_string();
        self.active_fill_alpha_color =
            composite(&self.active_fill_color, self.active_fill_color_alpha)?.to_string();
        self.background_fill_alpha_color =
            composite(&self.background_fill_color, self.background_fill_color_alpha)?.to_string();
        self.text_stroke_alpha_color =
            composite(&self.text_stroke_color, self.text_stroke_color_alpha)?.to_string();
        Ok(())
    }

    /// Regenerates [`styles`](Self::styles).
    pub fn refresh_styles(&mut self) {
        self.styles = stylesheet::generate(&self.color_scheme, self.toolbar_position);
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a previously resolved configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
