//! ptro-params: configuration resolution for an embeddable image-editing widget
//!
//! The widget's effective configuration is assembled from three layers:
//! preferences persisted from earlier sessions, parameters supplied by the
//! embedding application, and built-in defaults. This crate merges them,
//! derives the composited `rgba(...)` colors and the widget stylesheet, and
//! persists user preferences as they change.
//!
//! # Example
//!
//! ```
//! use ptro_params::{MemoryStore, ParameterResolver, ToolbarPosition};
//! use serde_json::json;
//!
//! let mut resolver = ParameterResolver::new(MemoryStore::new());
//!
//! let params = json!({
//!     "defaultTool": "brush",
//!     "hiddenTools": ["brush", "crop"],
//!     "toolbarPosition": "top",
//!     "colorScheme": { "main": "#fafafa" },
//! });
//! let resolution = resolver.resolve(params.as_object().cloned().unwrap()).unwrap();
//!
//! assert_eq!(resolution.config.hidden_tools, ["crop"]);
//! assert_eq!(resolution.config.toolbar_position, ToolbarPosition::Top);
//! assert_eq!(resolution.config.color_scheme.control_content, "#000000");
//! assert_eq!(resolution.diagnostics.len(), 1);
//! ```
//!
//! # Stored Preferences
//!
//! Preferences are written through a [`KeyValueStore`]. [`FileStore`] keeps
//! them as JSON files in a directory:
//!
//! ```no_run
//! use ptro_params::{FileStore, ParameterResolver, CallerParameters};
//!
//! let mut resolver = ParameterResolver::new(FileStore::in_config_dir("painterro"));
//! resolver.set_param("defaultLineWidth", 8);
//!
//! let config = resolver.resolve(CallerParameters::new()).unwrap().config;
//! assert_eq!(config.default_line_width, 8.0);
//! ```

mod color;
mod config;
mod effects;
mod error;
mod options;
mod resolver;
mod scheme;
mod size;
mod store;
mod stylesheet;

#[cfg(feature = "tsify")]
mod wasm;

pub use color::{AlphaColor, composite, parse_hex};
pub use config::ResolvedConfig;
pub use effects::{
    Effects, NoopRegistry, PasteOptionRegistry, TranslationBundle, TranslationRegistry,
};
pub use error::ParamsError;
pub use options::{
    DefaultValue, Layers, OPTIONS, OptionSpec, Precedence, ValueKind, find as find_option,
    is_defined, is_truthy,
};
pub use resolver::{CallerParameters, Diagnostic, ParameterResolver, Resolution, resolve_parameters};
pub use scheme::{ColorScheme, Fallback, ROLES, RoleSpec};
pub use size::{FILL, SizeSpec};
pub use store::{
    FileStore, KeyValueStore, MemoryStore, PreferenceStore, Preferences, STORAGE_KEY,
    StorageError,
};
pub use stylesheet::{TOOLBAR_HEIGHT, ToolbarPosition, generate as generate_stylesheet};

#[cfg(feature = "tsify")]
pub use wasm::WidgetParams;
