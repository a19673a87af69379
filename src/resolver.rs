//! Parameter resolution across persisted, caller and default layers.
//!
//! [`resolve_parameters`] is the pure merge: it applies the option table,
//! resolves the color scheme, normalizes `defaultSize`, enforces the tool
//! constraints and derives the composited colors and stylesheet.
//! [`ParameterResolver`] adds the preference store in front of it and the
//! collaborator calls behind it.
//!
//! # Example
//!
//! ```
//! use ptro_params::{MemoryStore, NoopRegistry, ParameterResolver};
//! use serde_json::json;
//!
//! let mut resolver = ParameterResolver::new(MemoryStore::new());
//! resolver.set_param("activeColor", "#1a3d67");
//!
//! let params = json!({ "defaultSize": "800x600", "activeColor": "#222222" });
//! let config = resolver
//!     .set_defaults(params.as_object().cloned().unwrap(), &mut NoopRegistry, &mut NoopRegistry)
//!     .unwrap();
//!
//! assert_eq!(config.active_color, "#1a3d67");
//! assert_eq!(config.default_size.width, "800");
//! assert_eq!(config.active_alpha_color, "rgba(26,61,103,1)");
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ResolvedConfig;
use crate::effects::{Effects, PasteOptionRegistry, TranslationRegistry};
use crate::error::ParamsError;
use crate::options::{OPTIONS, OptionSpec};
use crate::scheme::ColorScheme;
use crate::size::SizeSpec;
use crate::store::{KeyValueStore, PreferenceStore, Preferences};

/// Parameters supplied by the embedding application.
pub type CallerParameters = Map<String, Value>;

const COLOR_SCHEME_KEY: &str = "colorScheme";
const DEFAULT_SIZE_KEY: &str = "defaultSize";

// ============================================================================
// Resolution
// ============================================================================

/// A recoverable problem found and corrected during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// `defaultTool` was listed in `hiddenTools` and has been unhidden.
    DefaultToolHidden { tool: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultToolHidden { tool } => write!(
                f,
                "cannot hide the default tool `{tool}`; choose another default tool to hide it"
            ),
        }
    }
}

/// Output of a resolution: the configuration plus what still has to happen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub config: ResolvedConfig,
    /// Collaborator calls requested by the caller parameters, not yet applied.
    pub effects: Effects,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves `params` against `persisted` using `options`.
///
/// Pure apart from logging. `params` is consumed; its unrecognized entries end
/// up in [`ResolvedConfig::extra`].
pub fn resolve_parameters(
    persisted: &Preferences,
    mut params: CallerParameters,
    options: &[OptionSpec],
) -> Result<Resolution, ParamsError> {
    let effects = Effects::from_params(&params)?;

    for spec in options {
        let value = spec.resolve(persisted, &params)?;
        params.insert(spec.key.to_string(), value);
    }

    let scheme = ColorScheme::resolve(params.get(COLOR_SCHEME_KEY));
    params.insert(COLOR_SCHEME_KEY.to_string(), serde_json::to_value(scheme)?);

    if let Some(size) = params.get(DEFAULT_SIZE_KEY) {
        let size = SizeSpec::normalize(size)?;
        params.insert(DEFAULT_SIZE_KEY.to_string(), serde_json::to_value(size)?);
    }

    let mut config: ResolvedConfig = serde_json::from_value(Value::Object(params))?;

    let mut diagnostics = Vec::new();
    if config.unhide_default_tool() {
        let diagnostic = Diagnostic::DefaultToolHidden {
            tool: config.default_tool.clone(),
        };
        log::warn!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    config.composite_colors()?;
    config.refresh_styles();

    Ok(Resolution {
        config,
        effects,
        diagnostics,
    })
}

// ============================================================================
// ParameterResolver
// ============================================================================

/// Resolves widget parameters against stored user preferences.
///
/// Owns the [`PreferenceStore`]; preferences are reloaded at the start of
/// every resolution and written through on every [`set_param`](Self::set_param).
pub struct ParameterResolver<S> {
    store: PreferenceStore<S>,
    options: Vec<OptionSpec>,
}

impl<S: KeyValueStore> ParameterResolver<S> {
    /// Creates a resolver over `backend` with the built-in option table.
    pub fn new(backend: S) -> Self {
        Self::with_store(PreferenceStore::new(backend))
    }

    pub fn with_store(store: PreferenceStore<S>) -> Self {
        Self {
            store,
            options: OPTIONS.to_vec(),
        }
    }

    /// Replaces the option table.
    pub fn with_options(mut self, options: Vec<OptionSpec>) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PreferenceStore<S> {
        &mut self.store
    }

    /// Persists one user preference immediately.
    pub fn set_param(&mut self, name: &str, value: impl Into<Value>) {
        self.store.save(name, value.into());
    }

    /// Reloads preferences and resolves `params` without applying effects.
    pub fn resolve(&mut self, params: CallerParameters) -> Result<Resolution, ParamsError> {
        let persisted = self.store.load();
        log::debug!("Resolving parameters against {} stored preferences", persisted.len());
        resolve_parameters(&persisted, params, &self.options)
    }

    /// Full resolution: reload preferences, merge, then issue collaborator calls.
    pub fn set_defaults(
        &mut self,
        params: CallerParameters,
        translations: &mut dyn TranslationRegistry,
        paste: &mut dyn PasteOptionRegistry,
    ) -> Result<ResolvedConfig, ParamsError> {
        let Resolution { config, effects, .. } = self.resolve(params)?;
        effects.apply(translations, paste);
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
