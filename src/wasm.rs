//! JavaScript bindings for browser embedders.
//!
//! This module is only available with the `tsify` feature enabled:
//!
//! ```toml
//! [dependencies]
//! ptro-params = { version = "0.1", features = ["tsify"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { WidgetParams } from 'ptro-params';
//!
//! await init();
//!
//! const params = new WidgetParams(localStorage.getItem('painterro-data'));
//! const { config, effects, diagnostics } = params.setDefaults({ defaultSize: '800x600' });
//!
//! params.setParam('activeColor', '#1a3d67');
//! localStorage.setItem('painterro-data', params.storedJson());
//! ```
//!
//! The binding keeps preferences in memory; persisting [`WidgetParams::stored_json`]
//! is left to the page. Effects are returned rather than applied.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::resolver::{CallerParameters, ParameterResolver};
use crate::store::{KeyValueStore, MemoryStore, STORAGE_KEY};

// ============================================================================
// WidgetParams
// ============================================================================

/// Parameter resolver exposed to JavaScript.
#[wasm_bindgen]
pub struct WidgetParams {
    resolver: ParameterResolver<MemoryStore>,
}

#[wasm_bindgen]
impl WidgetParams {
    /// Creates a resolver seeded with the raw stored preference JSON, if any.
    ///
    /// Unparseable input is tolerated and treated as no stored preferences.
    #[wasm_bindgen(constructor)]
    pub fn new(stored: Option<String>) -> WidgetParams {
        let backend = match stored {
            Some(json) => MemoryStore::new().with_entry(STORAGE_KEY, json),
            None => MemoryStore::new(),
        };
        Self {
            resolver: ParameterResolver::new(backend),
        }
    }

    /// Resolves caller parameters.
    ///
    /// Returns `{ config, effects, diagnostics }` as a plain object.
    #[wasm_bindgen(js_name = "setDefaults")]
    pub fn set_defaults(&mut self, params: JsValue) -> Result<JsValue, JsError> {
        let params: CallerParameters = if params.is_undefined() || params.is_null() {
            CallerParameters::new()
        } else {
            serde_wasm_bindgen::from_value(params)
                .map_err(|e| JsError::new(&format!("Parameters must be an object: {}", e)))?
        };

        let resolution = self.resolver.resolve(params)?;
        for diagnostic in &resolution.diagnostics {
            web_warn(&diagnostic.to_string());
        }

        resolution
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsError::new(&format!("Failed to serialize resolution: {}", e)))
    }

    /// Persists a single user preference.
    #[wasm_bindgen(js_name = "setParam")]
    pub fn set_param(&mut self, name: &str, value: JsValue) -> Result<(), JsError> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Unsupported value for `{}`: {}", name, e)))?;
        self.resolver.set_param(name, value);
        Ok(())
    }

    /// Returns the serialized preference mapping, for writing back to page storage.
    #[wasm_bindgen(js_name = "storedJson")]
    pub fn stored_json(&self) -> Option<String> {
        let store = self.resolver.store();
        store.backend().get(store.key()).ok().flatten()
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn web_warn(message: &str);
}
