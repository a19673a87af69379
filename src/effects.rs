//! Collaborator calls triggered by caller parameters.
//!
//! Resolution itself is pure. Parameters that configure external registries
//! (`language`, `how_to_paste_actions`, `translation`) are captured as
//! [`Effects`] and applied afterwards against the embedder's registries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParamsError;
use crate::options::is_truthy;

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Registry of UI translation strings.
pub trait TranslationRegistry {
    /// Registers (or replaces) a named table of strings.
    fn add_translation(&mut self, name: &str, strings: &Map<String, Value>);

    /// Makes the named translation current.
    fn activate(&mut self, name: &str);
}

/// Registry deciding which paste actions the widget offers.
pub trait PasteOptionRegistry {
    fn set_active_paste_options(&mut self, options: &[String]);
}

/// Registry that ignores every call, for embedders without translations or
/// paste options.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRegistry;

impl TranslationRegistry for NoopRegistry {
    fn add_translation(&mut self, _name: &str, _strings: &Map<String, Value>) {}

    fn activate(&mut self, _name: &str) {}
}

impl PasteOptionRegistry for NoopRegistry {
    fn set_active_paste_options(&mut self, _options: &[String]) {}
}

// ============================================================================
// Effects
// ============================================================================

/// A named table of translation strings supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationBundle {
    pub name: String,
    #[serde(default)]
    pub strings: Map<String, Value>,
}

/// Collaborator calls requested by one set of caller parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    /// Language to activate (`language` parameter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Paste actions to offer (`how_to_paste_actions` parameter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paste_options: Option<Vec<String>>,

    /// Translation to register and activate (`translation` parameter).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<TranslationBundle>,
}

impl Effects {
    /// Reads the effect-triggering parameters. Falsy values request nothing.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, ParamsError> {
        Ok(Self {
            language: take(params, "language")?,
            paste_options: take(params, "how_to_paste_actions")?,
            translation: take(params, "translation")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.language.is_none() && self.paste_options.is_none() && self.translation.is_none()
    }

    /// Issues the collaborator calls: language, then paste options, then the
    /// translation bundle (registered before it is activated).
    pub fn apply(
        &self,
        translations: &mut dyn TranslationRegistry,
        paste: &mut dyn PasteOptionRegistry,
    ) {
        if let Some(language) = &self.language {
            log::debug!("Activating language `{language}`");
            translations.activate(language);
        }

        if let Some(options) = &self.paste_options {
            paste.set_active_paste_options(options);
        }

        if let Some(bundle) = &self.translation {
            log::debug!("Registering translation `{}`", bundle.name);
            translations.add_translation(&bundle.name, &bundle.strings);
            translations.activate(&bundle.name);
        }
    }
}

fn take<T: serde::de::DeserializeOwned>(
    params: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<T>, ParamsError> {
    match params.get(key) {
        Some(value) if is_truthy(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|source| ParamsError::InvalidEffect { key, source }),
        _ => Ok(None),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Records every collaborator call in order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl TranslationRegistry for Recorder {
        fn add_translation(&mut self, name: &str, strings: &Map<String, Value>) {
            self.calls.push(format!("add:{name}:{}", strings.len()));
        }

        fn activate(&mut self, name: &str) {
            self.calls.push(format!("activate:{name}"));
        }
    }

    impl PasteOptionRegistry for Recorder {
        fn set_active_paste_options(&mut self, options: &[String]) {
            self.calls.push(format!("paste:{}", options.join(",")));
        }
    }

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn no_parameters_means_no_effects() {
        let effects = Effects::from_params(&Map::new()).unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn falsy_parameters_are_ignored() {
        let effects = Effects::from_params(&params(json!({
            "language": "",
            "how_to_paste_actions": null,
            "translation": false,
        })))
        .unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn effects_apply_in_order() {
        let effects = Effects::from_params(&params(json!({
            "language": "de",
            "how_to_paste_actions": ["replace_all", "paste_over"],
            "translation": { "name": "pirate", "strings": { "save": "Stash", "close": "Abandon ship" } },
        })))
        .unwrap();

        let mut translations = Recorder::default();
        let mut paste = Recorder::default();
        effects.apply(&mut translations, &mut paste);

        assert_eq!(translations.calls, ["activate:de", "add:pirate:2", "activate:pirate"]);
        assert_eq!(paste.calls, ["paste:replace_all,paste_over"]);
    }

    #[test]
    fn malformed_translation_is_an_error() {
        let err = Effects::from_params(&params(json!({ "translation": "pirate" }))).unwrap_err();
        assert!(matches!(err, ParamsError::InvalidEffect { key: "translation", .. }));
    }

    #[test]
    fn noop_registry_accepts_everything() {
        let effects = Effects::from_params(&params(json!({ "language": "fr" }))).unwrap();
        effects.apply(&mut NoopRegistry, &mut NoopRegistry);
    }
}
