// SPDX-License-Identifier: PMPL-1.0-or-later

//! Store configuration: default locale, startup locale and release gating.
//!
//! ```yaml
//! default_locale: fr
//! initial_locale: fr
//! enabled_locales: [fr, en]   # omit to use the registry's own gating
//! ```

use crate::error::{ConfigError, LocaleError};
use crate::i18n::{Lang, LocaleRegistry, LocaleStatus, TranslationTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Environment variable carrying a persisted locale preference.
pub const LOCALE_ENV: &str = "PLANNING_I18N_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Locale the store falls back to when nothing else is usable.
    pub default_locale: Lang,
    /// Preferred locale at startup; ignored (and reported) if unusable.
    pub initial_locale: Option<Lang>,
    /// Overrides the registry's release gating when set.
    pub enabled_locales: Option<Vec<Lang>>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_locale: Lang::Fr,
            initial_locale: None,
            enabled_locales: None,
        }
    }
}

impl StoreConfig {
    /// Load from `.yaml`/`.yml` or `.json`, chosen by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|err| parse_error(err.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))
            }
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Apply [`LOCALE_ENV`] if it is set and non-empty.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        let value = std::env::var(LOCALE_ENV).ok();
        self.with_locale_override(value.as_deref())
    }

    /// Replace `initial_locale` with a tag such as `fr-FR`. Blank values
    /// leave the configuration untouched.
    pub fn with_locale_override(mut self, tag: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(tag) = tag.filter(|tag| !tag.trim().is_empty()) {
            let lang = Lang::parse_tag(tag).map_err(|source| ConfigError::Environment {
                variable: LOCALE_ENV,
                source,
            })?;
            self.initial_locale = Some(lang);
        }
        Ok(self)
    }

    /// Table for `lang` if this configuration allows activating it.
    pub fn resolve(
        &self,
        registry: &LocaleRegistry,
        lang: Lang,
    ) -> Result<Arc<TranslationTable>, LocaleError> {
        let table = registry.table(lang).ok_or(LocaleError::NotCompiled(lang))?;
        let enabled = match &self.enabled_locales {
            Some(list) => list.contains(&lang),
            None => registry.status(lang) == Some(LocaleStatus::Enabled),
        };
        if enabled {
            Ok(table)
        } else {
            Err(LocaleError::Disabled(lang))
        }
    }

    pub fn is_usable(&self, registry: &LocaleRegistry, lang: Lang) -> bool {
        self.resolve(registry, lang).is_ok()
    }

    pub fn validate(&self, registry: &LocaleRegistry) -> Result<(), ConfigError> {
        self.resolve(registry, self.default_locale)
            .map(|_| ())
            .map_err(ConfigError::UnusableDefault)
    }
}
