// SPDX-License-Identifier: PMPL-1.0-or-later

//! The translation store consumed by the console's widgets.
//!
//! One [`Observable`] holds the active table. `get` reads it, the
//! `set_active_locale*` family is the only writer, and subscribers hear
//! about a swap before the writer returns.

use crate::config::StoreConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{ConfigError, LocaleError};
use crate::i18n::{Lang, LocaleRegistry, TranslationTable};
use crate::reactive::{Observable, Subscription};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

const UNSUPPORTED_LOCALE: &str = "unsupported locale";

/// Reference to the table currently used for lookups.
#[derive(Debug, Clone)]
pub struct ActiveTable {
    lang: Lang,
    table: Arc<TranslationTable>,
}

impl ActiveTable {
    fn new(table: Arc<TranslationTable>) -> Self {
        Self {
            lang: table.lang(),
            table,
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }
}

// Identity, not contents: two references are equal when they point at the
// same registered table.
impl PartialEq for ActiveTable {
    fn eq(&self, other: &Self) -> bool {
        self.lang == other.lang && Arc::ptr_eq(&self.table, &other.table)
    }
}

/// Reactive, fallback-safe text lookup.
///
/// Clones share the active table and its subscribers, so every widget can
/// hold its own handle.
///
/// # Examples
///
/// ```
/// use planning_i18n::i18n::{Lang, TranslationStore};
///
/// let store = TranslationStore::builtin().unwrap();
/// assert_eq!(store.get("SAVE"), "Enregistrer");
/// assert_eq!(store.get("NOT_TRANSLATED_YET"), "NOT_TRANSLATED_YET");
///
/// // English is compiled but not released: the switch is reported and ignored.
/// store.set_active_locale(Lang::En);
/// assert_eq!(store.active_locale(), Lang::Fr);
/// ```
#[derive(Clone)]
pub struct TranslationStore {
    registry: Arc<LocaleRegistry>,
    config: Rc<StoreConfig>,
    active: Observable<ActiveTable>,
    sink: Rc<dyn DiagnosticSink>,
}

impl fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationStore")
            .field("active", &self.active_locale())
            .field("default", &self.config.default_locale)
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

impl TranslationStore {
    /// Built-in tables with the default configuration, reporting to
    /// `tracing`.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(LocaleRegistry::builtin(), StoreConfig::default())
    }

    pub fn new(registry: Arc<LocaleRegistry>, config: StoreConfig) -> Result<Self, ConfigError> {
        Self::with_sink(registry, config, Rc::new(TracingSink))
    }

    /// Start on `config.initial_locale` when it is usable, otherwise on the
    /// default locale. Fails only when the default locale itself is
    /// unusable, since the store would have nothing to display.
    pub fn with_sink(
        registry: Arc<LocaleRegistry>,
        config: StoreConfig,
        sink: Rc<dyn DiagnosticSink>,
    ) -> Result<Self, ConfigError> {
        let default_table = config
            .resolve(&registry, config.default_locale)
            .map_err(ConfigError::UnusableDefault)?;

        let initial_table = match config.initial_locale {
            Some(lang) if lang != config.default_locale => {
                match config.resolve(&registry, lang) {
                    Ok(table) => table,
                    Err(err) => {
                        sink.report(Diagnostic::error(
                            UNSUPPORTED_LOCALE,
                            format!("{err}; starting on {}", config.default_locale),
                        ));
                        default_table
                    }
                }
            }
            _ => default_table,
        };

        tracing::debug!(locale = %initial_table.lang(), "translation store ready");
        Ok(Self {
            registry,
            config: Rc::new(config),
            active: Observable::new(ActiveTable::new(initial_table)),
            sink,
        })
    }

    /// Text for `key` in the active table, or `key` itself when the table
    /// has no (or an empty) entry for it.
    pub fn get(&self, key: &str) -> String {
        self.active
            .with(|active| active.table.get(key).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }

    /// Switch locales and tell the caller what happened: `Ok(true)` when the
    /// active table was swapped, `Ok(false)` when `lang` was already active.
    /// Nothing is reported on error; see [`Self::set_active_locale`].
    pub fn try_set_active_locale(&self, lang: Lang) -> Result<bool, LocaleError> {
        let table = self.config.resolve(&self.registry, lang)?;
        let previous = self.active_locale();
        let swapped = self.active.set(ActiveTable::new(table));
        if swapped {
            tracing::debug!(from = %previous, to = %lang, "active locale switched");
        }
        Ok(swapped)
    }

    /// Switch to `lang`. An unusable locale is reported to the diagnostic
    /// sink and the current table stays active.
    pub fn set_active_locale(&self, lang: Lang) {
        if let Err(err) = self.try_set_active_locale(lang) {
            self.report_rejection(&err);
        }
    }

    /// Switch using a raw identifier such as a stored preference or an
    /// `Accept-Language` entry. Unrecognized identifiers are reported like
    /// any other unsupported locale.
    pub fn set_active_locale_code(&self, code: &str) {
        match Lang::parse_tag(code) {
            Ok(lang) => self.set_active_locale(lang),
            Err(err) => self.report_rejection(&err),
        }
    }

    fn report_rejection(&self, err: &LocaleError) {
        self.sink.report(Diagnostic::error(
            UNSUPPORTED_LOCALE,
            format!("{err}; keeping {}", self.active_locale()),
        ));
    }

    pub fn active_locale(&self) -> Lang {
        self.active.with(ActiveTable::lang)
    }

    pub fn default_locale(&self) -> Lang {
        self.config.default_locale
    }

    /// Locales `set_active_locale` would accept, in display order.
    pub fn available_locales(&self) -> Vec<Lang> {
        self.registry
            .compiled()
            .filter(|lang| self.config.is_usable(&self.registry, *lang))
            .collect()
    }

    /// Call `callback` after every swap of the active table, with the new
    /// table. Reads and no-op switches never call it.
    pub fn subscribe(&self, callback: impl Fn(&ActiveTable) + 'static) -> Subscription {
        self.active.subscribe(callback)
    }

    /// Number of swaps so far; cheap dirty check for render loops.
    pub fn version(&self) -> u64 {
        self.active.version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Level, MemorySink};

    fn store_with(config: StoreConfig) -> (TranslationStore, Rc<MemorySink>) {
        let registry = Arc::new(
            LocaleRegistry::builder()
                .table(Lang::Fr, [("SAVE", "Enregistrer"), ("EMPTY", "")])
                .table(Lang::En, [("SAVE", "Save")])
                .build(),
        );
        let sink = Rc::new(MemorySink::new());
        let store = TranslationStore::with_sink(registry, config, sink.clone()).unwrap();
        (store, sink)
    }

    #[test]
    fn lookup_falls_back_to_key() {
        let (store, sink) = store_with(StoreConfig::default());
        assert_eq!(store.get("SAVE"), "Enregistrer");
        assert_eq!(store.get("CANCEL"), "CANCEL");
        assert_eq!(store.get("EMPTY"), "EMPTY");
        assert_eq!(store.get(""), "");
        assert!(sink.records().is_empty());
    }

    #[test]
    fn try_switch_reports_outcome() {
        let (store, _sink) = store_with(StoreConfig::default());
        assert_eq!(store.try_set_active_locale(Lang::En), Ok(true));
        assert_eq!(store.try_set_active_locale(Lang::En), Ok(false));
        assert_eq!(store.get("SAVE"), "Save");
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn initial_locale_is_honoured() {
        let (store, _sink) = store_with(StoreConfig {
            initial_locale: Some(Lang::En),
            ..StoreConfig::default()
        });
        assert_eq!(store.active_locale(), Lang::En);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn unusable_initial_locale_starts_on_default() {
        let (store, sink) = store_with(StoreConfig {
            initial_locale: Some(Lang::En),
            enabled_locales: Some(vec![Lang::Fr]),
            ..StoreConfig::default()
        });
        assert_eq!(store.active_locale(), Lang::Fr);
        assert_eq!(sink.count(Level::Error), 1);
        assert!(sink.records()[0].detail.contains("starting on fr"));
    }

    #[test]
    fn unusable_default_fails_construction() {
        let registry = Arc::new(LocaleRegistry::builder().table(Lang::En, [("SAVE", "Save")]).build());
        let err = TranslationStore::new(registry, StoreConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnusableDefault(LocaleError::NotCompiled(Lang::Fr))
        ));
    }

    #[test]
    fn available_locales_follow_configuration() {
        let (store, _sink) = store_with(StoreConfig::default());
        assert_eq!(store.available_locales(), vec![Lang::Fr, Lang::En]);

        let (gated, _sink) = store_with(StoreConfig {
            enabled_locales: Some(vec![Lang::Fr]),
            ..StoreConfig::default()
        });
        assert_eq!(gated.available_locales(), vec![Lang::Fr]);
    }

    #[test]
    fn clones_share_state() {
        let (store, _sink) = store_with(StoreConfig::default());
        let widget = store.clone();
        let seen = Rc::new(std::cell::Cell::new(0));
        let seen_in = Rc::clone(&seen);
        let _sub = widget.subscribe(move |active| seen_in.set(active.table().len()));

        store.set_active_locale(Lang::En);
        assert_eq!(widget.active_locale(), Lang::En);
        assert_eq!(widget.get("SAVE"), "Save");
        assert_eq!(seen.get(), 1);
    }
}
