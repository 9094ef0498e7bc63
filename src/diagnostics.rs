// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diagnostic channel for recoverable conditions and the `check` command.
//!
//! The store never fails a caller over an unusable locale; it reports
//! through a [`DiagnosticSink`] instead. Production wires [`TracingSink`];
//! [`MemorySink`] keeps the records for tests and for self-diagnostics.

use crate::config::StoreConfig;
use crate::i18n::{Lang, LocaleRegistry, LocaleStatus};
use colored::*;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

impl Level {
    fn tag(&self) -> ColoredString {
        match self {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red().bold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub label: &'static str,
    pub level: Level,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(label: &'static str, level: Level, detail: impl Into<String>) -> Self {
        Self {
            label,
            level,
            detail: detail.into(),
        }
    }

    pub fn ok(label: &'static str, detail: impl Into<String>) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    pub fn warning(label: &'static str, detail: impl Into<String>) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    pub fn error(label: &'static str, detail: impl Into<String>) -> Self {
        Self::new(label, Level::Error, detail)
    }

    pub fn print(&self) {
        println!("  [{}] {:22} {}", self.level.tag(), self.label, self.detail);
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            Level::Ok => tracing::debug!(label = diagnostic.label, "{}", diagnostic.detail),
            Level::Warn => tracing::warn!(label = diagnostic.label, "{}", diagnostic.detail),
            Level::Error => tracing::error!(label = diagnostic.label, "{}", diagnostic.detail),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Level::Error) > 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.records.borrow_mut().push(diagnostic);
    }
}

/// Inspect configuration and registry the way an operator would before a
/// release: is the default usable, what would the store start on, and how
/// far is each compiled locale from the reference table.
pub fn run_self_diagnostics(
    config: &StoreConfig,
    registry: &LocaleRegistry,
    sink: &dyn DiagnosticSink,
) {
    sink.report(Diagnostic::ok(
        "version",
        format!("planning-i18n {}", env!("CARGO_PKG_VERSION")),
    ));

    match config.validate(registry) {
        Ok(()) => sink.report(Diagnostic::ok(
            "default locale",
            format!("{} ({})", config.default_locale, config.default_locale.english_name()),
        )),
        Err(err) => sink.report(Diagnostic::error("default locale", err.to_string())),
    }

    if let Some(initial) = config.initial_locale {
        if config.is_usable(registry, initial) {
            sink.report(Diagnostic::ok("initial locale", initial.to_string()));
        } else {
            sink.report(Diagnostic::warning(
                "initial locale",
                format!("{initial} unavailable, store will start on {}", config.default_locale),
            ));
        }
    }

    for lang in Lang::all() {
        sink.report(check_locale(config, registry, *lang));
    }

    match registry.coverage(config.default_locale) {
        Ok(report) => {
            for entry in report.iter().filter(|entry| entry.lang != config.default_locale) {
                let detail = format!(
                    "{}: {}/{} keys translated",
                    entry.lang, entry.translated, entry.total
                );
                if entry.is_complete() {
                    sink.report(Diagnostic::ok("coverage", detail));
                } else {
                    sink.report(Diagnostic::warning("coverage", detail));
                }
            }
        }
        Err(err) => sink.report(Diagnostic::error("coverage", err.to_string())),
    }
}

fn check_locale(config: &StoreConfig, registry: &LocaleRegistry, lang: Lang) -> Diagnostic {
    let usable = config.is_usable(registry, lang);
    match registry.status(lang) {
        None => Diagnostic::warning("locale", format!("{lang} has no compiled table")),
        Some(_) if usable => Diagnostic::ok("locale", format!("{lang} enabled")),
        Some(LocaleStatus::Disabled) => {
            Diagnostic::warning("locale", format!("{lang} compiled, not released"))
        }
        Some(LocaleStatus::Enabled) => {
            Diagnostic::warning("locale", format!("{lang} compiled, disabled by configuration"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_counts_levels() {
        let sink = MemorySink::new();
        sink.report(Diagnostic::ok("a", "fine"));
        sink.report(Diagnostic::error("b", "broken"));
        assert_eq!(sink.count(Level::Ok), 1);
        assert!(sink.has_errors());
        assert_eq!(sink.records()[1].detail, "broken");
    }

    #[test]
    fn builtin_defaults_pass_self_diagnostics() {
        let sink = MemorySink::new();
        run_self_diagnostics(&StoreConfig::default(), &LocaleRegistry::builtin(), &sink);
        assert!(!sink.has_errors(), "{:?}", sink.records());
        assert!(sink
            .records()
            .iter()
            .any(|d| d.detail == "en compiled, not released"));
    }

    #[test]
    fn unusable_default_is_an_error() {
        let config = StoreConfig {
            default_locale: Lang::En,
            ..StoreConfig::default()
        };
        let sink = MemorySink::new();
        run_self_diagnostics(&config, &LocaleRegistry::builtin(), &sink);
        assert!(sink.has_errors());
    }
}
