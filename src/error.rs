// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types shared by the store, the registry and configuration loading.

use crate::i18n::Lang;
use std::path::PathBuf;
use thiserror::Error;

/// Why a locale cannot become the active one.
///
/// Every variant is an unsupported-locale condition: the store reports it
/// and keeps its current table, it never hands it back through `get` or
/// `set_active_locale`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("unrecognized locale identifier `{0}`")]
    Unrecognized(String),

    #[error("locale `{0}` has no compiled translation table")]
    NotCompiled(Lang),

    #[error("locale `{0}` is not enabled for release")]
    Disabled(Lang),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config format for {} (expected .yaml, .yml or .json)", .path.display())]
    UnknownFormat { path: PathBuf },

    #[error("default locale is unusable: {0}")]
    UnusableDefault(#[source] LocaleError),

    #[error("invalid {variable}: {source}")]
    Environment {
        variable: &'static str,
        #[source]
        source: LocaleError,
    },
}
