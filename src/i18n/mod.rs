// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation for the planning console.
//!
//! ## Supported languages
//!
//! | Code | Language | Status                    |
//! |------|----------|---------------------------|
//! | fr   | French   | released, default         |
//! | en   | English  | compiled, not yet released |
//!
//! ## Design
//!
//! Keys are flat identifiers (`"SAVE"`, `"MISSION_START_DATE"`). Each
//! compiled locale has one immutable [`TranslationTable`]; the
//! [`TranslationStore`] points at exactly one of them at a time and
//! publishes every change of that pointer to its subscribers.
//!
//! Lookups are fail-open: a key the active table does not translate comes
//! back unchanged, so incomplete coverage shows raw keys instead of blank
//! labels. Requests for a locale that is unknown, not compiled or not
//! released are reported on the diagnostic channel and leave the current
//! locale in place.

mod catalog;
mod locale;
mod roles;
mod store;

pub use catalog::{LocaleCoverage, LocaleRegistry, LocaleStatus, RegistryBuilder, TranslationTable};
pub use locale::Lang;
pub use roles::{translate_role, Role};
pub use store::{ActiveTable, TranslationStore};
