// SPDX-License-Identifier: PMPL-1.0-or-later

//! planning-i18n — translation lookup for the planning administration console.
//!
//! Widgets ask the [`i18n::TranslationStore`] for display text by key and
//! subscribe to it to re-render when the operator switches language.
//!
//! BUILDING BLOCKS:
//! 1. **i18n**: locale identifiers, compiled translation tables and the
//!    store itself.
//! 2. **reactive**: the observable cell the store publishes through.
//! 3. **diagnostics**: where recoverable conditions are reported.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod reactive;
