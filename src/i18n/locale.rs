// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale identifiers for the planning console.
//!
//! ## Adding a new locale
//!
//! 1. Add a variant to [`Lang`] and extend `code()`, `all()` and the name
//!    tables below
//! 2. Add a `"xx" => Some(Lang::Xx)` arm to `Lang::from_code()`
//! 3. Register a table for it in `catalog::LocaleRegistry::builtin()`
//!
//! A locale that is listed here but has no registered table is rejected by
//! the store as not compiled.

use crate::error::LocaleError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Display languages the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Fr,
    En,
}

impl Lang {
    /// ISO 639-1 two-letter code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Exact, lowercase code match. Use [`Lang::parse_tag`] for user input.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "fr" => Some(Lang::Fr),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    /// All known languages, in display order.
    pub fn all() -> &'static [Lang] {
        &[Lang::Fr, Lang::En]
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Lang::Fr => "French",
            Lang::En => "English",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::Fr => "Français",
            Lang::En => "English",
        }
    }

    /// Parse a locale tag as it arrives from a browser, a stored preference
    /// or the command line.
    ///
    /// Accepts `fr`, `FR`, `fr-FR`, `fr_CA`, `en-419`: only the primary
    /// language subtag selects the locale. Anything that is not shaped like
    /// a tag, or whose language we do not know, is
    /// [`LocaleError::Unrecognized`].
    ///
    /// # Examples
    ///
    /// ```
    /// use planning_i18n::i18n::Lang;
    /// assert_eq!(Lang::parse_tag("fr-CA").unwrap(), Lang::Fr);
    /// assert_eq!(Lang::parse_tag(" EN_us ").unwrap(), Lang::En);
    /// assert!(Lang::parse_tag("klingon").is_err());
    /// ```
    pub fn parse_tag(tag: &str) -> Result<Lang, LocaleError> {
        let trimmed = tag.trim();
        let captures = tag_pattern()
            .captures(trimmed)
            .ok_or_else(|| LocaleError::Unrecognized(trimmed.to_string()))?;
        let primary = captures[1].to_ascii_lowercase();
        Lang::from_code(&primary).ok_or_else(|| LocaleError::Unrecognized(trimmed.to_string()))
    }
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // language[-_]region, region being two letters or a UN M.49 number
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2,3})(?:[-_](?:[A-Za-z]{2}|[0-9]{3}))?$")
            .unwrap_or_else(|err| unreachable!("static locale pattern is valid: {err}"))
    })
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Lang {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::parse_tag(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for lang in Lang::all() {
            assert_eq!(Lang::from_code(lang.code()), Some(*lang));
        }
    }

    #[test]
    fn parse_tag_ignores_region_and_case() {
        assert_eq!(Lang::parse_tag("fr").unwrap(), Lang::Fr);
        assert_eq!(Lang::parse_tag("FR").unwrap(), Lang::Fr);
        assert_eq!(Lang::parse_tag("fr-BE").unwrap(), Lang::Fr);
        assert_eq!(Lang::parse_tag("en_GB").unwrap(), Lang::En);
        assert_eq!(Lang::parse_tag("en-419").unwrap(), Lang::En);
    }

    #[test]
    fn parse_tag_rejects_garbage() {
        for input in ["", "f", "french", "fr-", "fr-FRA-x", "de", "12"] {
            match Lang::parse_tag(input) {
                Err(LocaleError::Unrecognized(raw)) => assert_eq!(raw, input.trim()),
                other => panic!("{input:?} should be unrecognized, got {other:?}"),
            }
        }
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Lang::Fr).unwrap(), "\"fr\"");
        let parsed: Lang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Lang::En);
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(Lang::En.to_string(), "en");
        assert_eq!(Lang::Fr.native_name(), "Français");
    }
}
