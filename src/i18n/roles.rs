// SPDX-License-Identifier: PMPL-1.0-or-later

//! Display labels for user roles.

use crate::i18n::TranslationStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Supervisor,
    Teamleader,
    Operator,
}

impl Role {
    /// Parse the identifier the API sends (`"supervisor"`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "supervisor" => Some(Role::Supervisor),
            "teamleader" => Some(Role::Teamleader),
            "operator" => Some(Role::Operator),
            _ => None,
        }
    }

    /// Translation key for the role's label.
    pub fn key(&self) -> &'static str {
        match self {
            Role::Supervisor => "SUPERVISOR",
            Role::Teamleader => "TEAMLEADER",
            Role::Operator => "OPERATOR",
        }
    }
}

/// Label for a role identifier as received from the API: empty for no
/// role, the translated label for a known role, the raw value otherwise.
pub fn translate_role(store: &TranslationStore, value: Option<&str>) -> String {
    match value {
        None => String::new(),
        Some(raw) => match Role::parse(raw) {
            Some(role) => store.get(role.key()),
            None => raw.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_translated() {
        let store = TranslationStore::builtin().unwrap();
        assert_eq!(translate_role(&store, Some("supervisor")), "Superviseur");
        assert_eq!(translate_role(&store, Some("teamleader")), "Chef d'équipe");
        assert_eq!(translate_role(&store, Some("operator")), "Opérateur");
    }

    #[test]
    fn unknown_and_missing_roles() {
        let store = TranslationStore::builtin().unwrap();
        assert_eq!(translate_role(&store, None), "");
        assert_eq!(translate_role(&store, Some("auditor")), "auditor");
        // identifiers are matched exactly, as sent by the API
        assert_eq!(translate_role(&store, Some("SUPERVISOR")), "SUPERVISOR");
    }
}
