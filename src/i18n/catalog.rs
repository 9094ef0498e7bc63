// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation tables and the locale registry.
//!
//! Every user-facing string of the console is embedded here as a static
//! table per locale. At startup the tables are copied once into a
//! [`LocaleRegistry`]; from then on nothing mutates them and the store only
//! moves its active reference between them.
//!
//! French is the source language: every key is defined in `FR`. English is
//! compiled in but held back from release until the table is complete, so
//! the store rejects it unless configuration enables it explicitly.
//!
//! ## Adding a new key
//!
//! 1. Add the French entry to `FR`
//! 2. Add the translation to the other tables when available (missing keys
//!    render as the key itself)

use crate::error::LocaleError;
use crate::i18n::Lang;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

/// Immutable key to display-text mapping for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    lang: Lang,
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn from_entries<K, V>(lang: Lang, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            lang,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Text stored for `key`. Empty entries count as missing so a
    /// half-filled table never renders a blank label.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Release gate for a compiled locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleStatus {
    Enabled,
    Disabled,
}

#[derive(Debug)]
struct Registered {
    table: Arc<TranslationTable>,
    status: LocaleStatus,
}

/// Read-only registry of the translation tables available to the process.
#[derive(Debug)]
pub struct LocaleRegistry {
    locales: BTreeMap<Lang, Registered>,
}

/// Startup-time assembly of a [`LocaleRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    locales: BTreeMap<Lang, Registered>,
}

impl RegistryBuilder {
    /// Register an enabled table. Registering the same locale twice keeps
    /// the last table.
    pub fn table<K, V>(self, lang: Lang, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(lang, LocaleStatus::Enabled, entries)
    }

    /// Register a table that is compiled in but not released yet.
    pub fn disabled_table<K, V>(self, lang: Lang, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(lang, LocaleStatus::Disabled, entries)
    }

    fn insert<K, V>(
        mut self,
        lang: Lang,
        status: LocaleStatus,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = Arc::new(TranslationTable::from_entries(lang, entries));
        self.locales.insert(lang, Registered { table, status });
        self
    }

    pub fn build(self) -> LocaleRegistry {
        LocaleRegistry {
            locales: self.locales,
        }
    }
}

/// How far a locale's table covers a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleCoverage {
    pub lang: Lang,
    pub status: LocaleStatus,
    pub translated: usize,
    pub total: usize,
    /// Reference keys this locale does not translate, sorted.
    pub missing: Vec<String>,
}

impl LocaleCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl LocaleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The tables compiled into this binary. Built on first use and shared
    /// for the rest of the process.
    pub fn builtin() -> Arc<LocaleRegistry> {
        static BUILTIN: OnceLock<Arc<LocaleRegistry>> = OnceLock::new();
        Arc::clone(BUILTIN.get_or_init(|| {
            Arc::new(
                LocaleRegistry::builder()
                    .table(Lang::Fr, FR.iter().copied())
                    .disabled_table(Lang::En, EN.iter().copied())
                    .build(),
            )
        }))
    }

    pub fn table(&self, lang: Lang) -> Option<Arc<TranslationTable>> {
        self.locales.get(&lang).map(|entry| Arc::clone(&entry.table))
    }

    /// `None` when no table is compiled for `lang`.
    pub fn status(&self, lang: Lang) -> Option<LocaleStatus> {
        self.locales.get(&lang).map(|entry| entry.status)
    }

    /// The table for `lang` if it may be activated under the registry's own
    /// release gating.
    pub fn resolve(&self, lang: Lang) -> Result<Arc<TranslationTable>, LocaleError> {
        match self.locales.get(&lang) {
            None => Err(LocaleError::NotCompiled(lang)),
            Some(entry) if entry.status == LocaleStatus::Disabled => {
                Err(LocaleError::Disabled(lang))
            }
            Some(entry) => Ok(Arc::clone(&entry.table)),
        }
    }

    /// Locales with a compiled table, in [`Lang`] order.
    pub fn compiled(&self) -> impl Iterator<Item = Lang> + '_ {
        self.locales.keys().copied()
    }

    /// Per-locale coverage against `reference`, which must be compiled.
    pub fn coverage(&self, reference: Lang) -> Result<Vec<LocaleCoverage>, LocaleError> {
        let reference_table = self.table(reference).ok_or(LocaleError::NotCompiled(reference))?;
        let reference_keys: Vec<&str> = reference_table
            .keys()
            .filter(|key| reference_table.contains_key(key))
            .collect();
        let total = reference_keys.len();

        let report = self
            .locales
            .iter()
            .map(|(lang, entry)| {
                let mut missing: Vec<String> = reference_keys
                    .iter()
                    .filter(|key| !entry.table.contains_key(key))
                    .map(|key| key.to_string())
                    .collect();
                missing.sort();
                LocaleCoverage {
                    lang: *lang,
                    status: entry.status,
                    translated: total - missing.len(),
                    total,
                    missing,
                }
            })
            .collect();
        Ok(report)
    }
}

// ─── French (source language — all keys defined here) ───────────────

const FR: &[(&str, &str)] = &[
    // Roles
    ("SUPERVISOR", "Superviseur"),
    ("TEAMLEADER", "Chef d'équipe"),
    ("OPERATOR", "Opérateur"),
    // Common actions
    ("SAVE", "Enregistrer"),
    ("CANCEL", "Annuler"),
    ("DUPLICATE", "Dupliquer"),
    ("YES", "Oui"),
    ("NO", "Non"),
    ("ERROR", "Une erreur est survenue"),
    ("SEARCH_HERE", "Rechercher ici"),
    ("ELEMENT", "élément"),
    ("ELEMENTS", "éléments"),
    ("FILE_EXPORT", "Exporter"),
    ("ONE_FILED_REQUIRED", "Au moins un champ est requis"),
    ("DEACTIVATE_CANCEL", "Rester sur la page"),
    ("DEACTIVATE_LEAVE", "Quitter sans enregistrer"),
    // Navigation
    ("PLANNING", "Planning"),
    ("CLIENTS", "Clients"),
    ("USERS", "Utilisateurs"),
    ("ADMIN", "Administration"),
    ("ARCHIVES", "Archives"),
    ("PREFERENCES", "Préférences"),
    ("PERSONNAL_INFORMATION", "Informations personnelles"),
    ("COMPANY_INDENTITY", "Identité de l'entreprise"),
    ("CUSTOMAZITION", "Personnalisation"),
    ("COMMANDES_MISSIONS", "Commandes & missions"),
    ("DEMANDES_SAV", "Demandes SAV"),
    ("RETOURS", "Retours"),
    ("PROGRESSION", "Progression"),
    // Pagination
    ("itemsPerPageLabel", "Éléments par page"),
    ("firstPageLabel", "Première page"),
    ("lastPageLabel", "Dernière page"),
    // Authentication
    ("CONNEXION_ERROR", "Identifiants invalides"),
    ("FORGOT_PASSWORD", "Mot de passe oublié ?"),
    ("FORGOT_PASSWORD_EMAIL_SENT", "Un e-mail de réinitialisation vous a été envoyé"),
    ("RESET_PASSWORD_TITLE", "Réinitialiser le mot de passe"),
    ("RESET_PASSWORD_ERROR", "La réinitialisation du mot de passe a échoué"),
    ("CONFIRM_EMAIL", "Confirmer l'adresse e-mail"),
    ("EMAIL_CONFIRMED", "Adresse e-mail confirmée"),
    ("CONFIRMATION_LINK_SENT", "Un lien de confirmation a été envoyé"),
    ("ERROR_CONFIRMATION_MAIL", "L'envoi de l'e-mail de confirmation a échoué"),
    ("REGISTER_CONFIRMATION", "Votre compte a bien été créé"),
    // Users
    ("NEW_USER", "Nouvel utilisateur"),
    ("EDIT_USER", "Modifier l'utilisateur"),
    ("ARCHIVE_USER", "Archiver l'utilisateur"),
    ("USER_CREATED", "Utilisateur créé"),
    ("USER_UPDATED", "Utilisateur mis à jour"),
    ("USER_ARCHIVED", "Utilisateur archivé"),
    ("USER_UNARCHIVED", "Utilisateur désarchivé"),
    ("USER_FORM_FIRSTNAME", "Prénom"),
    ("USER_FORM_LASTNAME", "Nom"),
    ("USER_FORM_EMAIL", "E-mail"),
    ("USER_FORM_ROLE", "Rôle"),
    ("USER_FORM_ARCHIVE", "Archivé"),
    // Absences
    ("ABSENCE_TYPE", "Type d'absence"),
    ("ABSENCE_REASON", "Motif"),
    ("ABSENCE_START_DATE", "Début de l'absence"),
    ("ABSENCE_END_DATE", "Fin de l'absence"),
    // Clients
    ("NEW_CLIENT", "Nouveau client"),
    ("EDIT_CLIENT", "Modifier le client"),
    ("ARCHIVE_CLIENT", "Archiver le client"),
    ("CLIENT_CREATED", "Client créé"),
    ("CLIENT_UPDATED", "Client mis à jour"),
    ("CLIENT_ARCHIVED", "Client archivé"),
    ("CLIENT_UNARCHIVED", "Client désarchivé"),
    ("CLIENT_ARCHIVE_ERROR", "Impossible d'archiver le client"),
    ("CLIENT_UNARCHIVE_ERROR", "Impossible de désarchiver le client"),
    ("CLIENT_COMPANY", "Société"),
    ("CLIENT_EMAIL", "E-mail"),
    ("CLIENT_PHONE", "Téléphone"),
    ("CLIENT_BUSINESS_MANAGER", "Chargé d'affaires"),
    ("CLIENT_LAST_ORDER", "Dernière commande"),
    ("ADDRESS_UPDATED", "Adresse mise à jour"),
    // Orders
    ("NEW_ORDER", "Nouvelle commande"),
    ("ARCHIVE_ORDER", "Archiver la commande"),
    ("ORDER_CREATED", "Commande créée"),
    ("ORDER_UPDATED", "Commande mise à jour"),
    ("ORDER_NAME", "Nom de la commande"),
    ("ORDER_DISPLAY_ID", "N° de commande"),
    ("ORDER_CLIENT_NAME", "Client"),
    ("ORDER_STATUS", "Statut"),
    ("ORDER_SEARCH_PLACEHOLDER", "Rechercher une commande"),
    ("ORDERS_TYPES", "Types de commande"),
    ("ORDER_TYPE_NAME", "Nom du type"),
    ("ORDER_TYPE_COLOR", "Couleur"),
    ("ORDER_TYPE_ICON", "Icône"),
    ("ORDER_TYPE_MISSION_TYPES_COUNT", "Types de mission associés"),
    // Missions
    ("NEW_MISSION", "Nouvelle mission"),
    ("ADD_MISSION", "Ajouter une mission"),
    ("EDIT_MISSION", "Modifier la mission"),
    ("ARCHIVE_MISSION", "Archiver la mission"),
    ("MISSION_CREATED", "Mission créée"),
    ("MISSION_DISPLAY_ID", "N° de mission"),
    ("MISSION_ClIENT", "Client"),
    ("MISSION_STATUS", "Statut"),
    ("MISSION_TYPE", "Type de mission"),
    ("MISSION_TYPES", "Types de mission"),
    ("MISSION_START_DATE", "Date de début"),
    ("MISSION_END_DATE", "Date de fin"),
    ("MISSION_TEAMLEADER", "Chef d'équipe"),
    ("MISSION_NO_TEAM_LEADER", "Aucun chef d'équipe"),
    ("MISSION_HOLES", "Créneaux non affectés"),
    ("MISSION_SEARCH_PLACEHOLDER", "Rechercher une mission"),
    ("MISSION_DOCUMENT_NAME", "Document"),
    ("MISSION_DOCUMENT_UPLOADED_AT", "Ajouté le"),
    ("MISSION_TYPE_NAME", "Nom du type"),
    ("MISSION_TYPE_FORM_COLOR", "Couleur"),
    ("MISSION_TYPE_FORM_ICON", "Icône"),
    ("MISSION_TYPE_FORM_CUSTOM_FORMS_COUNT", "Formulaires associés"),
    ("AFFECTATION_OPERATOR_ERROR_OCCURED", "L'affectation de l'opérateur a échoué"),
    ("ARCHIVE_TYPE", "Archiver le type"),
    // Custom forms
    ("CUSTOM_FORMS", "Formulaires personnalisés"),
    ("CUSTOM_FORM_NAME", "Nom du formulaire"),
    ("CUSTOM_FORM_COLOR", "Couleur"),
    ("CUSTOM_FORM_AUTOCOMPLETE_STRING", "Texte à compléter automatiquement"),
    ("CUSTOM_FORM_FIELD_REQUIRED", "Ce champ est requis"),
    ("CUSTOM_FORM_FIELD_ERROR", "Ce champ est invalide"),
    ("CUSTOM_FORM_FIELD_EMAIL", "Adresse e-mail invalide"),
    ("CUSTOM_FORM_FIELD_PHONE_NUMBER", "Numéro de téléphone invalide"),
    ("CUSTOM_FORM_FIELD_POSTAL_CODE", "Code postal invalide"),
    ("FORM_LOCATE_ERROR", "Impossible de localiser l'adresse"),
    // Company identity
    ("DEPARTMENT_NAME", "Nom du service"),
    ("LOGO_UPDATED", "Logo mis à jour"),
    ("ERROR_UPLOADING_LOGO", "L'envoi du logo a échoué"),
    ("COLORS_UPDATED", "Couleurs mises à jour"),
];

// ─── English (compiled, not released) ───────────────────────────────

const EN: &[(&str, &str)] = &[
    ("SUPERVISOR", "Supervisor"),
    ("TEAMLEADER", "Team leader"),
    ("OPERATOR", "Operator"),
    ("SAVE", "Save"),
    ("CANCEL", "Cancel"),
    ("DUPLICATE", "Duplicate"),
    ("YES", "Yes"),
    ("NO", "No"),
    ("ERROR", "An error occurred"),
    ("SEARCH_HERE", "Search here"),
    ("PLANNING", "Planning"),
    ("CLIENTS", "Clients"),
    ("USERS", "Users"),
    ("ADMIN", "Administration"),
    ("ARCHIVES", "Archives"),
    ("PREFERENCES", "Preferences"),
    ("itemsPerPageLabel", "Items per page"),
    ("firstPageLabel", "First page"),
    ("lastPageLabel", "Last page"),
    ("CONNEXION_ERROR", "Invalid credentials"),
    ("FORGOT_PASSWORD", "Forgot your password?"),
    ("NEW_USER", "New user"),
    ("NEW_CLIENT", "New client"),
    ("NEW_ORDER", "New order"),
    ("NEW_MISSION", "New mission"),
    ("MISSION_START_DATE", "Start date"),
    ("MISSION_END_DATE", "End date"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_is_enabled_and_complete() {
        let registry = LocaleRegistry::builtin();
        let fr = registry.resolve(Lang::Fr).expect("french resolves");
        assert_eq!(fr.lang(), Lang::Fr);
        assert_eq!(fr.get("SAVE"), Some("Enregistrer"));
        assert_eq!(fr.len(), FR.len(), "duplicate key in FR");
    }

    #[test]
    fn english_is_compiled_but_gated() {
        let registry = LocaleRegistry::builtin();
        assert_eq!(registry.status(Lang::En), Some(LocaleStatus::Disabled));
        assert_eq!(registry.resolve(Lang::En), Err(LocaleError::Disabled(Lang::En)));
        assert!(registry.table(Lang::En).is_some());
    }

    #[test]
    fn english_keys_exist_in_french() {
        for &(key, _) in EN {
            assert!(
                FR.iter().any(|&(k, _)| k == key),
                "EN key '{}' has no French source entry",
                key
            );
        }
    }

    #[test]
    fn missing_locale_is_not_compiled() {
        let registry = LocaleRegistry::builder()
            .table(Lang::Fr, [("SAVE", "Enregistrer")])
            .build();
        assert_eq!(registry.status(Lang::En), None);
        assert_eq!(registry.resolve(Lang::En), Err(LocaleError::NotCompiled(Lang::En)));
    }

    #[test]
    fn empty_entry_reads_as_missing() {
        let table = TranslationTable::from_entries(Lang::Fr, [("SAVE", ""), ("NO", "Non")]);
        assert_eq!(table.get("SAVE"), None);
        assert!(!table.contains_key("SAVE"));
        assert_eq!(table.get("NO"), Some("Non"));
    }

    #[test]
    fn coverage_lists_missing_keys() {
        let registry = LocaleRegistry::builder()
            .table(Lang::Fr, [("SAVE", "Enregistrer"), ("CANCEL", "Annuler"), ("NO", "Non")])
            .disabled_table(Lang::En, [("SAVE", "Save"), ("NO", "")])
            .build();
        let report = registry.coverage(Lang::Fr).unwrap();
        assert_eq!(report.len(), 2);

        let fr = &report[0];
        assert_eq!(fr.lang, Lang::Fr);
        assert!(fr.is_complete());

        let en = &report[1];
        assert_eq!(en.status, LocaleStatus::Disabled);
        assert_eq!(en.translated, 1);
        assert_eq!(en.total, 3);
        assert_eq!(en.missing, vec!["CANCEL".to_string(), "NO".to_string()]);
    }

    #[test]
    fn coverage_needs_compiled_reference() {
        let registry = LocaleRegistry::builder().table(Lang::Fr, [("SAVE", "Enregistrer")]).build();
        assert_eq!(
            registry.coverage(Lang::En).unwrap_err(),
            LocaleError::NotCompiled(Lang::En)
        );
    }
}
