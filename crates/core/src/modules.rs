//! Feature-module definitions.
//!
//! [`DEFAULT_MODULES`] is the catalog installed on first boot. The intranet
//! and media registrations also grant default group access from their own
//! seed scripts, and [`PROJECT_REPORTS_MODULE`] is granted to administrators
//! separately.

use crate::error::CoreError;

/// Static description of a module row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDefinition {
    /// Natural key, unique across `modules`.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub route: &'static str,
    pub sort_order: i32,
}

const fn module(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    route: &'static str,
    sort_order: i32,
) -> ModuleDefinition {
    ModuleDefinition {
        key,
        name,
        description,
        icon,
        route,
        sort_order,
    }
}

pub const INTRANET_MODULE: ModuleDefinition = module(
    "intranet",
    "Intranet",
    "Firmen-Intranet mit Dokumentenverwaltung",
    "folder_shared",
    "/intranet",
    16,
);

pub const PROJECT_REPORTS_MODULE: ModuleDefinition = module(
    "project_reports",
    "Projekt-Berichte",
    "Projektauswertungen und Stundenberichte",
    "insights",
    "/project-reports",
    20,
);

pub const MEDIA_MODULE: ModuleDefinition = module(
    "media",
    "Medien",
    "Verwaltung von Mediendateien (Bilder, PDFs, Dokumente)",
    "perm_media",
    "/media",
    90,
);

/// Modules created by the catalog seed, in sort order.
pub const DEFAULT_MODULES: &[ModuleDefinition] = &[
    module("dashboard", "Dashboard", "Übersichtsseite mit wichtigen Informationen", "dashboard", "/", 0),
    module("time_tracking", "Zeiterfassung", "Zeit- und Anwesenheitsverwaltung", "schedule", "/time", 1),
    module("projects", "Projekte", "Projektverwaltung", "folder", "/projects", 2),
    module("customers", "Kunden", "Kundenverwaltung", "people", "/customers", 3),
    module("suppliers", "Lieferanten", "Lieferantenverwaltung", "local_shipping", "/suppliers", 4),
    module("articles", "Artikel", "Artikel- und Produktverwaltung", "inventory", "/articles", 5),
    module("invoices", "Rechnungen", "Rechnungsverwaltung", "receipt", "/invoices", 6),
    module("reminders", "Mahnungen", "Mahnwesen", "warning", "/reminders", 7),
    module("absences", "Abwesenheiten", "Urlaubsverwaltung und Abwesenheiten", "event_busy", "/absences", 8),
    module("reports", "Berichte", "Auswertungen und Berichte", "assessment", "/reports", 9),
    module("compliance", "Compliance", "Arbeitszeit-Compliance (Schweiz)", "policy", "/compliance", 10),
    module("incidents", "Vorfälle", "Incident Management", "bug_report", "/incidents", 11),
    module("users", "Benutzer", "Benutzerverwaltung", "person", "/users", 12),
    module("user_groups", "Benutzergruppen", "Benutzergruppenverwaltung", "groups", "/user-groups", 13),
    module("modules", "Module", "Modulverwaltung und Berechtigungen", "apps", "/modules", 14),
    module("settings", "Einstellungen", "Systemeinstellungen", "settings", "/settings", 15),
    INTRANET_MODULE,
    module("cost_centers", "Kostenstellen", "Kostenstellenverwaltung", "account_balance", "/cost-centers", 17),
    module("inventory", "Lagerbestand", "Lagerverwaltung und Bestandsübersicht", "warehouse", "/inventory", 18),
    module("project_budget", "Projekt-Budget", "Projektbudget-Planung und -Überwachung", "account_balance_wallet", "/project-budget", 19),
    PROJECT_REPORTS_MODULE,
];

/// Validate a module key: non-empty, starts with a lowercase ASCII letter,
/// and contains only lowercase letters, digits and `_`.
pub fn validate_module_key(key: &str) -> Result<(), CoreError> {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        Some(_) => {
            return Err(CoreError::Validation(format!(
                "Module key '{key}' must start with a lowercase letter"
            )))
        }
        None => {
            return Err(CoreError::Validation(
                "Module key must not be empty".to_string(),
            ))
        }
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')) {
        return Err(CoreError::Validation(format!(
            "Module key '{key}' contains invalid character '{bad}'"
        )));
    }
    Ok(())
}
