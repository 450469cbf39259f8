//! # Route Table
//!
//! Client-visible paths and href builders. Kept in one place so the guard,
//! the session layer and the front-end agree on every target string.

/// Login page.
pub const LOGIN: &str = "/login";
/// Account creation page.
pub const SIGNUP: &str = "/signup";
/// Plan selection step of onboarding.
pub const ONBOARDING_PLAN: &str = "/onboarding/plan";
/// Module selection step of onboarding.
pub const ONBOARDING_MODULES: &str = "/onboarding/modules";
/// Guarded application root.
pub const APP_ROOT: &str = "/app";

/// Path segments under the application root.
pub mod segments {
    pub const DASHBOARD: &str = "dashboard";
    pub const MODULE1_ROOT: &str = "models/module-1";
    pub const FERRAILLAGE: &str = "models/module-1/ferraillage";
    pub const FERRAILLAGE_RAPPORTS: &str = "models/module-1/ferraillage/rapports";
}

/// Dashboard href.
pub fn dashboard() -> String {
    format!("{APP_ROOT}/{}", segments::DASHBOARD)
}

/// Module 1 landing href.
pub fn module1_root() -> String {
    format!("{APP_ROOT}/{}", segments::MODULE1_ROOT)
}

/// Ferraillage module landing href.
pub fn ferraillage() -> String {
    format!("{APP_ROOT}/{}", segments::FERRAILLAGE)
}

/// Rapport list href.
pub fn ferraillage_rapports() -> String {
    format!("{APP_ROOT}/{}", segments::FERRAILLAGE_RAPPORTS)
}

/// Rapport detail href.
pub fn ferraillage_rapport_view(rapport_id: &str) -> String {
    format!("{}/{rapport_id}", ferraillage_rapports())
}

/// Rapport edit href.
pub fn ferraillage_rapport_edit(rapport_id: &str) -> String {
    format!("{}/{rapport_id}/edit", ferraillage_rapports())
}

/// Rapport creation href.
pub fn ferraillage_rapport_create() -> String {
    format!("{}/create", ferraillage_rapports())
}
