//! # Entitlement State
//!
//! Snapshot of who the current user is and what they are allowed to reach:
//! subscription (plan, billing cycle, validity), enabled modules and
//! submodules, onboarding completeness. Refreshed from the backend on load
//! and after every mutating auth/onboarding action; cleared wholesale on
//! logout or when a refresh fails, so access control always fails closed.
//!
//! A module with a submodule catalog only counts as satisfied when at least
//! one of its submodules is enabled, hence `modules_selected` requiring both
//! sets to be non-empty.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    Individual,
    Enterprise,
}

impl Plan {
    /// French display label.
    pub fn label_fr(&self) -> &'static str {
        match self {
            Plan::Individual => "Individuel",
            Plan::Enterprise => "Entreprise",
        }
    }
}

/// Billing cycle for the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    /// French display label.
    pub fn label_fr(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Mensuel",
            BillingCycle::Yearly => "Annuel",
        }
    }
}

/// Monthly subscription price in Tunisian dinars.
pub const MONTHLY_PRICE_DT: u32 = 100;

/// Price for a billing cycle, in dinars. Yearly carries a 10% reduction over
/// twelve monthly payments (1080 DT).
pub fn price_dt(cycle: BillingCycle) -> u32 {
    match cycle {
        BillingCycle::Monthly => MONTHLY_PRICE_DT,
        BillingCycle::Yearly => MONTHLY_PRICE_DT * 12 * 9 / 10,
    }
}

/// Feature module key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleKey {
    #[serde(rename = "MODULE_1")]
    Module1,
    #[serde(rename = "MODULE_2")]
    Module2,
}

impl ModuleKey {
    /// All module keys for iteration.
    pub const ALL: [ModuleKey; 2] = [ModuleKey::Module1, ModuleKey::Module2];

    /// Wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKey::Module1 => "MODULE_1",
            ModuleKey::Module2 => "MODULE_2",
        }
    }
}

/// Submodule key; the catalog is backend-defined, so the value stays opaque.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubModuleKey(pub String);

impl SubModuleKey {
    pub fn new(key: impl Into<String>) -> Self {
        SubModuleKey(key.into())
    }
}

/// Presentation card for a selectable module.
#[derive(Debug, Clone)]
pub struct ModuleCard {
    pub key: ModuleKey,
    pub title: &'static str,
    pub desc: &'static str,
    pub features: Vec<&'static str>,
    pub badge: Option<&'static str>,
}

/// Static catalog of module cards shown during onboarding.
pub static MODULE_CATALOG: Lazy<Vec<ModuleCard>> = Lazy::new(|| {
    vec![
        ModuleCard {
            key: ModuleKey::Module1,
            title: "Module 1",
            desc: "Suivi ferraillage chantier (rapports, mouvements, restants).",
            features: vec!["Fonctionnalité A", "Fonctionnalité B", "Accès rapide"],
            badge: Some("Recommandé"),
        },
        ModuleCard {
            key: ModuleKey::Module2,
            title: "Module 2",
            desc: "Votre deuxième module (nom à définir plus tard).",
            features: vec!["Fonctionnalité C", "Fonctionnalité D", "Support inclus"],
            badge: None,
        },
    ]
});

/// Authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// Subscription details as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub status: Option<String>,
    pub plan: Option<Plan>,
    pub billing_cycle: Option<BillingCycle>,
    pub seats: Option<u32>,
    /// ISO timestamp of the current period end, when known.
    pub current_period_end: Option<String>,
    pub expired: bool,
    pub valid: bool,
}

/// Snapshot of the current user's access state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub user: Option<User>,
    pub subscription_active: bool,
    pub subscription: Option<Subscription>,
    /// Effective plan: the subscription's plan when present, else the
    /// account-level plan.
    pub plan: Option<Plan>,
    pub modules: BTreeSet<ModuleKey>,
    pub sub_modules: BTreeSet<SubModuleKey>,
    pub onboarding_complete: bool,
}

impl Entitlement {
    /// A plan counts as selected only when the subscription carries both a
    /// plan and a billing cycle.
    pub fn plan_selected(&self) -> bool {
        self.subscription
            .as_ref()
            .map(|s| s.plan.is_some() && s.billing_cycle.is_some())
            .unwrap_or(false)
    }

    /// Module selection requires at least one module AND at least one
    /// submodule to be enabled.
    pub fn modules_selected(&self) -> bool {
        !self.modules.is_empty() && !self.sub_modules.is_empty()
    }

    /// True when the subscription is known to be expired.
    pub fn subscription_expired(&self) -> bool {
        self.subscription.as_ref().map(|s| s.expired).unwrap_or(false)
    }

    /// True when the subscription is known to be valid. Missing subscription
    /// means not valid.
    pub fn subscription_valid(&self) -> bool {
        self.subscription.as_ref().map(|s| s.valid).unwrap_or(false)
    }

    /// Reset to the logged-out state.
    pub fn clear(&mut self) {
        *self = Entitlement::default();
    }
}
