//! # Access Guard
//!
//! Pure decision machine gating every protected route. Given the entitlement
//! snapshot and the current location it yields exactly one of: render, show a
//! loading placeholder, or redirect to the login / plan-selection /
//! module-selection page with the current location carried along as a
//! `redirectTo` query parameter.
//!
//! The captured location is sanitized before re-encoding: any `redirectTo`
//! parameter already present is stripped, so redirect chains never nest.
//!
//! The function has no side effects and is safe to re-evaluate on every
//! render. Entitlement fetch failures are expected to arrive here as a
//! cleared snapshot, which lands in the "no user" branch (fail closed).
//!
//! ## Example
//!
//! ```rust
//! use fer_core::entitlement::Entitlement;
//! use fer_core::guard::{evaluate, GuardDecision, Location};
//!
//! let location = Location::parse("/app/dashboard");
//! let decision = evaluate(false, &Entitlement::default(), &location);
//! assert_eq!(
//!     decision,
//!     GuardDecision::RedirectToLogin("/login?redirectTo=%2Fapp%2Fdashboard".to_string())
//! );
//! ```

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::entitlement::Entitlement;
use crate::routes;

/// A client-side location: path plus raw query string (no `?`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    path: String,
    query: String,
}

impl Location {
    /// Split a `path?query` string into its parts.
    pub fn parse(path_and_query: &str) -> Self {
        match path_and_query.split_once('?') {
            Some((path, query)) => Location {
                path: path.to_string(),
                query: query.to_string(),
            },
            None => Location {
                path: path_and_query.to_string(),
                query: String::new(),
            },
        }
    }

    /// The path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query string, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The location with any `redirectTo` parameter stripped from the query.
    pub fn sanitized(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let mut kept_any = false;
        for (key, value) in form_urlencoded::parse(self.query.as_bytes()) {
            if key == "redirectTo" {
                continue;
            }
            serializer.append_pair(&key, &value);
            kept_any = true;
        }
        if kept_any {
            format!("{}?{}", self.path, serializer.finish())
        } else {
            self.path.clone()
        }
    }
}

/// Outcome of a guard evaluation. Redirect variants carry the full target
/// href, `redirectTo` already encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardDecision {
    /// Entitlement still being fetched; show a placeholder, do not navigate.
    Loading,
    /// All checks passed; render the protected content unchanged.
    Render,
    RedirectToLogin(String),
    RedirectToPlan(String),
    RedirectToModules(String),
}

impl GuardDecision {
    /// The redirect target, when the decision is a redirect.
    pub fn target(&self) -> Option<&str> {
        match self {
            GuardDecision::RedirectToLogin(t)
            | GuardDecision::RedirectToPlan(t)
            | GuardDecision::RedirectToModules(t) => Some(t),
            GuardDecision::Loading | GuardDecision::Render => None,
        }
    }
}

/// Decide what to do for `location` under the given entitlement snapshot.
///
/// Checks run in order: loading placeholder, authentication, plan validity
/// (selection, expiry, backend-side validity), module/submodule selection.
/// Each redirect is suppressed when the location already is the target page.
pub fn evaluate(loading: bool, entitlement: &Entitlement, location: &Location) -> GuardDecision {
    if loading {
        return GuardDecision::Loading;
    }

    if entitlement.user.is_none() {
        if location.path() == routes::LOGIN {
            return GuardDecision::Render;
        }
        return GuardDecision::RedirectToLogin(redirect_href(routes::LOGIN, location));
    }

    if !entitlement.plan_selected()
        || entitlement.subscription_expired()
        || !entitlement.subscription_valid()
    {
        if location.path() == routes::ONBOARDING_PLAN {
            return GuardDecision::Render;
        }
        return GuardDecision::RedirectToPlan(redirect_href(routes::ONBOARDING_PLAN, location));
    }

    if !entitlement.modules_selected() {
        if location.path() == routes::ONBOARDING_MODULES {
            return GuardDecision::Render;
        }
        return GuardDecision::RedirectToModules(redirect_href(
            routes::ONBOARDING_MODULES,
            location,
        ));
    }

    GuardDecision::Render
}

/// Build `{base}?redirectTo=<encoded sanitized location>`.
fn redirect_href(base: &str, location: &Location) -> String {
    let target = location.sanitized();
    let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{base}?redirectTo={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitlement::{BillingCycle, ModuleKey, Plan, SubModuleKey, Subscription, User};

    fn logged_in() -> Entitlement {
        Entitlement {
            user: Some(User {
                id: "u1".to_string(),
                email: "chef@chantier.tn".to_string(),
            }),
            subscription_active: true,
            subscription: Some(Subscription {
                status: Some("ACTIVE".to_string()),
                plan: Some(Plan::Individual),
                billing_cycle: Some(BillingCycle::Monthly),
                seats: Some(1),
                current_period_end: None,
                expired: false,
                valid: true,
            }),
            plan: Some(Plan::Individual),
            onboarding_complete: true,
            ..Entitlement::default()
        }
    }

    fn fully_entitled() -> Entitlement {
        let mut ent = logged_in();
        ent.modules.insert(ModuleKey::Module1);
        ent.sub_modules.insert(SubModuleKey::new("FERRAILLAGE"));
        ent
    }

    #[test]
    fn test_loading_wins_over_everything() {
        let location = Location::parse("/app/dashboard");
        assert_eq!(
            evaluate(true, &Entitlement::default(), &location),
            GuardDecision::Loading
        );
    }

    #[test]
    fn test_anonymous_redirects_to_login() {
        let location = Location::parse("/app/dashboard");
        assert_eq!(
            evaluate(false, &Entitlement::default(), &location),
            GuardDecision::RedirectToLogin(
                "/login?redirectTo=%2Fapp%2Fdashboard".to_string()
            )
        );
    }

    #[test]
    fn test_anonymous_on_login_page_renders() {
        let location = Location::parse("/login");
        assert_eq!(
            evaluate(false, &Entitlement::default(), &location),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_no_modules_redirects_to_module_selection() {
        let location = Location::parse("/app/dashboard");
        assert_eq!(
            evaluate(false, &logged_in(), &location),
            GuardDecision::RedirectToModules(
                "/onboarding/modules?redirectTo=%2Fapp%2Fdashboard".to_string()
            )
        );
    }

    #[test]
    fn test_modules_without_submodules_still_redirect() {
        let mut ent = logged_in();
        ent.modules.insert(ModuleKey::Module1);
        let location = Location::parse("/app/dashboard");
        assert!(matches!(
            evaluate(false, &ent, &location),
            GuardDecision::RedirectToModules(_)
        ));
    }

    #[test]
    fn test_missing_billing_cycle_redirects_to_plan() {
        let mut ent = fully_entitled();
        if let Some(sub) = ent.subscription.as_mut() {
            sub.billing_cycle = None;
        }
        let location = Location::parse("/app/dashboard");
        assert_eq!(
            evaluate(false, &ent, &location),
            GuardDecision::RedirectToPlan(
                "/onboarding/plan?redirectTo=%2Fapp%2Fdashboard".to_string()
            )
        );
    }

    #[test]
    fn test_expired_subscription_redirects_to_plan() {
        let mut ent = fully_entitled();
        if let Some(sub) = ent.subscription.as_mut() {
            sub.expired = true;
        }
        let location = Location::parse("/app/dashboard");
        assert!(matches!(
            evaluate(false, &ent, &location),
            GuardDecision::RedirectToPlan(_)
        ));
    }

    #[test]
    fn test_plan_page_renders_while_plan_missing() {
        let location = Location::parse("/onboarding/plan");
        assert_eq!(
            evaluate(false, &logged_in_without_plan(), &location),
            GuardDecision::Render
        );
    }

    fn logged_in_without_plan() -> Entitlement {
        let mut ent = logged_in();
        ent.subscription = None;
        ent
    }

    #[test]
    fn test_fully_entitled_renders() {
        let location = Location::parse("/app/dashboard");
        assert_eq!(
            evaluate(false, &fully_entitled(), &location),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_redirect_to_is_stripped_before_recapture() {
        let location = Location::parse("/app/dashboard?redirectTo=%2Fold&tab=2");
        let decision = evaluate(false, &Entitlement::default(), &location);
        assert_eq!(
            decision.target(),
            Some("/login?redirectTo=%2Fapp%2Fdashboard%3Ftab%3D2")
        );
    }

    #[test]
    fn test_query_without_leftovers_collapses_to_path() {
        let location = Location::parse("/app/dashboard?redirectTo=%2Fold");
        assert_eq!(location.sanitized(), "/app/dashboard");
    }
}
