//! # Session State
//!
//! Owns the entitlement snapshot the access guard reads from. The snapshot is
//! refreshed from `GET /me` on startup and after every mutating auth or
//! onboarding action, and cleared wholesale whenever a refresh fails — a 401
//! silently (that is just the logged-out state), anything else with a warning.
//! Access control therefore always fails closed.
//!
//! Concurrency model: single owner, no interior mutability. In-flight calls
//! are never coalesced or cancelled; the last write wins.

use fer_core::entitlement::{Entitlement, Subscription, User};
use fer_core::guard::{evaluate, GuardDecision, Location};

use crate::client::ApiClient;
use crate::dto::{MeResponse, SubscriptionDto};
use crate::error::ApiResult;

/// Session/entitlement state over an [`ApiClient`].
#[derive(Debug)]
pub struct Session {
    client: ApiClient,
    entitlement: Entitlement,
    loading: bool,
}

impl Session {
    /// Fresh session: nothing known yet, guard answers `Loading` until the
    /// first refresh lands.
    pub fn new(client: ApiClient) -> Self {
        Session {
            client,
            entitlement: Entitlement::default(),
            loading: true,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn entitlement(&self) -> &Entitlement {
        &self.entitlement
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Evaluate the access guard for `location` against the current snapshot.
    pub fn guard(&self, location: &Location) -> GuardDecision {
        evaluate(self.loading, &self.entitlement, location)
    }

    /// Re-fetch `GET /me` and replace the snapshot. Failures clear it; they
    /// are not propagated because a failed refresh and an anonymous session
    /// are handled identically downstream.
    pub async fn refresh(&mut self) {
        match self.client.me().await {
            Ok(me) => {
                self.entitlement = entitlement_from_me(me);
            }
            Err(err) => {
                if !err.is_unauthorized() {
                    tracing::warn!(error = %err, "entitlement refresh failed");
                }
                self.entitlement.clear();
            }
        }
        self.loading = false;
    }

    /// Create an account, then refresh the snapshot.
    pub async fn signup(&mut self, email: &str, password: &str) -> ApiResult<()> {
        self.client.signup(email, password).await?;
        self.refresh().await;
        Ok(())
    }

    /// Authenticate, then refresh the snapshot.
    pub async fn login(&mut self, email: &str, password: &str) -> ApiResult<()> {
        self.client.login(email, password).await?;
        self.refresh().await;
        Ok(())
    }

    /// Log out on the backend, then clear locally. On failure the server-side
    /// session may survive, so local state is left untouched for the caller
    /// to retry.
    pub async fn logout(&mut self) -> ApiResult<()> {
        self.client.logout().await?;
        self.entitlement.clear();
        self.loading = false;
        Ok(())
    }
}

/// Map a `GET /me` response to the entitlement snapshot.
///
/// The effective plan prefers the subscription's plan over the account-level
/// one; onboarding completeness falls back from the structured flag to the
/// legacy boolean to a local derivation.
pub fn entitlement_from_me(me: MeResponse) -> Entitlement {
    let subscription = me.subscription.map(subscription_from_dto);
    let plan = subscription.as_ref().and_then(|s| s.plan).or(me.plan);

    let mut entitlement = Entitlement {
        user: me.user.map(|u| User {
            id: u.id,
            email: u.email,
        }),
        subscription_active: me.subscription_active,
        subscription,
        plan,
        modules: me.modules.into_iter().collect(),
        sub_modules: me.sub_modules.into_iter().collect(),
        onboarding_complete: false,
    };

    entitlement.onboarding_complete = me
        .onboarding
        .map(|o| o.complete)
        .or(me.onboarding_complete)
        .unwrap_or_else(|| entitlement.plan_selected() && entitlement.modules_selected());

    entitlement
}

fn subscription_from_dto(dto: SubscriptionDto) -> Subscription {
    Subscription {
        status: dto.status,
        plan: dto.plan,
        billing_cycle: dto.billing_cycle,
        seats: dto.seats,
        current_period_end: dto.current_period_end,
        expired: dto.expired,
        valid: dto.valid,
    }
}
