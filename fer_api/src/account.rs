//! # Account and Onboarding Endpoints
//!
//! Authentication, the entitlement snapshot (`GET /me`) and the two
//! onboarding mutations (plan selection, module selection).

use fer_core::entitlement::{BillingCycle, ModuleKey, Plan, SubModuleKey};

use crate::client::ApiClient;
use crate::dto::{
    CredentialsPayload, ListModulesResponse, MeResponse, ModuleDto, OkResponse,
    SelectModulesPayload, SelectPlanPayload, SignupResponse, UserDto,
};
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /me` - current user, subscription and module state.
    pub async fn me(&self) -> ApiResult<MeResponse> {
        self.get("/me").await
    }

    /// `POST /auth/signup`.
    pub async fn signup(&self, email: &str, password: &str) -> ApiResult<UserDto> {
        let payload = CredentialsPayload {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: SignupResponse = self.post("/auth/signup", &payload).await?;
        Ok(response.user)
    }

    /// `POST /auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        let payload = CredentialsPayload {
            email: email.to_string(),
            password: password.to_string(),
        };
        let _: OkResponse = self.post("/auth/login", &payload).await?;
        Ok(())
    }

    /// `POST /auth/logout`.
    pub async fn logout(&self) -> ApiResult<()> {
        let _: OkResponse = self.post("/auth/logout", &()).await?;
        Ok(())
    }

    /// `POST /onboarding/plan`.
    pub async fn select_plan(&self, plan: Plan, billing_cycle: BillingCycle) -> ApiResult<()> {
        let payload = SelectPlanPayload { plan, billing_cycle };
        let _: OkResponse = self.post("/onboarding/plan", &payload).await?;
        Ok(())
    }

    /// `GET /modules` - the selectable module catalog.
    pub async fn list_modules(&self) -> ApiResult<Vec<ModuleDto>> {
        let response: ListModulesResponse = self.get("/modules").await?;
        Ok(response.modules)
    }

    /// `POST /onboarding/modules`.
    pub async fn select_modules(
        &self,
        module_keys: Vec<ModuleKey>,
        sub_module_keys: Vec<SubModuleKey>,
    ) -> ApiResult<()> {
        let payload = SelectModulesPayload {
            module_keys,
            sub_module_keys,
        };
        let _: OkResponse = self.post("/onboarding/modules", &payload).await?;
        Ok(())
    }
}
