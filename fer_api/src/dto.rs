//! # Wire Types
//!
//! Request and response bodies exactly as the backend speaks them: camelCase
//! field names, nullable fields as options, payload envelopes (`{item}`,
//! `{items}`, `{ok}`) kept explicit so endpoint signatures read like the API
//! reference.

use serde::{Deserialize, Serialize};

use fer_core::entitlement::{BillingCycle, ModuleKey, Plan, SubModuleKey};
use fer_core::rapport::MouvementType;

// ============================================================================
// Envelopes
// ============================================================================

/// `{item: ...}` wrapper used by single-resource endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEnvelope<T> {
    pub item: T,
}

/// `{item: ... | null}` wrapper used by by-rapport lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct NullableItemEnvelope<T> {
    pub item: Option<T>,
}

/// `{items: [...]}` wrapper used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsEnvelope<T> {
    pub items: Vec<T>,
}

/// `{ok: true}` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ============================================================================
// Account / onboarding
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub billing_cycle: Option<BillingCycle>,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default)]
    pub current_period_end: Option<String>,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDto {
    #[serde(default)]
    pub plan_selected: bool,
    #[serde(default)]
    pub modules_selected: bool,
    #[serde(default)]
    pub complete: bool,
}

/// Response of `GET /me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub subscription_active: bool,
    #[serde(default)]
    pub subscription: Option<SubscriptionDto>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub modules: Vec<ModuleKey>,
    #[serde(default)]
    pub sub_modules: Vec<SubModuleKey>,
    #[serde(default)]
    pub onboarding: Option<OnboardingDto>,
    /// Kept optional to distinguish "absent" from "false" in the
    /// completeness fallback chain.
    #[serde(default)]
    pub onboarding_complete: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialsPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlanPayload {
    pub plan: Plan,
    pub billing_cycle: BillingCycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleDto {
    pub key: ModuleKey,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListModulesResponse {
    pub modules: Vec<ModuleDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectModulesPayload {
    pub module_keys: Vec<ModuleKey>,
    pub sub_module_keys: Vec<SubModuleKey>,
}

// ============================================================================
// Ferraillage - rapports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RapportCounts {
    pub etats: u32,
    pub restants: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerRapportDto {
    pub id: String,
    pub chantier_name: String,
    #[serde(default)]
    pub sous_traitant: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "_count", default)]
    pub counts: Option<RapportCounts>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FerRapportDetailDto {
    #[serde(flatten)]
    pub rapport: FerRapportDto,
    #[serde(default)]
    pub etats: Vec<FerEtatChantierDto>,
    #[serde(default)]
    pub restants: Vec<FerRestantDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRapportPayload {
    pub chantier_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sous_traitant: Option<String>,
}

// ============================================================================
// Ferraillage - diametres, etats, mouvements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerDiametreDto {
    pub id: String,
    pub mm: u32,
    #[serde(default)]
    pub label: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDiametrePayload {
    pub mm: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerEtatChantierDto {
    pub id: String,
    pub rapport_id: String,
    #[serde(default)]
    pub etat_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FerEtatChantierFullDto {
    #[serde(flatten)]
    pub etat: FerEtatChantierDto,
    #[serde(default)]
    pub mouvements: Vec<FerMouvementDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEtatPayload {
    pub rapport_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etat_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerMouvementLigneDto {
    pub id: String,
    pub diametre_id: String,
    pub qty: String,
    pub diametre: FerDiametreDto,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerMouvementDto {
    pub id: String,
    pub etat_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: MouvementType,
    #[serde(default)]
    pub bon_livraison: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub lignes: Vec<FerMouvementLigneDto>,
    pub created_at: String,
    pub updated_at: String,
}

/// One quantity line of a mouvement/snapshot payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LigneInput {
    pub mm: u32,
    pub qty: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMouvementPayload {
    pub date: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MouvementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bon_livraison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub lignes: Vec<LigneInput>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMouvementPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MouvementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bon_livraison: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lignes: Option<Vec<LigneInput>>,
}

// ============================================================================
// Ferraillage - restants
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerRestantDto {
    pub id: String,
    pub rapport_id: String,
    #[serde(default)]
    pub rapport_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerRestantLigneDto {
    pub id: String,
    pub diametre_id: String,
    pub qty: String,
    pub diametre: FerDiametreDto,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FerRestantSnapshotDto {
    pub id: String,
    pub rapport_id: String,
    pub date: String,
    #[serde(default)]
    pub note: Option<String>,
    pub lignes: Vec<FerRestantLigneDto>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FerRestantFullDto {
    #[serde(flatten)]
    pub restant: FerRestantDto,
    #[serde(default)]
    pub snapshots: Vec<FerRestantSnapshotDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestantPayload {
    pub rapport_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rapport_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSnapshotPayload {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub lignes: Vec<LigneInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fer_core::entitlement::{BillingCycle, ModuleKey, Plan};

    #[test]
    fn test_me_response_full() {
        let json = r#"{
            "user": {"id": "u1", "email": "chef@chantier.tn"},
            "subscriptionActive": true,
            "subscription": {
                "status": "ACTIVE",
                "plan": "INDIVIDUAL",
                "billingCycle": "MONTHLY",
                "seats": 1,
                "currentPeriodEnd": "2026-09-01T00:00:00Z",
                "expired": false,
                "valid": true
            },
            "plan": "INDIVIDUAL",
            "modules": ["MODULE_1"],
            "subModules": ["FERRAILLAGE"],
            "onboarding": {"planSelected": true, "modulesSelected": true, "complete": true},
            "onboardingComplete": true
        }"#;
        let me: MeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(me.user.as_ref().unwrap().email, "chef@chantier.tn");
        let sub = me.subscription.as_ref().unwrap();
        assert_eq!(sub.plan, Some(Plan::Individual));
        assert_eq!(sub.billing_cycle, Some(BillingCycle::Monthly));
        assert_eq!(me.modules, vec![ModuleKey::Module1]);
        assert_eq!(me.onboarding_complete, Some(true));
    }

    #[test]
    fn test_me_response_anonymous() {
        // The backend answers a bare object for anonymous sessions.
        let me: MeResponse = serde_json::from_str(r#"{"user": null}"#).unwrap();
        assert!(me.user.is_none());
        assert!(me.subscription.is_none());
        assert!(me.modules.is_empty());
        assert_eq!(me.onboarding_complete, None);
    }

    #[test]
    fn test_mouvement_dto() {
        let json = r#"{
            "id": "m1",
            "etatId": "e1",
            "date": "2025-06-03",
            "type": "TRANSFERT",
            "bonLivraison": null,
            "note": "Qté. Fer Transférée à Chantier B",
            "lignes": [{
                "id": "l1",
                "diametreId": "d8",
                "qty": "-0.5",
                "diametre": {"id": "d8", "mm": 8, "label": null, "isActive": true}
            }],
            "createdAt": "2025-06-03T10:00:00Z",
            "updatedAt": "2025-06-03T10:00:00Z"
        }"#;
        let m: FerMouvementDto = serde_json::from_str(json).unwrap();
        assert_eq!(m.kind, fer_core::rapport::MouvementType::Transfert);
        assert_eq!(m.lignes[0].diametre.mm, 8);
        assert!(m.bon_livraison.is_none());
    }

    #[test]
    fn test_rapport_detail_flattens() {
        let json = r#"{
            "id": "r1",
            "chantierName": "Chantier A",
            "sousTraitant": "Ste. AM SIOUD",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z",
            "_count": {"etats": 1, "restants": 2},
            "etats": [],
            "restants": []
        }"#;
        let d: FerRapportDetailDto = serde_json::from_str(json).unwrap();
        assert_eq!(d.rapport.chantier_name, "Chantier A");
        assert_eq!(d.rapport.counts.as_ref().unwrap().restants, 2);
    }

    #[test]
    fn test_select_modules_payload_wire_shape() {
        let payload = SelectModulesPayload {
            module_keys: vec![ModuleKey::Module1],
            sub_module_keys: vec![fer_core::entitlement::SubModuleKey::new("FERRAILLAGE")],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["moduleKeys"][0], "MODULE_1");
        assert_eq!(json["subModuleKeys"][0], "FERRAILLAGE");
    }

    #[test]
    fn test_update_mouvement_payload_omits_absent_fields() {
        let payload = UpdateMouvementPayload {
            note: Some("corrigé".to_string()),
            ..UpdateMouvementPayload::default()
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"note":"corrigé"}"#);
    }
}
