//! # Ferraillage Endpoints
//!
//! Rapport CRUD plus the attachement data: the diameter catalog, the etat de
//! chantier with its mouvements, and the restant non confectionné with its
//! snapshots.

use crate::client::{encode_segment, ApiClient};
use crate::dto::{
    CreateEtatPayload, CreateMouvementPayload, CreateRapportPayload, CreateRestantPayload,
    FerDiametreDto, FerEtatChantierDto, FerEtatChantierFullDto, FerMouvementDto, FerRapportDetailDto,
    FerRapportDto, FerRestantDto, FerRestantFullDto, FerRestantSnapshotDto, ItemEnvelope,
    ItemsEnvelope, NullableItemEnvelope, OkResponse, UpdateMouvementPayload, UpsertDiametrePayload,
    UpsertSnapshotPayload,
};
use crate::error::ApiResult;

const BASE: &str = "/ferraillage";

impl ApiClient {
    // ------------------------------------------------------------------
    // Rapports
    // ------------------------------------------------------------------

    /// `GET /ferraillage/rapports[?q=]`.
    pub async fn list_rapports(&self, q: Option<&str>) -> ApiResult<Vec<FerRapportDto>> {
        let path = format!("{BASE}/rapports");
        let response: ItemsEnvelope<FerRapportDto> = match q {
            Some(q) if !q.is_empty() => self.get_with_query(&path, &[("q", q)]).await?,
            _ => self.get(&path).await?,
        };
        Ok(response.items)
    }

    /// `POST /ferraillage/rapports`.
    pub async fn create_rapport(&self, payload: &CreateRapportPayload) -> ApiResult<FerRapportDto> {
        let response: ItemEnvelope<FerRapportDto> =
            self.post(&format!("{BASE}/rapports"), payload).await?;
        Ok(response.item)
    }

    /// `GET /ferraillage/rapports/:id`.
    pub async fn get_rapport(&self, rapport_id: &str) -> ApiResult<FerRapportDetailDto> {
        let response: ItemEnvelope<FerRapportDetailDto> = self
            .get(&format!("{BASE}/rapports/{}", encode_segment(rapport_id)))
            .await?;
        Ok(response.item)
    }

    /// `DELETE /ferraillage/rapports/:id`.
    pub async fn delete_rapport(&self, rapport_id: &str) -> ApiResult<()> {
        let _: OkResponse = self
            .delete(&format!("{BASE}/rapports/{}", encode_segment(rapport_id)))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Diametres
    // ------------------------------------------------------------------

    /// `GET /ferraillage/diametres`.
    pub async fn list_diametres(&self) -> ApiResult<Vec<FerDiametreDto>> {
        let response: ItemsEnvelope<FerDiametreDto> =
            self.get(&format!("{BASE}/diametres")).await?;
        Ok(response.items)
    }

    /// `POST /ferraillage/diametres` (upsert by mm).
    pub async fn upsert_diametre(
        &self,
        payload: &UpsertDiametrePayload,
    ) -> ApiResult<FerDiametreDto> {
        let response: ItemEnvelope<FerDiametreDto> =
            self.post(&format!("{BASE}/diametres"), payload).await?;
        Ok(response.item)
    }

    // ------------------------------------------------------------------
    // Etat de chantier + mouvements
    // ------------------------------------------------------------------

    /// `POST /ferraillage/etat`.
    pub async fn create_etat(&self, payload: &CreateEtatPayload) -> ApiResult<FerEtatChantierDto> {
        let response: ItemEnvelope<FerEtatChantierDto> =
            self.post(&format!("{BASE}/etat"), payload).await?;
        Ok(response.item)
    }

    /// `GET /ferraillage/etat/:id`.
    pub async fn get_etat(&self, etat_id: &str) -> ApiResult<FerEtatChantierFullDto> {
        let response: ItemEnvelope<FerEtatChantierFullDto> = self
            .get(&format!("{BASE}/etat/{}", encode_segment(etat_id)))
            .await?;
        Ok(response.item)
    }

    /// `GET /ferraillage/etat/by-rapport/:rapportId`; absent when the rapport
    /// has no etat yet.
    pub async fn etat_by_rapport(
        &self,
        rapport_id: &str,
    ) -> ApiResult<Option<FerEtatChantierFullDto>> {
        let response: NullableItemEnvelope<FerEtatChantierFullDto> = self
            .get(&format!(
                "{BASE}/etat/by-rapport/{}",
                encode_segment(rapport_id)
            ))
            .await?;
        Ok(response.item)
    }

    /// `POST /ferraillage/etat/:etatId/mouvements`.
    pub async fn create_mouvement(
        &self,
        etat_id: &str,
        payload: &CreateMouvementPayload,
    ) -> ApiResult<FerMouvementDto> {
        let response: ItemEnvelope<FerMouvementDto> = self
            .post(
                &format!("{BASE}/etat/{}/mouvements", encode_segment(etat_id)),
                payload,
            )
            .await?;
        Ok(response.item)
    }

    /// `PUT /ferraillage/mouvements/:id`.
    pub async fn update_mouvement(
        &self,
        mouvement_id: &str,
        payload: &UpdateMouvementPayload,
    ) -> ApiResult<FerMouvementDto> {
        let response: ItemEnvelope<FerMouvementDto> = self
            .put(
                &format!("{BASE}/mouvements/{}", encode_segment(mouvement_id)),
                payload,
            )
            .await?;
        Ok(response.item)
    }

    /// `DELETE /ferraillage/mouvements/:id`.
    pub async fn delete_mouvement(&self, mouvement_id: &str) -> ApiResult<()> {
        let _: OkResponse = self
            .delete(&format!(
                "{BASE}/mouvements/{}",
                encode_segment(mouvement_id)
            ))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Restant non confectionné + snapshots
    // ------------------------------------------------------------------

    /// `POST /ferraillage/restant`.
    pub async fn create_restant(&self, payload: &CreateRestantPayload) -> ApiResult<FerRestantDto> {
        let response: ItemEnvelope<FerRestantDto> =
            self.post(&format!("{BASE}/restant"), payload).await?;
        Ok(response.item)
    }

    /// `GET /ferraillage/restant/:id`.
    pub async fn get_restant(&self, restant_id: &str) -> ApiResult<FerRestantFullDto> {
        let response: ItemEnvelope<FerRestantFullDto> = self
            .get(&format!("{BASE}/restant/{}", encode_segment(restant_id)))
            .await?;
        Ok(response.item)
    }

    /// `GET /ferraillage/restant/by-rapport/:rapportId`.
    pub async fn restant_by_rapport(
        &self,
        rapport_id: &str,
    ) -> ApiResult<Option<FerRestantFullDto>> {
        let response: NullableItemEnvelope<FerRestantFullDto> = self
            .get(&format!(
                "{BASE}/restant/by-rapport/{}",
                encode_segment(rapport_id)
            ))
            .await?;
        Ok(response.item)
    }

    /// `PUT /ferraillage/restant/:id/snapshot` (upsert for the date).
    pub async fn upsert_snapshot(
        &self,
        restant_id: &str,
        payload: &UpsertSnapshotPayload,
    ) -> ApiResult<Option<FerRestantSnapshotDto>> {
        let response: NullableItemEnvelope<FerRestantSnapshotDto> = self
            .put(
                &format!("{BASE}/restant/{}/snapshot", encode_segment(restant_id)),
                payload,
            )
            .await?;
        Ok(response.item)
    }

    /// `DELETE /ferraillage/restant/:id`.
    pub async fn delete_restant(&self, restant_id: &str) -> ApiResult<()> {
        let _: OkResponse = self
            .delete(&format!("{BASE}/restant/{}", encode_segment(restant_id)))
            .await?;
        Ok(())
    }
}
