//! Houses (`/maisons/`)

use crate::{ApiClient, ApiRequest, Result};
use logis_core::models::{House, HouseDraft, HouseId, HousePatch};
use tracing::info;

/// House endpoints; the owner only sees their own houses
#[derive(Clone, Copy)]
pub struct Houses<'a> {
    api: &'a ApiClient,
}

impl<'a> Houses<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<House>> {
        self.api
            .execute(&ApiRequest::get("/maisons/"))
            .await?
            .into_list()
    }

    pub async fn get(&self, id: HouseId) -> Result<House> {
        self.api
            .execute(&ApiRequest::get(path(id)))
            .await?
            .into_typed()
    }

    /// Validate and create a house
    pub async fn create(&self, draft: &HouseDraft) -> Result<Option<House>> {
        let draft = draft.trimmed();
        draft.validate()?;
        let created: Option<House> = self
            .api
            .execute(&ApiRequest::post("/maisons/").json(&draft)?)
            .await?
            .into_optional()?;
        info!(id = ?created.as_ref().map(|h| h.id), "House created");
        Ok(created)
    }

    pub async fn update(&self, id: HouseId, patch: &HousePatch) -> Result<Option<House>> {
        self.api
            .execute(&ApiRequest::patch(path(id)).json(patch)?)
            .await?
            .into_optional()
    }

    pub async fn delete(&self, id: HouseId) -> Result<()> {
        self.api.execute(&ApiRequest::delete(path(id))).await?;
        info!(id, "House deleted");
        Ok(())
    }
}

fn path(id: HouseId) -> String {
    format!("/maisons/{}/", id)
}
