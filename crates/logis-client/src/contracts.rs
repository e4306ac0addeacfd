//! Lease contracts (`/contrats/`)
//!
//! The server scopes the list to the caller: an owner gets the contracts on
//! their rooms, a tenant gets their own.

use crate::{ApiClient, ApiRequest, Result};
use logis_core::models::{Contract, ContractDraft, ContractId, ContractPatch};
use tracing::info;

#[derive(Clone, Copy)]
pub struct Contracts<'a> {
    api: &'a ApiClient,
}

impl<'a> Contracts<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Contract>> {
        self.api
            .execute(&ApiRequest::get("/contrats/"))
            .await?
            .into_list()
    }

    /// Rent a room
    pub async fn create(&self, draft: &ContractDraft) -> Result<Option<Contract>> {
        let created: Option<Contract> = self
            .api
            .execute(&ApiRequest::post("/contrats/").json(draft)?)
            .await?
            .into_optional()?;
        info!(room = draft.room, "Contract created");
        Ok(created)
    }

    pub async fn update(&self, id: ContractId, patch: &ContractPatch) -> Result<Option<Contract>> {
        self.api
            .execute(&ApiRequest::patch(path(id)).json(patch)?)
            .await?
            .into_optional()
    }

    /// Cancel a contract
    pub async fn delete(&self, id: ContractId) -> Result<()> {
        self.api.execute(&ApiRequest::delete(path(id))).await?;
        info!(id, "Contract cancelled");
        Ok(())
    }
}

fn path(id: ContractId) -> String {
    format!("/contrats/{}/", id)
}
