//! Rooms (`/chambres/`)

use crate::{ApiClient, ApiRequest, Result};
use logis_core::models::{HouseId, Room, RoomDraft, RoomId, RoomPatch};
use tracing::info;

#[derive(Clone, Copy)]
pub struct Rooms<'a> {
    api: &'a ApiClient,
}

impl<'a> Rooms<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Rooms of one house
    pub async fn list(&self, house_id: HouseId) -> Result<Vec<Room>> {
        self.api
            .execute(&ApiRequest::get("/chambres/").query("maison_id", house_id))
            .await?
            .into_list()
    }

    pub async fn get(&self, id: RoomId) -> Result<Room> {
        self.api
            .execute(&ApiRequest::get(path(id)))
            .await?
            .into_typed()
    }

    pub async fn create(&self, draft: &RoomDraft) -> Result<Option<Room>> {
        draft.validate()?;
        let created: Option<Room> = self
            .api
            .execute(&ApiRequest::post("/chambres/").json(draft)?)
            .await?
            .into_optional()?;
        info!(house = draft.house_id, "Room created");
        Ok(created)
    }

    pub async fn update(&self, id: RoomId, patch: &RoomPatch) -> Result<Option<Room>> {
        self.api
            .execute(&ApiRequest::patch(path(id)).json(patch)?)
            .await?
            .into_optional()
    }

    pub async fn delete(&self, id: RoomId) -> Result<()> {
        self.api.execute(&ApiRequest::delete(path(id))).await?;
        info!(id, "Room deleted");
        Ok(())
    }
}

fn path(id: RoomId) -> String {
    format!("/chambres/{}/", id)
}
