//! The caller's own account (`/me/`)

use crate::{ApiClient, ApiRequest, Result};
use logis_core::models::{Profile, ProfileUpdate};

#[derive(Clone, Copy)]
pub struct ProfileClient<'a> {
    api: &'a ApiClient,
}

impl<'a> ProfileClient<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<Profile> {
        self.api
            .execute(&ApiRequest::get("/me/"))
            .await?
            .into_typed()
    }

    pub async fn update(&self, update: &ProfileUpdate) -> Result<Option<Profile>> {
        self.api
            .execute(&ApiRequest::patch("/me/").json(update)?)
            .await?
            .into_optional()
    }
}
