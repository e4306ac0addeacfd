//! Tenant catalogue: every house with at least one available room

use crate::{ApiClient, Result};
use futures::future::try_join_all;
use logis_core::models::HouseWithRooms;
use tracing::debug;

#[derive(Clone, Copy)]
pub struct Catalogue<'a> {
    api: &'a ApiClient,
}

impl<'a> Catalogue<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Houses with their available rooms, in house list order
    ///
    /// Room lists are fetched concurrently; the first failure fails the whole
    /// catalogue.
    pub async fn available(&self) -> Result<Vec<HouseWithRooms>> {
        let houses = self.api.houses().list().await?;
        let rooms = self.api.rooms();
        let room_lists = try_join_all(houses.iter().map(|house| rooms.list(house.id))).await?;

        let catalogue: Vec<HouseWithRooms> = houses
            .into_iter()
            .zip(room_lists)
            .filter_map(|(house, rooms)| {
                let rooms: Vec<_> = rooms.into_iter().filter(|room| room.available).collect();
                (!rooms.is_empty()).then_some(HouseWithRooms { house, rooms })
            })
            .collect();

        debug!(houses = catalogue.len(), "Catalogue loaded");
        Ok(catalogue)
    }
}
