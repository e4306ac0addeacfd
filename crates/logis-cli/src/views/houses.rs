//! Owner views: house list, detail, form and deletion

use super::{Context, money, prompt, yes_no};
use anyhow::Result;
use logis_core::{
    AccessGuard, Role,
    models::{House, HouseDraft, HouseId, HousePatch, HouseWithRooms},
};

fn guard() -> AccessGuard {
    AccessGuard::require(Role::Proprietaire)
}

/// House form values given on the command line
#[derive(Debug, Default)]
pub struct HouseInput {
    pub address: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub description: Option<String>,
}

impl HouseInput {
    fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.description.is_none()
    }

    /// Overwrite the draft with the values that were given
    fn apply(self, draft: &mut HouseDraft) {
        if let Some(address) = self.address {
            draft.address = address;
        }
        if let Some(latitude) = self.latitude {
            draft.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            draft.longitude = longitude;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
    }
}

pub async fn list(ctx: &Context) -> Result<()> {
    ctx.enter(guard())?;
    let houses = ctx.api.houses().list().await?;

    if ctx.emit_json(&houses)? {
        return Ok(());
    }
    if houses.is_empty() {
        println!("No houses yet. Add one with `logis houses add`.");
        return Ok(());
    }
    for house in &houses {
        print_house_line(house);
    }
    Ok(())
}

pub async fn show(ctx: &Context, id: HouseId) -> Result<()> {
    ctx.enter(guard())?;
    let house = ctx.api.houses().get(id).await?;
    let rooms = ctx.api.rooms().list(id).await?;
    let detail = HouseWithRooms { house, rooms };

    if ctx.emit_json(&detail)? {
        return Ok(());
    }

    let house = &detail.house;
    println!("House #{}: {}", house.id, house.address);
    println!("  {}", house.description);
    match house.map_url() {
        Some(url) => println!("  Map: {}", url),
        None => println!("  Map: unavailable (invalid coordinates)"),
    }
    println!();
    if detail.rooms.is_empty() {
        println!("No rooms yet. Add one with `logis rooms add --house {}`.", house.id);
    }
    for room in &detail.rooms {
        println!(
            "  #{:<5} {:<24} {:>14}  available: {}",
            room.id,
            room.title,
            money(room.price),
            yes_no(room.available)
        );
    }
    Ok(())
}

pub async fn add(ctx: &Context, input: HouseInput) -> Result<()> {
    ctx.enter(guard())?;
    let draft = HouseDraft {
        address: prompt::value_or_ask(input.address, "Address")?,
        latitude: prompt::value_or_ask(input.latitude, "Latitude")?,
        longitude: prompt::value_or_ask(input.longitude, "Longitude")?,
        description: prompt::value_or_ask(input.description, "Description")?,
    };

    let created = ctx.api.houses().create(&draft).await?;
    if ctx.emit_json(&created)? {
        return Ok(());
    }
    match created {
        Some(house) => println!("House #{} created.", house.id),
        None => println!("House created."),
    }
    Ok(())
}

/// Edit form: the current values are kept unless overridden
pub async fn edit(ctx: &Context, id: HouseId, input: HouseInput) -> Result<()> {
    ctx.enter(guard())?;
    if input.is_empty() {
        anyhow::bail!("Nothing to change; pass at least one field to update");
    }

    let current = ctx.api.houses().get(id).await?;
    let mut draft = HouseDraft::from_house(&current);
    input.apply(&mut draft);
    let draft = draft.trimmed();
    draft.validate()?;

    let updated = ctx.api.houses().update(id, &HousePatch::from(draft)).await?;
    if !ctx.emit_json(&updated)? {
        println!("House #{} updated.", id);
    }
    Ok(())
}

pub async fn delete(ctx: &Context, id: HouseId, assume_yes: bool) -> Result<()> {
    ctx.enter(guard())?;
    if !prompt::confirm(&format!("Delete house #{} and its rooms?", id), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.api.houses().delete(id).await?;
    if !ctx.emit_json(&serde_json::json!({ "deleted": id }))? {
        println!("House #{} deleted.", id);
    }
    Ok(())
}

fn print_house_line(house: &House) {
    let position = house
        .coordinates()
        .map(|(lat, lon)| format!("({:.5}, {:.5})", lat, lon))
        .unwrap_or_default();
    println!("#{:<5} {:<40} {}", house.id, house.address, position);
}
