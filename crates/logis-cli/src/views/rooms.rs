//! Owner views for the rooms of a house

use super::{Context, money, prompt, yes_no};
use anyhow::{Context as _, Result, bail};
use logis_core::{
    AccessGuard, Role,
    models::{HouseId, Room, RoomDraft, RoomId, RoomKind, RoomPatch},
};

fn guard() -> AccessGuard {
    AccessGuard::require(Role::Proprietaire)
}

#[derive(Debug, Default)]
pub struct RoomInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub size: Option<String>,
    pub kind: Option<String>,
    pub furnished: Option<bool>,
    pub has_bathroom: Option<bool>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl RoomInput {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.size.is_none()
            && self.kind.is_none()
            && self.furnished.is_none()
            && self.has_bathroom.is_none()
            && self.price.is_none()
            && self.available.is_none()
    }

    fn apply(self, draft: &mut RoomDraft) -> Result<()> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(size) = self.size {
            draft.size = size;
        }
        if let Some(kind) = self.kind {
            draft.kind = kind.parse::<RoomKind>()?;
        }
        if let Some(furnished) = self.furnished {
            draft.furnished = furnished;
        }
        if let Some(has_bathroom) = self.has_bathroom {
            draft.has_bathroom = has_bathroom;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(available) = self.available {
            draft.available = available;
        }
        Ok(())
    }
}

pub async fn list(ctx: &Context, house_id: HouseId) -> Result<()> {
    ctx.enter(guard())?;
    let rooms = ctx.api.rooms().list(house_id).await?;

    if ctx.emit_json(&rooms)? {
        return Ok(());
    }
    if rooms.is_empty() {
        println!("No rooms in house #{}.", house_id);
    }
    for room in &rooms {
        println!(
            "#{:<5} {:<24} {:<12} {:>14}  available: {}",
            room.id,
            room.title,
            room.kind.as_str(),
            money(room.price),
            yes_no(room.available)
        );
    }
    Ok(())
}

pub async fn show(ctx: &Context, id: RoomId) -> Result<()> {
    ctx.enter(guard())?;
    let room = ctx.api.rooms().get(id).await?;
    if !ctx.emit_json(&room)? {
        print_room(&room);
    }
    Ok(())
}

pub async fn add(ctx: &Context, house_id: HouseId, input: RoomInput) -> Result<()> {
    ctx.enter(guard())?;

    let mut draft = RoomDraft::for_house(house_id);
    let price = match input.price {
        Some(price) => price,
        None => prompt::ask("Price (FCFA)")?
            .trim()
            .parse()
            .context("Price must be a number")?,
    };
    let input = RoomInput {
        title: Some(prompt::value_or_ask(input.title, "Title")?),
        description: Some(prompt::value_or_ask(input.description, "Description")?),
        size: Some(prompt::value_or_ask(input.size, "Size")?),
        price: Some(price),
        ..input
    };
    input.apply(&mut draft)?;

    let created = ctx.api.rooms().create(&draft).await?;
    if ctx.emit_json(&created)? {
        return Ok(());
    }
    match created {
        Some(room) => println!("Room #{} added to house #{}.", room.id, house_id),
        None => println!("Room added to house #{}.", house_id),
    }
    Ok(())
}

pub async fn edit(ctx: &Context, id: RoomId, input: RoomInput) -> Result<()> {
    ctx.enter(guard())?;
    if input.is_empty() {
        bail!("Nothing to change; pass at least one field to update");
    }

    let current = ctx.api.rooms().get(id).await?;
    let mut draft = RoomDraft::from_room(&current);
    input.apply(&mut draft)?;
    draft.validate()?;

    let updated = ctx.api.rooms().update(id, &RoomPatch::from(draft)).await?;
    if !ctx.emit_json(&updated)? {
        println!("Room #{} updated.", id);
    }
    Ok(())
}

pub async fn delete(ctx: &Context, id: RoomId, assume_yes: bool) -> Result<()> {
    ctx.enter(guard())?;
    if !prompt::confirm(&format!("Delete room #{}?", id), assume_yes)? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.api.rooms().delete(id).await?;
    if !ctx.emit_json(&serde_json::json!({ "deleted": id }))? {
        println!("Room #{} deleted.", id);
    }
    Ok(())
}

pub fn print_room(room: &Room) {
    println!("Room #{}: {} (house #{})", room.id, room.title, room.house_id);
    println!("  {}", room.description);
    println!("  Type:      {}", room.kind);
    println!("  Size:      {}", room.size);
    println!("  Furnished: {}", yes_no(room.furnished));
    println!("  Bathroom:  {}", yes_no(room.has_bathroom));
    println!("  Price:     {}", money(room.price));
    println!("  Available: {}", yes_no(room.available));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_parses_kind() {
        let mut draft = RoomDraft::for_house(1);
        RoomInput {
            kind: Some("Appartement".to_string()),
            price: Some(30000.0),
            ..Default::default()
        }
        .apply(&mut draft)
        .unwrap();

        assert_eq!(draft.kind, RoomKind::Appartement);
        assert_eq!(draft.price, 30000.0);
        assert!(draft.available);
    }

    #[test]
    fn test_apply_rejects_unknown_kind() {
        let mut draft = RoomDraft::for_house(1);
        let err = RoomInput {
            kind: Some("villa".to_string()),
            ..Default::default()
        }
        .apply(&mut draft)
        .unwrap_err();
        assert!(err.to_string().contains("villa"));
    }
}
