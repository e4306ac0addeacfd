//! Tenant views: the catalogue of available rooms and the rental form

use super::{Context, money, prompt, rooms::print_room, yes_no};
use anyhow::{Result, bail};
use logis_core::{
    AccessGuard, Role,
    models::{ContractForm, RoomId},
};

fn guard() -> AccessGuard {
    AccessGuard::require(Role::Locataire)
}

pub async fn show(ctx: &Context) -> Result<()> {
    ctx.enter(guard())?;
    let catalogue = ctx.api.catalogue().available().await?;

    if ctx.emit_json(&catalogue)? {
        return Ok(());
    }
    if catalogue.is_empty() {
        println!("No rooms available right now.");
        return Ok(());
    }

    for entry in &catalogue {
        let house = &entry.house;
        println!("House #{}: {}", house.id, house.address);
        if let Some(url) = house.map_url() {
            println!("  {}", url);
        }
        for room in &entry.rooms {
            println!(
                "  #{:<5} {:<24} {:<12} {:>14}  furnished: {}",
                room.id,
                room.title,
                room.kind.as_str(),
                money(room.price),
                yes_no(room.furnished)
            );
        }
        println!();
    }
    println!("Rent a room with `logis rent <room id>`.");
    Ok(())
}

/// Rental form values given on the command line
#[derive(Debug, Default)]
pub struct RentInput {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub payment_mode: Option<String>,
    pub periodicity: Option<String>,
    pub deposit: Option<String>,
}

pub async fn rent(ctx: &Context, room_id: RoomId, input: RentInput) -> Result<()> {
    ctx.enter(guard())?;

    let room = ctx.api.rooms().get(room_id).await?;
    if !room.available {
        bail!("Room #{} is not available", room_id);
    }
    if !ctx.json {
        print_room(&room);
        println!();
    }

    let form = ContractForm {
        start_date: prompt::value_or_ask(input.start_date, "Start date (YYYY-MM-DD)")?,
        end_date: prompt::value_or_ask(input.end_date, "End date (YYYY-MM-DD)")?,
        payment_mode: prompt::value_or_ask(
            input.payment_mode,
            "Payment mode (cash/virement/mobile money)",
        )?,
        periodicity: prompt::value_or_ask(
            input.periodicity,
            "Periodicity (journalier/hebdomadaire/mensuel)",
        )?,
        deposit: prompt::value_or_ask(input.deposit, "Deposit (FCFA)")?,
    };
    let draft = form.into_draft(room.id)?;

    let created = ctx.api.contracts().create(&draft).await?;
    if ctx.emit_json(&created)? {
        return Ok(());
    }
    match created {
        Some(contract) => println!(
            "Contract #{} created for room #{} ({} to {}).",
            contract.id, room.id, contract.start_date, contract.end_date
        ),
        None => println!("Contract created for room #{}.", room.id),
    }
    println!("Follow it with `logis contracts list`.");
    Ok(())
}
