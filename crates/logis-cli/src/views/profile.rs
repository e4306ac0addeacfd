//! The caller's profile

use super::Context;
use anyhow::{Result, bail};
use logis_core::{AccessGuard, models::ProfileUpdate};

pub async fn show(ctx: &Context) -> Result<()> {
    ctx.enter(AccessGuard::authenticated())?;
    let profile = ctx.api.profile().get().await?;

    if ctx.emit_json(&profile)? {
        return Ok(());
    }
    println!("{} ({})", profile.full_name(), profile.username);
    println!("  Email:     {}", profile.email);
    println!("  Phone:     {}", profile.telephone);
    println!("  ID number: {}", profile.cni);
    if let Some(role) = &profile.role {
        println!("  Role:      {}", role);
    }
    Ok(())
}

pub async fn update(ctx: &Context, update: ProfileUpdate) -> Result<()> {
    ctx.enter(AccessGuard::authenticated())?;
    if update.is_empty() {
        bail!("Nothing to change; pass at least one field to update");
    }

    let updated = ctx.api.profile().update(&update).await?;
    if ctx.emit_json(&updated)? {
        return Ok(());
    }
    println!("Profile updated.");
    Ok(())
}
