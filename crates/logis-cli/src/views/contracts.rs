//! Contract list, cancellation and edits
//!
//! Both roles open this view; the server returns the contracts the caller is
//! party to.

use super::{Context, money, prompt};
use anyhow::{Context as _, Result, bail};
use logis_core::{
    AccessGuard, Claims, Role,
    models::{Contract, ContractId, ContractPatch},
};

/// Guard for the viewer's own role; an unknown role only needs a session
fn guard(claims: Option<&Claims>) -> AccessGuard {
    match claims.and_then(|c| c.role.clone()) {
        Some(role) if role.is_known() => AccessGuard::require(role),
        _ => AccessGuard::authenticated(),
    }
}

fn viewer_claims(ctx: &Context) -> Result<Option<Claims>> {
    let claims = ctx.api.claims()?;
    ctx.enter(guard(claims.as_ref()))
}

pub async fn list(ctx: &Context) -> Result<()> {
    let claims = viewer_claims(ctx)?;
    let contracts = ctx.api.contracts().list().await?;

    if ctx.emit_json(&contracts)? {
        return Ok(());
    }
    if contracts.is_empty() {
        println!("No contracts.");
        return Ok(());
    }

    let owner = claims.and_then(|c| c.role) == Some(Role::Proprietaire);
    for contract in &contracts {
        print_contract(contract, owner);
    }
    Ok(())
}

pub async fn cancel(ctx: &Context, id: ContractId, assume_yes: bool) -> Result<()> {
    viewer_claims(ctx)?;

    let contracts = ctx.api.contracts().list().await?;
    let Some(contract) = contracts.iter().find(|c| c.id == id) else {
        bail!("Contract #{} not found", id);
    };
    if !contract.status.is_cancellable() {
        bail!(
            "Contract #{} is '{}'; only contracts in progress can be cancelled",
            id,
            contract.status
        );
    }

    if !prompt::confirm(&format!("Cancel contract #{}?", id), assume_yes)? {
        println!("Kept.");
        return Ok(());
    }
    ctx.api.contracts().delete(id).await?;
    if !ctx.emit_json(&serde_json::json!({ "cancelled": id }))? {
        println!("Contract #{} cancelled.", id);
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct ContractInput {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub payment_mode: Option<String>,
    pub periodicity: Option<String>,
    pub deposit: Option<f64>,
}

impl ContractInput {
    fn into_patch(self) -> Result<ContractPatch> {
        let mut patch = ContractPatch::default();
        if let Some(date) = self.start_date {
            patch.start_date = Some(
                date.trim()
                    .parse()
                    .with_context(|| format!("Invalid start date '{}'", date))?,
            );
        }
        if let Some(date) = self.end_date {
            patch.end_date = Some(
                date.trim()
                    .parse()
                    .with_context(|| format!("Invalid end date '{}'", date))?,
            );
        }
        if let (Some(start), Some(end)) = (patch.start_date, patch.end_date)
            && end <= start
        {
            bail!("End date must be after start date");
        }
        if let Some(mode) = self.payment_mode {
            patch.payment_mode = Some(mode.parse()?);
        }
        if let Some(periodicity) = self.periodicity {
            patch.periodicity = Some(periodicity.parse()?);
        }
        if let Some(deposit) = self.deposit {
            if deposit.is_nan() || deposit <= 0.0 {
                bail!("Deposit must be greater than zero");
            }
            patch.deposit = Some(deposit);
        }
        Ok(patch)
    }
}

pub async fn update(ctx: &Context, id: ContractId, input: ContractInput) -> Result<()> {
    viewer_claims(ctx)?;
    let patch = input.into_patch()?;
    if patch.is_empty() {
        bail!("Nothing to change; pass at least one field to update");
    }

    let updated = ctx.api.contracts().update(id, &patch).await?;
    if !ctx.emit_json(&updated)? {
        println!("Contract #{} updated.", id);
    }
    Ok(())
}

fn print_contract(contract: &Contract, owner: bool) {
    println!(
        "Contract #{} [{}] room #{}",
        contract.id, contract.status, contract.room_id
    );
    println!(
        "  {} to {} ({} days)",
        contract.start_date,
        contract.end_date,
        contract.duration_days()
    );
    if let Some(rent) = contract.rent {
        println!("  Rent:    {}", money(rent));
    }
    if let Some(deposit) = contract.deposit {
        println!("  Deposit: {}", money(deposit));
    }
    match &contract.periodicity {
        Some(periodicity) => println!("  Payment: {}, {}", contract.payment_mode, periodicity),
        None => println!("  Payment: {}", contract.payment_mode),
    }
    if owner && let Some(tenant) = &contract.tenant {
        println!(
            "  Tenant:  {} {} <{}>",
            tenant.first_name, tenant.last_name, tenant.email
        );
    }
}
