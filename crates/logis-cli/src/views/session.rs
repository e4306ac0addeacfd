//! Login, registration, logout and the current session

use super::{Context, prompt};
use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use logis_core::{Landing, Role, models::Registration};
use serde::Serialize;

pub async fn login(ctx: &Context, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = prompt::value_or_ask(email, "Email")?;
    let password = prompt::value_or_ask(password, "Password")?;

    let outcome = ctx.api.login(&email, &password).await?;

    #[derive(Serialize)]
    struct LoggedIn<'a> {
        display_name: Option<&'a str>,
        role: Option<&'a Role>,
    }
    if ctx.emit_json(&LoggedIn {
        display_name: outcome.display_name.as_deref(),
        role: outcome.role.as_ref(),
    })? {
        return Ok(());
    }

    println!(
        "Welcome, {}!",
        outcome.display_name.as_deref().unwrap_or(email.as_str())
    );
    println!("{}", landing_hint(Landing::for_role(outcome.role.as_ref())));
    Ok(())
}

pub struct RegisterInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub telephone: Option<String>,
    pub cni: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

pub async fn register(ctx: &Context, input: RegisterInput) -> Result<()> {
    let email = prompt::value_or_ask(input.email, "Email")?.trim().to_string();
    let username = prompt::value_or_ask(input.username, "Username")?;
    let first_name = prompt::value_or_ask(input.first_name, "First name")?;
    let last_name = prompt::value_or_ask(input.last_name, "Last name")?;
    let telephone = prompt::value_or_ask(input.telephone, "Phone number")?;
    let cni = prompt::value_or_ask(input.cni, "National ID number")?;
    let role: Role = prompt::value_or_ask(input.role, "Role (proprietaire/locataire)")?.parse()?;

    let (password, password_confirmation) = match input.password {
        Some(password) => (password.clone(), password),
        None => (prompt::ask("Password")?, prompt::ask("Confirm password")?),
    };

    let registration = Registration {
        email,
        username,
        first_name,
        last_name,
        telephone,
        cni,
        role,
        password,
        password_confirmation,
    };

    ctx.api
        .register(&registration)
        .await
        .context("Registration failed")?;

    if !ctx.emit_json(&serde_json::json!({ "registered": registration.email }))? {
        println!("Account created for {}.", registration.email);
        println!("Log in with `logis login --email {}`.", registration.email);
    }
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.api.logout()?;
    if !ctx.emit_json(&serde_json::json!({ "logged_out": true }))? {
        println!("Logged out.");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct WhoAmI {
    authenticated: bool,
    display_name: Option<String>,
    role: Option<Role>,
    expires_at: Option<DateTime<Utc>>,
    expired: bool,
}

/// Describe the stored session without calling the server
pub fn whoami(ctx: &Context) -> Result<()> {
    let authenticated = ctx.api.is_authenticated()?;
    let claims = ctx.api.claims()?.unwrap_or_default();
    let info = WhoAmI {
        authenticated,
        display_name: ctx.api.display_name()?,
        role: claims.role.clone(),
        expires_at: claims.expires_at(),
        expired: claims.is_expired_at(Utc::now()),
    };

    if ctx.emit_json(&info)? {
        return Ok(());
    }

    if !info.authenticated {
        println!("Not logged in. Run `logis login`.");
        return Ok(());
    }

    println!(
        "Logged in as {}",
        info.display_name.as_deref().unwrap_or("(unknown)")
    );
    if let Some(role) = &info.role {
        println!("Role: {}", role);
    }
    if let Some(expires_at) = info.expires_at {
        let note = if info.expired {
            " (expired, renewed on the next request)"
        } else {
            ""
        };
        println!("Access token valid until {}{}", expires_at.to_rfc3339(), note);
    }
    Ok(())
}

pub fn landing_hint(landing: Landing) -> &'static str {
    match landing {
        Landing::Houses => "Manage your houses with `logis houses list`.",
        Landing::Catalogue => "Browse available rooms with `logis catalogue`.",
        Landing::Generic => "Your account has no owner or tenant role on this client.",
    }
}
