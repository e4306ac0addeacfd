//! Terminal views
//!
//! Each command is one view. Protected views resolve an [`AccessGuard`] against
//! the stored token before doing anything else; the server still authorizes
//! every call on its own.

pub mod catalogue;
pub mod contracts;
pub mod dashboard;
pub mod houses;
pub mod profile;
pub mod rooms;
pub mod session;

mod prompt;

use anyhow::Result;
use logis_client::ApiClient;
use logis_core::{AccessGuard, AccessState, Claims, Redirect, Role};
use logis_storage::{Session, keys};
use serde::Serialize;
use thiserror::Error;

/// Why a protected view did not open
#[derive(Debug, Error)]
pub enum Denied {
    #[error("Not logged in")]
    LoginRequired,

    #[error("This view is for {required} accounts. Run `logis dashboard` to open yours.")]
    WrongRole { required: Role },
}

impl Denied {
    pub fn requires_login(&self) -> bool {
        matches!(self, Denied::LoginRequired)
    }
}

pub struct Context {
    pub api: ApiClient,
    pub json: bool,
}

impl Context {
    pub fn new(api: ApiClient, json: bool) -> Self {
        Self { api, json }
    }

    /// Resolve a view's guard; returns the token claims when they decode
    pub fn enter(&self, mut guard: AccessGuard) -> Result<Option<Claims>> {
        let token = Session::token(self.api.store(), keys::ACCESS_TOKEN)?;
        let state = guard.resolve(token.as_deref()).clone();

        match (state, guard.required().cloned()) {
            (AccessState::Authorized, _) => Ok(token.and_then(|t| Claims::decode(&t).ok())),
            (AccessState::Redirecting(Redirect::Dashboard), Some(required)) => {
                Err(Denied::WrongRole { required }.into())
            }
            _ => Err(Denied::LoginRequired.into()),
        }
    }

    /// Print `value` as JSON when `--json` is set; returns whether it did
    pub fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }
}

/// Render an amount the way listings show it
pub fn money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0} FCFA", amount)
    } else {
        format!("{:.2} FCFA", amount)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
