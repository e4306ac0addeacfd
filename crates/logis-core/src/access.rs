//! Role gating for protected views
//!
//! Each protected view starts in [`AccessState::CheckingAuth`] and resolves
//! once to either [`AccessState::Authorized`] or a redirect. The decision is
//! presentation only: an authorized view still gets rejected by the server if
//! the account lacks the rights.

use crate::{claims::Claims, role::Role};
use tracing::debug;

/// Where a rejected view sends the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// No session at all
    Login,
    /// Logged in, but the view belongs to the other role
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessState {
    CheckingAuth,
    Authorized,
    Redirecting(Redirect),
}

/// Access check for one protected view
#[derive(Debug, Clone)]
pub struct AccessGuard {
    required: Option<Role>,
    state: AccessState,
}

impl AccessGuard {
    /// Guard that only requires a session
    pub fn authenticated() -> Self {
        Self {
            required: None,
            state: AccessState::CheckingAuth,
        }
    }

    /// Guard that also requires a role
    pub fn require(role: Role) -> Self {
        Self {
            required: Some(role),
            state: AccessState::CheckingAuth,
        }
    }

    pub fn required(&self) -> Option<&Role> {
        self.required.as_ref()
    }

    pub fn state(&self) -> &AccessState {
        &self.state
    }

    /// Resolve the guard against the stored access token
    ///
    /// Only the first call decides; later calls return the settled state.
    pub fn resolve(&mut self, access_token: Option<&str>) -> &AccessState {
        if self.state != AccessState::CheckingAuth {
            return &self.state;
        }

        self.state = match access_token.filter(|token| !token.is_empty()) {
            None => AccessState::Redirecting(Redirect::Login),
            Some(token) => {
                let role = Claims::decode(token).ok().and_then(|claims| claims.role);
                match (&self.required, role) {
                    (Some(required), Some(actual)) if *required != actual => {
                        debug!(
                            "Role '{}' cannot open a view reserved to '{}'",
                            actual, required
                        );
                        AccessState::Redirecting(Redirect::Dashboard)
                    }
                    _ => AccessState::Authorized,
                }
            }
        };

        &self.state
    }
}

/// Home view chosen from the role on the token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Owner's house management view
    Houses,
    /// Tenant's catalogue of available rooms
    Catalogue,
    /// Role unknown; only generic navigation is offered
    Generic,
}

impl Landing {
    pub fn for_role(role: Option<&Role>) -> Self {
        match role {
            Some(Role::Proprietaire) => Landing::Houses,
            Some(Role::Locataire) => Landing::Catalogue,
            _ => Landing::Generic,
        }
    }
}
