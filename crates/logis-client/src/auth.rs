//! Session lifecycle: login, registration, token refresh and logout

use crate::{
    ApiClient, ApiError, Result,
    api::read_public,
    error::error_message,
};
use logis_core::{
    Claims, Role,
    models::{LoginRequest, RefreshRequest, RefreshResponse, Registration, TokenPair},
};
use logis_storage::{Session, keys};
use tracing::{debug, info, instrument, warn};

const LOGIN_PATH: &str = "/token/";
const REFRESH_PATH: &str = "/token/refresh/";
const REGISTER_PATH: &str = "/register/";

/// What a successful login tells the view layer
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub claims: Claims,
    pub role: Option<Role>,
    pub display_name: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for a token pair and store the session
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.post_public(LOGIN_PATH, &request).await?;
        let tokens: TokenPair = read_public(response, "Invalid credentials").await?;

        let claims = match Claims::decode(&tokens.access) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Access token claims unreadable: {}", e);
                Claims::default()
            }
        };
        let user = tokens.user.unwrap_or_default();
        let role = claims.role.clone().or(user.role);
        let display_name = claims
            .display_name()
            .map(str::to_string)
            .or_else(|| user.first_name.filter(|s| !s.is_empty()))
            .or_else(|| user.username.filter(|s| !s.is_empty()));

        let store = self.store();
        store.set(keys::ACCESS_TOKEN, &tokens.access)?;
        store.set(keys::REFRESH_TOKEN, &tokens.refresh)?;
        match &display_name {
            Some(name) => store.set(keys::DISPLAY_NAME, name)?,
            None => store.remove(keys::DISPLAY_NAME)?,
        }

        info!(role = ?role.as_ref().map(Role::as_str), "Logged in");
        Ok(LoginOutcome {
            claims,
            role,
            display_name,
        })
    }

    /// Create an account; the user still has to log in afterwards
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        registration.validate()?;
        let response = self.post_public(REGISTER_PATH, registration).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: error_message(&body, "Registration failed"),
            });
        }
        info!("Account registered");
        Ok(())
    }

    /// Remove every session key
    pub fn logout(&self) -> Result<()> {
        Session::clear(self.store())?;
        info!("Logged out");
        Ok(())
    }

    pub fn session(&self) -> Result<Session> {
        Ok(Session::load(self.store())?)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(Session::token(self.store(), keys::ACCESS_TOKEN)?.is_some())
    }

    pub fn display_name(&self) -> Result<Option<String>> {
        Ok(self.store().get(keys::DISPLAY_NAME)?)
    }

    /// Claims of the stored access token, if there is one and it decodes
    pub fn claims(&self) -> Result<Option<Claims>> {
        Ok(Session::token(self.store(), keys::ACCESS_TOKEN)?
            .and_then(|token| Claims::decode(&token).ok()))
    }

    /// Trade the refresh token for a new access token
    ///
    /// Without a refresh token the store is left as is. Any failure of the
    /// refresh call itself ends the session.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> Result<()> {
        let refresh = Session::token(self.store(), keys::REFRESH_TOKEN)?
            .ok_or(ApiError::SessionExpired)?;

        match self.request_refresh(refresh).await {
            Ok(tokens) => {
                self.store().set(keys::ACCESS_TOKEN, &tokens.access)?;
                if let Some(rotated) = &tokens.refresh {
                    self.store().set(keys::REFRESH_TOKEN, rotated)?;
                }
                debug!(rotated = tokens.refresh.is_some(), "Access token refreshed");
                Ok(())
            }
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                if let Err(clear_err) = Session::clear(self.store()) {
                    warn!("Failed to clear session after refresh failure: {}", clear_err);
                }
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn request_refresh(&self, refresh: String) -> Result<RefreshResponse> {
        let response = self
            .post_public(REFRESH_PATH, &RefreshRequest { refresh })
            .await?;
        read_public(response, "Token refresh failed").await
    }
}
