//! Credential exchange with the backend's login endpoint.
//!
//! The login endpoint is plain JSON over HTTP (not GraphQL): it takes
//! `{"email", "password"}` and answers `{"token"}` or `{"error"}`. The profile
//! is then read through GraphQL using the fresh token.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::gateway::{GatewayError, post_graphql};
use super::transport::{Transport, TransportError};
use super::types::{Credentials, ErrorBody, GraphqlRequest, Profile, TokenResponse, USER_PROFILE_QUERY, UserProfileData};
use crate::state::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login transport failed: {0}")]
    Transport(#[from] TransportError),
    #[error("login rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid login response: {0}")]
    Decode(String),
    #[error("profile fetch failed: {0}")]
    Profile(#[source] GatewayError),
    #[error("session not saved: {0}")]
    Storage(#[from] StorageError),
}

/// A freshly issued token together with the profile it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub token: String,
    pub profile: Profile,
}

/// External auth collaborator: turns credentials into a [`Grant`].
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    /// # Errors
    ///
    /// Returns [`AuthError`] when no grant could be obtained.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Grant, AuthError>;
}

/// Decode the `data` of a `userProfile` query.
///
/// # Errors
///
/// Returns [`GatewayError::Decode`] when the profile is missing or malformed.
pub fn profile_from_data(data: serde_json::Value) -> Result<Profile, GatewayError> {
    let data: UserProfileData = serde_json::from_value(data).map_err(|e| GatewayError::Decode(e.to_string()))?;
    data.user_profile
        .ok_or_else(|| GatewayError::Decode("userProfile is null".to_owned()))
}

/// Email/password login against the console backend.
#[derive(Clone, Debug)]
pub struct PasswordAuthenticator<T> {
    login_endpoint: String,
    graphql_endpoint: String,
    transport: T,
}

impl<T: Transport> PasswordAuthenticator<T> {
    pub fn new(login_endpoint: impl Into<String>, graphql_endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            login_endpoint: login_endpoint.into(),
            graphql_endpoint: graphql_endpoint.into(),
            transport,
        }
    }

    async fn exchange(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let body = serde_json::to_value(credentials).map_err(TransportError::from)?;
        let response = self.transport.post_json(&self.login_endpoint, None, &body).await?;
        if response.status != 200 {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|b| b.error)
                .unwrap_or_default();
            tracing::warn!(status = response.status, %message, "login rejected");
            return Err(AuthError::Rejected { status: response.status, message });
        }
        let token: TokenResponse = serde_json::from_str(&response.body).map_err(|e| AuthError::Decode(e.to_string()))?;
        Ok(token.token)
    }
}

impl<T: Transport> Authenticator for PasswordAuthenticator<T> {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Grant, AuthError> {
        let token = self.exchange(credentials).await?;
        let request = GraphqlRequest::new(USER_PROFILE_QUERY);
        let data = post_graphql(&self.transport, &self.graphql_endpoint, Some(&token), &request)
            .await
            .map_err(AuthError::Profile)?;
        let profile = profile_from_data(data).map_err(AuthError::Profile)?;
        tracing::debug!(email = %profile.email, "login granted");
        Ok(Grant { token, profile })
    }
}
