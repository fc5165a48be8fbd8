//! Navigation actions: login, signout, profile refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views trigger these; they are the only code that writes the session.
//! Redirects after a successful action are the calling view's job.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

use crate::net::auth::{AuthError, Authenticator, Grant, profile_from_data};
use crate::net::gateway::{GatewayError, QueryGateway};
use crate::net::transport::Transport;
use crate::net::types::{Credentials, GraphqlRequest, Profile, USER_PROFILE_QUERY};
use crate::state::session::SessionStore;
use crate::state::storage::StorageError;

/// Obtain a grant for `credentials` and commit it to `session`.
///
/// `authenticating` is raised for the duration of the call; overlapping
/// attempts keep it raised until the last one settles. On failure the
/// session keeps whatever token and profile it had before.
///
/// # Errors
///
/// Returns the authenticator's [`AuthError`] unchanged, or
/// [`AuthError::Storage`] when the granted token could not be persisted.
pub async fn attempt_login<A: Authenticator>(
    authenticator: &A,
    session: &SessionStore,
    credentials: &Credentials,
) -> Result<(), AuthError> {
    session.begin_authenticating();
    match authenticator.authenticate(credentials).await {
        Ok(Grant { token, profile }) => Ok(session.login(token, profile)?),
        Err(e) => {
            tracing::warn!(error = %e, "login attempt failed");
            session.end_authenticating();
            Err(e)
        }
    }
}

/// End the session. The caller redirects to a public route afterwards.
///
/// # Errors
///
/// Returns [`StorageError`] when durable storage kept the token; the
/// in-memory session is cleared regardless.
pub fn signout(session: &SessionStore) -> Result<(), StorageError> {
    session.signout()
}

/// Re-read `userProfile` and store it on the session.
///
/// The profile is only stored if the session still holds the token the
/// request was sent with; a response that outlived a signout or re-login is
/// returned but not applied.
///
/// # Errors
///
/// Returns [`GatewayError`] on any request failure; the session is untouched.
pub async fn refresh_profile<T: Transport>(gateway: &QueryGateway<T>) -> Result<Profile, GatewayError> {
    let session = gateway.session();
    let sent_with = session.current_token();
    let data = gateway.execute(&GraphqlRequest::new(USER_PROFILE_QUERY)).await?;
    let profile = profile_from_data(data)?;
    if sent_with.is_some() && session.current_token() == sent_with {
        session.set_profile(profile.clone());
    } else {
        tracing::debug!("session changed during profile refresh; result not applied");
    }
    Ok(profile)
}
