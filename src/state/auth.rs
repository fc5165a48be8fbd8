//! Auth-session snapshot for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Delivered to session observers and mirrored into a Leptos signal so route
//! guards and identity-aware views can render without touching the store.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Profile;

/// Observable session state. `authenticated` always equals "a token is held".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    /// True only while a login attempt is in flight.
    pub authenticating: bool,
    pub profile: Option<Profile>,
}

impl AuthState {
    /// Signed out with nothing pending: protected views should redirect.
    pub fn is_settled_signed_out(&self) -> bool {
        !self.authenticated && !self.authenticating
    }
}
