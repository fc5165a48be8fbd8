//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected views apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routing::View;
use crate::routing::console::LOGIN_PATH;
use crate::state::auth::AuthState;

/// A protected view with a settled, signed-out session must not render.
pub fn should_redirect_unauth(view: View, state: &AuthState) -> bool {
    !view.is_public() && state.is_settled_signed_out()
}

/// Redirect to `/login` whenever the current view is protected and the
/// session has settled without a token.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, view: Memo<View>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let current = view.get();
        if should_redirect_unauth(current, &auth.get()) {
            tracing::debug!(?current, "redirecting unauthenticated visitor");
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}
