//! Signout page: ends the session, then sends the visitor to the login page.
//!
//! If durable storage keeps the token, the visitor stays here and sees why:
//! a reload would otherwise sign them back in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::actions::signout;
use crate::app::use_console;
use crate::routing::console::LOGIN_PATH;

#[component]
pub fn SignoutPage() -> impl IntoView {
    let console = use_console();
    let navigate = use_navigate();
    let failure = RwSignal::new(None::<String>);

    Effect::new(move || match console.with_value(|c| signout(&c.session)) {
        Ok(()) => navigate(LOGIN_PATH, NavigateOptions::default()),
        Err(e) => failure.set(Some(e.to_string())),
    });

    view! {
        {move || match failure.get() {
            None => view! { <p class="signout-message">"Signing out..."</p> }.into_any(),
            Some(message) => view! {
                <div class="signout-message signout-message--error">
                    <p>"Signed out of this tab, but the saved session could not be removed: " {message}</p>
                    <a href=LOGIN_PATH>"Continue to sign in"</a>
                </div>
            }
            .into_any(),
        }}
    }
}
