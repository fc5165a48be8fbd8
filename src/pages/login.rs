//! Login page: email + password exchanged for a session token.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::actions::attempt_login;
use crate::app::use_console;
use crate::net::types::Credentials;
use crate::routing::console::HOME_PATH;
use crate::state::auth::AuthState;

#[component]
pub fn LoginPage() -> impl IntoView {
    let console = use_console();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().authenticating {
            return;
        }
        let credentials = Credentials {
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            info.set("Enter both email and password.".to_owned());
            return;
        }
        info.set(String::new());

        let (authenticator, session) = console.with_value(|c| (c.authenticator.clone(), c.session.clone()));
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match attempt_login(&authenticator, &session, &credentials).await {
                Ok(()) => navigate(HOME_PATH, NavigateOptions::default()),
                Err(e) => info.set(format!("Login failed: {e}")),
            }
        });
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Sign In"</h1>
                <input
                    class="login-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || auth.get().authenticating>
                    "Sign In"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </form>
        </div>
    }
}
