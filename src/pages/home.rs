//! Home page: greets the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! A token restored from storage arrives without a profile. The home page is
//! the first protected screen, so it fills the profile in on demand and shows
//! the gateway error if the token turns out to be stale.

use leptos::prelude::*;

use crate::actions::refresh_profile;
use crate::app::use_console;
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let console = use_console();
    let auth = expect_context::<RwSignal<AuthState>>();
    let error = RwSignal::new(None::<String>);
    let requested = RwSignal::new(false);

    Effect::new(move || {
        let state = auth.get();
        if !state.authenticated || state.profile.is_some() || requested.get_untracked() {
            return;
        }
        requested.set(true);
        let gateway = console.with_value(|c| c.gateway.clone());
        leptos::task::spawn_local(async move {
            if let Err(e) = refresh_profile(&gateway).await {
                error.set(Some(e.to_string()));
            }
        });
    });

    view! {
        <div class="home">
            <h1>"Dashboard"</h1>
            {move || {
                auth.get()
                    .profile
                    .map(|p| view! { <p class="home__user">"Signed in as " {p.email}</p> })
            }}
            <Show when=move || error.get().is_some()>
                <p class="home__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
