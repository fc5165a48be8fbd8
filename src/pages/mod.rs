//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The router hands each page only its [`View`] and captured params. Pages
//! that need data go through the console's gateway.

pub mod home;
pub mod login;
pub mod not_found;
pub mod resource;
pub mod signout;

use leptos::prelude::*;

use crate::routing::{Params, View};

/// Render the page for `view`.
pub fn render_view(view: View, params: Params) -> AnyView {
    match view {
        View::Home => view! { <home::HomePage/> }.into_any(),
        View::Login => view! { <login::LoginPage/> }.into_any(),
        View::Signout => view! { <signout::SignoutPage/> }.into_any(),
        View::NotFound => view! { <not_found::NotFoundPage/> }.into_any(),
        other => view! { <resource::ResourcePage view=other params/> }.into_any(),
    }
}
