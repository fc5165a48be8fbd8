//! Frame for the resource screens (orgs, users, things, customers, devices).
//!
//! The screens' own markup lives outside this crate; the frame shows the
//! view title and the route params it was matched with.

use leptos::prelude::*;

use crate::routing::{Params, View};

#[component]
pub fn ResourcePage(view: View, params: Params) -> impl IntoView {
    let id = params.get("id").cloned();
    view! {
        <section class="resource" data-view=view.title()>
            <h1>{view.title()}</h1>
            {id.map(|id| view! { <p class="resource__id">{id}</p> })}
        </section>
    }
}
