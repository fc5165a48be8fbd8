//! Root application component: console wiring, session bridge, routing.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_router::components::Router;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::{ConfigError, ConsoleConfig};
use crate::net::PlatformTransport;
use crate::net::auth::PasswordAuthenticator;
use crate::net::gateway::QueryGateway;
use crate::pages::render_view;
use crate::routing::{Params, RouteMatch, RouteTable, RouteTableError, View, console_routes};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::state::storage::TokenStorage;
use crate::util::auth::install_unauth_redirect;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Routes(#[from] RouteTableError),
}

/// Everything the shell owns for its lifetime: config, session, clients, routes.
#[derive(Clone, Debug)]
pub struct Console {
    pub config: ConsoleConfig,
    pub session: SessionStore,
    pub gateway: QueryGateway<PlatformTransport>,
    pub authenticator: PasswordAuthenticator<PlatformTransport>,
    pub routes: RouteTable<View>,
}

impl Console {
    /// Build the console and restore any persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] if the variant's route table is invalid.
    pub fn new(
        config: ConsoleConfig,
        storage: impl TokenStorage + 'static,
        transport: PlatformTransport,
    ) -> Result<Self, RouteTableError> {
        let routes = console_routes(config.variant)?;
        let session = SessionStore::new(storage);
        session.initialize();
        let gateway = QueryGateway::new(config.graphql_endpoint.clone(), transport.clone(), session.clone());
        let authenticator =
            PasswordAuthenticator::new(config.login_endpoint.clone(), config.graphql_endpoint.clone(), transport);
        tracing::info!(variant = ?config.variant, endpoint = %config.graphql_endpoint, "console ready");
        Ok(Self { config, session, gateway, authenticator, routes })
    }

    /// Browser console configured from build-time values.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] for bad configuration or route tables.
    #[cfg(feature = "csr")]
    pub fn from_build_env() -> Result<Self, StartupError> {
        let config = ConsoleConfig::from_build_env()?;
        let storage = crate::state::storage::BrowserStorage::new(config.token_storage_key.clone());
        Ok(Self::new(config, storage, crate::net::transport::BrowserTransport)?)
    }

    /// Drop session observers; [`App`] calls this when its owner is cleaned up.
    pub fn teardown(&self) {
        self.session.teardown();
    }
}

/// The view and params to render for `path`.
///
/// Tables without a catch-all fall back to [`View::NotFound`].
pub fn resolve_view(routes: &RouteTable<View>, path: &str) -> (View, Params) {
    match routes.match_path(path) {
        RouteMatch::Found { view, params } => (*view, params),
        RouteMatch::NotFound => {
            tracing::debug!(path, "no route matched");
            (View::NotFound, Params::new())
        }
    }
}

/// Shared handle to the [`Console`] for components.
pub type ConsoleHandle = StoredValue<Console, LocalStorage>;

/// Fetch the console from context.
pub fn use_console() -> ConsoleHandle {
    expect_context::<ConsoleHandle>()
}

/// Put `console` under the current reactive owner.
///
/// Returns the auth signal that mirrors the session and the console handle.
/// When the owner is cleaned up, every session observer is dropped.
pub fn attach_console(console: Console) -> (RwSignal<AuthState>, ConsoleHandle) {
    let auth = RwSignal::new(console.session.snapshot());
    console.session.subscribe(move |state| {
        if auth.try_set(state.clone()).is_some() {
            tracing::trace!("auth signal disposed; session update dropped");
        }
    });

    let handle: ConsoleHandle = StoredValue::new_local(console);
    on_cleanup(move || {
        handle.try_with_value(Console::teardown);
    });
    (auth, handle)
}

/// Root application component.
///
/// Mirrors session changes into an `RwSignal<AuthState>` context and renders
/// the view matched for the current location.
#[component]
pub fn App(console: Console) -> impl IntoView {
    let (auth, handle) = attach_console(console);
    provide_context(auth);
    provide_context(handle);

    view! {
        <Router>
            <main class="console">
                <ViewOutlet/>
            </main>
        </Router>
    }
}

#[component]
fn ViewOutlet() -> impl IntoView {
    let console = use_console();
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;

    let resolved = Memo::new(move |_| {
        let path = pathname.get();
        console.with_value(|c| resolve_view(&c.routes, &path))
    });
    let current_view = Memo::new(move |_| resolved.get().0);

    install_unauth_redirect(auth, current_view, use_navigate());

    move || {
        let (view, params) = resolved.get();
        render_view(view, params)
    }
}
