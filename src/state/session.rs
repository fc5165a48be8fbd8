//! Session store: the bearer token, login progress, and the user profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store per application shell. The gateway reads the token on every
//! request; navigation actions are the only writers; views observe.
//!
//! DESIGN
//! ======
//! Execution is single-threaded, so state lives in `Rc<RefCell<_>>` and
//! observers run synchronously at the end of each mutation, after the borrow
//! is released. An observer may therefore read the store (or even mutate it)
//! from inside its callback.
//!
//! Invariant: `authenticated == token.is_some()` whenever no mutation is
//! running.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::auth::AuthState;
use super::storage::{StorageError, TokenStorage};
use crate::net::types::Profile;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&AuthState)>;

struct Inner {
    token: Option<String>,
    logins_in_flight: u32,
    profile: Option<Profile>,
    storage: Box<dyn TokenStorage>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl Inner {
    fn snapshot(&self) -> AuthState {
        AuthState {
            authenticated: self.token.is_some(),
            authenticating: self.logins_in_flight > 0,
            profile: self.profile.clone(),
        }
    }
}

/// Shared handle to the session. Clones refer to the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SessionStore")
            .field("has_token", &inner.token.is_some())
            .field("logins_in_flight", &inner.logins_in_flight)
            .field("profile", &inner.profile)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

impl SessionStore {
    /// An empty, signed-out store. Call [`SessionStore::initialize`] to pick
    /// up a token persisted by an earlier visit.
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                token: None,
                logins_in_flight: 0,
                profile: None,
                storage: Box::new(storage),
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Adopt whatever token durable storage holds. The token is trusted as a
    /// hint only; nothing is verified and no request is made.
    pub fn initialize(&self) {
        self.mutate(|inner| {
            inner.token = inner.storage.load();
            inner.logins_in_flight = 0;
            inner.profile = None;
            tracing::debug!(restored = inner.token.is_some(), "session initialized");
        });
    }

    /// Commit a successful login: persist and store the token, replace the
    /// profile, and end one in-flight attempt.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the token could not be persisted. The
    /// session then keeps its previous token and profile; only the in-flight
    /// attempt is ended.
    pub fn login(&self, token: String, profile: Profile) -> Result<(), StorageError> {
        self.mutate(|inner| {
            inner.logins_in_flight = inner.logins_in_flight.saturating_sub(1);
            inner.storage.save(&token).inspect_err(|e| {
                tracing::warn!(error = %e, "token not persisted; login not committed");
            })?;
            inner.token = Some(token);
            inner.profile = Some(profile);
            tracing::info!("session established");
            Ok(())
        })
    }

    /// Drop the token (memory and durable storage) and the profile.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if durable storage still holds the token. The
    /// in-memory session is cleared either way, but the next
    /// [`SessionStore::initialize`] would restore the persisted token.
    pub fn signout(&self) -> Result<(), StorageError> {
        self.mutate(|inner| {
            let removed = inner.storage.remove();
            inner.token = None;
            inner.profile = None;
            inner.logins_in_flight = 0;
            match &removed {
                Ok(()) => tracing::info!("session cleared"),
                Err(e) => tracing::warn!(error = %e, "session cleared in memory only"),
            }
            removed
        })
    }

    /// Replace the profile of the current session.
    pub fn set_profile(&self, profile: Profile) {
        self.mutate(|inner| inner.profile = Some(profile));
    }

    /// Mark a login attempt as in flight. Attempts are counted, so
    /// `authenticating` stays raised until every one of them has ended.
    pub fn begin_authenticating(&self) {
        self.mutate(|inner| inner.logins_in_flight += 1);
    }

    /// Mark one login attempt as finished without changing the session.
    pub fn end_authenticating(&self) {
        self.mutate(|inner| inner.logins_in_flight = inner.logins_in_flight.saturating_sub(1));
    }

    /// The token as of right now. Never cached by callers across requests.
    pub fn current_token(&self) -> Option<String> {
        self.inner.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().token.is_some()
    }

    pub fn snapshot(&self) -> AuthState {
        self.inner.borrow().snapshot()
    }

    /// Register `observer`; it runs after every mutation with the new state.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&AuthState) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Rc::new(observer)));
        id
    }

    /// Stop delivering updates to `id`. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|(sub, _)| *sub != id);
        inner.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Drop every observer. Session data is left as is.
    pub fn teardown(&self) {
        self.inner.borrow_mut().observers.clear();
    }

    fn mutate<F, R>(&self, apply: F) -> R
    where
        F: FnOnce(&mut Inner) -> R,
    {
        let (result, state, observers) = {
            let mut inner = self.inner.borrow_mut();
            let result = apply(&mut inner);
            let observers: Vec<Observer> = inner.observers.iter().map(|(_, o)| o.clone()).collect();
            (result, inner.snapshot(), observers)
        };
        for observer in observers {
            observer(&state);
        }
        result
    }
}
