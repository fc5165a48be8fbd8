use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::oneshot;

use super::*;
use crate::net::testing::FakeTransport;
use crate::net::transport::TransportError;
use crate::state::auth::AuthState;
use crate::state::storage::{MemoryStorage, StorageAction};

struct ScriptedAuth {
    outcome: RefCell<Option<Result<Grant, AuthError>>>,
    session: SessionStore,
    seen_authenticating: RefCell<Option<bool>>,
}

impl ScriptedAuth {
    fn new(session: &SessionStore, outcome: Result<Grant, AuthError>) -> Self {
        Self {
            outcome: RefCell::new(Some(outcome)),
            session: session.clone(),
            seen_authenticating: RefCell::new(None),
        }
    }
}

impl Authenticator for ScriptedAuth {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Grant, AuthError> {
        *self.seen_authenticating.borrow_mut() = Some(self.session.snapshot().authenticating);
        self.outcome
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(AuthError::Decode("called twice".to_owned())))
    }
}

fn creds() -> Credentials {
    Credentials { email: "a@b.c".to_owned(), password: "pw".to_owned() }
}

fn profile(email: &str) -> Profile {
    Profile { email: email.to_owned() }
}

fn store() -> (SessionStore, MemoryStorage) {
    let storage = MemoryStorage::new("token");
    (SessionStore::new(storage.clone()), storage)
}

// =============================================================
// attempt_login
// =============================================================

#[tokio::test]
async fn attempt_login_commits_grant() {
    let (session, storage) = store();
    let auth = ScriptedAuth::new(
        &session,
        Ok(Grant { token: "tok".to_owned(), profile: profile("a@b.c") }),
    );

    attempt_login(&auth, &session, &creds()).await.unwrap();

    assert_eq!(*auth.seen_authenticating.borrow(), Some(true));
    let state = session.snapshot();
    assert!(state.authenticated);
    assert!(!state.authenticating);
    assert_eq!(state.profile, Some(profile("a@b.c")));
    assert_eq!(storage.get("token").as_deref(), Some("tok"));
}

#[tokio::test]
async fn attempt_login_failure_leaves_previous_session() {
    let (session, storage) = store();
    session.login("old".to_owned(), profile("old@x")).unwrap();
    let auth = ScriptedAuth::new(
        &session,
        Err(AuthError::Rejected { status: 401, message: "wrong".to_owned() }),
    );

    let err = attempt_login(&auth, &session, &creds()).await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected { status: 401, .. }));
    assert_eq!(session.current_token().as_deref(), Some("old"));
    assert_eq!(session.snapshot().profile, Some(profile("old@x")));
    assert!(!session.snapshot().authenticating);
    assert_eq!(storage.get("token").as_deref(), Some("old"));
}

#[tokio::test]
async fn attempt_login_failure_when_signed_out_never_authenticates() {
    let (session, _) = store();
    let seen: Rc<RefCell<Vec<AuthState>>> = Rc::default();
    let sink = seen.clone();
    session.subscribe(move |s| sink.borrow_mut().push(s.clone()));
    let auth = ScriptedAuth::new(&session, Err(AuthError::Transport(TransportError::Request("offline".to_owned()))));

    assert!(attempt_login(&auth, &session, &creds()).await.is_err());

    let seen = seen.borrow();
    assert!(seen.iter().all(|s| !s.authenticated && s.profile.is_none()));
    assert_eq!(seen.iter().map(|s| s.authenticating).collect::<Vec<_>>(), [true, false]);
}

#[tokio::test]
async fn attempt_login_unpersistable_token_is_storage_error() {
    let (session, storage) = store();
    storage.set_read_only(true);
    let auth = ScriptedAuth::new(
        &session,
        Ok(Grant { token: "tok".to_owned(), profile: profile("a@b.c") }),
    );

    let err = attempt_login(&auth, &session, &creds()).await.unwrap_err();

    assert!(matches!(err, AuthError::Storage(StorageError::Rejected { action: StorageAction::Write, .. })));
    let state = session.snapshot();
    assert!(!state.authenticated);
    assert!(!state.authenticating);
}

struct GatedAuth {
    gate: RefCell<Option<oneshot::Receiver<Result<Grant, AuthError>>>>,
}

impl GatedAuth {
    fn new() -> (Self, oneshot::Sender<Result<Grant, AuthError>>) {
        let (tx, rx) = oneshot::channel();
        (Self { gate: RefCell::new(Some(rx)) }, tx)
    }
}

impl Authenticator for GatedAuth {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Grant, AuthError> {
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(AuthError::Decode("gate dropped".to_owned()))),
            None => Err(AuthError::Decode("called twice".to_owned())),
        }
    }
}

#[tokio::test]
async fn overlapping_attempts_keep_authenticating_until_last_settles() {
    let (session, _) = store();
    let seen: Rc<RefCell<Vec<AuthState>>> = Rc::default();
    let sink = seen.clone();
    session.subscribe(move |s| sink.borrow_mut().push(s.clone()));
    let (first_auth, first_gate) = GatedAuth::new();
    let (second_auth, second_gate) = GatedAuth::new();

    let first_creds = creds();
    let second_creds = creds();
    let first = attempt_login(&first_auth, &session, &first_creds);
    let second = attempt_login(&second_auth, &session, &second_creds);
    let driver = async {
        while seen.borrow().len() < 2 {
            tokio::task::yield_now().await;
        }
        let _ = first_gate.send(Err(AuthError::Rejected { status: 401, message: "wrong".to_owned() }));
        while seen.borrow().len() < 3 {
            tokio::task::yield_now().await;
        }
        let _ = second_gate.send(Ok(Grant { token: "tok".to_owned(), profile: profile("a@b.c") }));
    };
    let (first, second, ()) = tokio::join!(first, second, driver);

    assert!(first.is_err());
    assert!(second.is_ok());
    let flags: Vec<_> = seen.borrow().iter().map(|s| s.authenticating).collect();
    assert_eq!(flags, [true, true, true, false]);
    assert_eq!(session.current_token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn attempt_login_with_password_authenticator_end_to_end() {
    let (session, _) = store();
    let transport = FakeTransport::new()
        .respond(200, r#"{"token": "jwt"}"#)
        .respond(200, r#"{"data": {"userProfile": {"email": "a@b.c"}}}"#);
    let auth = crate::net::auth::PasswordAuthenticator::new("/login", "/query", transport);

    attempt_login(&auth, &session, &creds()).await.unwrap();

    assert_eq!(session.current_token().as_deref(), Some("jwt"));
    assert_eq!(session.snapshot().profile, Some(profile("a@b.c")));
}

// =============================================================
// signout
// =============================================================

#[test]
fn signout_clears_session_and_storage() {
    let (session, storage) = store();
    session.login("tok".to_owned(), profile("a@b.c")).unwrap();

    signout(&session).unwrap();

    assert_eq!(session.current_token(), None);
    assert_eq!(storage.get("token"), None);
}

#[test]
fn signout_reports_token_left_in_storage() {
    let (session, storage) = store();
    session.login("tok".to_owned(), profile("a@b.c")).unwrap();
    storage.set_read_only(true);

    let err = signout(&session).unwrap_err();

    assert!(matches!(err, StorageError::Rejected { action: StorageAction::Removal, .. }));
    assert!(!session.is_authenticated());
    assert_eq!(storage.get("token").as_deref(), Some("tok"));
}

// =============================================================
// refresh_profile
// =============================================================

#[tokio::test]
async fn refresh_profile_fills_restored_session() {
    let storage = MemoryStorage::with_token("token", "restored");
    let session = SessionStore::new(storage);
    session.initialize();
    let transport = FakeTransport::new().respond(200, r#"{"data": {"userProfile": {"email": "me@x"}}}"#);
    let gateway = QueryGateway::new("/query", transport.clone(), session.clone());

    let fetched = refresh_profile(&gateway).await.unwrap();

    assert_eq!(fetched, profile("me@x"));
    assert_eq!(session.snapshot().profile, Some(profile("me@x")));
    assert_eq!(transport.calls()[0].bearer.as_deref(), Some("restored"));
}

#[tokio::test]
async fn refresh_profile_failure_leaves_session_untouched() {
    let storage = MemoryStorage::with_token("token", "expired");
    let session = SessionStore::new(storage);
    session.initialize();
    let transport = FakeTransport::new().respond(200, r#"{"errors": [{"message": "token is expired"}]}"#);
    let gateway = QueryGateway::new("/query", transport, session.clone());

    let err = refresh_profile(&gateway).await.unwrap_err();

    assert_eq!(err.graphql_errors().unwrap()[0].message, "token is expired");
    assert!(session.is_authenticated());
    assert!(session.snapshot().profile.is_none());
}

#[tokio::test]
async fn refresh_profile_without_session_is_not_applied() {
    let (session, _) = store();
    let transport = FakeTransport::new().respond(200, r#"{"data": {"userProfile": {"email": "ghost@x"}}}"#);
    let gateway = QueryGateway::new("/query", transport, session.clone());

    refresh_profile(&gateway).await.unwrap();

    assert!(session.snapshot().profile.is_none());
}
