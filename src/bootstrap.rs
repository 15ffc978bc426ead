//! Startup session resolution.
//!
//! Mirrors the application root lifecycle: start in `Loading`, resolve the
//! current account exactly once, publish a login or logout event, then settle
//! in `Ready` whether or not the lookup succeeded. A cancel token tied to the
//! owning scope suppresses the dispatch if that scope is gone before the
//! lookup resolves.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::User;
use crate::services::auth::AuthService;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    Login(User),
    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    Ready(AuthEvent),
}

/// Read side of a cancellation pair; checked before any state dispatch.
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Write side of a cancellation pair. Cancels explicitly via `cancel`, or
/// implicitly when dropped, so tying it to the owning scope is enough.
pub struct CancelGuard {
    tx: watch::Sender<bool>,
}

impl CancelGuard {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(true);
    }
}

pub fn cancel_pair() -> (CancelGuard, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelGuard { tx }, CancelToken { rx })
}

pub struct SessionBootstrap {
    state: watch::Sender<SessionState>,
}

impl SessionBootstrap {
    /// Creates the bootstrap in `Loading` state along with the receiver that
    /// observers watch for the transition.
    pub fn new() -> (Self, watch::Receiver<SessionState>) {
        let (tx, rx) = watch::channel(SessionState::Loading);
        (Self { state: tx }, rx)
    }

    /// Resolves the current session once and publishes the outcome. `Ready`
    /// is reached on success and failure alike; a fired cancel token
    /// suppresses the dispatch entirely.
    pub async fn resolve_session(&self, auth: &AuthService, cancel: &CancelToken) {
        let event = match auth.current_user().await {
            Ok(Some(user)) => {
                info!(user = %user.id, "session resolved");
                AuthEvent::Login(user)
            }
            Ok(None) => {
                info!("no active session");
                AuthEvent::Logout
            }
            Err(e) => {
                warn!(error = %e, "session lookup failed, treating as logged out");
                AuthEvent::Logout
            }
        };

        if cancel.is_cancelled() {
            return;
        }
        let _ = self.state.send(SessionState::Ready(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::client_for;

    const USER_BODY: &str =
        r#"{"$id":"u1","email":"a@example.com","name":"Ada","status":true}"#;

    fn auth_for(server: &mockito::Server) -> AuthService {
        AuthService::new(client_for(&server.url()))
    }

    #[tokio::test]
    async fn test_resolves_to_login_for_active_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/account")
            .with_status(200)
            .with_body(USER_BODY)
            .create_async()
            .await;

        let (bootstrap, rx) = SessionBootstrap::new();
        assert_eq!(*rx.borrow(), SessionState::Loading);

        let (_guard, cancel) = cancel_pair();
        bootstrap.resolve_session(&auth_for(&server), &cancel).await;

        match &*rx.borrow() {
            SessionState::Ready(AuthEvent::Login(user)) => assert_eq!(user.id, "u1"),
            other => panic!("expected Ready(Login), got {other:?}"),
        };
    }

    #[tokio::test]
    async fn test_resolves_to_logout_for_guest() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/account")
            .with_status(401)
            .with_body(r#"{"message":"missing scope","code":401,"type":"general_unauthorized_scope"}"#)
            .create_async()
            .await;

        let (bootstrap, rx) = SessionBootstrap::new();
        let (_guard, cancel) = cancel_pair();
        bootstrap.resolve_session(&auth_for(&server), &cancel).await;
        assert_eq!(*rx.borrow(), SessionState::Ready(AuthEvent::Logout));
    }

    #[tokio::test]
    async fn test_reaches_ready_even_when_lookup_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/account")
            .with_status(500)
            .with_body(r#"{"message":"Internal server error","code":500,"type":"general_unknown"}"#)
            .create_async()
            .await;

        let (bootstrap, rx) = SessionBootstrap::new();
        let (_guard, cancel) = cancel_pair();
        bootstrap.resolve_session(&auth_for(&server), &cancel).await;
        assert_eq!(*rx.borrow(), SessionState::Ready(AuthEvent::Logout));
    }

    #[tokio::test]
    async fn test_cancelled_bootstrap_dispatches_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/account")
            .with_status(200)
            .with_body(USER_BODY)
            .create_async()
            .await;

        let (bootstrap, rx) = SessionBootstrap::new();
        let (guard, cancel) = cancel_pair();
        guard.cancel();
        bootstrap.resolve_session(&auth_for(&server), &cancel).await;
        assert_eq!(*rx.borrow(), SessionState::Loading);
    }

    #[tokio::test]
    async fn test_dropping_the_guard_cancels() {
        let (_bootstrap, _rx) = SessionBootstrap::new();
        let (guard, cancel) = cancel_pair();
        assert!(!cancel.is_cancelled());
        drop(guard);
        assert!(cancel.is_cancelled());
    }
}
