//! The authentication collaborator contract and its observable state.
//!
//! Navigation reads authentication state through [`AuthState`]: one async
//! readiness wait, then a synchronous read of the current user.
//! [`AuthStateHandle`] is the shared implementation used by the web app; the
//! side that talks to the hosted provider writes into it, everything else
//! only reads.

use crate::user::Identity;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Read-only view of the hosted authentication state.
#[async_trait]
pub trait AuthState: Send + Sync {
    /// Resolves once the initial authentication state has been determined.
    ///
    /// Resolves immediately on every call after that.
    async fn wait_ready(&self);

    /// The currently signed-in user, or `None` when signed out.
    ///
    /// Only meaningful after [`wait_ready`](Self::wait_ready) has resolved.
    fn current_user(&self) -> Option<Identity>;
}

/// Point-in-time copy of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    resolved: bool,
    user: Option<Identity>,
}

impl AuthSnapshot {
    /// Returns true once the initial state is known.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }
}

/// Shared, cloneable authentication state backed by a watch channel.
///
/// Starts unresolved. The first call to [`resolve`](Self::resolve),
/// [`sign_in`](Self::sign_in) or [`sign_out`](Self::sign_out) marks it ready
/// and wakes every pending [`AuthState::wait_ready`].
#[derive(Debug, Clone)]
pub struct AuthStateHandle {
    tx: Arc<watch::Sender<AuthSnapshot>>,
}

impl AuthStateHandle {
    /// Creates an unresolved handle.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    /// Creates a handle that is already resolved to `user`.
    #[must_use]
    pub fn resolved(user: Option<Identity>) -> Self {
        let handle = Self::new();
        handle.resolve(user);
        handle
    }

    /// Records the initial authentication state.
    pub fn resolve(&self, user: Option<Identity>) {
        debug!(signed_in = user.is_some(), "authentication state resolved");
        self.tx.send_replace(AuthSnapshot {
            resolved: true,
            user,
        });
    }

    /// Records a successful sign-in.
    pub fn sign_in(&self, identity: Identity) {
        debug!(uid = %identity.uid(), "user signed in");
        self.tx.send_modify(|state| {
            state.resolved = true;
            state.user = Some(identity);
        });
    }

    /// Records a sign-out.
    pub fn sign_out(&self) {
        debug!("user signed out");
        self.tx.send_modify(|state| {
            state.resolved = true;
            state.user = None;
        });
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }
}

impl Default for AuthStateHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthState for AuthStateHandle {
    async fn wait_ready(&self) {
        let mut rx = self.tx.subscribe();
        let ready = rx.wait_for(AuthSnapshot::is_resolved).await.is_ok();
        if !ready {
            warn!("authentication state channel closed before resolving");
        }
    }

    fn current_user(&self) -> Option<Identity> {
        self.tx.borrow().user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn identity(uid: &str) -> Identity {
        Identity::new(uid.parse().expect("valid uid"))
    }

    #[test]
    fn new_handle_is_unresolved_and_signed_out() {
        let auth = AuthStateHandle::new();
        let snapshot = auth.snapshot();
        assert!(!snapshot.is_resolved());
        assert!(snapshot.user().is_none());
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn wait_ready_returns_immediately_when_resolved() {
        let auth = AuthStateHandle::resolved(Some(identity("uid_1")));
        auth.wait_ready().await;
        assert_eq!(
            auth.current_user().map(|u| u.uid().to_string()),
            Some("uid_1".to_string())
        );
    }

    #[tokio::test]
    async fn wait_ready_suspends_until_resolved() {
        let auth = AuthStateHandle::new();
        let waiter = {
            let auth = auth.clone();
            tokio::spawn(async move {
                auth.wait_ready().await;
                auth.current_user()
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        auth.resolve(Some(identity("uid_2")));
        let user = waiter.await.expect("waiter task");
        assert_eq!(user.map(|u| u.uid().to_string()), Some("uid_2".to_string()));
    }

    #[tokio::test]
    async fn sign_out_resolves_to_no_user() {
        let auth = AuthStateHandle::new();
        auth.sign_in(identity("uid_3"));
        assert!(auth.current_user().is_some());

        auth.sign_out();
        auth.wait_ready().await;
        assert!(auth.snapshot().is_resolved());
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn clones_share_state() {
        let auth = AuthStateHandle::new();
        let other = auth.clone();
        other.sign_in(identity("uid_4"));
        assert!(auth.snapshot().is_resolved());
        assert!(auth.current_user().is_some());
    }
}
