//! The authentication navigation guard.
//!
//! The guard runs before every transition. It waits for the hosted auth
//! state to become known, reads the current user, and combines that with
//! the access flags of the matched route chain:
//!
//! | requires auth | requires unauth | signed in | decision |
//! |---|---|---|---|
//! | yes | no | no | redirect to login, carrying the intended path |
//! | yes | no | yes | proceed |
//! | no | yes | yes | redirect to the landing page |
//! | no | yes | no | proceed |
//! | no | no | either | proceed |

use crate::dashboard::REDIRECT_PARAM;
use crate::location::Location;
use crate::table::ResolvedRoute;
use bankdash_platform_access::AuthState;
use futures::future::{Either, select};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on the readiness wait.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(10);

/// Access requirements of a matched route chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    pub requires_auth: bool,
    pub requires_unauth: bool,
}

impl Access {
    /// Access flags of a resolved route (any route in the chain counts).
    #[must_use]
    pub fn of(route: &ResolvedRoute) -> Self {
        Self {
            requires_auth: route.requires_auth(),
            requires_unauth: route.requires_unauth(),
        }
    }
}

/// Outcome of guarding one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Commit the transition.
    Proceed,
    /// Send a signed-out user to the login page.
    RedirectToLogin(Location),
    /// Send a signed-in user to the landing page.
    RedirectToLanding(Location),
}

impl GuardDecision {
    /// Returns the redirect target, if the transition was redirected.
    #[must_use]
    pub fn redirect(&self) -> Option<&Location> {
        match self {
            Self::Proceed => None,
            Self::RedirectToLogin(location) | Self::RedirectToLanding(location) => Some(location),
        }
    }
}

/// Applies the decision table.
///
/// `intended` is the location the user asked for; it is carried to the login
/// page in the `redirect` query parameter unless it is the bare root path.
#[must_use]
pub fn decide(
    access: Access,
    signed_in: bool,
    intended: &Location,
    login_path: &str,
    landing_path: &str,
) -> GuardDecision {
    if access.requires_auth && !signed_in {
        let login = Location::parse(login_path);
        return if intended.is_root() {
            GuardDecision::RedirectToLogin(login)
        } else {
            GuardDecision::RedirectToLogin(login.with_query(REDIRECT_PARAM, &intended.full_path()))
        };
    }
    if access.requires_unauth && signed_in {
        return GuardDecision::RedirectToLanding(Location::parse(landing_path));
    }
    GuardDecision::Proceed
}

/// Gates transitions on the hosted authentication state.
#[derive(Clone)]
pub struct NavigationGuard {
    auth: Arc<dyn AuthState>,
    login_path: String,
    landing_path: String,
    ready_timeout: Option<Duration>,
}

impl std::fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("login_path", &self.login_path)
            .field("landing_path", &self.landing_path)
            .field("ready_timeout", &self.ready_timeout)
            .finish_non_exhaustive()
    }
}

impl NavigationGuard {
    /// Creates a guard reading from `auth`, with the default readiness bound.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthState>, login_path: &str, landing_path: &str) -> Self {
        Self {
            auth,
            login_path: login_path.to_string(),
            landing_path: landing_path.to_string(),
            ready_timeout: Some(DEFAULT_READY_TIMEOUT),
        }
    }

    /// Sets the readiness bound; `None` waits indefinitely.
    #[must_use]
    pub fn with_ready_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ready_timeout = timeout;
        self
    }

    /// Returns the login path.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the landing path.
    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Decides whether the transition to `to` may proceed.
    ///
    /// If readiness does not arrive within the bound, the user is treated as
    /// signed out.
    pub async fn check(&self, to: &ResolvedRoute) -> GuardDecision {
        let signed_in = self.await_ready().await && self.auth.current_user().is_some();
        let access = Access::of(to);
        let decision = decide(
            access,
            signed_in,
            to.location(),
            &self.login_path,
            &self.landing_path,
        );

        debug!(
            to = %to.location(),
            route = to.name().unwrap_or_default(),
            requires_auth = access.requires_auth,
            requires_unauth = access.requires_unauth,
            signed_in,
            redirect = ?decision.redirect().map(Location::full_path),
            "navigation guard decided"
        );
        decision
    }

    async fn await_ready(&self) -> bool {
        let Some(limit) = self.ready_timeout else {
            self.auth.wait_ready().await;
            return true;
        };

        match select(self.auth.wait_ready(), Box::pin(sleep(limit))).await {
            Either::Left(_) => true,
            Either::Right(_) => {
                warn!(
                    timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    "authentication state not ready in time, treating user as signed out"
                );
                false
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::dashboard_routes;
    use crate::table::RouteTable;
    use async_trait::async_trait;
    use bankdash_platform_access::{AuthStateHandle, Identity};

    const AUTH: Access = Access {
        requires_auth: true,
        requires_unauth: false,
    };
    const UNAUTH: Access = Access {
        requires_auth: false,
        requires_unauth: true,
    };
    const OPEN: Access = Access {
        requires_auth: false,
        requires_unauth: false,
    };

    fn identity() -> Identity {
        Identity::new("uid_1".parse().expect("valid uid"))
    }

    fn decide_for(access: Access, signed_in: bool, path: &str) -> GuardDecision {
        decide(access, signed_in, &Location::parse(path), "/login", "/index")
    }

    /// Auth state that never becomes ready.
    struct NeverReady;

    #[async_trait]
    impl AuthState for NeverReady {
        async fn wait_ready(&self) {
            futures::future::pending::<()>().await;
        }

        fn current_user(&self) -> Option<Identity> {
            Some(Identity::new("uid_ghost".parse().expect("valid uid")))
        }
    }

    #[test]
    fn signed_out_user_is_sent_to_login_with_destination() {
        assert_eq!(
            decide_for(AUTH, false, "/transfer").redirect().map(Location::full_path),
            Some("/login?redirect=%2Ftransfer".to_string())
        );
    }

    #[test]
    fn destination_keeps_query_and_hash() {
        let decision = decide_for(AUTH, false, "/transfer?amount=10#review");
        let login = decision.redirect().expect("redirect");
        assert_eq!(login.query_value("redirect"), Some("/transfer?amount=10#review"));
    }

    #[test]
    fn root_destination_is_omitted() {
        assert_eq!(
            decide_for(AUTH, false, "/"),
            GuardDecision::RedirectToLogin(Location::parse("/login"))
        );
    }

    #[test]
    fn signed_in_user_passes_auth_routes() {
        assert_eq!(decide_for(AUTH, true, "/transfer"), GuardDecision::Proceed);
    }

    #[test]
    fn signed_in_user_is_sent_to_landing_from_any_unauth_route() {
        for path in ["/login", "/register", "/login?redirect=%2Ftransfer"] {
            assert_eq!(
                decide_for(UNAUTH, true, path),
                GuardDecision::RedirectToLanding(Location::parse("/index")),
                "{path}"
            );
        }
    }

    #[test]
    fn signed_out_user_passes_unauth_routes() {
        assert_eq!(decide_for(UNAUTH, false, "/login"), GuardDecision::Proceed);
    }

    #[test]
    fn open_routes_always_proceed() {
        assert_eq!(decide_for(OPEN, false, "/anything"), GuardDecision::Proceed);
        assert_eq!(decide_for(OPEN, true, "/anything"), GuardDecision::Proceed);
    }

    fn routes() -> RouteTable {
        dashboard_routes().expect("valid table")
    }

    #[tokio::test]
    async fn check_reads_nested_chain_access() {
        let table = routes();
        let auth = Arc::new(AuthStateHandle::resolved(None));
        let guard = NavigationGuard::new(auth, "/login", "/index");

        let route = table.resolve(&Location::parse("/settings/security"));
        assert_eq!(
            guard.check(&route).await.redirect().map(Location::full_path),
            Some("/login?redirect=%2Fsettings%2Fsecurity".to_string())
        );
    }

    #[tokio::test]
    async fn check_waits_for_readiness() {
        let table = routes();
        let auth = AuthStateHandle::new();
        let guard = NavigationGuard::new(Arc::new(auth.clone()), "/login", "/index")
            .with_ready_timeout(None);

        let pending = tokio::spawn(async move {
            let route = table.resolve(&Location::parse("/transfer"));
            guard.check(&route).await
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!pending.is_finished());

        auth.sign_in(identity());
        assert_eq!(pending.await.expect("guard task"), GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn readiness_timeout_treats_user_as_signed_out() {
        let table = routes();
        let guard = NavigationGuard::new(Arc::new(NeverReady), "/login", "/index")
            .with_ready_timeout(Some(Duration::from_millis(20)));

        let transfer = table.resolve(&Location::parse("/transfer"));
        assert!(matches!(
            guard.check(&transfer).await,
            GuardDecision::RedirectToLogin(_)
        ));

        let login = table.resolve(&Location::parse("/login"));
        assert_eq!(guard.check(&login).await, GuardDecision::Proceed);
    }
}
