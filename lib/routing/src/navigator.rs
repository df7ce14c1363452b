//! Drives one navigation from intent to committed route.

use crate::dashboard::{APP_NAME, LANDING_ROUTE, LOGIN_ROUTE};
use crate::error::{NavigationError, RouteTableError};
use crate::guard::NavigationGuard;
use crate::location::Location;
use crate::route::Page;
use crate::scroll::{ScrollPosition, ScrollTarget};
use crate::table::{ResolvedRoute, RouteTable};
use bankdash_platform_access::AuthState;
use rootcause::prelude::Report;
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Upper bound on redirects followed by a single navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Sink for the document title.
pub trait DocumentTitle: Send + Sync {
    fn set_title(&self, title: &str);
}

/// A title sink that keeps the last title in memory.
#[derive(Debug, Default)]
pub struct MemoryTitle {
    title: std::sync::Mutex<String>,
}

impl MemoryTitle {
    /// Returns the last title written.
    #[must_use]
    pub fn current(&self) -> String {
        self.title
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DocumentTitle for MemoryTitle {
    fn set_title(&self, title: &str) {
        *self.title.lock().unwrap_or_else(PoisonError::into_inner) = title.to_string();
    }
}

/// A requested transition.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationIntent {
    target: Location,
    origin: Option<Location>,
    saved_position: Option<ScrollPosition>,
}

impl NavigationIntent {
    /// Navigation to `target`.
    #[must_use]
    pub fn to(target: &str) -> Self {
        Self {
            target: Location::parse(target),
            origin: None,
            saved_position: None,
        }
    }

    /// Records where the navigation started.
    #[must_use]
    pub fn from(mut self, origin: Location) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Records the scroll position saved for the target in history.
    #[must_use]
    pub fn with_saved_position(mut self, position: ScrollPosition) -> Self {
        self.saved_position = Some(position);
        self
    }

    #[must_use]
    pub fn target(&self) -> &Location {
        &self.target
    }

    #[must_use]
    pub fn origin(&self) -> Option<&Location> {
        self.origin.as_ref()
    }
}

impl From<Location> for NavigationIntent {
    fn from(target: Location) -> Self {
        Self {
            target,
            origin: None,
            saved_position: None,
        }
    }
}

/// A committed navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    route: ResolvedRoute,
    redirected_from: Option<Location>,
    redirects: Vec<String>,
    title: String,
    scroll: ScrollTarget,
}

impl Navigation {
    /// Returns the committed route.
    #[must_use]
    pub fn route(&self) -> &ResolvedRoute {
        &self.route
    }

    /// Returns the committed location.
    #[must_use]
    pub fn location(&self) -> &Location {
        self.route.location()
    }

    /// Returns the committed full path.
    #[must_use]
    pub fn full_path(&self) -> String {
        self.route.full_path()
    }

    /// Returns the page to render.
    #[must_use]
    pub fn page(&self) -> Option<Page> {
        self.route.page()
    }

    /// The originally requested location, if redirects moved the navigation.
    #[must_use]
    pub fn redirected_from(&self) -> Option<&Location> {
        self.redirected_from.as_ref()
    }

    /// Full paths passed through before the committed one.
    #[must_use]
    pub fn redirects(&self) -> &[String] {
        &self.redirects
    }

    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }

    /// Returns the document title that was set.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns where the page should scroll.
    #[must_use]
    pub fn scroll(&self) -> &ScrollTarget {
        &self.scroll
    }
}

/// Resolves, guards and commits navigations against a route table.
///
/// Navigations are serialized: a second call waits until the first one has
/// committed or failed.
pub struct Navigator {
    table: Arc<RouteTable>,
    guard: NavigationGuard,
    title: Arc<dyn DocumentTitle>,
    current: Mutex<Option<Location>>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Creates a navigator over `table`.
    ///
    /// # Errors
    ///
    /// Returns `RouteTableError::MissingRoute` if the table has no login or
    /// landing route.
    pub fn new(
        table: Arc<RouteTable>,
        auth: Arc<dyn AuthState>,
        title: Arc<dyn DocumentTitle>,
    ) -> Result<Self, Report<RouteTableError>> {
        let login = required_path(&table, LOGIN_ROUTE)?;
        let landing = required_path(&table, LANDING_ROUTE)?;
        let guard = NavigationGuard::new(auth, &login, &landing);

        Ok(Self {
            table,
            guard,
            title,
            current: Mutex::new(None),
        })
    }

    /// Sets the bound on waiting for authentication readiness.
    #[must_use]
    pub fn with_ready_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.guard = self.guard.with_ready_timeout(timeout);
        self
    }

    /// Returns the route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns the last committed location.
    pub async fn current(&self) -> Option<Location> {
        self.current.lock().await.clone()
    }

    /// Runs one navigation.
    ///
    /// Table redirects are followed before the guard runs; guard redirects
    /// are resolved and guarded again.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::TooManyRedirects` if the navigation has not
    /// settled after `MAX_REDIRECTS` hops.
    #[instrument(skip_all, fields(to = %intent.target, from = ?intent.origin.as_ref().map(Location::full_path)))]
    pub async fn navigate(
        &self,
        intent: NavigationIntent,
    ) -> Result<Navigation, Report<NavigationError>> {
        let mut current = self.current.lock().await;

        let mut location = intent.target.clone();
        let mut redirects = Vec::new();
        let route = loop {
            let route = self.table.resolve(&location);
            let next = match route.redirect_location() {
                Some(to) => Some(to),
                None => self.guard.check(&route).await.redirect().cloned(),
            };
            let Some(next) = next else {
                break route;
            };

            debug!(from = %location, to = %next, "navigation redirected");
            redirects.push(location.full_path());
            if redirects.len() > MAX_REDIRECTS {
                return Err(NavigationError::TooManyRedirects {
                    from: intent.target.full_path(),
                    chain: redirects,
                }
                .into());
            }
            location = next;
        };

        let title = route.title().unwrap_or(APP_NAME).to_string();
        self.title.set_title(&title);

        let saved = if redirects.is_empty() {
            intent.saved_position
        } else {
            None
        };
        let scroll = ScrollTarget::for_arrival(route.location(), saved);

        info!(
            path = %route.location(),
            route = route.name().unwrap_or_default(),
            redirects = redirects.len(),
            "navigation committed"
        );
        *current = Some(route.location().clone());

        Ok(Navigation {
            redirected_from: (!redirects.is_empty()).then_some(intent.target),
            route,
            redirects,
            title,
            scroll,
        })
    }
}

fn required_path(table: &RouteTable, name: &str) -> Result<String, RouteTableError> {
    table
        .path_for(name)
        .map(str::to_string)
        .ok_or_else(|| RouteTableError::MissingRoute {
            name: name.to_string(),
        })
}
