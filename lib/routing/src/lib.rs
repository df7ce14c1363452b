//! Route table and authentication navigation guard for BankDash.
//!
//! This crate provides:
//! - The static route table (`RouteTable`, `RouteEntry`, `RouteMeta`)
//! - Path resolution with aliases, dynamic segments and a catch-all
//! - The navigation guard that gates every transition on sign-in state
//! - A `Navigator` that drives a transition end to end
//!
//! # Example
//!
//! ```
//! use bankdash_platform_access::AuthStateHandle;
//! use bankdash_routing::{Navigator, NavigationIntent, MemoryTitle, dashboard_routes};
//! use std::sync::Arc;
//!
//! # tokio_test_block_on(async {
//! let table = Arc::new(dashboard_routes().expect("valid table"));
//! let auth = AuthStateHandle::resolved(None);
//! let title = Arc::new(MemoryTitle::default());
//! let navigator = Navigator::new(table, Arc::new(auth), title.clone()).expect("navigator");
//!
//! let navigation = navigator
//!     .navigate(NavigationIntent::to("/transfer"))
//!     .await
//!     .expect("navigation");
//!
//! assert_eq!(navigation.full_path(), "/login?redirect=%2Ftransfer");
//! assert_eq!(title.current(), "Login");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_time().build().expect("runtime").block_on(f)
//! # }
//! ```

pub mod dashboard;
pub mod error;
pub mod guard;
pub mod location;
pub mod navigator;
pub mod pattern;
pub mod route;
pub mod scroll;
pub mod table;

pub use dashboard::{APP_NAME, LANDING_ROUTE, LOGIN_ROUTE, REDIRECT_PARAM, dashboard_routes};
pub use error::{NavigationError, RouteTableError};
pub use guard::{Access, GuardDecision, NavigationGuard, decide};
pub use location::Location;
pub use navigator::{DocumentTitle, MemoryTitle, Navigation, NavigationIntent, Navigator};
pub use pattern::PathPattern;
pub use route::{Page, RouteEntry, RouteMeta, RouteTarget};
pub use scroll::{ScrollPosition, ScrollTarget};
pub use table::{MatchedRoute, MenuItem, ResolvedRoute, RouteTable};
