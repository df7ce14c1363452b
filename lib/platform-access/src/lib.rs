//! Hosted backend wiring and authentication state for BankDash.
//!
//! This crate provides:
//! - Backend configuration and service handles (`BackendConfig`, `BackendApp`)
//! - The authentication collaborator contract (`AuthState`)
//! - An observable authentication state (`AuthStateHandle`)
//! - A REST client for the hosted identity toolkit (feature `rest`)
//!
//! # Authentication Model
//!
//! The hosted platform owns sign-in. This crate only observes the outcome:
//! whether the initial authentication state is known yet, and who (if
//! anyone) is signed in.
//!
//! # Example
//!
//! ```
//! use bankdash_platform_access::{AuthState, AuthStateHandle, Identity};
//!
//! # tokio_test_block_on(async {
//! let auth = AuthStateHandle::new();
//! assert!(!auth.snapshot().is_resolved());
//!
//! let uid = "uid_42".parse().expect("valid uid");
//! auth.resolve(Some(Identity::new(uid)));
//!
//! auth.wait_ready().await;
//! assert!(auth.current_user().is_some());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(f)
//! # }
//! ```

pub mod auth;
pub mod backend;
pub mod error;
#[cfg(feature = "rest")]
pub mod toolkit;
pub mod user;

// Re-export main types at crate root
pub use auth::{AuthSnapshot, AuthState, AuthStateHandle};
pub use backend::{BackendApp, BackendAuth, BackendConfig, DocumentDatabase, Functions};
pub use error::BackendError;
#[cfg(feature = "rest")]
pub use toolkit::{IdentityToolkitClient, SignInResult};
pub use user::Identity;
