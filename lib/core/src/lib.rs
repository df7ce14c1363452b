//! Core domain types and utilities for the BankDash dashboard.
//!
//! This crate provides the foundational types and error handling shared by
//! the routing, platform access and web crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, UserId};
