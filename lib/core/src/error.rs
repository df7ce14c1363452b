//! Shared result alias.
//!
//! Every fallible BankDash operation returns a `rootcause::Report` over a
//! crate-local error enum (`RouteTableError`, `NavigationError`,
//! `BackendError`). This alias keeps those signatures short.

use rootcause::Report;

/// `Result` whose error is a report over context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{ParseIdError, UserId};

    fn parse_uid(raw: &str) -> Result<UserId, ParseIdError> {
        Ok(raw.parse::<UserId>()?)
    }

    #[test]
    fn domain_errors_convert_into_reports() {
        assert_eq!(parse_uid("uid_1").expect("valid uid").as_str(), "uid_1");
        assert!(parse_uid("").is_err());
    }
}
