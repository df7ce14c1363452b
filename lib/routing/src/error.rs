//! Error types for the routing crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `RouteTableError`: the declared table violates an invariant
//! - `NavigationError`: a transition could not settle on a page
//!
//! An unauthorized navigation is never an error; the guard turns it into a
//! redirect.

use std::fmt;

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// A path pattern could not be parsed.
    InvalidPattern { path: String, reason: String },
    /// Two routes share a name.
    DuplicateName { name: String },
    /// Two routes (or a route and an alias) share a path.
    DuplicatePath { path: String },
    /// A route chain requires both a signed-in and a signed-out user.
    ConflictingAccess { route: String },
    /// No top-level catch-all route was declared.
    MissingCatchAll,
    /// More than one top-level catch-all route was declared.
    DuplicateCatchAll { route: String },
    /// A redirect does not land on a page route.
    DanglingRedirect { route: String, target: String },
    /// A route the navigator depends on is not declared.
    MissingRoute { name: String },
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { path, reason } => {
                write!(f, "invalid route path '{path}': {reason}")
            }
            Self::DuplicateName { name } => {
                write!(f, "route name '{name}' is declared more than once")
            }
            Self::DuplicatePath { path } => {
                write!(f, "route path '{path}' is declared more than once")
            }
            Self::ConflictingAccess { route } => {
                write!(
                    f,
                    "route '{route}' requires both an authenticated and an unauthenticated user"
                )
            }
            Self::MissingCatchAll => {
                write!(f, "route table has no catch-all route")
            }
            Self::DuplicateCatchAll { route } => {
                write!(f, "route '{route}' is a second catch-all route")
            }
            Self::DanglingRedirect { route, target } => {
                write!(f, "route '{route}' redirects to '{target}', which is not a page")
            }
            Self::MissingRoute { name } => {
                write!(f, "route table has no route named '{name}'")
            }
        }
    }
}

impl std::error::Error for RouteTableError {}

/// Errors raised while navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Redirects did not settle on a page.
    TooManyRedirects { from: String, chain: Vec<String> },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyRedirects { from, chain } => {
                write!(
                    f,
                    "navigation to '{from}' did not settle after {} redirects: {}",
                    chain.len(),
                    chain.join(" -> ")
                )
            }
        }
    }
}

impl std::error::Error for NavigationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_path_display() {
        let err = RouteTableError::DuplicatePath {
            path: "/home".to_string(),
        };
        assert!(err.to_string().contains("/home"));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn dangling_redirect_display() {
        let err = RouteTableError::DanglingRedirect {
            route: "not-found".to_string(),
            target: "/nowhere".to_string(),
        };
        assert!(err.to_string().contains("not-found"));
        assert!(err.to_string().contains("/nowhere"));
    }

    #[test]
    fn too_many_redirects_display() {
        let err = NavigationError::TooManyRedirects {
            from: "/a".to_string(),
            chain: vec!["/a".to_string(), "/b".to_string()],
        };
        assert!(err.to_string().contains("2 redirects"));
        assert!(err.to_string().contains("/a -> /b"));
    }
}
