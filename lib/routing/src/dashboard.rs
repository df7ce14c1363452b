//! The BankDash route table.

use crate::error::RouteTableError;
use crate::route::{Page, RouteEntry};
use crate::table::RouteTable;
use bankdash_core::Result;

/// Document title used when the active route declares none.
pub const APP_NAME: &str = "BankDash";

/// Name of the route signed-out users are sent to.
pub const LOGIN_ROUTE: &str = "login";

/// Name of the route signed-in users land on.
pub const LANDING_ROUTE: &str = "index";

/// Query parameter carrying the destination to return to after sign-in.
pub const REDIRECT_PARAM: &str = "redirect";

/// Builds the dashboard's route table.
///
/// # Errors
///
/// Only fails if the declarations below violate a table invariant.
pub fn dashboard_routes() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(vec![
        RouteEntry::page("/index", LANDING_ROUTE, Page::Dashboard)
            .alias("/")
            .alias("/home")
            .alias("/main")
            .title("Dashboard")
            .icon("home")
            .requires_auth(),
        RouteEntry::page("/login", LOGIN_ROUTE, Page::Login)
            .title("Login")
            .requires_unauth(),
        RouteEntry::page("/register", "register", Page::Register)
            .title("Register")
            .requires_unauth(),
        RouteEntry::page("/transfer", "transfer", Page::Transfer)
            .title("Transfer")
            .icon("transfer")
            .requires_auth(),
        RouteEntry::page("/transactions", "transactions", Page::Transactions)
            .title("Transactions")
            .requires_unauth(),
        RouteEntry::page("/profile", "profile", Page::Profile)
            .alias("/user")
            .title("Profile")
            .icon("user")
            .requires_auth(),
        RouteEntry::page("/investments", "investments", Page::Investments)
            .title("Investments")
            .icon("investment")
            .requires_auth(),
        RouteEntry::page("/credit-cards", "credit-cards", Page::CreditCards)
            .title("Credit Cards")
            .icon("credit-card")
            .requires_auth(),
        RouteEntry::page("/settings", "settings", Page::Settings)
            .title("Settings")
            .icon("settings")
            .requires_auth()
            .child(RouteEntry::page(":section", "settings-section", Page::Settings)),
        RouteEntry::redirect("/:pathMatch(.*)*", "not-found", "/index"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::route::RouteTarget;

    fn table() -> RouteTable {
        dashboard_routes().expect("dashboard routes are valid")
    }

    #[test]
    fn every_page_is_reachable() {
        let table = table();
        for (path, page) in [
            ("/index", Page::Dashboard),
            ("/login", Page::Login),
            ("/register", Page::Register),
            ("/transfer", Page::Transfer),
            ("/transactions", Page::Transactions),
            ("/profile", Page::Profile),
            ("/investments", Page::Investments),
            ("/credit-cards", Page::CreditCards),
            ("/settings", Page::Settings),
            ("/settings/security", Page::Settings),
        ] {
            assert_eq!(table.resolve(&Location::parse(path)).page(), Some(page), "{path}");
        }
    }

    #[test]
    fn landing_aliases_share_metadata() {
        let table = table();
        let canonical = table.resolve(&Location::parse("/index"));
        for alias in ["/", "/home", "/main"] {
            let route = table.resolve(&Location::parse(alias));
            assert_eq!(route.matched(), canonical.matched(), "{alias}");
        }
    }

    #[test]
    fn unknown_paths_redirect_to_landing() {
        let table = table();
        for path in ["/does-not-exist", "/index/extra", "/LOGIN", "/settings/a/b"] {
            let route = table.resolve(&Location::parse(path));
            assert_eq!(route.name(), Some("not-found"), "{path}");
            assert_eq!(
                route.redirect_location().map(|l| l.path().to_string()),
                Some("/index".to_string())
            );
        }
    }

    #[test]
    fn sign_in_pages_require_signed_out_user() {
        let table = table();
        for path in ["/login", "/register", "/transactions"] {
            let route = table.resolve(&Location::parse(path));
            assert!(route.requires_unauth(), "{path}");
            assert!(!route.requires_auth(), "{path}");
        }
    }

    #[test]
    fn dashboard_pages_require_signed_in_user() {
        let table = table();
        for path in ["/", "/index", "/transfer", "/user", "/settings/notifications"] {
            assert!(table.resolve(&Location::parse(path)).requires_auth(), "{path}");
        }
    }

    #[test]
    fn named_routes_exist() {
        let table = table();
        assert_eq!(table.path_for(LOGIN_ROUTE), Some("/login"));
        assert_eq!(table.path_for(LANDING_ROUTE), Some("/index"));
    }

    #[test]
    fn menu_follows_declaration_order() {
        let names: Vec<String> = table().menu().into_iter().map(|item| item.name).collect();
        assert_eq!(
            names,
            [
                "index",
                "transfer",
                "profile",
                "investments",
                "credit-cards",
                "settings"
            ]
        );
    }

    #[test]
    fn catch_all_is_a_redirect() {
        let table = table();
        let route = table.resolve(&Location::parse("/nope"));
        assert_eq!(
            route.leaf().map(|leaf| leaf.target().clone()),
            Some(RouteTarget::Redirect("/index".to_string()))
        );
    }
}
