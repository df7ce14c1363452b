//! Route declarations.
//!
//! A `RouteEntry` maps a path (plus aliases) to a page or a redirect and
//! carries display and access metadata. Entries may nest; a child's relative
//! path is joined onto its parent's.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page components the dashboard can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Dashboard,
    Login,
    Register,
    Transfer,
    Transactions,
    Profile,
    Investments,
    CreditCards,
    Settings,
}

impl Page {
    /// Stable identifier of the page component.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Login => "login",
            Self::Register => "register",
            Self::Transfer => "transfer",
            Self::Transactions => "transactions",
            Self::Profile => "profile",
            Self::Investments => "investments",
            Self::CreditCards => "credit-cards",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display and access metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    /// Document title shown while the route is active.
    pub title: Option<String>,
    /// Only signed-in users may enter.
    pub requires_auth: bool,
    /// Only signed-out users may enter.
    pub requires_unauth: bool,
    /// Icon identifier for navigation menus.
    pub icon: Option<String>,
}

/// What a route renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Render a page.
    Page(Page),
    /// Send the navigation somewhere else before any guard runs.
    Redirect(String),
}

/// One declared route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) target: RouteTarget,
    pub(crate) aliases: Vec<String>,
    pub(crate) meta: RouteMeta,
    pub(crate) children: Vec<RouteEntry>,
}

impl RouteEntry {
    /// Declares a route rendering `page`.
    #[must_use]
    pub fn page(path: &str, name: &str, page: Page) -> Self {
        Self::new(path, name, RouteTarget::Page(page))
    }

    /// Declares a route that redirects to `to`.
    #[must_use]
    pub fn redirect(path: &str, name: &str, to: &str) -> Self {
        Self::new(path, name, RouteTarget::Redirect(to.to_string()))
    }

    fn new(path: &str, name: &str, target: RouteTarget) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            target,
            aliases: Vec::new(),
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    /// Adds an equivalent path.
    #[must_use]
    pub fn alias(mut self, path: &str) -> Self {
        self.aliases.push(path.to_string());
        self
    }

    /// Sets the document title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.meta.title = Some(title.to_string());
        self
    }

    /// Sets the menu icon.
    #[must_use]
    pub fn icon(mut self, icon: &str) -> Self {
        self.meta.icon = Some(icon.to_string());
        self
    }

    /// Restricts the route to signed-in users.
    #[must_use]
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    /// Restricts the route to signed-out users.
    #[must_use]
    pub fn requires_unauth(mut self) -> Self {
        self.meta.requires_unauth = true;
        self
    }

    /// Adds a nested route.
    #[must_use]
    pub fn child(mut self, child: RouteEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the declared (possibly relative) path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the route target.
    #[must_use]
    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// Returns the declared aliases.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns the route metadata.
    #[must_use]
    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }

    /// Returns nested routes.
    #[must_use]
    pub fn children(&self) -> &[RouteEntry] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_metadata() {
        let entry = RouteEntry::page("/transfer", "transfer", Page::Transfer)
            .title("Transfer")
            .icon("transfer")
            .requires_auth();

        assert_eq!(entry.path(), "/transfer");
        assert_eq!(entry.name(), "transfer");
        assert_eq!(entry.target(), &RouteTarget::Page(Page::Transfer));
        assert_eq!(entry.meta().title.as_deref(), Some("Transfer"));
        assert_eq!(entry.meta().icon.as_deref(), Some("transfer"));
        assert!(entry.meta().requires_auth);
        assert!(!entry.meta().requires_unauth);
    }

    #[test]
    fn redirect_and_children() {
        let entry = RouteEntry::page("/settings", "settings", Page::Settings)
            .child(RouteEntry::page(":section", "settings-section", Page::Settings));
        assert_eq!(entry.children().len(), 1);
        assert_eq!(entry.children()[0].path(), ":section");

        let fallback = RouteEntry::redirect("/:pathMatch(.*)*", "not-found", "/index");
        assert_eq!(fallback.target(), &RouteTarget::Redirect("/index".to_string()));
    }

    #[test]
    fn page_identifiers_are_kebab_case() {
        assert_eq!(Page::CreditCards.as_str(), "credit-cards");
        assert_eq!(Page::Dashboard.to_string(), "dashboard");
    }
}
