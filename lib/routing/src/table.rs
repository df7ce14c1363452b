//! The route table and path resolution.
//!
//! Entries are flattened at construction into one record per concrete path
//! (canonical path, aliases, and every parent path variant for nested
//! routes). Resolution picks the most specific matching record; ties go to
//! the record declared first.

use crate::error::RouteTableError;
use crate::location::Location;
use crate::pattern::{PathPattern, Specificity};
use crate::route::{Page, RouteEntry, RouteMeta, RouteTarget};
use rootcause::prelude::Report;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone)]
struct Node {
    name: String,
    path: String,
    target: RouteTarget,
    meta: RouteMeta,
    parent: Option<usize>,
}

#[derive(Debug, Clone)]
struct Record {
    pattern: PathPattern,
    node: usize,
    alias: bool,
}

/// A validated, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    nodes: Vec<Node>,
    records: Vec<Record>,
}

impl RouteTable {
    /// Builds and validates a table from declared entries.
    ///
    /// # Errors
    ///
    /// Returns a `RouteTableError` when a path does not parse, a name or path
    /// is declared twice, a route chain requires both signed-in and
    /// signed-out users, there is not exactly one top-level catch-all, or a
    /// redirect does not land on a page.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, Report<RouteTableError>> {
        Ok(Self::build(entries)?)
    }

    fn build(entries: Vec<RouteEntry>) -> Result<Self, RouteTableError> {
        let mut table = Self {
            nodes: Vec::new(),
            records: Vec::new(),
        };
        for entry in &entries {
            table.add(entry, None, &[String::new()])?;
        }
        table.validate()?;
        Ok(table)
    }

    fn add(
        &mut self,
        entry: &RouteEntry,
        parent: Option<usize>,
        parent_paths: &[String],
    ) -> Result<(), RouteTableError> {
        let own_paths: Vec<&str> = std::iter::once(entry.path.as_str())
            .chain(entry.aliases.iter().map(String::as_str))
            .collect();
        let full_paths: Vec<String> = parent_paths
            .iter()
            .flat_map(|parent| own_paths.iter().map(move |own| PathPattern::join(parent, own)))
            .collect();

        let index = self.nodes.len();
        let mut patterns = Vec::with_capacity(full_paths.len());
        for raw in &full_paths {
            patterns.push(PathPattern::parse(raw)?);
        }

        self.nodes.push(Node {
            name: entry.name.clone(),
            path: patterns[0].to_string(),
            target: entry.target.clone(),
            meta: entry.meta.clone(),
            parent,
        });
        for (i, pattern) in patterns.into_iter().enumerate() {
            self.records.push(Record {
                pattern,
                node: index,
                alias: i != 0,
            });
        }

        for child in &entry.children {
            self.add(child, Some(index), &full_paths)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), RouteTableError> {
        let mut names = HashSet::new();
        for node in &self.nodes {
            if !names.insert(node.name.as_str()) {
                return Err(RouteTableError::DuplicateName {
                    name: node.name.clone(),
                });
            }
        }

        let mut paths = HashSet::new();
        for record in &self.records {
            let path = record.pattern.to_string();
            if !paths.insert(path.clone()) {
                return Err(RouteTableError::DuplicatePath { path });
            }
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let chain = self.chain(index);
            let auth = chain.iter().any(|&i| self.nodes[i].meta.requires_auth);
            let unauth = chain.iter().any(|&i| self.nodes[i].meta.requires_unauth);
            if auth && unauth {
                return Err(RouteTableError::ConflictingAccess {
                    route: node.name.clone(),
                });
            }
        }

        let mut catch_alls = self
            .records
            .iter()
            .filter(|record| self.nodes[record.node].parent.is_none() && record.pattern.is_bare_catch_all());
        if catch_alls.next().is_none() {
            return Err(RouteTableError::MissingCatchAll);
        }
        if let Some(extra) = catch_alls.next() {
            return Err(RouteTableError::DuplicateCatchAll {
                route: self.nodes[extra.node].name.clone(),
            });
        }

        for node in &self.nodes {
            if let RouteTarget::Redirect(to) = &node.target {
                let lands_on_page = self
                    .find(Location::parse(to).path())
                    .is_some_and(|(index, _, _)| matches!(self.nodes[index].target, RouteTarget::Page(_)));
                if !lands_on_page {
                    return Err(RouteTableError::DanglingRedirect {
                        route: node.name.clone(),
                        target: to.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Node indices from the top-level ancestor down to `index`.
    fn chain(&self, index: usize) -> Vec<usize> {
        let mut chain = vec![index];
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.nodes[parent].parent;
        }
        chain.reverse();
        chain
    }

    fn find(&self, path: &str) -> Option<(usize, BTreeMap<String, String>, bool)> {
        let mut best: Option<(&Record, BTreeMap<String, String>, Specificity)> = None;
        for record in &self.records {
            if let Some((params, specificity)) = record.pattern.match_path(path) {
                if best.as_ref().is_none_or(|(_, _, current)| specificity > *current) {
                    best = Some((record, params, specificity));
                }
            }
        }
        best.map(|(record, params, _)| (record.node, params, record.alias))
    }

    /// Resolves a location to its matched route chain.
    ///
    /// Every path resolves once the table is validated: unmatched paths land
    /// on the catch-all.
    #[must_use]
    pub fn resolve(&self, location: &Location) -> ResolvedRoute {
        let Some((index, params, alias)) = self.find(location.path()) else {
            return ResolvedRoute {
                location: location.clone(),
                matched: Vec::new(),
                params: BTreeMap::new(),
                alias: false,
            };
        };

        let matched: Vec<MatchedRoute> = self
            .chain(index)
            .into_iter()
            .map(|i| {
                let node = &self.nodes[i];
                MatchedRoute {
                    name: node.name.clone(),
                    path: node.path.clone(),
                    target: node.target.clone(),
                    meta: node.meta.clone(),
                }
            })
            .collect();

        trace!(
            path = location.path(),
            route = %self.nodes[index].name,
            alias,
            "resolved route"
        );

        ResolvedRoute {
            location: location.clone(),
            matched,
            params,
            alias,
        }
    }

    /// Returns the canonical path of a named route.
    #[must_use]
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|node| node.name == name)
            .map(|node| node.path.as_str())
    }

    /// Top-level page routes that declare both a title and an icon, in
    /// declaration order.
    #[must_use]
    pub fn menu(&self) -> Vec<MenuItem> {
        self.nodes
            .iter()
            .filter(|node| node.parent.is_none() && matches!(node.target, RouteTarget::Page(_)))
            .filter_map(|node| {
                Some(MenuItem {
                    name: node.name.clone(),
                    path: node.path.clone(),
                    title: node.meta.title.clone()?,
                    icon: node.meta.icon.clone()?,
                })
            })
            .collect()
    }
}

/// Navigation menu entry derived from route metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub title: String,
    pub icon: String,
}

/// One entry of a matched route chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    name: String,
    path: String,
    target: RouteTarget,
    meta: RouteMeta,
}

impl MatchedRoute {
    /// Returns the route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the canonical path pattern.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the route target.
    #[must_use]
    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// Returns the route's own metadata.
    #[must_use]
    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }
}

/// The result of resolving a location against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    location: Location,
    matched: Vec<MatchedRoute>,
    params: BTreeMap<String, String>,
    alias: bool,
}

impl ResolvedRoute {
    /// Returns the requested location.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the requested full path.
    #[must_use]
    pub fn full_path(&self) -> String {
        self.location.full_path()
    }

    /// Returns the matched chain, outermost route first.
    #[must_use]
    pub fn matched(&self) -> &[MatchedRoute] {
        &self.matched
    }

    /// Returns the innermost matched route.
    #[must_use]
    pub fn leaf(&self) -> Option<&MatchedRoute> {
        self.matched.last()
    }

    /// Returns the innermost route's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.leaf().map(MatchedRoute::name)
    }

    /// Returns the page to render, if the route renders one.
    #[must_use]
    pub fn page(&self) -> Option<Page> {
        match self.leaf()?.target {
            RouteTarget::Page(page) => Some(page),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// Where a redirect route sends the navigation.
    ///
    /// A redirect without its own query or hash keeps the requested ones.
    #[must_use]
    pub fn redirect_location(&self) -> Option<Location> {
        let RouteTarget::Redirect(to) = &self.leaf()?.target else {
            return None;
        };
        let target = Location::parse(to);
        if to.contains('?') || to.contains('#') {
            Some(target)
        } else {
            Some(target.with_query_and_hash_of(&self.location))
        }
    }

    /// True if any route in the chain requires a signed-in user.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|route| route.meta.requires_auth)
    }

    /// True if any route in the chain requires a signed-out user.
    #[must_use]
    pub fn requires_unauth(&self) -> bool {
        self.matched.iter().any(|route| route.meta.requires_unauth)
    }

    /// Title of the innermost route that declares one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.matched
            .iter()
            .rev()
            .find_map(|route| route.meta.title.as_deref())
    }

    /// Icon of the innermost route that declares one.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.matched
            .iter()
            .rev()
            .find_map(|route| route.meta.icon.as_deref())
    }

    /// Returns the decoded path parameters.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Returns one path parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// True if the location matched through an alias.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.alias
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catch_all() -> RouteEntry {
        RouteEntry::redirect("/:pathMatch(.*)*", "not-found", "/index")
    }

    fn small_table() -> RouteTable {
        RouteTable::new(vec![
            RouteEntry::page("/index", "index", Page::Dashboard)
                .alias("/")
                .alias("/home")
                .title("Dashboard")
                .requires_auth(),
            RouteEntry::page("/login", "login", Page::Login)
                .title("Login")
                .requires_unauth(),
            RouteEntry::page("/settings", "settings", Page::Settings)
                .title("Settings")
                .icon("settings")
                .requires_auth()
                .alias("/preferences")
                .child(RouteEntry::page(":section", "settings-section", Page::Settings))
                .child(RouteEntry::page("security", "settings-security", Page::Settings).title("Security")),
            catch_all(),
        ])
        .expect("valid table")
    }

    fn resolve(table: &RouteTable, path: &str) -> ResolvedRoute {
        table.resolve(&Location::parse(path))
    }

    #[test]
    fn resolves_canonical_path() {
        let table = small_table();
        let route = resolve(&table, "/login");
        assert_eq!(route.name(), Some("login"));
        assert_eq!(route.page(), Some(Page::Login));
        assert!(route.requires_unauth());
        assert!(!route.is_alias());
    }

    #[test]
    fn aliases_resolve_to_same_route() {
        let table = small_table();
        let canonical = resolve(&table, "/index");
        for alias in ["/", "/home"] {
            let route = resolve(&table, alias);
            assert!(route.is_alias());
            assert_eq!(route.matched(), canonical.matched());
            assert_eq!(route.page(), canonical.page());
            assert_eq!(route.title(), Some("Dashboard"));
        }
    }

    #[test]
    fn unmatched_paths_land_on_catch_all() {
        let table = small_table();
        let route = resolve(&table, "/does-not-exist?x=1#top");
        assert_eq!(route.name(), Some("not-found"));
        assert_eq!(route.page(), None);
        assert_eq!(route.param("pathMatch"), Some("does-not-exist"));
        let redirect = route.redirect_location().expect("redirect");
        assert_eq!(redirect.path(), "/index");
        assert_eq!(redirect.full_path(), "/index?x=1#top");
    }

    #[test]
    fn nested_route_inherits_access_and_title() {
        let table = small_table();
        let route = resolve(&table, "/settings/notifications");
        assert_eq!(route.name(), Some("settings-section"));
        assert_eq!(route.param("section"), Some("notifications"));
        assert_eq!(route.matched().len(), 2);
        assert!(route.requires_auth());
        assert_eq!(route.title(), Some("Settings"));
        assert_eq!(route.icon(), Some("settings"));
    }

    #[test]
    fn literal_child_beats_dynamic_sibling() {
        let table = small_table();
        let route = resolve(&table, "/settings/security");
        assert_eq!(route.name(), Some("settings-security"));
        assert_eq!(route.title(), Some("Security"));
    }

    #[test]
    fn children_follow_parent_aliases() {
        let table = small_table();
        let route = resolve(&table, "/preferences/security");
        assert_eq!(route.name(), Some("settings-security"));
        assert!(route.is_alias());
        assert_eq!(route.matched()[0].path(), "/settings");
    }

    #[test]
    fn path_for_returns_canonical_path() {
        let table = small_table();
        assert_eq!(table.path_for("index"), Some("/index"));
        assert_eq!(table.path_for("settings-section"), Some("/settings/:section"));
        assert_eq!(table.path_for("missing"), None);
    }

    #[test]
    fn menu_lists_titled_routes_with_icons() {
        let table = small_table();
        let menu = table.menu();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].name, "settings");
        assert_eq!(menu[0].path, "/settings");
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/a", "same", Page::Dashboard),
            RouteEntry::page("/b", "same", Page::Login),
            catch_all(),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::DuplicateName {
                name: "same".to_string()
            }
        );
    }

    #[test]
    fn rejects_alias_colliding_with_path() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/index", "index", Page::Dashboard).alias("/login"),
            RouteEntry::page("/login", "login", Page::Login),
            catch_all(),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::DuplicatePath {
                path: "/login".to_string()
            }
        );
    }

    #[test]
    fn rejects_trailing_slash_duplicates() {
        let result = RouteTable::build(vec![
            RouteEntry::page("/index", "index", Page::Dashboard),
            RouteEntry::page("/index/", "index-again", Page::Dashboard),
            catch_all(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_conflicting_access_in_chain() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/account", "account", Page::Profile)
                .requires_auth()
                .child(RouteEntry::page("signup", "account-signup", Page::Register).requires_unauth()),
            catch_all(),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::ConflictingAccess {
                route: "account-signup".to_string()
            }
        );
    }

    #[test]
    fn rejects_missing_catch_all() {
        let err = RouteTable::build(vec![RouteEntry::page("/index", "index", Page::Dashboard)]).unwrap_err();
        assert_eq!(err, RouteTableError::MissingCatchAll);
    }

    #[test]
    fn rejects_second_catch_all() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/index", "index", Page::Dashboard),
            catch_all(),
            RouteEntry::redirect("/:rest(.*)*", "fallback", "/index"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RouteTableError::DuplicateCatchAll {
                route: "fallback".to_string()
            }
        );
    }

    #[test]
    fn rejects_redirect_to_redirect() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/index", "index", Page::Dashboard),
            RouteEntry::redirect("/old", "old", "/older"),
            RouteEntry::redirect("/older", "older", "/index"),
            catch_all(),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            RouteTableError::DanglingRedirect { route, .. } if route == "old"
        ));
    }

    #[test]
    fn rejects_catch_all_redirecting_to_itself() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/index", "index", Page::Dashboard),
            RouteEntry::redirect("/:pathMatch(.*)*", "not-found", "/missing"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            RouteTableError::DanglingRedirect { .. }
        ));
    }

    #[test]
    fn rejects_invalid_pattern() {
        let err = RouteTable::build(vec![
            RouteEntry::page("/settings/:", "settings", Page::Settings),
            catch_all(),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            RouteTableError::InvalidPattern { .. }
        ));
    }
}
