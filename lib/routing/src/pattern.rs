//! Path patterns: literal segments, `:param` segments and `:name(.*)*`
//! catch-alls.

use crate::error::RouteTableError;
use percent_encoding::percent_decode_str;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

const CATCH_ALL_SUFFIX: &str = "(.*)*";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            Self::Static(_) => 3,
            Self::Param(_) => 2,
            Self::CatchAll(_) => 1,
        }
    }
}

/// A parsed route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

/// How specific a successful match was; greater is more specific.
///
/// Any match without a catch-all beats any match with one. Otherwise the
/// segment ranks are compared left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Specificity {
    catch_all: bool,
    ranks: Vec<u8>,
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .catch_all
            .cmp(&self.catch_all)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathPattern {
    /// Parses an absolute pattern such as `/settings/:section`.
    ///
    /// # Errors
    ///
    /// Returns `RouteTableError::InvalidPattern` for empty parameter names,
    /// a catch-all that is not the last segment, or a relative path.
    pub fn parse(path: &str) -> Result<Self, RouteTableError> {
        let invalid = |reason: &str| RouteTableError::InvalidPattern {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if !path.starts_with('/') {
            return Err(invalid("path must start with '/'"));
        }

        let raw: Vec<&str> = split_segments(path).collect();
        let mut segments = Vec::with_capacity(raw.len());
        for (i, segment) in raw.iter().enumerate() {
            let parsed = match segment.strip_prefix(':') {
                None => Segment::Static((*segment).to_string()),
                Some(name) => match name.strip_suffix(CATCH_ALL_SUFFIX) {
                    Some(name) => {
                        if i + 1 != raw.len() {
                            return Err(invalid("catch-all must be the last segment"));
                        }
                        Segment::CatchAll(param_name(name).ok_or_else(|| invalid("empty catch-all name"))?)
                    }
                    None => Segment::Param(param_name(name).ok_or_else(|| invalid("empty parameter name"))?),
                },
            };
            segments.push(parsed);
        }

        Ok(Self { segments })
    }

    /// Returns true if the pattern ends in a catch-all.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Returns true if the pattern is nothing but a catch-all.
    #[must_use]
    pub fn is_bare_catch_all(&self) -> bool {
        self.segments.len() == 1 && self.is_catch_all()
    }

    /// Returns true if the pattern has no parameters.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Static(_)))
    }

    /// Matches a concrete path, returning its decoded parameters.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        self.match_path(path).map(|(params, _)| params)
    }

    pub(crate) fn match_path(&self, path: &str) -> Option<(BTreeMap<String, String>, Specificity)> {
        let parts: Vec<&str> = split_segments(path).collect();
        let mut params = BTreeMap::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(literal) => {
                    if parts.get(i) != Some(&literal.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i)?;
                    params.insert(name.clone(), decode(value));
                }
                Segment::CatchAll(name) => {
                    let rest = parts.get(i..).unwrap_or_default();
                    params.insert(name.clone(), decode(&rest.join("/")));
                    return Some((params, self.specificity()));
                }
            }
        }

        (parts.len() == self.segments.len()).then(|| (params, self.specificity()))
    }

    fn specificity(&self) -> Specificity {
        Specificity {
            catch_all: self.is_catch_all(),
            ranks: self.segments.iter().map(Segment::rank).collect(),
        }
    }

    /// Joins a child path onto this pattern's path. Absolute children are
    /// returned unchanged.
    #[must_use]
    pub fn join(parent: &str, child: &str) -> String {
        if child.starts_with('/') {
            return child.to_string();
        }
        let parent = parent.trim_end_matches('/');
        if child.is_empty() {
            if parent.is_empty() { "/".to_string() } else { parent.to_string() }
        } else {
            format!("{parent}/{child}")
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => write!(f, "/{literal}")?,
                Segment::Param(name) => write!(f, "/:{name}")?,
                Segment::CatchAll(name) => write!(f, "/:{name}{CATCH_ALL_SUFFIX}")?,
            }
        }
        Ok(())
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn param_name(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(path: &str) -> PathPattern {
        PathPattern::parse(path).expect("valid pattern")
    }

    #[test]
    fn static_pattern_matches_exactly() {
        let p = pattern("/transfer");
        assert!(p.matches("/transfer").is_some());
        assert!(p.matches("/transfer/").is_some());
        assert!(p.matches("/Transfer").is_none());
        assert!(p.matches("/transfer/extra").is_none());
        assert!(p.matches("/").is_none());
    }

    #[test]
    fn root_pattern_matches_root_only() {
        let p = pattern("/");
        assert!(p.matches("/").is_some());
        assert!(p.matches("/index").is_none());
        assert_eq!(p.to_string(), "/");
    }

    #[test]
    fn param_segment_captures_decoded_value() {
        let p = pattern("/settings/:section");
        let params = p.matches("/settings/two%20factor").expect("match");
        assert_eq!(params.get("section").map(String::as_str), Some("two factor"));
        assert!(p.matches("/settings").is_none());
    }

    #[test]
    fn catch_all_captures_rest() {
        let p = pattern("/:pathMatch(.*)*");
        assert!(p.is_bare_catch_all());
        let params = p.matches("/does/not/exist").expect("match");
        assert_eq!(params.get("pathMatch").map(String::as_str), Some("does/not/exist"));
        assert_eq!(
            p.matches("/").expect("match").get("pathMatch").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn catch_all_must_be_last() {
        assert!(PathPattern::parse("/:rest(.*)*/tail").is_err());
        assert!(PathPattern::parse("/:(.*)*").is_err());
        assert!(PathPattern::parse("/settings/:").is_err());
        assert!(PathPattern::parse("relative").is_err());
    }

    #[test]
    fn static_beats_param_beats_catch_all() {
        let (_, literal) = pattern("/settings/security").match_path("/settings/security").expect("match");
        let (_, param) = pattern("/settings/:section").match_path("/settings/security").expect("match");
        let (_, nested_catch_all) = pattern("/settings/:rest(.*)*").match_path("/settings/security").expect("match");
        let (_, catch_all) = pattern("/:pathMatch(.*)*").match_path("/settings/security").expect("match");

        assert!(literal > param);
        assert!(param > nested_catch_all);
        assert!(nested_catch_all > catch_all);
    }

    #[test]
    fn display_round_trips() {
        for raw in ["/", "/index", "/settings/:section", "/:pathMatch(.*)*"] {
            assert_eq!(pattern(raw).to_string(), raw);
        }
    }

    #[test]
    fn join_child_paths() {
        assert_eq!(PathPattern::join("/settings", ":section"), "/settings/:section");
        assert_eq!(PathPattern::join("/settings/", ":section"), "/settings/:section");
        assert_eq!(PathPattern::join("/settings", ""), "/settings");
        assert_eq!(PathPattern::join("/settings", "/absolute"), "/absolute");
        assert_eq!(PathPattern::join("", "/index"), "/index");
        assert_eq!(PathPattern::join("", ""), "/");
    }
}
