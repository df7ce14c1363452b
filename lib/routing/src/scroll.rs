//! Where the page scrolls after a transition.

use crate::location::Location;
use serde::{Deserialize, Serialize};

/// A saved scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

/// Scroll instruction produced by a navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    /// Scroll the element with this id into view.
    Element { id: String, smooth: bool },
    /// Restore a saved offset.
    Position(ScrollPosition),
}

impl ScrollTarget {
    /// Top of the page.
    #[must_use]
    pub fn top() -> Self {
        Self::Position(ScrollPosition::default())
    }

    /// Picks the scroll target for arriving at `to`: its hash first, then the
    /// saved position from history, then the top of the page.
    #[must_use]
    pub fn for_arrival(to: &Location, saved: Option<ScrollPosition>) -> Self {
        if let Some(id) = to.hash() {
            return Self::Element {
                id: id.to_string(),
                smooth: true,
            };
        }
        saved.map_or_else(Self::top, Self::Position)
    }
}
