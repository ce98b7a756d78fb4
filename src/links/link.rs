use serde::{Deserialize, Serialize};

use crate::model::{Item, ItemId};

/// A connector from the end of `start` toward the beginning of `end`.
///
/// `start` is always the chronologically earlier item at the time the link
/// was created (see [`ordered_link`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub start: ItemId,
    pub end: ItemId,
}

impl Link {
    pub fn new(start: ItemId, end: ItemId) -> Self {
        Self { start, end }
    }

    /// True if this link joins `a` and `b`, in either direction.
    pub fn connects(&self, a: ItemId, b: ItemId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    pub fn touches(&self, id: ItemId) -> bool {
        self.start == id || self.end == id
    }
}

/// Order two selected items into a link by start time.
///
/// The item that starts strictly earlier comes first; on a tie the selection
/// order is kept.
pub fn ordered_link(first: &Item, second: &Item) -> Link {
    if second.start < first.start {
        Link::new(second.id, first.id)
    } else {
        Link::new(first.id, second.id)
    }
}

/// Session-wide list of links, deduplicated by unordered endpoint pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkCollection {
    links: Vec<Link>,
}

impl LinkCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_pair(&self, a: ItemId, b: ItemId) -> bool {
        self.links.iter().any(|l| l.connects(a, b))
    }

    /// Append `link` unless its endpoints are already connected.
    /// Returns whether the collection changed.
    pub fn insert(&mut self, link: Link) -> bool {
        if self.contains_pair(link.start, link.end) {
            return false;
        }
        self.links.push(link);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkCollection {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
