//! Two-click link creation.
//!
//! The first selected item is held as pending state; the second selection
//! completes the pair. The state is a plain value that callers thread through
//! each event, so the host owns it and tests can drive it directly.

use tracing::debug;

use super::link::{ordered_link, Link, LinkCollection};
use crate::model::{Item, ItemId};

/// Where the selection gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionGesture {
    #[default]
    Idle,
    Pending(ItemId),
}

/// What a selection event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The item is now the pending first endpoint.
    Started(ItemId),
    /// The pending item was selected again; the gesture stays open.
    Reselected(ItemId),
    /// The pair is already linked; nothing was added.
    AlreadyLinked,
    /// One of the two items is not in the item collection.
    UnknownItem(ItemId),
    /// A new link was appended.
    Linked(Link),
}

impl SelectionGesture {
    pub fn pending(self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Pending(id) => Some(id),
        }
    }

    /// Feed an item selection into the gesture.
    ///
    /// Returns the next state together with what happened. `links` is only
    /// touched when a new pair completes.
    pub fn select(
        self,
        id: ItemId,
        items: &[Item],
        links: &mut LinkCollection,
    ) -> (Self, GestureOutcome) {
        let first_id = match self {
            Self::Idle => {
                debug!(item = %id, "link gesture started");
                return (Self::Pending(id), GestureOutcome::Started(id));
            }
            Self::Pending(first_id) => first_id,
        };

        if first_id == id {
            return (self, GestureOutcome::Reselected(id));
        }

        if links.contains_pair(first_id, id) {
            debug!(first = %first_id, second = %id, "pair already linked");
            return (Self::Idle, GestureOutcome::AlreadyLinked);
        }

        let Some(first) = items.iter().find(|i| i.id == first_id) else {
            return (Self::Idle, GestureOutcome::UnknownItem(first_id));
        };
        let Some(second) = items.iter().find(|i| i.id == id) else {
            return (Self::Idle, GestureOutcome::UnknownItem(id));
        };

        let link = ordered_link(first, second);
        links.insert(link);
        debug!(start = %link.start, end = %link.end, "link created");
        (Self::Idle, GestureOutcome::Linked(link))
    }

    /// A click on empty canvas drops any pending selection.
    pub fn canvas_click(self) -> Self {
        if let Self::Pending(id) = self {
            debug!(item = %id, "link gesture cancelled");
        }
        Self::Idle
    }
}
