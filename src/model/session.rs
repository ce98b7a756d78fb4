use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{Group, GroupId, Item, ItemId};
use crate::links::LinkCollection;

/// A timeline session: rows, items, and the links drawn between items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub groups: Vec<Group>,
    pub items: Vec<Item>,
    #[serde(default)]
    pub links: LinkCollection,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            name: "Untitled Timeline".to_string(),
            groups: Vec::new(),
            items: Vec::new(),
            links: LinkCollection::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Session {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Item title for status messages, or a placeholder if it is gone.
    pub fn item_title(&self, id: ItemId) -> &str {
        self.item(id).map(|i| i.title.as_str()).unwrap_or("(missing item)")
    }

    /// Earliest start and latest end over all items.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.items.iter().map(|i| i.start).min()?;
        let end = self.items.iter().map(|i| i.end).max()?;
        Some((start, end))
    }
}
