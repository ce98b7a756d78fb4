pub mod demo;
pub mod item;
pub mod session;
pub mod timeline;

pub use item::{GroupId, Item, ItemId};
pub use session::Session;
pub use timeline::{TimelineScale, TimelineViewport};
