pub mod geometry;
pub mod gesture;
pub mod link;
pub mod overlay;
pub mod path;

pub use geometry::{AbsoluteLocation, GroupDimensions, ItemDimensions, LinkMetrics, TimelineGeometry};
pub use gesture::{GestureOutcome, SelectionGesture};
pub use link::LinkCollection;
pub use overlay::RowOverlay;
