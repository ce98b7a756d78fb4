//! Anchor resolution and overlay placement for a single link.
//!
//! All positions handed in through [`TimelineGeometry`] are in canvas space
//! (x from the left edge of the visible window, y from the top of the first
//! row). The resulting [`LinkLayout::overlay`] is expressed relative to the
//! row that owns the link, and the connector relative to the overlay.

use egui::{pos2, vec2, Pos2, Rect};
use tracing::trace;

use super::link::Link;
use super::path::Connector;
use crate::model::{GroupId, Item, ItemId};

/// On-screen rectangle of a laid-out item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteLocation {
    pub left: f32,
    pub top: f32,
    pub width: f32,
}

/// Vertical offset of an item inside its row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDimensions {
    pub top: f32,
}

/// Vertical offset of a row on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDimensions {
    pub top: f32,
}

/// Geometry lookups supplied by the timeline host after its layout pass.
pub trait TimelineGeometry {
    /// `None` when the item is not rendered in the visible window.
    fn absolute_location(&self, item: ItemId) -> Option<AbsoluteLocation>;
    fn item_dimensions(&self, item: ItemId) -> Option<ItemDimensions>;
    fn group_dimensions(&self, group: GroupId) -> Option<GroupDimensions>;
    fn canvas_width(&self) -> f32;
}

/// Sizes the router needs from the host's item chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkMetrics {
    /// Height of a standard item bar; paths enter and leave at half of it.
    pub item_height: f32,
    /// Smallest width/height an overlay may collapse to.
    pub min_size: f32,
}

impl Default for LinkMetrics {
    fn default() -> Self {
        Self {
            item_height: 22.5,
            min_size: 2.0,
        }
    }
}

/// Where a connector leaves its start item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartAnchor {
    /// Trailing edge of the item, or `(0, group top)` when off-screen.
    pub point: Pos2,
    /// Leading edge of the item; the overlay's left edge.
    pub origin_x: f32,
    /// Distance from `origin_x` to `point.x`.
    pub trailing_offset: f32,
    /// Item offset inside its row, 0 when off-screen.
    pub local_top: f32,
    pub visible: bool,
}

/// Where a connector arrives at its end item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndAnchor {
    /// Leading edge of the item, or `(canvas width, group top)` when off-screen.
    pub point: Pos2,
    pub visible: bool,
}

pub fn resolve_start_anchor<G>(item: &Item, geometry: &G) -> Option<StartAnchor>
where
    G: TimelineGeometry + ?Sized,
{
    match geometry.absolute_location(item.id) {
        Some(loc) => {
            let local_top = geometry.item_dimensions(item.id)?.top;
            Some(StartAnchor {
                point: pos2(loc.left + loc.width, loc.top),
                origin_x: loc.left,
                trailing_offset: loc.width,
                local_top,
                visible: true,
            })
        }
        None => {
            let group = geometry.group_dimensions(item.group)?;
            Some(StartAnchor {
                point: pos2(0.0, group.top),
                origin_x: 0.0,
                trailing_offset: 0.0,
                local_top: 0.0,
                visible: false,
            })
        }
    }
}

pub fn resolve_end_anchor<G>(item: &Item, geometry: &G) -> Option<EndAnchor>
where
    G: TimelineGeometry + ?Sized,
{
    match geometry.absolute_location(item.id) {
        Some(loc) => Some(EndAnchor {
            point: pos2(loc.left, loc.top),
            visible: true,
        }),
        None => {
            let group = geometry.group_dimensions(item.group)?;
            Some(EndAnchor {
                point: pos2(geometry.canvas_width(), group.top),
                visible: false,
            })
        }
    }
}

/// Everything needed to draw one link inside its row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkLayout {
    pub link: Link,
    pub start: StartAnchor,
    pub end: EndAnchor,
    /// `end.y - start.y < 0`. Decides which overlay corner each endpoint
    /// sits in and whether the overlay is shifted up.
    pub is_end_below_start: bool,
    /// Drawing surface, relative to the owning row.
    pub overlay: Rect,
    /// Curve, relative to `overlay.min`.
    pub connector: Connector,
}

/// Lay out `link` for the row of `row_group`.
///
/// Returns `None` when the link belongs to another row, when either endpoint
/// is missing from `items`, or when the host has no geometry for it.
pub fn route_link<G>(
    link: &Link,
    row_group: GroupId,
    items: &[Item],
    geometry: &G,
    metrics: LinkMetrics,
) -> Option<LinkLayout>
where
    G: TimelineGeometry + ?Sized,
{
    let Some(start_item) = items.iter().find(|i| i.id == link.start) else {
        trace!(item = %link.start, "link start item missing, skipped");
        return None;
    };
    if start_item.group != row_group {
        return None;
    }
    let Some(end_item) = items.iter().find(|i| i.id == link.end) else {
        trace!(item = %link.end, "link end item missing, skipped");
        return None;
    };

    let start = resolve_start_anchor(start_item, geometry)?;
    let end = resolve_end_anchor(end_item, geometry)?;

    let delta_y = end.point.y - start.point.y;
    let is_end_below_start = delta_y < 0.0;
    let span_y = delta_y.abs();
    let span_x = end.point.x - start.origin_x;

    let half_item = metrics.item_height / 2.0;
    let (from_y, to_y) = if is_end_below_start {
        (span_y, 0.0)
    } else {
        (0.0, span_y)
    };
    let from = pos2(start.trailing_offset, from_y + half_item);
    let to = pos2(span_x, to_y + half_item);

    let top = if is_end_below_start {
        delta_y + start.local_top
    } else {
        start.local_top
    };
    let width = span_x.max(start.trailing_offset).max(metrics.min_size);
    let height = span_y.max(metrics.min_size);
    let overlay = Rect::from_min_size(pos2(start.origin_x, top), vec2(width, height));

    Some(LinkLayout {
        link: *link,
        start,
        end,
        is_end_below_start,
        overlay,
        connector: Connector::between(from, to),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::item::Group;
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;
    use std::collections::HashMap;

    /// Hand-filled geometry table standing in for a host layout pass.
    #[derive(Default)]
    pub(crate) struct StubGeometry {
        pub locations: HashMap<ItemId, AbsoluteLocation>,
        pub item_tops: HashMap<ItemId, f32>,
        pub group_tops: HashMap<GroupId, f32>,
        pub canvas_width: f32,
    }

    impl StubGeometry {
        pub(crate) fn place(&mut self, id: ItemId, left: f32, top: f32, width: f32, local_top: f32) {
            self.locations.insert(id, AbsoluteLocation { left, top, width });
            self.item_tops.insert(id, local_top);
        }
    }

    impl TimelineGeometry for StubGeometry {
        fn absolute_location(&self, item: ItemId) -> Option<AbsoluteLocation> {
            self.locations.get(&item).copied()
        }

        fn item_dimensions(&self, item: ItemId) -> Option<ItemDimensions> {
            self.item_tops.get(&item).map(|&top| ItemDimensions { top })
        }

        fn group_dimensions(&self, group: GroupId) -> Option<GroupDimensions> {
            self.group_tops.get(&group).map(|&top| GroupDimensions { top })
        }

        fn canvas_width(&self) -> f32 {
            self.canvas_width
        }
    }

    pub(crate) fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    const METRICS: LinkMetrics = LinkMetrics {
        item_height: 20.0,
        min_size: 2.0,
    };

    struct Fixture {
        group: Group,
        a: Item,
        b: Item,
        geometry: StubGeometry,
    }

    /// A(0..10) at {0, 0, 50} and B(20..30) at {200, 0, 50}, both in one row.
    fn fixture() -> Fixture {
        let group = Group::new("row");
        let a = Item::new("A", group.id, at(0), at(10));
        let b = Item::new("B", group.id, at(20), at(23));
        let mut geometry = StubGeometry {
            canvas_width: 800.0,
            ..Default::default()
        };
        geometry.group_tops.insert(group.id, 0.0);
        geometry.place(a.id, 0.0, 0.0, 50.0, 0.0);
        geometry.place(b.id, 200.0, 0.0, 50.0, 0.0);
        Fixture {
            group,
            a,
            b,
            geometry,
        }
    }

    fn items(f: &Fixture) -> Vec<Item> {
        vec![f.a.clone(), f.b.clone()]
    }

    #[test]
    fn visible_pair_routes_trailing_edge_to_leading_edge() {
        let f = fixture();
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert_eq!(layout.start.point, pos2(50.0, 0.0));
        assert_eq!(layout.end.point, pos2(200.0, 0.0));
        assert!(matches!(layout.connector, Connector::Smooth { .. }));
        assert!(layout.overlay.width() >= 150.0);

        // Path endpoints land on the anchors once shifted back to canvas space.
        let origin = layout.overlay.min;
        assert_eq!(origin.x + layout.connector.from().x, layout.start.point.x);
        assert_eq!(origin.x + layout.connector.to().x, layout.end.point.x);
        assert_eq!(layout.connector.from().y, METRICS.item_height / 2.0);
        assert_eq!(layout.connector.to().y, METRICS.item_height / 2.0);
    }

    #[test]
    fn end_scrolled_off_right_clamps_to_canvas_width() {
        let mut f = fixture();
        f.geometry.locations.remove(&f.b.id);
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert!(!layout.end.visible);
        assert_eq!(layout.end.point, pos2(800.0, 0.0));
        assert_eq!(layout.overlay.width(), 800.0);
    }

    #[test]
    fn start_scrolled_off_left_anchors_at_row_origin() {
        let mut f = fixture();
        f.geometry.group_tops.insert(f.group.id, 64.0);
        f.geometry.locations.remove(&f.a.id);
        f.geometry.place(f.b.id, 200.0, 64.0, 50.0, 0.0);
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert!(!layout.start.visible);
        assert_eq!(layout.start.point, pos2(0.0, 64.0));
        assert_eq!(layout.start.trailing_offset, 0.0);
        assert_eq!(layout.start.local_top, 0.0);
        assert_eq!(layout.overlay.min, pos2(0.0, 0.0));
        assert_eq!(layout.connector.from().x, 0.0);
    }

    #[test]
    fn link_is_drawn_only_in_start_items_row() {
        let mut f = fixture();
        let other = Group::new("other");
        f.b.group = other.id;
        f.geometry.group_tops.insert(other.id, 40.0);
        let link = Link::new(f.a.id, f.b.id);

        assert!(route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).is_some());
        assert!(route_link(&link, other.id, &items(&f), &f.geometry, METRICS).is_none());
    }

    #[rstest]
    #[case::start_missing(true, false)]
    #[case::end_missing(false, true)]
    fn missing_endpoint_is_skipped(#[case] drop_start: bool, #[case] drop_end: bool) {
        let f = fixture();
        let items: Vec<Item> = items(&f)
            .into_iter()
            .filter(|i| !(drop_start && i.id == f.a.id) && !(drop_end && i.id == f.b.id))
            .collect();
        let link = Link::new(f.a.id, f.b.id);
        assert!(route_link(&link, f.group.id, &items, &f.geometry, METRICS).is_none());
    }

    #[test]
    fn end_lower_on_screen_grows_downward() {
        let mut f = fixture();
        f.geometry.place(f.b.id, 200.0, 90.0, 50.0, 4.0);
        f.geometry.place(f.a.id, 0.0, 10.0, 50.0, 10.0);
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert!(!layout.is_end_below_start);
        assert_eq!(layout.overlay.min.y, 10.0);
        assert_eq!(layout.overlay.height(), 80.0);
        assert_eq!(layout.connector.from(), pos2(50.0, 10.0));
        assert_eq!(layout.connector.to(), pos2(200.0, 90.0));
    }

    #[test]
    fn negative_delta_mirrors_endpoints_and_lifts_overlay() {
        let mut f = fixture();
        f.geometry.place(f.a.id, 0.0, 100.0, 50.0, 6.0);
        f.geometry.place(f.b.id, 200.0, 40.0, 50.0, 0.0);
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert!(layout.is_end_below_start);
        assert_eq!(layout.overlay.min.y, -60.0 + 6.0);
        assert_eq!(layout.overlay.height(), 60.0);
        assert_eq!(layout.connector.from(), pos2(50.0, 70.0));
        assert_eq!(layout.connector.to(), pos2(200.0, 10.0));
    }

    #[test]
    fn overlapping_items_use_stepped_route_and_keep_start_width() {
        let mut f = fixture();
        f.geometry.place(f.a.id, 100.0, 0.0, 120.0, 0.0);
        f.geometry.place(f.b.id, 150.0, 30.0, 50.0, 0.0);
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert!(matches!(layout.connector, Connector::Stepped { .. }));
        assert_eq!(layout.connector.control_points().len(), 4);
        assert_eq!(layout.overlay.width(), 120.0);
    }

    #[test]
    fn coincident_anchors_keep_minimum_overlay() {
        let mut f = fixture();
        f.geometry.place(f.a.id, 0.0, 0.0, 0.0, 0.0);
        f.geometry.place(f.b.id, 0.0, 0.0, 0.0, 0.0);
        let link = Link::new(f.a.id, f.b.id);
        let layout = route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).unwrap();

        assert_eq!(layout.overlay.width(), METRICS.min_size);
        assert_eq!(layout.overlay.height(), METRICS.min_size);
    }

    #[test]
    fn unknown_group_geometry_skips_off_screen_endpoint() {
        let mut f = fixture();
        f.geometry.group_tops.clear();
        f.geometry.locations.remove(&f.b.id);
        let link = Link::new(f.a.id, f.b.id);
        assert!(route_link(&link, f.group.id, &items(&f), &f.geometry, METRICS).is_none());
    }
}
