use super::geometry::{route_link, LinkLayout, LinkMetrics, TimelineGeometry};
use super::link::LinkCollection;
use crate::model::{GroupId, Item};

/// All link drawings attributed to one row, stacked above its items.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOverlay {
    pub group: GroupId,
    pub layouts: Vec<LinkLayout>,
}

impl RowOverlay {
    /// Route every link whose start item lives in `group`.
    ///
    /// Links that cannot be drawn (other row, missing item, no geometry) are
    /// left out; the rest of the row still renders.
    pub fn build<G>(
        group: GroupId,
        links: &LinkCollection,
        items: &[Item],
        geometry: &G,
        metrics: LinkMetrics,
    ) -> Self
    where
        G: TimelineGeometry + ?Sized,
    {
        let layouts = links
            .iter()
            .filter_map(|link| route_link(link, group, items, geometry, metrics))
            .collect();
        Self { group, layouts }
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::geometry::tests::{at, StubGeometry};
    use crate::links::link::Link;
    use crate::model::item::Group;
    use crate::model::ItemId;

    #[test]
    fn each_link_lands_in_exactly_one_row() {
        let top = Group::new("top");
        let bottom = Group::new("bottom");
        let a = Item::new("a", top.id, at(0), at(2));
        let b = Item::new("b", bottom.id, at(3), at(5));
        let c = Item::new("c", top.id, at(6), at(8));

        let mut geometry = StubGeometry {
            canvas_width: 500.0,
            ..Default::default()
        };
        geometry.group_tops.insert(top.id, 0.0);
        geometry.group_tops.insert(bottom.id, 30.0);
        geometry.place(a.id, 0.0, 4.0, 40.0, 4.0);
        geometry.place(b.id, 60.0, 34.0, 40.0, 4.0);
        geometry.place(c.id, 120.0, 4.0, 40.0, 4.0);

        let mut links = LinkCollection::new();
        links.insert(Link::new(a.id, b.id));
        links.insert(Link::new(b.id, c.id));
        links.insert(Link::new(a.id, c.id));

        let items = vec![a.clone(), b.clone(), c.clone()];
        let metrics = LinkMetrics::default();
        let top_row = RowOverlay::build(top.id, &links, &items, &geometry, metrics);
        let bottom_row = RowOverlay::build(bottom.id, &links, &items, &geometry, metrics);

        let top_links: Vec<_> = top_row.layouts.iter().map(|l| l.link).collect();
        let bottom_links: Vec<_> = bottom_row.layouts.iter().map(|l| l.link).collect();
        assert_eq!(top_links, vec![Link::new(a.id, b.id), Link::new(a.id, c.id)]);
        assert_eq!(bottom_links, vec![Link::new(b.id, c.id)]);
    }

    #[test]
    fn dangling_link_does_not_hide_the_others() {
        let row = Group::new("row");
        let a = Item::new("a", row.id, at(0), at(2));
        let b = Item::new("b", row.id, at(3), at(5));
        let mut geometry = StubGeometry {
            canvas_width: 500.0,
            ..Default::default()
        };
        geometry.group_tops.insert(row.id, 0.0);
        geometry.place(a.id, 0.0, 0.0, 40.0, 0.0);
        geometry.place(b.id, 60.0, 0.0, 40.0, 0.0);

        let mut links = LinkCollection::new();
        links.insert(Link::new(ItemId::new(), b.id));
        links.insert(Link::new(a.id, b.id));

        let overlay = RowOverlay::build(row.id, &links, &[a, b], &geometry, LinkMetrics::default());
        assert_eq!(overlay.layouts.len(), 1);
    }
}
