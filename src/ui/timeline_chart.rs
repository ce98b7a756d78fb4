use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use egui::{pos2, vec2, Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::io::svg_export::PlacedOverlay;
use crate::links::{
    AbsoluteLocation, GroupDimensions, ItemDimensions, LinkMetrics, RowOverlay, TimelineGeometry,
};
use crate::model::{GroupId, ItemId, Session, TimelineScale, TimelineViewport};
use crate::settings::Settings;
use crate::ui::{link_overlay, theme};

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const SIDEBAR_WIDTH: f32 = theme::SIDEBAR_WIDTH;
const MIN_BAR_WIDTH: f32 = 3.0;

/// Vertical placement of one group row, in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPlacement {
    pub group: GroupId,
    pub index: usize,
    pub top: f32,
    pub height: f32,
}

/// Where an item ended up after stacking.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub group: GroupId,
    /// Offset of the bar inside its row.
    pub local_top: f32,
    /// Bar rectangle in canvas space; `None` outside the visible window.
    pub rect: Option<Rect>,
}

/// One frame's layout pass: rows, stacked items, and the canvas extent.
///
/// Canvas space starts at the top-left of the first row, right of the
/// sidebar and below the header.
#[derive(Debug, Clone, Default)]
pub struct ChartLayout {
    pub rows: Vec<RowPlacement>,
    pub items: HashMap<ItemId, ItemPlacement>,
    pub canvas_width: f32,
    pub total_height: f32,
}

impl ChartLayout {
    /// Stack every group's items into lanes and place them for `viewport`.
    ///
    /// An item takes the first lane whose previous item has ended by the
    /// time it starts. Rows are as tall as their lane count (at least one).
    pub fn compute(
        session: &Session,
        viewport: &TimelineViewport,
        canvas_width: f32,
        row_height: f32,
        item_height: f32,
    ) -> Self {
        let window_end = viewport.end(canvas_width);
        let bar_inset = ((row_height - item_height) / 2.0).max(0.0);

        let mut by_group: HashMap<GroupId, Vec<usize>> = HashMap::new();
        for (idx, item) in session.items.iter().enumerate() {
            by_group.entry(item.group).or_default().push(idx);
        }

        let mut layout = Self {
            canvas_width,
            ..Default::default()
        };
        let mut top = 0.0;
        for (index, group) in session.groups.iter().enumerate() {
            let mut members = by_group.remove(&group.id).unwrap_or_default();
            members.sort_by_key(|&idx| (session.items[idx].start, session.items[idx].end));

            let mut lanes: Vec<NaiveDateTime> = Vec::new();
            for idx in members {
                let item = &session.items[idx];
                let lane = match lanes.iter().position(|&end| end <= item.start) {
                    Some(lane) => {
                        lanes[lane] = item.end;
                        lane
                    }
                    None => {
                        lanes.push(item.end);
                        lanes.len() - 1
                    }
                };

                let local_top = lane as f32 * row_height + bar_inset;
                let rect = item.overlaps(viewport.start, window_end).then(|| {
                    let left = viewport.time_to_x(item.start);
                    let right = viewport.time_to_x(item.end);
                    Rect::from_min_size(
                        pos2(left, top + local_top),
                        vec2(right - left, item_height),
                    )
                });
                layout.items.insert(
                    item.id,
                    ItemPlacement {
                        group: group.id,
                        local_top,
                        rect,
                    },
                );
            }

            let height = lanes.len().max(1) as f32 * row_height;
            layout.rows.push(RowPlacement {
                group: group.id,
                index,
                top,
                height,
            });
            top += height;
        }
        layout.total_height = top;
        layout
    }

    pub fn row(&self, group: GroupId) -> Option<&RowPlacement> {
        self.rows.iter().find(|r| r.group == group)
    }

    /// Link overlays for every row, positioned in canvas space.
    pub fn overlays(&self, session: &Session, metrics: LinkMetrics) -> Vec<PlacedOverlay> {
        self.rows
            .iter()
            .map(|row| PlacedOverlay {
                row_origin: pos2(0.0, row.top),
                overlay: RowOverlay::build(row.group, &session.links, &session.items, self, metrics),
            })
            .filter(|placed| !placed.overlay.is_empty())
            .collect()
    }
}

impl TimelineGeometry for ChartLayout {
    fn absolute_location(&self, item: ItemId) -> Option<AbsoluteLocation> {
        let rect = self.items.get(&item)?.rect?;
        Some(AbsoluteLocation {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
        })
    }

    fn item_dimensions(&self, item: ItemId) -> Option<ItemDimensions> {
        self.items
            .get(&item)
            .map(|placement| ItemDimensions {
                top: placement.local_top,
            })
    }

    fn group_dimensions(&self, group: GroupId) -> Option<GroupDimensions> {
        self.row(group).map(|row| GroupDimensions { top: row.top })
    }

    fn canvas_width(&self) -> f32 {
        self.canvas_width
    }
}

/// Result details from interactions in the timeline chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub selected_item: Option<ItemId>,
    pub canvas_clicked: bool,
    /// Overlays drawn this frame, in canvas space.
    pub overlays: Vec<PlacedOverlay>,
    pub canvas_size: Vec2,
}

/// Render the timeline: header, group sidebar, item bars, then link overlays.
pub fn show_timeline_chart(
    session: &Session,
    viewport: &mut TimelineViewport,
    pending: Option<ItemId>,
    settings: &Settings,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let canvas_width = (available.x - SIDEBAR_WIDTH).max(1.0);
    let row_height = settings.clamped_row_height();

    let layout = ChartLayout::compute(
        session,
        viewport,
        canvas_width,
        row_height,
        settings.item_height(),
    );

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let chart_height = (HEADER_HEIGHT + layout.total_height).max(available.y);
            let (response, painter) = ui.allocate_painter(
                Vec2::new(available.x, chart_height),
                Sense::click_and_drag(),
            );
            let origin = response.rect.min;
            let canvas_origin = origin + vec2(SIDEBAR_WIDTH, HEADER_HEIGHT);
            let canvas_rect = Rect::from_min_max(
                pos2(canvas_origin.x, origin.y),
                response.rect.max,
            );
            let canvas_painter = painter.with_clip_rect(canvas_rect.intersect(painter.clip_rect()));
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            // Row backgrounds and sidebar labels
            for row in &layout.rows {
                let y = canvas_origin.y + row.top;
                let row_bg = if row.index % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(
                    Rect::from_min_size(pos2(origin.x, y), vec2(available.x, row.height)),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        pos2(origin.x, y + row.height),
                        pos2(origin.x + available.x, y + row.height),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
                if let Some(group) = session.group(row.group) {
                    painter.text(
                        pos2(origin.x + 8.0, y + row_height / 2.0),
                        Align2::LEFT_CENTER,
                        &group.title,
                        theme::font_bar(),
                        theme::TEXT_PRIMARY,
                    );
                    if !group.right_title.is_empty() {
                        painter.text(
                            pos2(canvas_origin.x - 8.0, y + row_height / 2.0),
                            Align2::RIGHT_CENTER,
                            &group.right_title,
                            theme::font_small(),
                            theme::TEXT_DIM,
                        );
                    }
                }
            }

            painter.line_segment(
                [
                    pos2(canvas_origin.x, origin.y),
                    pos2(canvas_origin.x, origin.y + chart_height),
                ],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );

            draw_timeline_header(&canvas_painter, pos2(canvas_origin.x, origin.y), viewport, canvas_width, chart_height);
            draw_now_line(&canvas_painter, pos2(canvas_origin.x, origin.y), viewport, chart_height);

            // Item bars
            for item in &session.items {
                let Some(placement) = layout.items.get(&item.id) else {
                    continue;
                };
                let Some(rect) = placement.rect else {
                    continue;
                };
                let color = layout
                    .row(placement.group)
                    .map(|row| theme::group_color(row.index))
                    .unwrap_or(theme::ACCENT);
                let bar_rect = draw_item_bar(
                    &canvas_painter,
                    rect.translate(canvas_origin.to_vec2()),
                    &item.title,
                    color,
                    pending == Some(item.id),
                );

                let visible_bar = bar_rect.intersect(canvas_rect);
                if !visible_bar.is_positive() {
                    continue;
                }
                let bar_response = ui
                    .interact(
                        visible_bar,
                        ui.make_persistent_id(("timeline-item", item.id)),
                        Sense::click(),
                    )
                    .on_hover_ui(|ui| {
                        ui.strong(&item.title);
                        ui.label(format!(
                            "{} → {}",
                            item.start.format("%d/%m %H:%M"),
                            item.end.format("%d/%m %H:%M"),
                        ));
                    });
                if bar_response.clicked() {
                    interaction.selected_item = Some(item.id);
                    consumed_click = true;
                }
                if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }

            // Link overlays, above every row's items
            let overlays = layout.overlays(session, settings.link_metrics());
            for placed in &overlays {
                link_overlay::paint_row_overlay(
                    &canvas_painter,
                    canvas_origin + placed.row_origin.to_vec2(),
                    &placed.overlay,
                    settings.link_stroke(),
                    pending,
                );
            }
            interaction.overlays = overlays;
            interaction.canvas_size = vec2(canvas_width, layout.total_height);

            // Pan by dragging empty canvas, zoom with Ctrl+scroll / pinch
            if response.dragged() {
                viewport.pan_pixels(-response.drag_delta().x);
            }
            if response.hovered() {
                let (zoom, scroll_x) = ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta.x));
                let anchor_x = ui
                    .input(|i| i.pointer.hover_pos())
                    .map(|p| p.x - canvas_origin.x)
                    .unwrap_or(canvas_width / 2.0);
                if zoom != 1.0 {
                    viewport.zoom_by(zoom, anchor_x);
                }
                if scroll_x != 0.0 {
                    viewport.pan_pixels(-scroll_x);
                }
            }

            // Empty click on background drops the pending selection
            if response.clicked() && !consumed_click {
                interaction.canvas_clicked = true;
            }
        });

    interaction
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            pos2(origin.x, origin.y + HEADER_HEIGHT),
            pos2(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let end = viewport.end(width);
    let day_start = |t: NaiveDateTime| t.date().and_hms_opt(0, 0, 0).unwrap_or(t);

    match viewport.scale {
        TimelineScale::Hours => {
            // Keep hour labels at least ~40px apart.
            let step = [1, 2, 3, 6, 12, 24]
                .into_iter()
                .find(|h| *h as f32 * viewport.pixels_per_hour >= 40.0)
                .unwrap_or(24);
            let mut time = day_start(viewport.start);
            while time <= end {
                let x = origin.x + viewport.time_to_x(time);
                let is_midnight = time.hour() == 0;
                painter.line_segment(
                    [pos2(x, origin.y + HEADER_HEIGHT), pos2(x, origin.y + height)],
                    Stroke::new(if is_midnight { 1.0 } else { 0.5 }, theme::GRID_LINE),
                );
                painter.text(
                    pos2(x + 3.0, origin.y + 30.0),
                    Align2::LEFT_CENTER,
                    time.format("%H:%M").to_string(),
                    theme::font_sub(),
                    theme::TEXT_SECONDARY,
                );
                if is_midnight {
                    painter.text(
                        pos2(x + 3.0, origin.y + 12.0),
                        Align2::LEFT_CENTER,
                        time.format("%a %d %b").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
                time += Duration::hours(step);
            }
        }
        TimelineScale::Days => {
            let mut time = day_start(viewport.start);
            while time <= end {
                let x = origin.x + viewport.time_to_x(time);
                painter.line_segment(
                    [pos2(x, origin.y + HEADER_HEIGHT), pos2(x, origin.y + height)],
                    Stroke::new(0.5, theme::GRID_LINE),
                );
                let is_weekend = time.weekday().num_days_from_monday() >= 5;
                painter.text(
                    pos2(x + 3.0, origin.y + 30.0),
                    Align2::LEFT_CENTER,
                    time.format("%d").to_string(),
                    theme::font_sub(),
                    if is_weekend {
                        theme::TEXT_DIM
                    } else {
                        theme::TEXT_SECONDARY
                    },
                );
                if time.day() == 1 || time == day_start(viewport.start) {
                    painter.text(
                        pos2(x + 3.0, origin.y + 12.0),
                        Align2::LEFT_CENTER,
                        time.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
                time += Duration::days(1);
            }
        }
    }
}

fn draw_now_line(painter: &egui::Painter, origin: Pos2, viewport: &TimelineViewport, height: f32) {
    let now = chrono::Local::now().naive_local();
    let x = origin.x + viewport.time_to_x(now);
    painter.line_segment(
        [pos2(x, origin.y + HEADER_HEIGHT), pos2(x, origin.y + height)],
        Stroke::new(1.5, theme::NOW_LINE),
    );
}

fn draw_item_bar(
    painter: &egui::Painter,
    rect: Rect,
    title: &str,
    color: Color32,
    is_pending: bool,
) -> Rect {
    let bar_rect = Rect::from_min_size(rect.min, vec2(rect.width().max(MIN_BAR_WIDTH), rect.height()));
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(vec2(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, color);

    if is_pending {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::PENDING_GLOW),
        );
    }

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(title.to_string(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect.intersect(painter.clip_rect())).galley(
            pos2(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::geometry::tests::at;
    use crate::links::geometry::route_link;
    use crate::links::link::Link;
    use crate::model::item::Group;
    use crate::model::Item;

    const ROW: f32 = 30.0;
    const BAR: f32 = 22.0;

    fn session() -> (Session, Vec<ItemId>) {
        let upper = Group::new("upper");
        let lower = Group::new("lower");
        let items = vec![
            Item::new("u1", upper.id, at(1), at(3)),
            Item::new("u2", upper.id, at(2), at(4)),
            Item::new("u3", upper.id, at(3), at(5)),
            Item::new("l1", lower.id, at(6), at(7)),
            Item::new("l-late", lower.id, at(20), at(22)),
        ];
        let ids = items.iter().map(|i| i.id).collect();
        let mut session = Session::new("chart");
        session.groups = vec![upper, lower];
        session.items = items;
        (session, ids)
    }

    fn layout(session: &Session) -> ChartLayout {
        // 10 px per hour, 120 px wide: window is 00:00..12:00.
        let viewport = TimelineViewport::new(at(0), 10.0);
        ChartLayout::compute(session, &viewport, 120.0, ROW, BAR)
    }

    #[test]
    fn overlapping_items_stack_into_lanes() {
        let (session, ids) = session();
        let layout = layout(&session);

        let inset = (ROW - BAR) / 2.0;
        assert_eq!(layout.items[&ids[0]].local_top, inset);
        assert_eq!(layout.items[&ids[1]].local_top, ROW + inset);
        // u3 starts exactly when u1 ends and reuses its lane.
        assert_eq!(layout.items[&ids[2]].local_top, inset);

        assert_eq!(layout.rows[0].height, 2.0 * ROW);
        assert_eq!(layout.rows[1].top, 2.0 * ROW);
        // l-late starts after l1 has ended, so the lower row keeps one lane.
        assert_eq!(layout.rows[1].height, ROW);
        assert_eq!(layout.total_height, 3.0 * ROW);
    }

    #[test]
    fn items_outside_window_have_no_location() {
        let (session, ids) = session();
        let layout = layout(&session);

        let visible = layout.absolute_location(ids[3]).unwrap();
        assert_eq!(visible.left, 60.0);
        assert_eq!(visible.width, 10.0);
        assert_eq!(visible.top, 2.0 * ROW + (ROW - BAR) / 2.0);

        assert!(layout.absolute_location(ids[4]).is_none());
        assert!(layout.item_dimensions(ids[4]).is_some());
        assert_eq!(layout.group_dimensions(session.groups[1].id).map(|g| g.top), Some(2.0 * ROW));
        assert_eq!(layout.canvas_width(), 120.0);
    }

    #[test]
    fn link_to_off_screen_item_ends_at_canvas_edge() {
        let (mut session, ids) = session();
        session.links.insert(Link::new(ids[0], ids[4]));
        let layout = layout(&session);

        let routed = route_link(
            &Link::new(ids[0], ids[4]),
            session.groups[0].id,
            &session.items,
            &layout,
            LinkMetrics::default(),
        )
        .unwrap();
        assert_eq!(routed.end.point, pos2(120.0, 2.0 * ROW));

        let overlays = layout.overlays(&session, LinkMetrics::default());
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].row_origin, pos2(0.0, 0.0));
    }

    #[test]
    fn items_of_unknown_groups_are_not_placed() {
        let (mut session, _) = session();
        let stray = Item::new("stray", GroupId::new(), at(1), at(2));
        let stray_id = stray.id;
        session.items.push(stray);
        let layout = layout(&session);
        assert!(!layout.items.contains_key(&stray_id));
    }
}
