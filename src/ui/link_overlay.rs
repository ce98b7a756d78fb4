use egui::{Painter, Pos2, Stroke};

use crate::links::RowOverlay;
use crate::model::ItemId;

/// Paint every connector of one row. `row_origin` is the row's top-left on
/// screen; links touching `highlight` are drawn heavier.
pub fn paint_row_overlay(
    painter: &Painter,
    row_origin: Pos2,
    overlay: &RowOverlay,
    stroke: Stroke,
    highlight: Option<ItemId>,
) {
    for layout in &overlay.layouts {
        let stroke = match highlight {
            Some(id) if layout.link.touches(id) => Stroke::new(stroke.width + 1.5, stroke.color),
            _ => stroke,
        };
        let offset = row_origin.to_vec2() + layout.overlay.min.to_vec2();
        painter.extend(layout.connector.to_shapes(offset, stroke));

        // Off-screen end: mark where the connector leaves the canvas.
        if !layout.end.visible {
            let tip = layout.connector.to() + offset;
            painter.circle_filled(tip, stroke.width + 1.0, stroke.color);
        }
    }
}
