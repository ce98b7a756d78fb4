use std::fmt::Write as _;
use std::path::Path;

use egui::{Pos2, Stroke, Vec2};

use crate::error::{AppError, Result};
use crate::links::RowOverlay;

/// A row overlay together with the canvas position of its row.
#[derive(Debug, Clone)]
pub struct PlacedOverlay {
    pub row_origin: Pos2,
    pub overlay: RowOverlay,
}

/// Render link overlays as a standalone SVG document.
///
/// Each link becomes a nested `<svg>` positioned like its overlay, holding a
/// single unfilled `<path>`.
pub fn render_svg(rows: &[PlacedOverlay], canvas: Vec2, stroke: Stroke) -> String {
    let [r, g, b, a] = stroke.color.to_srgba_unmultiplied();
    let color = format!("#{:02x}{:02x}{:02x}", r, g, b);
    let opacity = f32::from(a) / 255.0;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        canvas.x, canvas.y, canvas.x, canvas.y
    );
    for row in rows {
        for layout in &row.overlay.layouts {
            let min = row.row_origin + layout.overlay.min.to_vec2();
            let _ = writeln!(
                out,
                r#"  <svg x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" overflow="visible">"#,
                min.x,
                min.y,
                layout.overlay.width(),
                layout.overlay.height()
            );
            let _ = writeln!(
                out,
                r#"    <path d="{}" stroke="{}" stroke-opacity="{:.2}" stroke-width="{}" fill="none"/>"#,
                layout.connector.svg_path_data(),
                color,
                opacity,
                stroke.width
            );
            out.push_str("  </svg>\n");
        }
    }
    out.push_str("</svg>\n");
    out
}

/// Write the rendered overlays to `path`. Returns the number of links drawn.
pub fn export_svg(rows: &[PlacedOverlay], canvas: Vec2, stroke: Stroke, path: &Path) -> Result<usize> {
    let doc = render_svg(rows, canvas, stroke);
    std::fs::write(path, doc).map_err(|e| AppError::io(path, e))?;
    Ok(rows.iter().map(|r| r.overlay.layouts.len()).sum())
}
