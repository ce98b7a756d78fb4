use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_ROW_EVEN: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 6);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);
pub const BG_STATUS: Color32 = Color32::from_rgb(20, 20, 28);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const NOW_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const PENDING_GLOW: Color32 = Color32::from_rgb(255, 193, 7);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 44.0;
pub const SIDEBAR_WIDTH: f32 = 150.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Item color palette ───────────────────────────────────────────────────────

pub const ITEM_COLORS: &[Color32] = &[
    Color32::from_rgb(66, 133, 244),  // Blue
    Color32::from_rgb(52, 168, 83),   // Green
    Color32::from_rgb(171, 71, 188),  // Purple
    Color32::from_rgb(251, 140, 0),   // Orange
    Color32::from_rgb(3, 169, 244),   // Light blue
    Color32::from_rgb(0, 188, 212),   // Cyan
];

/// Stable color for the `index`-th group.
pub fn group_color(index: usize) -> Color32 {
    ITEM_COLORS[index % ITEM_COLORS.len()]
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

/// Dark visuals where selection follows the pending-item glow and hover
/// outlines and hyperlinks take the connector colour.
pub fn timeline_visuals(link_color: Color32) -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_HEADER;
    visuals.extreme_bg_color = BG_STATUS;
    visuals.faint_bg_color = BG_ROW_EVEN;
    visuals.hyperlink_color = link_color;

    // (state, fill, outline, text)
    let rounding = Rounding::same(BAR_ROUNDING);
    let widgets = &mut visuals.widgets;
    for (state, fill, outline, text) in [
        (&mut widgets.noninteractive, BG_PANEL, BORDER_SUBTLE, TEXT_SECONDARY),
        (&mut widgets.inactive, BG_HEADER, BORDER_SUBTLE, TEXT_PRIMARY),
        (&mut widgets.hovered, GRID_LINE, link_color, TEXT_PRIMARY),
        (&mut widgets.active, GRID_LINE, PENDING_GLOW, Color32::WHITE),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, outline);
        state.fg_stroke = Stroke::new(1.0, text);
        state.rounding = rounding;
    }

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, PENDING_GLOW);
    visuals.window_rounding = Rounding::same(BAR_ROUNDING * 2.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals
}

pub fn apply_theme(ctx: &egui::Context, link_color: Color32) {
    ctx.set_visuals(timeline_visuals(link_color));
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visuals_follow_link_and_pending_colours() {
        let link = Color32::from_rgb(1, 2, 3);
        let visuals = timeline_visuals(link);
        assert_eq!(visuals.hyperlink_color, link);
        assert_eq!(visuals.widgets.hovered.bg_stroke.color, link);
        assert_eq!(visuals.widgets.active.bg_stroke.color, PENDING_GLOW);
        assert_eq!(visuals.selection.stroke.color, PENDING_GLOW);
    }

    #[test]
    fn group_colours_cycle() {
        assert_eq!(group_color(0), group_color(ITEM_COLORS.len()));
    }
}
