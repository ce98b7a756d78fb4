use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut open = true;
    Window::new(RichText::new("About").strong().size(14.0))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new("Timeline Links").strong().size(16.0));
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(8.0);
            ui.label("Click an item, then a second item, to link them.");
            ui.label("Click empty canvas to cancel a pending selection.");
            ui.label("Drag the canvas to pan, Ctrl+Scroll to zoom.");
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Settings: {}", app.settings.path().display()))
                    .font(theme::font_small())
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(2.0);
        });

    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
