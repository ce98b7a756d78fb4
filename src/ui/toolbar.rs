use crate::app::TimelineApp;
use crate::model::TimelineScale;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{} New Demo Timeline", icons::SPARKLE)).clicked() {
                app.new_demo_session();
                ui.close_menu();
            }
            if ui.button(format!("{} Open...", icons::FOLDER_OPEN)).clicked() {
                app.open_session();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{} Save          Ctrl+S", icons::FLOPPY_DISK)).clicked() {
                app.save_session();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_session_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{} Export Links CSV...", icons::TABLE)).clicked() {
                app.export_links_csv();
                ui.close_menu();
            }
            if ui.button(format!("{} Export Links SVG...", icons::BEZIER_CURVE)).clicked() {
                app.export_links_svg();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let width = app.last_canvas_width;
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.viewport.zoom_in(width / 2.0);
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.viewport.zoom_out(width / 2.0);
                ui.close_menu();
            }
            if ui.button(format!("{} Go to Now", icons::CROSSHAIR)).clicked() {
                app.viewport
                    .center_on(chrono::Local::now().naive_local(), width);
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            if ui
                .radio_value(&mut app.viewport.scale, TimelineScale::Hours, "Hours")
                .clicked()
            {
                ui.close_menu();
            }
            if ui
                .radio_value(&mut app.viewport.scale, TimelineScale::Days, "Days")
                .clicked()
            {
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{} Open Settings Folder", icons::GEAR)).clicked() {
                let dir = app.settings.dir().to_path_buf();
                if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
                    app.status_message = format!("Could not open {}: {}", dir.display(), e);
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.session.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
