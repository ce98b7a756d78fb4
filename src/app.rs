use std::path::PathBuf;

use egui::Vec2;
use tracing::{info, warn};

use crate::io::svg_export::PlacedOverlay;
use crate::links::{GestureOutcome, SelectionGesture};
use crate::model::demo::generate_demo_session;
use crate::model::{ItemId, Session, TimelineViewport};
use crate::settings::SettingsStore;
use crate::ui;

/// Main application state.
pub struct TimelineApp {
    pub session: Session,
    pub viewport: TimelineViewport,
    pub file_path: Option<PathBuf>,
    pub settings: SettingsStore,

    /// Two-click link gesture; owned here, threaded through each selection.
    pub gesture: SelectionGesture,

    pub show_about: bool,
    pub status_message: String,

    // Geometry of the last rendered frame, for exports and toolbar actions
    pub last_overlays: Vec<PlacedOverlay>,
    pub last_canvas_size: Vec2,
    pub last_canvas_width: f32,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = SettingsStore::load();
        let now = chrono::Local::now().naive_local();
        let session = generate_demo_session(settings.settings.demo_params(), now);
        let viewport = TimelineViewport::new(
            now - chrono::Duration::hours(12),
            settings.settings.pixels_per_hour,
        );
        info!(
            groups = session.groups.len(),
            items = session.items.len(),
            "demo timeline generated"
        );

        Self {
            session,
            viewport,
            file_path: None,
            settings,
            gesture: SelectionGesture::Idle,
            show_about: false,
            status_message: "Click two items to link them".to_string(),
            last_overlays: Vec::new(),
            last_canvas_size: Vec2::ZERO,
            last_canvas_width: 800.0,
        }
    }

    // --- Session operations ---

    pub fn new_demo_session(&mut self) {
        let now = chrono::Local::now().naive_local();
        self.session = generate_demo_session(self.settings.settings.demo_params(), now);
        self.file_path = None;
        self.gesture = SelectionGesture::Idle;
        self.viewport.center_on(now, self.last_canvas_width);
        self.status_message = "New demo timeline generated".to_string();
    }

    pub fn open_session(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline", &["timeline.json", "json"])
            .pick_file()
        {
            match crate::io::load_session(&path) {
                Ok(session) => {
                    self.session = session;
                    self.file_path = Some(path);
                    self.gesture = SelectionGesture::Idle;
                    if let Some((start, _)) = self.session.time_span() {
                        self.viewport.start = start - chrono::Duration::hours(1);
                    }
                    self.status_message = "Timeline loaded".to_string();
                }
                Err(e) => {
                    warn!("load failed: {e}");
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_session(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_session(&path);
        } else {
            self.save_session_as();
        }
    }

    pub fn save_session_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline", &["timeline.json", "json"])
            .set_file_name(format!("{}.timeline.json", self.session.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.write_session(&path);
        }
    }

    fn write_session(&mut self, path: &std::path::Path) {
        self.session.touch();
        match crate::io::save_session(&self.session, path) {
            Ok(()) => self.status_message = "Timeline saved".to_string(),
            Err(e) => {
                warn!("save failed: {e}");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    pub fn export_links_csv(&mut self) {
        if self.session.links.is_empty() {
            self.status_message = "No links to export yet".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format!("{}-links.csv", self.session.name))
            .save_file()
        {
            match crate::io::csv_export::export_links_csv(&self.session, &path) {
                Ok(count) => self.status_message = format!("Exported {} links to CSV", count),
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    pub fn export_links_svg(&mut self) {
        if self.last_overlays.is_empty() {
            self.status_message = "No links on screen to export".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Files", &["svg"])
            .set_file_name(format!("{}-links.svg", self.session.name))
            .save_file()
        {
            match crate::io::svg_export::export_svg(
                &self.last_overlays,
                self.last_canvas_size,
                self.settings.settings.link_stroke(),
                &path,
            ) {
                Ok(count) => self.status_message = format!("Exported {} links to SVG", count),
                Err(e) => self.status_message = format!("SVG export failed: {}", e),
            }
        }
    }

    // --- Link gesture ---

    pub fn select_item(&mut self, id: ItemId) {
        let (next, outcome) = self
            .gesture
            .select(id, &self.session.items, &mut self.session.links);
        self.gesture = next;
        self.status_message = match outcome {
            GestureOutcome::Started(id) | GestureOutcome::Reselected(id) => format!(
                "Selected '{}', click another item to link",
                self.session.item_title(id)
            ),
            GestureOutcome::AlreadyLinked => "Those items are already linked".to_string(),
            GestureOutcome::UnknownItem(_) => "Selection no longer exists".to_string(),
            GestureOutcome::Linked(link) => {
                self.session.touch();
                format!(
                    "Linked '{}' → '{}'",
                    self.session.item_title(link.start),
                    self.session.item_title(link.end)
                )
            }
        };
    }

    pub fn click_canvas(&mut self) {
        if self.gesture.pending().is_some() {
            self.status_message = "Selection cleared".to_string();
        }
        self.gesture = self.gesture.canvas_click();
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx, self.settings.settings.link_color);

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_session();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && !self.show_about {
            self.click_canvas();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let default_pph = self.settings.settings.pixels_per_hour;
                        ui.label(
                            egui::RichText::new(format!(
                                "Items: {} · Links: {} · Zoom: {:.0}%",
                                self.session.items.len(),
                                self.session.links.len(),
                                self.viewport.pixels_per_hour / default_pph * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: timeline chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::timeline_chart::show_timeline_chart(
                &self.session,
                &mut self.viewport,
                self.gesture.pending(),
                &self.settings.settings,
                ui,
            );
            self.last_canvas_width = interaction.canvas_size.x;
            self.last_canvas_size = interaction.canvas_size;
            self.last_overlays = interaction.overlays;

            if let Some(id) = interaction.selected_item {
                self.select_item(id);
            } else if interaction.canvas_clicked {
                self.click_canvas();
            }
        });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
