// Useful Tools - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the tool panels and drives the ingest and conversion
// workers. Panels only raise request flags on `AppState`; every dialog,
// worker start, and filesystem write happens here.

use crate::app::convert::ConvertManager;
use crate::app::ingest::{self, IngestManager};
use crate::app::state::{ActiveTool, AppState};
use crate::core::model::{format_file_size, ConvertProgress, IngestProgress};
use crate::ui;
use crate::ui::thumbnails::ThumbnailCache;
use crate::util::constants::{IMAGE_PICKER_EXTENSIONS, TEXT_PICKER_EXTENSIONS};
use crate::util::error::{IngestError, Result, ToolboxError};
use std::path::Path;
use std::time::Duration;

/// Repaint interval while a background worker is running.
const WORKER_REPAINT_MS: u64 = 50;

/// The Useful Tools application.
pub struct ToolboxApp {
    pub state: AppState,
    ingest: IngestManager,
    convert: ConvertManager,
    /// Texture for the last successful conversion.
    preview: Option<egui::TextureHandle>,
    thumbnails: ThumbnailCache,
    /// Theme settings last pushed to the egui context.
    applied_theme: Option<(bool, f32)>,
}

impl ToolboxApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            ingest: IngestManager::new(),
            convert: ConvertManager::new(),
            preview: None,
            thumbnails: ThumbnailCache::new(),
            applied_theme: None,
        }
    }

    fn poll_workers(&mut self, ctx: &egui::Context) {
        for msg in self.ingest.poll_progress() {
            match msg {
                IngestProgress::Loaded { file } => {
                    let summary =
                        format!("Loaded {} ({})", file.name, format_file_size(file.size));
                    if self.state.viewer.apply_loaded(*file) {
                        tracing::warn!(status = %summary, "Large file opened; tailing");
                        self.state.status_message = format!(
                            "{summary}. Large file: showing the last {} lines.",
                            self.state.viewer.tail.line_count()
                        );
                    } else {
                        self.state.status_message = summary;
                    }
                }
                IngestProgress::Failed { path, error } => {
                    self.state.viewer.error = Some("Failed to read file".to_string());
                    self.state.status_message =
                        format!("Failed to read {}: {error}", path.display());
                }
            }
        }
        self.state.viewer.loading = self.ingest.is_loading();

        for msg in self.convert.poll_progress() {
            match msg {
                ConvertProgress::Started { name, format } => {
                    self.state.status_message =
                        format!("Converting {name} to {}\u{2026}", format.label());
                }
                ConvertProgress::Decoded { width, height } => {
                    self.state.converter.decoded = Some((width, height));
                }
                ConvertProgress::Finished { result, preview } => {
                    self.preview = preview.map(|img| {
                        let size = [img.width() as usize, img.height() as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                        ctx.load_texture(
                            "conversion_preview",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        )
                    });
                    self.state.status_message = result.message.clone();
                    self.state.converter.result = Some(result);
                }
            }
        }
        self.state.converter.converting = self.convert.is_converting();

        if self.state.viewer.loading || self.state.converter.converting {
            ctx.request_repaint_after(Duration::from_millis(WORKER_REPAINT_MS));
        }
    }

    /// Route dropped files to the active tool. Only the first is used.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            tracing::debug!(path = %path.display(), tool = self.state.active_tool.label(), "File dropped");
            self.state.route_path(path);
        }
    }

    fn handle_requests(&mut self, ctx: &egui::Context) {
        // ---- Native dialogs ----
        if std::mem::take(&mut self.state.request_pick_file) {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Text files", TEXT_PICKER_EXTENSIONS)
                .pick_file()
            {
                self.state.pending_open = Some(path);
            }
        }
        if std::mem::take(&mut self.state.request_pick_folder) {
            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                self.state.pending_open = Some(ingest::folder_target(&dir));
            }
        }
        if std::mem::take(&mut self.state.request_pick_image) {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", IMAGE_PICKER_EXTENSIONS)
                .pick_file()
            {
                self.state.pending_image = Some(path);
            }
        }

        // ---- Viewer ----
        if let Some(path) = self.state.pending_open.take() {
            self.state.active_tool = ActiveTool::TextViewer;
            self.state.status_message = format!("Loading {}\u{2026}", path.display());
            self.ingest.start_load(path);
            self.state.viewer.loading = true;
        }
        if std::mem::take(&mut self.state.request_reload) {
            if let Some(path) = self.state.viewer.file.as_ref().map(|f| f.path.clone()) {
                self.ingest.start_load(path);
                self.state.viewer.loading = true;
            }
        }

        // ---- Converter ----
        if let Some(path) = self.state.pending_image.take() {
            self.state.active_tool = ActiveTool::ImageConverter;
            match ingest::describe_image(&path) {
                Ok(image) => {
                    self.state.status_message = format!(
                        "Selected {} ({}, {})",
                        image.name,
                        image.format_label(),
                        format_file_size(image.size)
                    );
                    self.convert.abandon();
                    self.preview = None;
                    self.state.converter.converting = false;
                    self.state.converter.select(image);
                }
                Err(IngestError::NotAnImage { path, .. }) => {
                    self.state.status_message =
                        format!("{} is not an image; ignored.", path.display());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Image selection failed");
                    self.state.status_message = e.to_string();
                }
            }
        }
        if std::mem::take(&mut self.state.request_convert) {
            if let Some(image) = self.state.converter.selected.clone() {
                self.state.converter.clear_result();
                self.preview = None;
                self.convert
                    .start_convert(image, self.state.converter.target);
                self.state.converter.converting = true;
            }
        }
        if std::mem::take(&mut self.state.request_save) {
            self.save_result();
        }
        if std::mem::take(&mut self.state.request_convert_another) {
            self.convert.abandon();
            self.preview = None;
            self.state.converter.reset();
            self.state.status_message = "Ready for another image.".to_string();
        }
        if let Some(path) = self.state.pending_reveal.take() {
            crate::platform::fs::reveal_in_file_manager(&path);
        }

        // ---- Directory ----
        if let Some(url) = self.state.pending_url.take() {
            tracing::info!(url = %url, "Opening tool link");
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }
    }

    fn save_result(&mut self) {
        let Some(image) = self
            .state
            .converter
            .result
            .as_ref()
            .and_then(|r| r.image.as_ref())
        else {
            return;
        };
        let format = image.format;
        let extension = format.extension().trim_start_matches('.');
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[extension])
            .set_file_name(format.download_name())
            .save_file()
        else {
            return;
        };
        match save_artifact(&dest, &image.bytes) {
            Ok(()) => {
                self.state.status_message = format!("Saved {}", dest.display());
                self.state.converter.saved_to = Some(dest);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save converted image");
                self.state.status_message = e.to_string();
            }
        }
    }
}

/// Write a converted image to the user's chosen destination.
fn save_artifact(dest: &Path, bytes: &[u8]) -> Result<()> {
    crate::platform::fs::write_artifact(dest, bytes).map_err(|source| ToolboxError::Io {
        path: dest.to_path_buf(),
        operation: "save",
        source,
    })
}

impl eframe::App for ToolboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let theme = (self.state.dark_mode, self.state.font_size);
        if self.applied_theme != Some(theme) {
            ui::theme::apply(ctx, theme.0, theme.1);
            self.applied_theme = Some(theme);
        }

        self.poll_workers(ctx);
        self.handle_dropped_files(ctx);
        self.handle_requests(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open File\u{2026}").clicked() {
                        self.state.request_pick_file = true;
                        ui.close_menu();
                    }
                    if ui.button("Open Folder\u{2026}").clicked() {
                        self.state.request_pick_folder = true;
                        ui.close_menu();
                    }
                    if ui.button("Open Image\u{2026}").clicked() {
                        self.state.request_pick_image = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Tools", |ui| {
                    for &tool in ActiveTool::all() {
                        if ui
                            .selectable_label(self.state.active_tool == tool, tool.label())
                            .clicked()
                        {
                            self.state.active_tool = tool;
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.state.dark_mode, "Dark mode").clicked() {
                        ui.close_menu();
                    }
                    let count = self.state.warnings.len();
                    ui.add_enabled_ui(count > 0, |ui| {
                        if ui.button(format!("Startup Warnings ({count})")).clicked() {
                            self.state.show_warnings = true;
                            ui.close_menu();
                        }
                    });
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.state.active_tool.label());
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").small().color(ui::theme::MUTED));
                    }
                    if !self.state.warnings.is_empty()
                        && ui
                            .small_button(format!("\u{26a0} {}", self.state.warnings.len()))
                            .clicked()
                    {
                        self.state.show_warnings = true;
                    }
                });
            });
        });

        // Central panel: the active tool
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tool {
            ActiveTool::Directory => {
                ui::panels::directory::render(ui, &mut self.state, &mut self.thumbnails);
            }
            ActiveTool::TextViewer => {
                ui::panels::viewer::render(ui, &mut self.state);
            }
            ActiveTool::ImageConverter => {
                ui::panels::converter::render(ui, &mut self.state, self.preview.as_ref());
            }
        });

        // Drop hint while files hover over the window
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        if hovering {
            let target = match self.state.active_tool {
                ActiveTool::ImageConverter => "Drop to select image",
                ActiveTool::TextViewer => "Drop to open file",
                ActiveTool::Directory => "Drop to open in a tool",
            };
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("drop_overlay"),
            ));
            let rect = ctx.screen_rect();
            painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(160));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                target,
                egui::FontId::proportional(24.0),
                egui::Color32::WHITE,
            );
        }

        // Dialogs
        ui::panels::about::render(ctx, &mut self.state);
        ui::panels::warnings::render(ctx, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_artifact_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("converted-image.png");
        save_artifact(&dest, b"png-bytes").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_save_failure_carries_path_and_operation() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("converted-image.png");
        let err = save_artifact(&dest, b"x").unwrap_err();
        assert!(matches!(err, ToolboxError::Io { operation: "save", .. }));
        assert!(err.to_string().starts_with("I/O error during save on '"));
    }
}
