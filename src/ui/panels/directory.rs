// Useful Tools - ui/panels/directory.rs
//
// Tool directory: search box, result count, and one card per matching tool.
//
// Typing updates `state.directory` immediately. Card buttons either switch
// `state.active_tool` (app:// links) or set `state.pending_url`; gui.rs opens
// the browser.

use crate::app::state::{ActiveTool, AppState};
use crate::core::catalog::{resolve_link, ToolLink};
use crate::core::model::ToolRecord;
use crate::ui::theme;
use crate::ui::thumbnails::{self, ThumbnailCache};
use crate::util::constants::THUMBNAIL_SIZE;

/// "No tools found", "1 tool found", "N tools found".
pub fn result_count_label(count: usize) -> String {
    match count {
        0 => "No tools found".to_string(),
        1 => "1 tool found".to_string(),
        n => format!("{n} tools found"),
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState, thumbs: &mut ThumbnailCache) {
    ui.heading("Useful Tools");
    ui.label(egui::RichText::new(crate::util::constants::APP_TAGLINE).color(theme::MUTED));
    ui.add_space(8.0);

    let mut query = state.directory.query.clone();
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search tools...")
                .desired_width(360.0),
        );
        if response.changed() {
            state.directory.set_query(query.clone());
        }
        if !state.directory.query.is_empty() && ui.small_button("\u{2715}").clicked() {
            state.directory.set_query("");
        }
    });
    ui.label(
        egui::RichText::new(result_count_label(state.directory.results.len()))
            .small()
            .color(theme::MUTED),
    );
    ui.add_space(8.0);

    if state.directory.results.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "No tools found matching \"{}\"",
                    state.directory.query
                ))
                .strong(),
            );
            ui.label(egui::RichText::new("Try adjusting your search terms").color(theme::MUTED));
        });
        return;
    }

    let columns = ((ui.available_width() + theme::CARD_SPACING)
        / (theme::CARD_WIDTH + theme::CARD_SPACING))
        .floor()
        .max(1.0) as usize;

    // Clone the indices so cards can mutate state while iterating.
    let results = state.directory.results.clone();
    let ctx = ui.ctx().clone();
    let mut clicked: Option<ToolLink> = None;

    egui::ScrollArea::vertical()
        .id_salt("directory_cards")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for row in results.chunks(columns) {
                ui.horizontal_top(|ui| {
                    for &idx in row {
                        let Some(record) = state.directory.catalog().get(idx) else {
                            continue;
                        };
                        let link = resolve_link(&record.url, state.base_url.as_deref());
                        let texture =
                            thumbs.get(&ctx, state.directory.catalog(), record).cloned();
                        if render_card(ui, record, &link, texture.as_ref()) {
                            clicked = Some(link);
                        }
                    }
                });
                ui.add_space(theme::CARD_SPACING);
            }
        });

    match clicked {
        Some(ToolLink::App(view)) => match ActiveTool::from_app_view(&view) {
            Some(tool) => state.active_tool = tool,
            None => {
                tracing::warn!(view = %view, "Unknown app view in tool link");
                state.status_message = format!("Unknown tool view: {view}");
            }
        },
        Some(ToolLink::External(url)) => state.pending_url = Some(url),
        Some(ToolLink::Unavailable) | None => {}
    }
}

/// Draw one card; returns `true` when its open button was clicked.
fn render_card(
    ui: &mut egui::Ui,
    record: &ToolRecord,
    link: &ToolLink,
    texture: Option<&egui::TextureHandle>,
) -> bool {
    let mut clicked = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(theme::CARD_WIDTH);
        ui.horizontal_top(|ui| {
            match texture {
                Some(tex) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(tex))
                            .max_size(egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE)),
                    );
                }
                None => thumbnails::placeholder(ui, &record.title),
            }
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&record.title).strong());
                if !record.description.is_empty() {
                    ui.label(egui::RichText::new(&record.description).small());
                }
                if !record.tags.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for tag in &record.tags {
                            ui.label(
                                egui::RichText::new(tag)
                                    .small()
                                    .color(theme::TAG_TEXT)
                                    .background_color(theme::TAG_BG),
                            );
                        }
                    });
                }
                ui.add_space(4.0);
                let (label, enabled, hover) = match link {
                    ToolLink::App(_) => ("Open", true, "Open this tool".to_string()),
                    ToolLink::External(url) => ("Open in browser \u{2197}", true, url.clone()),
                    ToolLink::Unavailable => (
                        "Open in browser \u{2197}",
                        false,
                        "Set [catalog] base_url in config.toml to open site links".to_string(),
                    ),
                };
                let response = ui
                    .add_enabled(enabled, egui::Button::new(label))
                    .on_hover_text(hover.clone())
                    .on_disabled_hover_text(hover);
                if response.clicked() {
                    clicked = true;
                }
            });
        });
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_count_label() {
        assert_eq!(result_count_label(0), "No tools found");
        assert_eq!(result_count_label(1), "1 tool found");
        assert_eq!(result_count_label(7), "7 tools found");
    }
}
