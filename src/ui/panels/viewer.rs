// Useful Tools - ui/panels/viewer.rs
//
// Text file viewer: open/reload controls, tail toggle and line count, file
// header, and the (optionally tailed) content.
//
// The tailed text is derived on every frame from the loaded content; nothing
// is cached. Picks and reloads are requested through state flags.

use crate::app::state::AppState;
use crate::core::model::format_file_size;
use crate::core::tail::ContentStats;
use crate::ui::theme;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Text File Viewer");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Open File\u{2026}").clicked() {
            state.request_pick_file = true;
        }
        if ui.button("Open Folder\u{2026}").clicked() {
            state.request_pick_folder = true;
        }
        let can_reload = state
            .viewer
            .file
            .as_ref()
            .is_some_and(|f| !f.is_folder)
            && !state.viewer.loading;
        if ui
            .add_enabled(can_reload, egui::Button::new("\u{27f3} Reload"))
            .on_hover_text("Read the file again from disk")
            .clicked()
        {
            state.request_reload = true;
        }
        if state.viewer.loading {
            ui.spinner();
        }

        ui.separator();

        let mut enabled = state.viewer.tail.is_enabled();
        if ui
            .checkbox(&mut enabled, "Watch (last N lines)")
            .changed()
        {
            if enabled {
                state.viewer.tail.enable();
            } else {
                state.viewer.tail.disable();
            }
        }
        ui.label("Lines:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.viewer.line_count_input)
                .desired_width(theme::LINE_COUNT_FIELD_WIDTH),
        );
        if response.lost_focus() {
            state.viewer.commit_line_count_input();
        }
    });

    if let Some(ref error) = state.viewer.error {
        ui.colored_label(theme::ERROR, error);
    }

    ui.separator();

    let Some(ref file) = state.viewer.file else {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("Drop a text file here, or use Open File\u{2026}").color(theme::MUTED));
        });
        return;
    };

    let Some(text) = file.text() else {
        ui.colored_label(theme::MUTED, format!("{} is binary ({})", file.name, file.media_type));
        return;
    };

    let stats = ContentStats::of(text);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&file.name).strong());
        ui.label(
            egui::RichText::new(format!(
                "{} \u{00b7} {} lines \u{00b7} {} chars \u{00b7} {} KB \u{00b7} loaded {}",
                format_file_size(file.size),
                stats.lines,
                stats.characters,
                stats.kib,
                file.loaded_at.format("%H:%M:%S"),
            ))
            .small()
            .color(theme::MUTED),
        );
        if file.size >= state.viewer.large_file_threshold {
            ui.label(egui::RichText::new("large file").small().color(theme::ERROR));
        }
        if state.viewer.tail.is_enabled() {
            ui.label(
                egui::RichText::new(format!(
                    "showing last {} lines",
                    state.viewer.tail.line_count()
                ))
                .small()
                .color(theme::SUCCESS),
            );
        }
    });
    ui.add_space(4.0);

    let mut shown: &str = state.viewer.tail.display(text);
    let tailing = state.viewer.tail.is_enabled();
    egui::ScrollArea::both()
        .id_salt("viewer_content")
        .auto_shrink([false; 2])
        .stick_to_bottom(tailing)
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut shown)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
}
