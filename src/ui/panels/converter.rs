// Useful Tools - ui/panels/converter.rs
//
// Image converter: selection, target-format radio buttons, convert button,
// result message with size comparison, preview, and save actions.

use crate::app::state::AppState;
use crate::core::model::{format_file_size, TargetFormat};
use crate::ui::theme;

pub fn render(ui: &mut egui::Ui, state: &mut AppState, preview: Option<&egui::TextureHandle>) {
    ui.heading("Image Converter");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Open Image\u{2026}").clicked() {
            state.request_pick_image = true;
        }
        match state.converter.selected {
            Some(ref image) => {
                ui.label(egui::RichText::new(&image.name).strong());
                ui.label(
                    egui::RichText::new(format!(
                        "{} \u{00b7} {}",
                        image.format_label(),
                        format_file_size(image.size)
                    ))
                    .small()
                    .color(theme::MUTED),
                );
            }
            None => {
                ui.label(egui::RichText::new("Drop an image here, or use Open Image\u{2026}").color(theme::MUTED));
            }
        }
    });

    ui.add_space(6.0);
    ui.label("Convert to:");
    ui.horizontal(|ui| {
        for &format in TargetFormat::all() {
            if ui
                .radio_value(&mut state.converter.target, format, format.label())
                .changed()
            {
                state.converter.clear_result();
            }
        }
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let label = if state.converter.converting {
            "Converting\u{2026}"
        } else {
            "Convert"
        };
        if ui
            .add_enabled(state.converter.can_convert(), egui::Button::new(label))
            .clicked()
        {
            state.request_convert = true;
        }
        if state.converter.converting {
            ui.spinner();
            if let Some((w, h)) = state.converter.decoded {
                ui.label(egui::RichText::new(format!("{w}\u{00d7}{h}")).small().color(theme::MUTED));
            }
        }
    });

    let Some(ref result) = state.converter.result else {
        return;
    };

    ui.separator();
    if !result.success {
        ui.colored_label(theme::ERROR, &result.message);
        return;
    }

    ui.colored_label(theme::SUCCESS, &result.message);
    egui::Grid::new("conversion_sizes")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label("Original size:");
            ui.label(format_file_size(result.original_size));
            ui.end_row();

            ui.label("Converted size:");
            ui.label(format_file_size(result.converted_size));
            ui.end_row();

            if let Some(change) = result.size_change() {
                ui.label("Change:");
                let (colour, word) = if change.smaller {
                    (theme::SUCCESS, "smaller")
                } else {
                    (theme::ERROR, "larger")
                };
                ui.colored_label(colour, format!("{} {word}", format_file_size(change.delta)));
                ui.end_row();
            }

            if let Some(ref image) = result.image {
                ui.label("Dimensions:");
                ui.label(format!("{}\u{00d7}{}", image.width, image.height));
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if let Some(ref image) = result.image {
            let download_name = image.format.download_name();
            if ui
                .button(format!("Save as {download_name}\u{2026}"))
                .clicked()
            {
                state.request_save = true;
            }
        }
        if let Some(ref saved) = state.converter.saved_to {
            if ui.small_button("Show in folder").clicked() {
                state.pending_reveal = Some(saved.clone());
            }
        }
        if ui.button("Convert Another").clicked() {
            state.request_convert_another = true;
        }
    });

    if let Some(tex) = preview {
        ui.add_space(6.0);
        egui::ScrollArea::both()
            .id_salt("converter_preview")
            .max_height(theme::PREVIEW_MAX_HEIGHT)
            .show(ui, |ui| {
                ui.add(
                    egui::Image::from_texture(egui::load::SizedTexture::from_handle(tex))
                        .max_size(egui::vec2(ui.available_width(), theme::PREVIEW_MAX_HEIGHT))
                        .maintain_aspect_ratio(true),
                );
            });
    }
}
