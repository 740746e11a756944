// Useful Tools - ui/theme.rs
//
// Colour scheme, visuals, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Outcome colours for conversion results and load errors.
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113); // Red 400
pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175); // Gray 400

/// Tag chip colours.
pub const TAG_BG: Color32 = Color32::from_rgba_premultiplied(59, 130, 246, 40); // Blue 500 @ low alpha
pub const TAG_TEXT: Color32 = Color32::from_rgb(147, 197, 253); // Blue 300

/// Thumbnail placeholder fill.
pub const PLACEHOLDER_BG: Color32 = Color32::from_rgb(55, 65, 81); // Gray 700

/// Layout constants.
pub const CARD_WIDTH: f32 = 320.0;
pub const CARD_SPACING: f32 = 12.0;
pub const PREVIEW_MAX_HEIGHT: f32 = 360.0;
pub const LINE_COUNT_FIELD_WIDTH: f32 = 70.0;

/// Apply the configured theme and body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(font_size));
        style
            .text_styles
            .insert(egui::TextStyle::Button, egui::FontId::proportional(font_size));
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::monospace(font_size - 1.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(font_size * 1.5),
        );
    });
}
