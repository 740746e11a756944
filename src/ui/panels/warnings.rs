// Useful Tools - ui/panels/warnings.rs
//
// Startup warnings window: config values that were rejected and catalog
// files that could not be loaded.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the warnings dialog (if `state.show_warnings` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_warnings {
        return;
    }

    let mut open = true;
    egui::Window::new("Startup Warnings")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if state.warnings.is_empty() {
                ui.label("No warnings.");
                return;
            }
            egui::ScrollArea::vertical()
                .id_salt("warnings_list")
                .max_height(300.0)
                .show(ui, |ui| {
                    for warning in &state.warnings {
                        ui.colored_label(theme::ERROR, format!("\u{26a0} {warning}"));
                    }
                });
        });

    if !open {
        state.show_warnings = false;
    }
}
