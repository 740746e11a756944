// Useful Tools - ui/panels/about.rs
//
// About dialog, opened from Help > About. Rendered as a centred,
// non-resizable, non-collapsible window.

use crate::app::state::AppState;
use crate::util::constants::{APP_NAME, APP_TAGLINE, APP_VERSION};

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new(format!("About {APP_NAME}"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(APP_NAME).size(26.0).strong());
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("v{APP_VERSION}")).weak());
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            ui.vertical_centered(|ui| {
                ui.label(APP_TAGLINE);
                ui.add_space(4.0);
                let tools = state.directory.catalog().len();
                ui.label(
                    egui::RichText::new(format!("{tools} tools in the catalog"))
                        .small()
                        .weak(),
                );
            });

            ui.add_space(6.0);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("MIT License \u{00b7} Built with Rust & egui").small().weak());
            });
            ui.add_space(6.0);
        });

    if !open {
        state.show_about = false;
    }
}
