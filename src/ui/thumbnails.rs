// Useful Tools - ui/thumbnails.rs
//
// Texture cache for tool card screenshots.
//
// Each record's screenshot is decoded at most once. Decode failures (missing
// file, SVG, corrupt data) are cached as `None` and drawn as a placeholder.

use crate::core::catalog::ToolCatalog;
use crate::core::model::ToolRecord;
use crate::util::constants::THUMBNAIL_SIZE;
use std::collections::HashMap;

#[derive(Default)]
pub struct ThumbnailCache {
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `record`, loading it on first use.
    pub fn get(
        &mut self,
        ctx: &egui::Context,
        catalog: &ToolCatalog,
        record: &ToolRecord,
    ) -> Option<&egui::TextureHandle> {
        self.textures
            .entry(record.id.clone())
            .or_insert_with(|| load(ctx, catalog, record))
            .as_ref()
    }
}

fn load(
    ctx: &egui::Context,
    catalog: &ToolCatalog,
    record: &ToolRecord,
) -> Option<egui::TextureHandle> {
    let path = catalog.screenshot_path(record)?;
    let edge = (THUMBNAIL_SIZE * 2.0) as u32;
    let img = match image::open(&path) {
        Ok(img) => img.thumbnail(edge, edge).into_rgba8(),
        Err(e) => {
            tracing::debug!(tool = %record.id, path = %path.display(), error = %e, "Screenshot unavailable");
            return None;
        }
    };
    let size = [img.width() as usize, img.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
    Some(ctx.load_texture(
        format!("thumb_{}", record.id),
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}

/// Draw a square placeholder with the first letter of `title`.
pub fn placeholder(ui: &mut egui::Ui, title: &str) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE),
        egui::Sense::hover(),
    );
    ui.painter()
        .rect_filled(rect, 6.0, crate::ui::theme::PLACEHOLDER_BG);
    let initial = title
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(THUMBNAIL_SIZE * 0.45),
        crate::ui::theme::MUTED,
    );
}
