use std::{path::Path, sync::Arc};

use anyhow::Context;
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(240, 165, 0);
pub const CARD_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(24, 16, 0, 25);
pub const CARD_HIGHLIGHT_FILL: egui::Color32 =
    egui::Color32::from_rgba_premultiplied(120, 82, 0, 128);
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 107, 107);
pub const GLYPH_SIZE: f32 = 26.0;

const GLYPH_FONT_NAME: &str = "linear_b_glyphs";

/// Appends a font covering the Linear B block as a fallback for both text
/// families, so glyphs render in the input, cards and results.
pub fn install_glyph_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read glyph font {}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        GLYPH_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(GLYPH_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.6);
    ctx.set_visuals(visuals);
}
