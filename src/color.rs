use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::panel::PANEL_COUNT;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Series colour for the 1-based panel `index`.
pub fn panel_color(index: usize) -> Color32 {
    let palette = generate_palette(PANEL_COUNT);
    index
        .checked_sub(1)
        .and_then(|i| palette.get(i).copied())
        .unwrap_or(Color32::GRAY)
}

/// Translucent variant for filled areas and box bodies.
pub fn fill_color(index: usize) -> Color32 {
    panel_color(index).gamma_multiply(0.35)
}
