use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Same hue, darker: used for peak markers on top of their curve.
pub fn marker_shade(color: Color32) -> Color32 {
    let rgb = Srgb::new(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    );
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness * 0.6).clamp(0.0, 1.0);
    hsl_to_color32(hsl)
}

// ---------------------------------------------------------------------------
// Color mapping: measurement slot → Color32
// ---------------------------------------------------------------------------

/// One colour per loaded measurement, by position in the list.
#[derive(Debug, Clone)]
pub struct ColorMap {
    colors: Vec<Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ColorMap {
    pub fn new(n: usize) -> Self {
        ColorMap {
            colors: generate_palette(n),
            default_color: Color32::LIGHT_BLUE,
        }
    }

    pub fn color_for(&self, slot: usize) -> Color32 {
        self.colors.get(slot).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn out_of_range_slot_uses_default() {
        let map = ColorMap::new(2);
        assert_eq!(map.color_for(5), Color32::LIGHT_BLUE);
        assert_ne!(map.color_for(0), map.color_for(1));
    }

    #[test]
    fn marker_shade_is_darker() {
        let base = Color32::from_rgb(200, 120, 60);
        let shade = marker_shade(base);
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(shade) < sum(base));
    }
}
