// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use crate::data::ColorClass;
use egui::Color32;

#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub insulator: Color32,
    pub copper: Color32,
    pub outline: Color32,
    pub text_color: Color32,
    pub background: Color32,
    pub outline_width_pt: f32,
}

impl ColorScheme {
    pub fn new() -> Self {
        Self {
            insulator: Color32::from_rgb(0, 128, 0), // Green dielectric
            copper: Color32::from_rgb(255, 165, 0),  // Orange copper
            outline: Color32::BLACK,
            text_color: Color32::BLACK,
            background: Color32::WHITE,
            outline_width_pt: 1.0,
        }
    }

    pub fn get_fill_color(&self, color_class: ColorClass) -> Color32 {
        match color_class {
            ColorClass::Insulator => self.insulator,
            ColorClass::Copper => self.copper,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

/// `#rrggbb` notation for SVG attributes; alpha is ignored.
pub fn to_svg_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_colors_by_class() {
        let scheme = ColorScheme::new();

        assert_eq!(scheme.get_fill_color(ColorClass::Insulator), scheme.insulator);
        assert_eq!(scheme.get_fill_color(ColorClass::Copper), scheme.copper);
        assert_ne!(scheme.insulator, scheme.copper);
    }

    #[test]
    fn test_svg_color() {
        assert_eq!(to_svg_color(Color32::from_rgb(0, 128, 0)), "#008000");
        assert_eq!(to_svg_color(Color32::from_rgb(255, 165, 0)), "#ffa500");
        assert_eq!(to_svg_color(Color32::WHITE), "#ffffff");
    }
}
