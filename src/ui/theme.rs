//! Theme and styling
//!
//! Colours, spacing and fonts for the chat UI.

use crate::integration::ThemeMode;
use crate::{ParleyError, Result};
use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};
use std::path::Path;
use tracing::info;

/// Name the extra font is registered under
const EXTRA_FONT: &str = "parley-extra";

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    pub dark_mode: bool,

    /// Primary accent color
    pub primary: Color32,
    pub success: Color32,
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Message bubbles
    pub user_bubble: Color32,
    pub user_text: Color32,
    pub assistant_bubble: Color32,
    pub system_text: Color32,

    /// Active microphone / speaker
    pub active: Color32,

    pub button_rounding: Rounding,
    pub card_rounding: Rounding,
    pub bubble_rounding: Rounding,

    pub spacing: f32,
    pub spacing_lg: f32,
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            dark_mode: true,

            primary: Color32::from_rgb(99, 102, 241), // Indigo
            success: Color32::from_rgb(34, 197, 94),
            error: Color32::from_rgb(239, 68, 68),

            bg_primary: Color32::from_rgb(17, 24, 39),
            bg_secondary: Color32::from_rgb(31, 41, 55),
            bg_tertiary: Color32::from_rgb(55, 65, 81),

            text_primary: Color32::from_rgb(249, 250, 251),
            text_secondary: Color32::from_rgb(209, 213, 219),
            text_muted: Color32::from_rgb(156, 163, 175),

            user_bubble: Color32::from_rgb(79, 70, 229),
            user_text: Color32::WHITE,
            assistant_bubble: Color32::from_rgb(55, 65, 81),
            system_text: Color32::from_rgb(156, 163, 175),

            active: Color32::from_rgb(239, 68, 68),

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),
            bubble_rounding: Rounding::same(14.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    pub fn light() -> Self {
        Self {
            dark_mode: false,

            primary: Color32::from_rgb(79, 70, 229),
            success: Color32::from_rgb(22, 163, 74),
            error: Color32::from_rgb(220, 38, 38),

            bg_primary: Color32::from_rgb(255, 255, 255),
            bg_secondary: Color32::from_rgb(243, 244, 246),
            bg_tertiary: Color32::from_rgb(229, 231, 235),

            text_primary: Color32::from_rgb(17, 24, 39),
            text_secondary: Color32::from_rgb(55, 65, 81),
            text_muted: Color32::from_rgb(107, 114, 128),

            user_bubble: Color32::from_rgb(79, 70, 229),
            user_text: Color32::WHITE,
            assistant_bubble: Color32::from_rgb(229, 231, 235),
            system_text: Color32::from_rgb(107, 114, 128),

            active: Color32::from_rgb(220, 38, 38),

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),
            bubble_rounding: Rounding::same(14.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_tertiary;

        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.weak_bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.primary.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.primary);

        visuals.hyperlink_color = self.primary;
        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.bg_tertiary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);
        style.spacing.button_padding =
            Vec2::new(self.spacing_sm + 4.0, self.spacing_sm / 2.0 + 2.0);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(20.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            FontId::new(13.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(11.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }

    /// Register the default fonts plus an optional fallback font.
    ///
    /// egui's bundled fonts have no Hebrew glyphs, so Hebrew text needs a
    /// font such as Noto Sans Hebrew supplied from disk.
    pub fn install_fonts(ctx: &egui::Context, extra_font: Option<&Path>) -> Result<()> {
        let mut fonts = FontDefinitions::default();

        if let Some(path) = extra_font {
            let bytes = std::fs::read(path).map_err(|e| {
                ParleyError::ConfigError(format!("Failed to read font '{}': {}", path.display(), e))
            })?;
            fonts
                .font_data
                .insert(EXTRA_FONT.to_owned(), FontData::from_owned(bytes).into());
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push(EXTRA_FONT.to_owned());
            }
            info!(path = %path.display(), "Installed extra font");
        }

        ctx.set_fonts(fonts);
        Ok(())
    }

    /// Stroke for outlined primary buttons
    pub fn primary_button_stroke(&self) -> Stroke {
        Stroke::new(1.0, self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mode() {
        assert!(Theme::from_mode(ThemeMode::Dark).dark_mode);
        assert!(!Theme::from_mode(ThemeMode::Light).dark_mode);
    }

    #[test]
    fn test_missing_font_is_config_error() {
        let ctx = egui::Context::default();
        let result = Theme::install_fonts(&ctx, Some(Path::new("/nonexistent/font.ttf")));
        assert!(matches!(result, Err(ParleyError::ConfigError(_))));
    }

    #[test]
    fn test_default_fonts_install() {
        let ctx = egui::Context::default();
        assert!(Theme::install_fonts(&ctx, None).is_ok());
    }
}
