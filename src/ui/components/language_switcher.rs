//! Language switcher

use super::{mirrored_row, set_label};
use crate::i18n::Language;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, WidgetType};

/// One toggle per supported language, labelled in that language
pub struct LanguageSwitcher<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> LanguageSwitcher<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();
        let current = self.state.language();
        let mut selected = None;

        mirrored_row(ui, rtl, |ui| {
            ui.label(
                RichText::new(self.state.t("settings.language"))
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            for language in Language::ALL {
                let response = ui.selectable_label(current == language, language.native_name());
                set_label(&response, WidgetType::SelectableLabel, true, language.native_name());
                if response.clicked() {
                    selected = Some(language);
                }
            }
        });

        if let Some(language) = selected {
            self.state.set_language(language);
        }
    }
}
