//! Top bar: title, new chat, settings and language

use super::{mirrored_row, row_layout, set_label, LanguageSwitcher};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, WidgetType};

pub struct Header<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();

        mirrored_row(ui, rtl, |ui| {
            ui.label(
                RichText::new(self.state.t("app.title"))
                    .size(20.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.label(
                RichText::new(self.state.t("app.subtitle"))
                    .size(14.0)
                    .color(self.theme.text_muted),
            );

            // Controls sit at the far edge
            ui.with_layout(row_layout(!rtl), |ui| {
                let settings_label = self.state.t("settings.title").to_string();
                let settings = ui.selectable_label(self.state.show_settings, "⚙");
                set_label(&settings, WidgetType::Button, true, settings_label.as_str());
                if settings.on_hover_text(settings_label).clicked() {
                    self.state.show_settings = !self.state.show_settings;
                }

                let new_chat_label = self.state.t("chat.newChat").to_string();
                let new_chat = ui.add(
                    egui::Button::new(RichText::new(format!("＋ {}", new_chat_label)))
                        .rounding(self.theme.button_rounding)
                        .fill(self.theme.primary),
                );
                set_label(&new_chat, WidgetType::Button, true, new_chat_label);
                if new_chat.clicked() {
                    self.state.create_chat();
                }

                ui.add_space(self.theme.spacing_sm);
                LanguageSwitcher::new(self.state, self.theme).show(ui);
            });
        });
    }
}
