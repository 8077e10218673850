//! Read-aloud voice selection

use super::{column_layout, mirrored_row, set_label};
use crate::speech::Voice;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, WidgetType};

pub struct VoicePicker<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> VoicePicker<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();
        let refresh_label = self.state.t("settings.refreshVoices").to_string();
        let mut refresh = false;
        let mut picked: Option<Voice> = None;

        ui.with_layout(column_layout(rtl), |ui| {
            mirrored_row(ui, rtl, |ui| {
                ui.label(
                    RichText::new(self.state.t("settings.voice"))
                        .size(15.0)
                        .strong()
                        .color(self.theme.text_primary),
                );

                let response = ui.add(
                    egui::Button::new("🔄")
                        .frame(false)
                        .rounding(self.theme.button_rounding),
                );
                set_label(&response, WidgetType::Button, true, refresh_label.as_str());
                refresh = response.on_hover_text(refresh_label.as_str()).clicked();
            });

            let voices = self.state.speaker.voices();
            if voices.is_empty() {
                ui.label(
                    RichText::new(self.state.t("settings.noVoices"))
                        .size(12.0)
                        .color(self.theme.text_muted),
                );
                return;
            }

            let selected = self.state.speaker.selected_voice();
            for voice in voices {
                let text = format!("{} ({})", voice.name, voice.lang);
                let response = ui.selectable_label(
                    selected == Some(voice),
                    RichText::new(text).color(self.theme.text_primary),
                );
                set_label(
                    &response,
                    WidgetType::SelectableLabel,
                    true,
                    format!("Voice: {}", voice.name),
                );
                if response.clicked() {
                    picked = Some(voice.clone());
                }
            }
        });

        if refresh {
            self.state.refresh_voices();
        }
        if let Some(voice) = picked {
            self.state.select_voice(voice);
        }
    }
}
