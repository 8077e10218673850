//! Input bar component
//!
//! Microphone toggle, text input and send button.

use super::{mirrored_row, set_label};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2, WidgetType};
use std::time::Instant;

pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                mirrored_row(ui, rtl, |ui| {
                    self.show_mic_button(ui);
                    self.show_text_input(ui);
                    self.show_send_button(ui);
                });
            });
    }

    fn show_mic_button(&mut self, ui: &mut egui::Ui) {
        let supported = self.state.listener.is_supported();
        let listening = self.state.listener.is_listening();

        let (icon, key, color) = if !supported {
            ("🎤", "stt.unsupported", self.theme.text_muted)
        } else if listening {
            ("⏹", "stt.stop", self.theme.active)
        } else {
            ("🎤", "stt.start", self.theme.text_secondary)
        };
        let label = self.state.t(key).to_string();

        let button = egui::Button::new(RichText::new(icon).size(18.0).color(color))
            .min_size(Vec2::splat(36.0))
            .rounding(self.theme.button_rounding);
        let button = if listening {
            button.fill(self.theme.active.gamma_multiply(0.2))
        } else {
            button
        };

        let response = ui.add_enabled(supported, button);
        set_label(&response, WidgetType::Button, supported, label.as_str());

        // Pulsing ring while capturing
        if listening {
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
            let rect = response.rect;
            ui.painter().circle_stroke(
                rect.center(),
                rect.width() / 2.0 + 2.0 + pulse * 3.0,
                egui::Stroke::new(2.0 * pulse, self.theme.active.gamma_multiply(1.0 - pulse * 0.5)),
            );
            ui.ctx().request_repaint();
        }

        if response.on_hover_text(label).clicked() {
            self.state.toggle_listening();
        }
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let hint = if self.state.listener.is_listening() {
            self.state.t("stt.listening").to_string()
        } else {
            self.state.t("chat.placeholder").to_string()
        };
        let label = self.state.t("chat.placeholder").to_string();

        // Leave room for the send button
        let width = (ui.available_width() - 80.0).max(80.0);
        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text(hint)
            .desired_width(width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(10.0, 6.0))
            .id(egui::Id::new("message_input"));

        let response = ui.add(text_edit);
        set_label(&response, WidgetType::TextEdit, true, label);

        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            self.state.send_message(Instant::now());
            response.request_focus();
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let can_send = !self.state.input_text.trim().is_empty()
            && self.state.chats.current_chat().is_some();
        let label = self.state.t("chat.send").to_string();

        let fill = if can_send {
            self.theme.primary
        } else {
            self.theme.bg_tertiary
        };
        let button = egui::Button::new(RichText::new(label.as_str()).color(egui::Color32::WHITE))
            .min_size(Vec2::new(64.0, 36.0))
            .rounding(self.theme.button_rounding)
            .fill(fill);

        let response = ui.add_enabled(can_send, button);
        set_label(&response, WidgetType::Button, can_send, label);

        if response.clicked() {
            self.state.send_message(Instant::now());
        }
    }
}
