//! Message list component
//!
//! Renders the current chat. User messages sit at the trailing edge,
//! assistant messages at the reading edge, merge markers centred.

use super::{mirrored_row, set_label};
use crate::chat::{Message, Role};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align, Layout, RichText, Vec2, WidgetType};
use uuid::Uuid;

pub struct MessageList<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let mut speak: Option<Uuid> = None;

        egui::ScrollArea::vertical()
            .id_salt("message_list")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing);

                if let Some(notice) = &self.state.merge_notice {
                    ui.vertical_centered(|ui| {
                        let response = ui.label(RichText::new(notice).color(self.theme.success));
                        let label = format!("Notice: {}", notice);
                        set_label(&response, WidgetType::Label, true, label);
                    });
                    ui.add_space(self.theme.spacing_sm);
                }

                if self.state.chats.current_chat().is_none() {
                    self.show_placeholder(ui, "chat.noChat");
                } else if self.state.current_messages().is_empty() {
                    self.show_placeholder(ui, "chat.empty");
                } else {
                    for message in self.state.current_messages() {
                        if self.show_message(ui, message) {
                            speak = Some(message.id);
                        }
                        ui.add_space(self.theme.spacing_sm);
                    }
                }

                ui.add_space(self.theme.spacing);
            });

        if let Some(message_id) = speak {
            self.state.toggle_speech(message_id);
        }
    }

    fn show_placeholder(&self, ui: &mut egui::Ui, key: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new(self.state.t(key))
                    .size(15.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    /// Returns true when the read-aloud button was clicked
    fn show_message(&self, ui: &mut egui::Ui, message: &Message) -> bool {
        if message.is_system() {
            ui.vertical_centered(|ui| {
                let response = ui.label(
                    RichText::new(&message.content)
                        .size(12.0)
                        .italics()
                        .color(self.theme.system_text),
                );
                set_label(
                    &response,
                    WidgetType::Label,
                    true,
                    format!("System message: {}", message.content),
                );
            });
            return false;
        }

        let rtl = self.state.is_rtl();
        let is_user = message.role == Role::User;
        // User messages go to the trailing edge
        let at_right = is_user != rtl;
        let align = if at_right { Align::RIGHT } else { Align::LEFT };

        let (bubble, text_color, sender) = if is_user {
            (self.theme.user_bubble, self.theme.user_text, self.state.t("chat.you"))
        } else {
            (
                self.theme.assistant_bubble,
                self.theme.text_primary,
                self.state.t("chat.assistant"),
            )
        };

        let mut clicked = false;
        ui.with_layout(Layout::top_down(align), |ui| {
            ui.label(RichText::new(sender).size(12.0).color(self.theme.text_muted));
            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;
            egui::Frame::none()
                .fill(bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    let response = ui.label(RichText::new(&message.content).color(text_color));
                    let role = if is_user { "User message" } else { "Assistant message" };
                    set_label(
                        &response,
                        WidgetType::Label,
                        true,
                        format!("{}: {}", role, message.content),
                    );
                });

            mirrored_row(ui, at_right, |ui| {
                ui.label(
                    RichText::new(message.timestamp.format("%H:%M").to_string())
                        .size(10.0)
                        .color(self.theme.text_muted),
                );

                if !is_user {
                    clicked = self.show_speak_button(ui, message);
                }
            });
        });

        clicked
    }

    fn show_speak_button(&self, ui: &mut egui::Ui, message: &Message) -> bool {
        let speaking = self.state.is_speaking_message(message.id);
        let (icon, key, color) = if speaking {
            ("⏹", "tts.stop", self.theme.active)
        } else {
            ("🔊", "tts.start", self.theme.text_secondary)
        };
        let tooltip = self.state.t(key);

        let response = ui.add(
            egui::Button::new(RichText::new(icon).size(13.0).color(color))
                .min_size(Vec2::splat(24.0))
                .frame(false),
        );
        set_label(
            &response,
            WidgetType::Button,
            true,
            format!("{}: {}", tooltip, message.content),
        );
        response.on_hover_text(tooltip).clicked()
    }
}
