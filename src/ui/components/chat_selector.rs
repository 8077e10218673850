//! Previous-chat picker for merging another chat into the current one.
//! Hidden when there is no other chat.

use super::{column_layout, mirrored_row, set_label};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, WidgetType};
use uuid::Uuid;

pub struct ChatSelector<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ChatSelector<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        if self.state.chats.current_chat().is_none()
            || self.state.chats.selectable_chats().next().is_none()
        {
            return;
        }

        let rtl = self.state.is_rtl();
        let mut toggle = false;
        let mut picked: Option<Uuid> = None;

        ui.with_layout(column_layout(rtl), |ui| {
            let label = self.state.t("chat.addPreviousChat");
            let arrow = if self.state.chat_selector_open { "▾" } else { "▸" };
            let response = ui.add(
                egui::Button::new(RichText::new(format!("{} {}", arrow, label)).size(13.0))
                    .rounding(self.theme.button_rounding),
            );
            set_label(&response, WidgetType::Button, true, label);
            toggle = response.clicked();

            if !self.state.chat_selector_open {
                return;
            }

            egui::Frame::none()
                .fill(self.theme.bg_secondary)
                .rounding(self.theme.card_rounding)
                .inner_margin(self.theme.spacing_sm)
                .show(ui, |ui| {
                    for chat in self.state.chats.selectable_chats() {
                        let count = chat.message_count().to_string();
                        let updated = chat.updated_at.format("%Y-%m-%d %H:%M").to_string();
                        let details = format!(
                            "{} · {}",
                            self.state
                                .catalog
                                .t_with("chat.messageCount", &[("count", count.as_str())]),
                            self.state
                                .catalog
                                .t_with("chat.lastUpdated", &[("time", updated.as_str())]),
                        );

                        mirrored_row(ui, rtl, |ui| {
                            let response = ui.button(chat.title.as_str());
                            set_label(
                                &response,
                                WidgetType::Button,
                                true,
                                format!("Add chat: {}", chat.title),
                            );
                            if response.clicked() {
                                picked = Some(chat.id);
                            }
                            ui.label(
                                RichText::new(details).size(11.0).color(self.theme.text_muted),
                            );
                        });
                    }
                });
        });

        if let Some(chat_id) = picked {
            self.state.merge_previous_chat(chat_id);
        } else if toggle {
            self.state.chat_selector_open = !self.state.chat_selector_open;
        }
    }
}
