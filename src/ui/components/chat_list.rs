//! Chat list: every chat, newest first; clicking one switches to it

use super::{column_layout, set_label};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{RichText, WidgetType};
use uuid::Uuid;

pub struct ChatList<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ChatList<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let rtl = self.state.is_rtl();
        let current = self.state.chats.current_chat_id();
        let mut clicked: Option<Uuid> = None;

        ui.with_layout(column_layout(rtl), |ui| {
            ui.label(
                RichText::new(self.state.t("chat.chats"))
                    .size(13.0)
                    .strong()
                    .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_sm);

            egui::ScrollArea::vertical()
                .id_salt("chat_list")
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for chat in self.state.chats.chats() {
                        let count = chat.message_count().to_string();
                        let subtitle = self
                            .state
                            .catalog
                            .t_with("chat.messageCount", &[("count", count.as_str())]);

                        let response = ui.selectable_label(
                            current == Some(chat.id),
                            RichText::new(&chat.title).color(self.theme.text_primary),
                        );
                        set_label(
                            &response,
                            WidgetType::SelectableLabel,
                            true,
                            format!("Chat: {}", chat.title),
                        );
                        if response.clicked() {
                            clicked = Some(chat.id);
                        }

                        ui.label(RichText::new(subtitle).size(11.0).color(self.theme.text_muted));
                        ui.add_space(4.0);
                    }
                });
        });

        if let Some(chat_id) = clicked {
            self.state.switch_chat(chat_id);
        }
    }
}
